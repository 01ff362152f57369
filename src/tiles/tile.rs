//! A single two-ended tile.
//!
//! Tiles are immutable values. Each end is either a pip count or the spinner
//! marker `S`, and the pair is normalised at construction:
//!
//! - numeric ends are stored low first
//! - a lone spinner end always sits in the `high` slot
//!
//! ```
//! use spinner_dominoes::tiles::{End, Tile};
//!
//! let tile = Tile::new(7, 2);
//! assert_eq!(tile.low(), End::Pips(2));
//! assert_eq!(tile.high(), End::Pips(7));
//! assert_eq!(tile.value(), 9);
//!
//! let spinner = Tile::from_ends(End::Spinner, End::Pips(4));
//! assert_eq!(spinner.high(), End::Spinner);
//! assert_eq!(spinner.value(), 14);
//! ```

use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// Points scored for each spinner end left in hand.
pub const SPINNER_BONUS: u32 = 10;

/// One end of a tile.
///
/// Variant order matters: every `Pips` value sorts below `Spinner`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum End {
    /// A numeric end.
    Pips(u8),
    /// The wildcard spinner marker.
    Spinner,
}

impl End {
    /// The pip count, or `None` for the spinner.
    #[must_use]
    pub const fn pips(self) -> Option<u8> {
        match self {
            End::Pips(p) => Some(p),
            End::Spinner => None,
        }
    }

    #[must_use]
    pub const fn is_spinner(self) -> bool {
        matches!(self, End::Spinner)
    }
}

impl std::fmt::Display for End {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            End::Pips(p) => write!(f, "{}", p),
            End::Spinner => write!(f, "S"),
        }
    }
}

/// An immutable tile.
///
/// `seq` is the position the tile set generator gave this tile. It only
/// keeps hands in a stable display order; equality and hashing ignore it.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Tile {
    low: End,
    high: End,
    value: u32,
    seq: u32,
}

impl Tile {
    /// Create a numeric tile with sequence number 0.
    #[must_use]
    pub fn new(a: u8, b: u8) -> Self {
        Self::from_ends(End::Pips(a), End::Pips(b))
    }

    /// Create a tile from arbitrary ends with sequence number 0.
    #[must_use]
    pub fn from_ends(a: End, b: End) -> Self {
        Self::with_seq(a, b, 0)
    }

    /// A tile carrying one spinner end.
    #[must_use]
    pub fn spinner(pips: u8) -> Self {
        Self::from_ends(End::Pips(pips), End::Spinner)
    }

    /// The spinner double `S|S`.
    #[must_use]
    pub fn spinner_double() -> Self {
        Self::from_ends(End::Spinner, End::Spinner)
    }

    /// Create a tile with an explicit sequence number.
    #[must_use]
    pub fn with_seq(a: End, b: End, seq: u32) -> Self {
        // End's ordering puts the spinner last, so a plain sort is the
        // normalisation for both numeric and spinner tiles.
        let (low, high) = if a <= b { (a, b) } else { (b, a) };

        let value = match (low, high) {
            (End::Spinner, End::Spinner) => 2 * SPINNER_BONUS,
            (End::Pips(p), End::Spinner) | (End::Spinner, End::Pips(p)) => p as u32 + SPINNER_BONUS,
            (End::Pips(l), End::Pips(h)) => l as u32 + h as u32,
        };

        Self { low, high, value, seq }
    }

    #[must_use]
    pub const fn low(&self) -> End {
        self.low
    }

    #[must_use]
    pub const fn high(&self) -> End {
        self.high
    }

    /// Points this tile costs when left in hand at round end.
    #[must_use]
    pub const fn value(&self) -> u32 {
        self.value
    }

    /// Generator sequence number (display order).
    #[must_use]
    pub const fn seq(&self) -> u32 {
        self.seq
    }

    #[must_use]
    pub fn is_double(&self) -> bool {
        self.low == self.high
    }

    #[must_use]
    pub fn is_spinner(&self) -> bool {
        self.high.is_spinner()
    }

    /// Does either end show exactly `pips`?
    #[must_use]
    pub fn has_pips(&self, pips: u8) -> bool {
        self.low == End::Pips(pips) || self.high == End::Pips(pips)
    }

    /// Can this tile attach to an open end showing `pips`?
    ///
    /// Spinner ends attach anywhere.
    #[must_use]
    pub fn matches(&self, pips: u8) -> bool {
        self.is_spinner() || self.has_pips(pips)
    }

    /// The end left exposed after attaching this tile to `pips`.
    ///
    /// For a spinner tile the numeric end is exposed whatever it was played
    /// on. Returns `None` for doubles and for tiles that cannot attach.
    #[must_use]
    pub fn counterpart(&self, pips: u8) -> Option<u8> {
        if self.is_double() {
            return None;
        }
        match (self.low, self.high) {
            (End::Pips(l), End::Spinner) => Some(l),
            (End::Pips(l), End::Pips(h)) if l == pips => Some(h),
            (End::Pips(l), End::Pips(h)) if h == pips => Some(l),
            _ => None,
        }
    }
}

impl PartialEq for Tile {
    fn eq(&self, other: &Self) -> bool {
        self.low == other.low && self.high == other.high
    }
}

impl Eq for Tile {}

impl Hash for Tile {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.low.hash(state);
        self.high.hash(state);
    }
}

impl std::fmt::Display for Tile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}|{}", self.low, self.high)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_normalisation() {
        let tile = Tile::new(9, 3);
        assert_eq!(tile.low(), End::Pips(3));
        assert_eq!(tile.high(), End::Pips(9));
        assert_eq!(format!("{}", tile), "3|9");
    }

    #[test]
    fn test_spinner_always_high() {
        let tile = Tile::from_ends(End::Spinner, End::Pips(0));
        assert_eq!(tile.low(), End::Pips(0));
        assert_eq!(tile.high(), End::Spinner);
        assert!(tile.is_spinner());
        assert!(!tile.is_double());
        assert_eq!(format!("{}", tile), "0|S");
    }

    #[test]
    fn test_values() {
        assert_eq!(Tile::new(4, 5).value(), 9);
        assert_eq!(Tile::new(0, 0).value(), 0);
        assert_eq!(Tile::spinner(3).value(), 3 + SPINNER_BONUS);
        assert_eq!(Tile::spinner_double().value(), 2 * SPINNER_BONUS);
    }

    #[test]
    fn test_double_flags() {
        assert!(Tile::new(6, 6).is_double());
        assert!(!Tile::new(6, 6).is_spinner());
        assert!(Tile::spinner_double().is_double());
        assert!(Tile::spinner_double().is_spinner());
    }

    #[test]
    fn test_equality_ignores_seq() {
        let a = Tile::with_seq(End::Pips(1), End::Pips(2), 4);
        let b = Tile::with_seq(End::Pips(2), End::Pips(1), 17);
        assert_eq!(a, b);
        assert_ne!(a.seq(), b.seq());
        assert_ne!(a, Tile::new(1, 3));
    }

    #[test]
    fn test_hash_matches_equality() {
        use std::collections::hash_map::DefaultHasher;

        let hash = |t: &Tile| {
            let mut h = DefaultHasher::new();
            t.hash(&mut h);
            h.finish()
        };

        let a = Tile::with_seq(End::Pips(5), End::Spinner, 1);
        let b = Tile::with_seq(End::Spinner, End::Pips(5), 99);
        assert_eq!(hash(&a), hash(&b));
    }

    #[test]
    fn test_matches_and_counterpart() {
        let tile = Tile::new(2, 7);
        assert!(tile.matches(7));
        assert!(!tile.matches(3));
        assert_eq!(tile.counterpart(7), Some(2));
        assert_eq!(tile.counterpart(2), Some(7));
        assert_eq!(tile.counterpart(3), None);

        let spinner = Tile::spinner(4);
        assert!(spinner.matches(8));
        assert_eq!(spinner.counterpart(8), Some(4));

        assert_eq!(Tile::new(5, 5).counterpart(5), None);
    }
}
