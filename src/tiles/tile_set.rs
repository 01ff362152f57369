//! The master tile set and the per-round draw pile.

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::tile::{End, Tile};
use crate::core::GameRng;
use crate::error::{Result, SpinnerError};

/// Every tile of one game, generated once.
///
/// Contains each unordered pair over `0..=max_pips` exactly once. With
/// spinners enabled it also holds one `n|S` tile per pip value and the
/// spinner double `S|S`. Sequence numbers follow generation order.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TileSet {
    max_pips: u8,
    include_spinner: bool,
    tiles: Vec<Tile>,
}

impl TileSet {
    /// Generate the complete set.
    ///
    /// Fails if `max_pips` is negative or does not fit a pip value.
    pub fn generate(max_pips: i32, include_spinner: bool) -> Result<Self> {
        let max = u8::try_from(max_pips)
            .ok()
            .filter(|&m| m < u8::MAX)
            .ok_or_else(|| SpinnerError::config(format!("invalid max_pips {}", max_pips)))?;

        let mut ends: Vec<End> = (0..=max).map(End::Pips).collect();
        if include_spinner {
            ends.push(End::Spinner);
        }

        let mut tiles = Vec::with_capacity(ends.len() * (ends.len() + 1) / 2);
        for (i, &low) in ends.iter().enumerate() {
            for &high in &ends[i..] {
                tiles.push(Tile::with_seq(low, high, tiles.len() as u32));
            }
        }

        trace!(max_pips = max, include_spinner, tiles = tiles.len(), "generated tile set");

        Ok(Self {
            max_pips: max,
            include_spinner,
            tiles,
        })
    }

    #[must_use]
    pub fn max_pips(&self) -> u8 {
        self.max_pips
    }

    #[must_use]
    pub fn include_spinner(&self) -> bool {
        self.include_spinner
    }

    #[must_use]
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Apply a uniformly random permutation in place.
    pub fn shuffle(&mut self, rng: &mut GameRng) {
        rng.shuffle(&mut self.tiles);
    }

    /// A fresh, independent draw pile holding the whole set.
    #[must_use]
    pub fn boneyard(&self) -> Boneyard {
        Boneyard {
            tiles: self.tiles.clone(),
        }
    }
}

impl std::fmt::Display for TileSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write_tiles(f, &self.tiles)
    }
}

/// Undealt tiles of the current round.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Boneyard {
    tiles: Vec<Tile>,
}

impl Boneyard {
    /// A draw pile holding exactly `tiles`.
    #[must_use]
    pub fn from_tiles(tiles: Vec<Tile>) -> Self {
        Self { tiles }
    }

    /// Remove and return a uniformly random tile, or `None` when empty.
    ///
    /// The tile is taken by position, so duplicates by value never matter.
    pub fn draw(&mut self, rng: &mut GameRng) -> Option<Tile> {
        if self.tiles.is_empty() {
            return None;
        }
        let index = rng.gen_index(self.tiles.len());
        Some(self.tiles.swap_remove(index))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    #[must_use]
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }
}

impl std::fmt::Display for Boneyard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write_tiles(f, &self.tiles)
    }
}

pub(crate) fn write_tiles(f: &mut std::fmt::Formatter<'_>, tiles: &[Tile]) -> std::fmt::Result {
    if tiles.is_empty() {
        return write!(f, "Empty");
    }
    for (i, tile) in tiles.iter().enumerate() {
        if i > 0 {
            write!(f, " ")?;
        }
        write!(f, "{}", tile)?;
    }
    Ok(())
}
