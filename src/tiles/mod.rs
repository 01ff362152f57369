//! Tiles, the master tile set and the boneyard.

pub mod tile;
pub mod tile_set;

pub use tile::{End, Tile, SPINNER_BONUS};
pub use tile_set::{Boneyard, TileSet};
