//! Search for an arrangement of `1..=19` on the order-3 magic hexagon in which
//! every straight line of cells sums to 38.
//!
//! The outer ring is enumerated by [`RingEnumerator`], which skips every run of
//! states that cannot repair an edge already known to be wrong. Each ring whose
//! edges all sum correctly is handed to [`InnerTileSolver`], which tries every
//! arrangement of the seven leftover tiles. [`Search`] ties the two together.

mod config;
mod interior;
mod ring;
mod search;
mod tile_set;

pub use config::{Config, Error as ConfigError};
pub use interior::{Cell, InnerTileSolver, InnerTiles, Layout, Line};
pub use ring::{Error as RingError, Ring, RingEnumerator};
pub use search::{Error as SearchError, Search, SearchOptions, SearchStats, Solution, Solutions};
pub use tile_set::TileSet;
