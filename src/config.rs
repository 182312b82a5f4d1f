use crate::tile_set::TileSet;

/// The geometry of the puzzle being searched.
///
/// Tiles are the integers `1..=tile_count`. The first `ring_size` of them
/// (in whatever order the search chooses) go on the outer ring; the rest fill
/// the interior. Every edge and every line must sum to `magic`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    tile_count: u8,
    ring_size: usize,
    magic: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self::ORDER_3
    }
}

impl Config {
    /// The classic 19-cell hexagon: 12 ring tiles, 7 inner tiles, constant 38.
    pub const ORDER_3: Config = Config {
        tile_count: 19,
        ring_size: 12,
        magic: 38,
    };

    pub fn new(tile_count: u8, ring_size: usize, magic: u32) -> Result<Self, Error> {
        if ring_size < 4 {
            return Err(Error::RingTooSmall { ring_size });
        }
        if ring_size % 2 != 0 {
            return Err(Error::RingSizeOdd { ring_size });
        }
        if tile_count > TileSet::CAPACITY {
            return Err(Error::TooManyTiles {
                tile_count,
                max: TileSet::CAPACITY,
            });
        }
        if usize::from(tile_count) < ring_size {
            return Err(Error::NotEnoughTiles {
                tile_count,
                ring_size,
            });
        }
        Ok(Self {
            tile_count,
            ring_size,
            magic,
        })
    }

    pub fn tile_count(&self) -> u8 {
        self.tile_count
    }

    pub fn ring_size(&self) -> usize {
        self.ring_size
    }

    pub fn magic(&self) -> u32 {
        self.magic
    }

    /// Number of tiles left over for the interior.
    pub fn inner_count(&self) -> usize {
        usize::from(self.tile_count) - self.ring_size
    }

    pub fn edge_count(&self) -> usize {
        self.ring_size / 2
    }

    /// Ring indices at which an edge starts: `0, 2, 4, ...`.
    pub fn edge_starts(&self) -> impl Iterator<Item = usize> {
        (0..self.ring_size).step_by(2)
    }
}

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum Error {
    #[error("a ring needs at least 4 cells, got {ring_size}")]
    RingTooSmall { ring_size: usize },
    #[error("ring size must be even, got {ring_size}")]
    RingSizeOdd { ring_size: usize },
    #[error("{tile_count} tiles cannot fill a ring of {ring_size} cells")]
    NotEnoughTiles { tile_count: u8, ring_size: usize },
    #[error("at most {max} tiles are supported, got {tile_count}")]
    TooManyTiles { tile_count: u8, max: u8 },
    #[error(
        "layout expects a ring of {expected_ring} and {expected_inner} inner tiles, \
         config has a ring of {ring} and {inner} inner tiles"
    )]
    LayoutMismatch {
        expected_ring: usize,
        expected_inner: usize,
        ring: usize,
        inner: usize,
    },
    #[error("the ring sums to {ring} but the interior solver to {solver}")]
    MagicMismatch { ring: u32, solver: u32 },
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn order_3_is_default() {
        let config = Config::default();
        assert_eq!(config.tile_count(), 19);
        assert_eq!(config.ring_size(), 12);
        assert_eq!(config.inner_count(), 7);
        assert_eq!(config.magic(), 38);
        assert_eq!(
            config.edge_starts().collect::<Vec<_>>(),
            vec![0, 2, 4, 6, 8, 10]
        );
    }

    #[rstest]
    #[case(7, 6, 12)]
    #[case(19, 12, 38)]
    #[case(8, 8, 20)]
    fn accepts_valid_geometry(
        #[case] tile_count: u8,
        #[case] ring_size: usize,
        #[case] magic: u32,
    ) {
        let config = Config::new(tile_count, ring_size, magic).unwrap();
        assert_eq!(config.edge_count(), ring_size / 2);
    }

    #[rstest]
    #[case(7, 2, Error::RingTooSmall { ring_size: 2 })]
    #[case(9, 7, Error::RingSizeOdd { ring_size: 7 })]
    #[case(5, 6, Error::NotEnoughTiles { tile_count: 5, ring_size: 6 })]
    #[case(64, 12, Error::TooManyTiles { tile_count: 64, max: 63 })]
    fn rejects_invalid_geometry(
        #[case] tile_count: u8,
        #[case] ring_size: usize,
        #[case] expected: Error,
    ) {
        assert_eq!(Config::new(tile_count, ring_size, 10), Err(expected));
    }
}
