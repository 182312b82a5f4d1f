use std::ops::Index;

use log::trace;

use crate::{config::Config, tile_set::TileSet};

/// The outer ring of the hexagon, read clockwise from a corner.
///
/// Edges start at every even index `i` and cover cells `i`, `i + 1` and
/// `i + 2`, wrapping at the end so that the last edge closes on cell 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ring {
    config: Config,
    values: Vec<u8>,
}

impl Ring {
    /// A ring whose every slot holds the smallest value unused before it.
    fn canonical(config: Config) -> Self {
        let mut ring = Self {
            config,
            values: vec![0; config.ring_size()],
        };
        ring.adjust(0);
        ring
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn values(&self) -> &[u8] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Get the value at `idx`, wrapping once past the end of the ring.
    pub fn get(&self, idx: usize) -> Option<&u8> {
        let len = self.values.len();
        (idx <= len).then(|| &self.values[idx % len])
    }

    /// Sum of the edge starting at `start`.
    ///
    /// # Panics
    ///
    /// If `start` is odd or not inside the ring.
    pub fn sum(&self, start: usize) -> u32 {
        assert!(
            start % 2 == 0 && start < self.len(),
            "edges start at even indices below {}, got {start}",
            self.len()
        );
        (start..start + 3).map(|idx| u32::from(self[idx])).sum()
    }

    pub fn is_edge_correct(&self, start: usize) -> bool {
        self.sum(start) == self.config.magic()
    }

    /// `true` when every edge sums to the magic constant.
    pub fn is_correct(&self) -> bool {
        self.config
            .edge_starts()
            .all(|start| self.is_edge_correct(start))
    }

    /// Start of the first edge lying entirely within `0..=upto` whose sum is wrong.
    pub fn first_incorrect_edge(&self, upto: usize) -> Option<usize> {
        self.config
            .edge_starts()
            .take_while(|start| start + 2 <= upto)
            .find(|&start| !self.is_edge_correct(start))
    }

    fn used_before(&self, idx: usize) -> TileSet {
        self.values[..idx].iter().copied().collect()
    }

    /// Fill `from..` left to right, each slot with the smallest value unused so far.
    fn adjust(&mut self, from: usize) {
        let tile_count = self.config.tile_count();
        let mut used = self.used_before(from);
        for slot in &mut self.values[from..] {
            // the config guarantees there are at least as many tiles as slots
            let value = used
                .smallest_missing(tile_count)
                .expect("tile_count >= ring_size");
            used.insert(value);
            *slot = value;
        }
    }
}

impl Index<usize> for Ring {
    type Output = u8;

    fn index(&self, idx: usize) -> &Self::Output {
        self.get(idx).unwrap()
    }
}

/// Walks every canonical ring configuration in lexicographic order, skipping
/// runs of states which cannot repair an edge that is already wrong.
///
/// The enumerator is also an [`Iterator`] over snapshots of its states, the
/// first item being the seed itself.
#[derive(Debug, Clone)]
pub struct RingEnumerator {
    ring: Ring,
    started: bool,
    exhausted: bool,
}

impl RingEnumerator {
    /// Start from the smallest canonical ring, `1, 2, ..., ring_size`.
    pub fn new(config: Config) -> Self {
        Self::from_ring(Ring::canonical(config))
    }

    /// Start from a fixed prefix; the remaining slots are canonicalised.
    pub fn with_prefix(config: Config, prefix: &[u8]) -> Result<Self, Error> {
        if prefix.len() > config.ring_size() {
            return Err(Error::PrefixTooLong {
                len: prefix.len(),
                ring_size: config.ring_size(),
            });
        }
        let mut seen = TileSet::new();
        for &value in prefix {
            if !(1..=config.tile_count()).contains(&value) {
                return Err(Error::ValueOutOfRange {
                    value,
                    tile_count: config.tile_count(),
                });
            }
            if !seen.insert(value) {
                return Err(Error::DuplicateValue { value });
            }
        }

        let mut values = vec![0; config.ring_size()];
        values[..prefix.len()].copy_from_slice(prefix);
        let mut ring = Ring { config, values };
        ring.adjust(prefix.len());
        Ok(Self::from_ring(ring))
    }

    fn from_ring(ring: Ring) -> Self {
        Self {
            ring,
            started: false,
            exhausted: false,
        }
    }

    pub fn ring(&self) -> &Ring {
        &self.ring
    }

    /// Move to the next candidate ring.
    ///
    /// Returns `false` once the canonical space is exhausted; the ring is left
    /// untouched in that case, and every later call also returns `false`.
    pub fn advance(&mut self) -> bool {
        let ring = &mut self.ring;
        let last = ring.len() - 1;
        let tile_count = ring.config.tile_count();

        let mut idx = match ring.first_incorrect_edge(last) {
            Some(start) => {
                trace!("edge {start} sums to {}, jumping to slot {}", ring.sum(start), start + 2);
                start + 2
            }
            None => last,
        };

        loop {
            let used = ring.used_before(idx);
            let next = (ring.values[idx] + 1..=tile_count).find(|&value| !used.contains(value));
            if let Some(value) = next {
                ring.values[idx] = value;
                ring.adjust(idx + 1);
                return true;
            }
            match idx.checked_sub(1) {
                Some(prev) => idx = prev,
                None => {
                    self.exhausted = true;
                    return false;
                }
            }
        }
    }
}

impl Iterator for RingEnumerator {
    type Item = Vec<u8>;

    fn next(&mut self) -> Option<Self::Item> {
        if !self.started {
            self.started = true;
        } else if self.exhausted || !self.advance() {
            return None;
        }
        Some(self.ring.values.clone())
    }
}

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum Error {
    #[error("a prefix of {len} values does not fit a ring of {ring_size}")]
    PrefixTooLong { len: usize, ring_size: usize },
    #[error("prefix value {value} is outside `1..={tile_count}`")]
    ValueOutOfRange { value: u8, tile_count: u8 },
    #[error("prefix value {value} appears more than once")]
    DuplicateValue { value: u8 },
}
