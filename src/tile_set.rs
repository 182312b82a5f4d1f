/// A set of tile values in `1..=63`, stored as a bitset.
///
/// Bit `n` is set when value `n` is present; bit 0 is never used.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TileSet(u64);

impl TileSet {
    /// The largest value a set can hold.
    pub const CAPACITY: u8 = 63;

    pub const fn new() -> Self {
        Self(0)
    }

    fn bit(value: u8) -> u64 {
        assert!(
            (1..=Self::CAPACITY).contains(&value),
            "tile value must be between 1 and {}, got {value}",
            Self::CAPACITY
        );
        1 << value
    }

    /// Insert a value, returning `false` if it was already present.
    pub fn insert(&mut self, value: u8) -> bool {
        let bit = Self::bit(value);
        let fresh = self.0 & bit == 0;
        self.0 |= bit;
        fresh
    }

    pub fn contains(&self, value: u8) -> bool {
        (1..=Self::CAPACITY).contains(&value) && self.0 & (1 << value) != 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// The smallest value in `1..=max` which is not in this set.
    pub fn smallest_missing(&self, max: u8) -> Option<u8> {
        (1..=max).find(|&value| !self.contains(value))
    }

    /// The values in `1..=max` which are not in this set, ascending.
    pub fn complement(&self, max: u8) -> Self {
        let mut out = Self::new();
        for value in (1..=max).filter(|&value| !self.contains(value)) {
            out.insert(value);
        }
        out
    }

    /// Iterate over the values in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        (1..=Self::CAPACITY).filter(|&value| self.contains(value))
    }
}

impl FromIterator<u8> for TileSet {
    fn from_iter<I: IntoIterator<Item = u8>>(iter: I) -> Self {
        let mut set = Self::new();
        for value in iter {
            set.insert(value);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_reports_duplicates() {
        let mut set = TileSet::new();
        assert!(set.insert(5));
        assert!(!set.insert(5));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn smallest_missing_skips_used_values() {
        let set: TileSet = [1, 2, 4].into_iter().collect();
        assert_eq!(set.smallest_missing(19), Some(3));

        let full: TileSet = (1..=3).collect();
        assert_eq!(full.smallest_missing(3), None);
    }

    #[test]
    fn complement_of_order_3_ring() {
        let ring: TileSet = [3, 17, 18, 11, 9, 14, 15, 13, 10, 12, 16, 19]
            .into_iter()
            .collect();
        let inner: Vec<u8> = ring.complement(19).iter().collect();
        assert_eq!(inner, vec![1, 2, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn contains_is_false_outside_range() {
        let set: TileSet = (1..=63).collect();
        assert!(!set.contains(0));
        assert!(!set.contains(64));
        assert!(set.contains(63));
    }

    #[test]
    #[should_panic(expected = "tile value must be between 1 and 63")]
    fn zero_is_rejected() {
        TileSet::new().insert(0);
    }
}
