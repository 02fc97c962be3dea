use std::collections::BTreeMap;

/// Occurrence count of every byte value seen in an input.
///
/// Only observed bytes are present, so no entry ever holds a zero count.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: BTreeMap<u8, usize>,
}

impl FrequencyTable {
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let counts = bytes.iter().copied().fold(BTreeMap::new(), |mut acc, byte| {
            *acc.entry(byte).or_insert(0) += 1;
            acc
        });
        tracing::debug!(
            input_len = bytes.len(),
            distinct = counts.len(),
            "frequency table built"
        );
        FrequencyTable { counts }
    }

    pub fn get(&self, byte: u8) -> usize {
        self.counts.get(&byte).copied().unwrap_or(0)
    }

    /// Number of distinct byte values.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts, which is the length of the input.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Entries in ascending byte order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, usize)> + '_ {
        self.counts.iter().map(|(&byte, &count)| (byte, count))
    }
}

impl FromIterator<(u8, usize)> for FrequencyTable {
    /// Zero counts are dropped; repeated bytes accumulate.
    fn from_iter<I: IntoIterator<Item = (u8, usize)>>(iter: I) -> Self {
        let mut counts = BTreeMap::new();
        for (byte, count) in iter.into_iter().filter(|&(_, c)| c > 0) {
            *counts.entry(byte).or_insert(0) += count;
        }
        FrequencyTable { counts }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn counts_abracadabra() {
        let table = FrequencyTable::from_bytes(b"abracadabra");
        assert_eq!(table.get(b'a'), 5);
        assert_eq!(table.get(b'b'), 2);
        assert_eq!(table.get(b'r'), 2);
        assert_eq!(table.get(b'c'), 1);
        assert_eq!(table.get(b'd'), 1);
        assert_eq!(table.get(b'z'), 0);
        assert_eq!(table.len(), 5);
        assert_eq!(table.total(), 11);
    }

    #[test]
    fn empty_input_gives_empty_table() {
        let table = FrequencyTable::from_bytes(&[]);
        assert!(table.is_empty());
        assert_eq!(table.total(), 0);
    }

    #[test]
    fn iterates_in_byte_order() {
        let table = FrequencyTable::from_bytes(&[3, 1, 2, 1, 255, 0]);
        let entries: Vec<_> = table.iter().collect();
        assert_eq!(entries, vec![(0, 1), (1, 2), (2, 1), (3, 1), (255, 1)]);
    }

    #[test]
    fn collect_drops_zero_counts() {
        let table: FrequencyTable = vec![(7, 0), (9, 3), (9, 1)].into_iter().collect();
        assert_eq!(table.len(), 1);
        assert_eq!(table.get(9), 4);
    }
}
