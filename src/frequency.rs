use std::collections::BTreeMap;

/// Occurrence count of every distinct byte in an input.
///
/// Backed by an ordered map so equality ignores the order in which
/// symbols were first seen, and iteration is always ascending by symbol.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: BTreeMap<u8, u64>,
}

impl FrequencyTable {
    /// Count every byte of `input` in one pass.
    pub fn from_bytes(input: &[u8]) -> Self {
        let mut counts: BTreeMap<u8, u64> = BTreeMap::new();
        for &symbol in input {
            *counts.entry(symbol).or_default() += 1;
        }

        Self { counts }
    }

    pub fn get(&self, symbol: u8) -> Option<u64> {
        self.counts.get(&symbol).copied()
    }

    /// Number of distinct symbols.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts, i.e. the length of the counted input.
    /// Saturates at `u64::MAX`.
    pub fn total(&self) -> u64 {
        self.counts
            .values()
            .fold(0u64, |total, &count| total.saturating_add(count))
    }

    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts.iter().map(|(&symbol, &count)| (symbol, count))
    }
}

impl FromIterator<(u8, u64)> for FrequencyTable {
    /// Later entries for the same symbol replace earlier ones. Zero counts are dropped.
    fn from_iter<I: IntoIterator<Item = (u8, u64)>>(iter: I) -> Self {
        let counts = iter.into_iter().filter(|&(_, count)| count > 0).collect();
        Self { counts }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_each_byte() {
        let table = FrequencyTable::from_bytes(b"abracadabra");
        assert_eq!(table.get(b'a'), Some(5));
        assert_eq!(table.get(b'b'), Some(2));
        assert_eq!(table.get(b'r'), Some(2));
        assert_eq!(table.get(b'c'), Some(1));
        assert_eq!(table.get(b'd'), Some(1));
        assert_eq!(table.get(b'z'), None);
        assert_eq!(table.len(), 5);
        assert_eq!(table.total(), 11);
    }

    #[test]
    fn empty_input_gives_empty_table() {
        let table = FrequencyTable::from_bytes(b"");
        assert!(table.is_empty());
        assert_eq!(table.total(), 0);
    }

    #[test]
    fn equality_ignores_insertion_order() {
        let a: FrequencyTable = [(b'x', 2), (b'y', 7)].into_iter().collect();
        let b: FrequencyTable = [(b'y', 7), (b'x', 2)].into_iter().collect();
        assert_eq!(a, b);
        assert_eq!(a, FrequencyTable::from_bytes(b"yyxyyyxyy"));
    }
}
