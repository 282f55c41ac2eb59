use std::collections::BTreeMap;
use std::fmt;

use crate::error::{Error, Result};

/// Bit sequence assigned to one symbol, first bit = first edge from the root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Codeword {
    bits: Vec<bool>,
}

impl Codeword {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of this codeword extended by one bit.
    pub fn with(&self, bit: bool) -> Self {
        let mut bits = Vec::with_capacity(self.bits.len() + 1);
        bits.extend_from_slice(&self.bits);
        bits.push(bit);
        Self { bits }
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    pub fn is_prefix_of(&self, other: &Codeword) -> bool {
        other.bits.starts_with(&self.bits)
    }
}

impl From<&str> for Codeword {
    /// Parse a textual codeword; any character other than `'1'` is a zero bit.
    fn from(text: &str) -> Self {
        Self {
            bits: text.chars().map(|c| c == '1').collect(),
        }
    }
}

impl fmt::Display for Codeword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in &self.bits {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Symbol to codeword mapping derived from a Huffman tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeTable {
    codes: BTreeMap<u8, Codeword>,
}

impl CodeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the codeword of `symbol`. A second insertion of the same symbol
    /// means the tree it was derived from is broken.
    pub fn insert(&mut self, symbol: u8, code: Codeword) -> Result<()> {
        match self.codes.entry(symbol) {
            std::collections::btree_map::Entry::Occupied(_) => {
                Err(Error::AmbiguousSymbol { symbol })
            }
            std::collections::btree_map::Entry::Vacant(slot) => {
                slot.insert(code);
                Ok(())
            }
        }
    }

    pub fn get(&self, symbol: u8) -> Option<&Codeword> {
        self.codes.get(&symbol)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u8, &Codeword)> + '_ {
        self.codes.iter().map(|(&symbol, code)| (symbol, code))
    }

    /// True when no codeword is a prefix of another one.
    pub fn is_prefix_free(&self) -> bool {
        let codes: Vec<&Codeword> = self.codes.values().collect();
        codes.iter().enumerate().all(|(i, a)| {
            codes
                .iter()
                .enumerate()
                .all(|(j, b)| i == j || !a.is_prefix_of(b))
        })
    }
}
