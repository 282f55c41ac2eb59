use tracing::{debug, warn};

use crate::bits::{BitOrder, BitReader, BitWriter};
use crate::code::CodeTable;
use crate::error::{Error, Result};
use crate::frequency::FrequencyTable;
use crate::tree::HuffmanTree;

/// When the decoder stops reading the payload.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Termination {
    /// Stop once as many symbols as the frequency table records have been decoded.
    #[default]
    SymbolCount,
    /// Consume every bit of every payload byte. Padding bits that happen to
    /// complete a codeword are emitted as extra trailing symbols.
    ByteBoundary,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CodecOptions {
    pub bit_order: BitOrder,
    pub termination: Termination,
}

/// Result of encoding one input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encoded {
    /// Needed by the decoder; persist it with [`crate::store`].
    pub frequencies: FrequencyTable,
    pub codes: CodeTable,
    /// Packed codewords, zero-padded to a whole byte.
    pub payload: Vec<u8>,
    /// Number of payload bits before padding.
    pub bit_len: usize,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Codec {
    options: CodecOptions,
}

impl Codec {
    pub fn new(options: CodecOptions) -> Self {
        Self { options }
    }

    /// Count `input`, build its tree and code table, and pack every symbol.
    pub fn encode(&self, input: &[u8]) -> Result<Encoded> {
        let frequencies = FrequencyTable::from_bytes(input);
        let codes = match HuffmanTree::build(&frequencies) {
            Some(tree) => tree.code_table()?,
            None => CodeTable::new(),
        };

        let (payload, bit_len) = self.pack(input, &codes)?;
        debug!(
            input = input.len(),
            symbols = frequencies.len(),
            bits = bit_len,
            bytes = payload.len(),
            "encoded payload"
        );

        Ok(Encoded {
            frequencies,
            codes,
            payload,
            bit_len,
        })
    }

    /// Concatenate the codeword of every symbol of `input`, in order.
    pub fn pack(&self, input: &[u8], codes: &CodeTable) -> Result<(Vec<u8>, usize)> {
        let mut writer = BitWriter::with_capacity(self.options.bit_order, input.len() / 2);
        for &symbol in input {
            let code = codes
                .get(symbol)
                .ok_or(Error::AlphabetInconsistency { symbol })?;
            writer.write_all(code.bits());
        }

        let bit_len = writer.bit_count();
        Ok((writer.finish(), bit_len))
    }

    /// Rebuild the tree from `frequencies` and walk it bit by bit over `payload`.
    pub fn decode(&self, payload: &[u8], frequencies: &FrequencyTable) -> Result<Vec<u8>> {
        let Some(tree) = HuffmanTree::build(frequencies) else {
            if payload.is_empty() {
                return Ok(Vec::new());
            }
            return Err(Error::corrupt_store(format!(
                "no symbols recorded for a {} byte payload",
                payload.len()
            )));
        };

        let output = match self.options.termination {
            Termination::SymbolCount => unpack_counted(&tree, payload, self.options.bit_order)?,
            Termination::ByteBoundary => unpack_all(&tree, payload, self.options.bit_order),
        };
        debug!(
            payload = payload.len(),
            output = output.len(),
            "decoded payload"
        );

        Ok(output)
    }
}

fn unpack_counted(tree: &HuffmanTree, payload: &[u8], order: BitOrder) -> Result<Vec<u8>> {
    let expected = tree.weight();
    // no payload decodes to more symbols than it has bits
    let capacity = expected.min(payload.len() as u64 * 8);
    let mut output = Vec::with_capacity(usize::try_from(capacity).unwrap_or_default());
    let mut bits = BitReader::new(payload, order);
    let root = tree.root();

    while (output.len() as u64) < expected {
        let mut node = root;
        // a lone root leaf still owns a one-bit codeword
        loop {
            let Some(bit) = bits.read() else {
                return Err(Error::TruncatedPayload {
                    expected,
                    decoded: output.len() as u64,
                });
            };
            match tree.child(node, bit) {
                Some(next) => node = next,
                None => break,
            }
            if tree.symbol(node).is_some() {
                break;
            }
        }

        if let Some(symbol) = tree.symbol(node) {
            output.push(symbol);
        }
    }

    Ok(output)
}

fn unpack_all(tree: &HuffmanTree, payload: &[u8], order: BitOrder) -> Vec<u8> {
    let expected = tree.weight();
    let root = tree.root();
    let mut output = Vec::new();
    let mut node = root;

    for bit in BitReader::new(payload, order) {
        node = tree.child(node, bit).unwrap_or(node);
        if let Some(symbol) = tree.symbol(node) {
            output.push(symbol);
            node = root;
        }
    }

    if output.len() as u64 != expected {
        warn!(
            expected,
            decoded = output.len(),
            "byte-boundary decoding emitted padding symbols"
        );
    }

    output
}
