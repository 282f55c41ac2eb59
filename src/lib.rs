//! Static Huffman coder for byte streams.
//!
//! Encoding counts every byte, builds a Huffman tree from the counts, packs
//! each byte's codeword into a zero-padded payload and returns the counts,
//! which must be stored next to the payload (see [`store`]). Decoding rebuilds
//! the identical tree from those counts and walks it bit by bit.
//!
//! ```
//! use huff::Codec;
//!
//! let codec = Codec::default();
//! let encoded = codec.encode(b"abracadabra")?;
//! let restored = codec.decode(&encoded.payload, &encoded.frequencies)?;
//! assert_eq!(restored, b"abracadabra");
//! # Ok::<(), huff::Error>(())
//! ```

pub mod bits;
pub mod code;
pub mod codec;
pub mod error;
pub mod frequency;
pub mod job;
pub mod store;
pub mod tree;

pub use bits::BitOrder;
pub use code::{CodeTable, Codeword};
pub use codec::{Codec, CodecOptions, Encoded, Termination};
pub use error::{Error, Result};
pub use frequency::FrequencyTable;
pub use job::{Job, Mode, Report};
pub use tree::HuffmanTree;
