//! # byte_huffman
//!
//! Huffman compression over raw bytes.
//!
//! An artifact is a one-byte padding header followed by the packed code
//! bits. It does not carry the code table: decoding needs the code book
//! rebuilt from the same original bytes.
//!
//! ```rust
//! use byte_huffman::{codebook_from, compress, decompress};
//!
//! let source = b"abracadabra";
//! let packed = compress(source)?;
//! let book = codebook_from(source)?;
//! assert_eq!(decompress(&packed, book.reverse_map())?, source);
//! # Ok::<(), byte_huffman::HuffmanError>(())
//! ```

pub mod bit_vec;
pub mod codebook;
pub mod config;
pub mod error;
pub mod frequency;
pub mod huffman_codec;
pub mod hufftree;
pub mod min_heap;
pub mod packer;
pub mod unpacker;

pub use bit_vec::{BitVec, Code};
pub use codebook::{CodeBook, ReverseMap};
pub use config::CodecConfig;
pub use error::{HuffmanError, Result};
pub use frequency::FrequencyTable;
pub use huffman_codec::{
    codebook_from, compress, compress_file, decompress, decompress_file, HuffmanCodec,
};
pub use hufftree::{HuffNode, HuffmanTree};
