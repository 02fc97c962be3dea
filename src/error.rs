//! Error types for the codec.

use thiserror::Error;

use crate::min_heap::HeapErr;

/// Result type alias for codec operations.
pub type Result<T> = std::result::Result<T, HuffmanError>;

#[derive(Debug, Error)]
pub enum HuffmanError {
    /// Source unreadable or destination unwritable.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The padding header is out of range or claims more bits than remain.
    #[error("malformed padding: header says {extra} filler bits, {available} payload bits available")]
    MalformedPadding { extra: u8, available: usize },

    /// The artifact is too short to hold the 8-bit padding header.
    #[error("truncated artifact: {bits} bits, need at least 8 for the padding header")]
    TruncatedHeader { bits: usize },

    /// A byte in the input has no code in the code book.
    #[error("no code for byte 0x{byte:02x}")]
    MissingCode { byte: u8 },

    /// The bit stream ended in the middle of a code.
    #[error("bit stream ended with {pending} unmatched bits")]
    IncompleteCode { pending: usize },

    /// The bits at `offset` do not start any known code.
    #[error("no code matches the bits at offset {offset}")]
    UnknownCode { offset: usize },

    /// Packing requires a whole number of bytes.
    #[error("cannot pack {bits} bits: length is not a multiple of 8")]
    UnalignedPack { bits: usize },

    /// A tree that cannot yield a prefix code, e.g. one byte on two leaves.
    #[error("malformed tree: {0}")]
    MalformedTree(String),

    #[error("priority queue error: {0}")]
    Heap(#[from] HeapErr),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl HuffmanError {
    /// True for failures caused by a damaged or foreign artifact.
    pub fn is_corrupt_input(&self) -> bool {
        matches!(
            self,
            HuffmanError::MalformedPadding { .. }
                | HuffmanError::TruncatedHeader { .. }
                | HuffmanError::IncompleteCode { .. }
                | HuffmanError::UnknownCode { .. }
        )
    }

    pub(crate) fn config(message: impl Into<String>) -> Self {
        HuffmanError::Config(message.into())
    }
}
