//! Encode direction: bytes to codes, codes to a padded, byte-aligned stream.
//!
//! Stream layout:
//!
//! ```text
//! [byte 0]      padding bit count (0-7)
//! [byte 1..N-1] code bits, MSB first, last byte zero-filled
//! ```

use crate::bit_vec::BitVec;
use crate::codebook::CodeBook;
use crate::error::{HuffmanError, Result};
use crate::frequency::FrequencyTable;

/// Width of the padding header in bits.
pub const HEADER_BITS: usize = 8;

/// Concatenate the code of every input byte, in input order.
///
/// The output buffer is sized to the exact payload length.
pub fn encode(data: &[u8], codebook: &CodeBook) -> Result<BitVec> {
    let payload_bits = codebook.encoded_bits(&FrequencyTable::from_bytes(data))?;
    let mut bits = BitVec::with_capacity(payload_bits);
    for &byte in data {
        bits.extend_from(codebook.code_of(byte)?);
    }
    tracing::debug!(symbols = data.len(), bits = bits.len(), "input encoded");
    Ok(bits)
}

/// Number of zero bits needed to bring `len` up to a multiple of 8.
pub fn padding_for(len: usize) -> u8 {
    ((8 - len % 8) % 8) as u8
}

/// Prefix the 8-bit padding header and append the filler zeros.
pub fn pad(bits: &BitVec) -> BitVec {
    let extra = padding_for(bits.len());
    let mut padded = BitVec::with_capacity(HEADER_BITS + bits.len() + extra as usize);
    padded.push_bits(extra as u32, HEADER_BITS);
    padded.extend_from(bits);
    for _ in 0..extra {
        padded.push_bit(false);
    }
    tracing::debug!(payload_bits = bits.len(), extra, "bit stream padded");
    padded
}

/// Turn a byte-aligned bit stream into bytes, eight bits per byte.
pub fn pack(padded: BitVec) -> Result<Vec<u8>> {
    if padded.len() % 8 != 0 {
        return Err(HuffmanError::UnalignedPack { bits: padded.len() });
    }
    let bytes = padded.into_bytes();
    tracing::debug!(bytes = bytes.len(), "bit stream packed");
    Ok(bytes)
}
