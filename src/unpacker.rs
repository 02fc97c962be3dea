//! Decode direction: bytes back to a bit stream, strip the padding, and
//! match codes against the reverse map.

use crate::bit_vec::BitVec;
use crate::codebook::ReverseMap;
use crate::error::{HuffmanError, Result};
use crate::packer::HEADER_BITS;

/// Expand every byte into its eight bits, MSB first.
pub fn unpack(bytes: &[u8]) -> BitVec {
    let bits = BitVec::from_bytes(bytes);
    tracing::debug!(bytes = bytes.len(), bits = bits.len(), "artifact unpacked");
    bits
}

/// Read the padding header, drop it, and drop the filler bits it announces.
pub fn unpad(padded: &BitVec) -> Result<BitVec> {
    let extra = padded
        .read_bits(0, HEADER_BITS)
        .ok_or(HuffmanError::TruncatedHeader { bits: padded.len() })? as u8;
    let available = padded.len() - HEADER_BITS;

    if extra > 7 || (extra as usize) > available {
        return Err(HuffmanError::MalformedPadding { extra, available });
    }

    let payload_len = available - extra as usize;
    let mut payload = padded.tail(HEADER_BITS);
    if payload.iter().skip(payload_len).any(|bit| bit) {
        tracing::warn!(extra, "padding bits are not zero");
    }
    payload.truncate(payload_len);

    tracing::debug!(extra, payload_bits = payload.len(), "padding removed");
    Ok(payload)
}

/// Walk the bits left to right, emitting a symbol whenever the bits read
/// since the last symbol form a known code.
pub fn decode(bits: &BitVec, reverse: &ReverseMap) -> Result<Vec<u8>> {
    let max_len = reverse.keys().map(BitVec::len).max().unwrap_or(0);
    let mut out = Vec::new();
    let mut candidate = BitVec::with_capacity(max_len);
    let mut start = 0;

    for (i, bit) in bits.iter().enumerate() {
        candidate.push_bit(bit);
        if let Some(&byte) = reverse.get(&candidate) {
            out.push(byte);
            candidate.clear();
            start = i + 1;
        } else if candidate.len() >= max_len {
            return Err(HuffmanError::UnknownCode { offset: start });
        }
    }

    if !candidate.is_empty() {
        return Err(HuffmanError::IncompleteCode {
            pending: candidate.len(),
        });
    }

    tracing::debug!(bits = bits.len(), symbols = out.len(), "bit stream decoded");
    Ok(out)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::codebook::CodeBook;

    fn bits(s: &str) -> BitVec {
        s.parse().unwrap()
    }

    #[test]
    fn unpack_is_msb_first() {
        assert_eq!(unpack(&[0x05, 0xA0]).to_string(), "0000010110100000");
        assert!(unpack(&[]).is_empty());
    }

    #[test]
    fn unpad_strips_header_and_filler() {
        let payload = unpad(&bits("0000010110100000")).unwrap();
        assert_eq!(payload, bits("101"));
    }

    #[test]
    fn unpad_zero_padding() {
        let payload = unpad(&bits("0000000011110000")).unwrap();
        assert_eq!(payload, bits("11110000"));
    }

    #[test]
    fn unpad_header_only_is_empty() {
        assert!(unpad(&unpack(&[0x00])).unwrap().is_empty());
    }

    #[test]
    fn unpad_rejects_out_of_range_header() {
        let err = unpad(&unpack(&[0xFF, 0x00])).unwrap_err();
        assert!(matches!(
            err,
            HuffmanError::MalformedPadding {
                extra: 255,
                available: 8
            }
        ));
    }

    #[test]
    fn unpad_rejects_more_padding_than_bits() {
        let err = unpad(&unpack(&[0x03])).unwrap_err();
        assert!(matches!(
            err,
            HuffmanError::MalformedPadding {
                extra: 3,
                available: 0
            }
        ));
    }

    #[test]
    fn unpad_rejects_missing_header() {
        assert!(matches!(
            unpad(&unpack(&[])),
            Err(HuffmanError::TruncatedHeader { bits: 0 })
        ));
    }

    #[test]
    fn decode_abracadabra() {
        let book = CodeBook::from_bytes(b"abracadabra").unwrap();
        let decoded = decode(&bits("01101110100010101101110"), book.reverse_map()).unwrap();
        assert_eq!(decoded, b"abracadabra");
    }

    #[test]
    fn decode_stops_mid_code() {
        let book = CodeBook::from_bytes(b"abracadabra").unwrap();
        let err = decode(&bits("011011"), book.reverse_map()).unwrap_err();
        assert!(matches!(err, HuffmanError::IncompleteCode { pending: 2 }));
    }

    #[test]
    fn decode_with_empty_map() {
        let book = CodeBook::empty();
        assert!(decode(&BitVec::new(), book.reverse_map()).unwrap().is_empty());
        assert!(matches!(
            decode(&bits("0"), book.reverse_map()),
            Err(HuffmanError::UnknownCode { offset: 0 })
        ));
    }

    #[test]
    fn decode_with_incomplete_map() {
        let reverse: ReverseMap = [(bits("0"), b'a'), (bits("10"), b'b')].into_iter().collect();
        let err = decode(&bits("011"), &reverse).unwrap_err();
        assert!(matches!(err, HuffmanError::UnknownCode { offset: 1 }));
    }
}
