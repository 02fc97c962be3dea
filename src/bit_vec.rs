use std::fmt;
use std::str::FromStr;

/// A growable sequence of bits, packed most-significant-bit first.
///
/// Bits past `bit_count` in the last byte are always zero, so two vectors
/// compare and hash equal exactly when they hold the same bit sequence.
#[derive(Default, Debug, Clone, PartialEq, Eq, Hash)]
pub struct BitVec {
    bits: Vec<u8>,
    bit_count: usize,
}

/// A single symbol's code: the path from the tree root to its leaf.
pub type Code = BitVec;

impl BitVec {
    pub fn new() -> Self {
        BitVec {
            bits: Vec::new(),
            bit_count: 0,
        }
    }

    pub fn with_capacity(bits: usize) -> Self {
        BitVec {
            bits: Vec::with_capacity(bits.div_ceil(8)),
            bit_count: 0,
        }
    }

    /// Every bit of `bytes`, eight per byte.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        BitVec {
            bits: bytes.to_vec(),
            bit_count: bytes.len() * 8,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bits
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bits
    }

    pub fn len(&self) -> usize {
        self.bit_count
    }

    pub fn is_empty(&self) -> bool {
        self.bit_count == 0
    }

    /// Bits the backing buffer can hold without reallocating.
    pub fn capacity(&self) -> usize {
        self.bits.capacity() * 8
    }

    pub fn push_bit(&mut self, bit: bool) {
        let byte_index = self.bit_count / 8; // which byte is target?
        let bit_offset = self.bit_count % 8; // which bit position is target?

        if byte_index >= self.bits.len() {
            self.bits.push(0);
        }

        if bit {
            self.bits[byte_index] |= 1 << (7 - bit_offset);
        }

        self.bit_count += 1;
    }

    /// Append all bits of `other`.
    pub fn extend_from(&mut self, other: &BitVec) {
        if self.bit_count % 8 == 0 {
            self.bits.truncate(self.bit_count / 8);
            self.bits.extend_from_slice(&other.bits);
            self.bit_count += other.bit_count;
            return;
        }
        for bit in other.iter() {
            self.push_bit(bit);
        }
    }

    /// Append the low `width` bits of `value`, high bit first.
    pub fn push_bits(&mut self, value: u32, width: usize) {
        for bit_pos in (0..width).rev() {
            self.push_bit((value >> bit_pos) & 1 != 0);
        }
    }

    pub fn get(&self, index: usize) -> Option<bool> {
        if index >= self.bit_count {
            return None;
        }
        Some(self.bits[index / 8] & (1 << (7 - index % 8)) != 0)
    }

    /// Read `width` bits starting at `start` as an unsigned integer, high bit first.
    pub fn read_bits(&self, start: usize, width: usize) -> Option<u32> {
        if width > 32 || start.checked_add(width)? > self.bit_count {
            return None;
        }
        (start..start + width).try_fold(0u32, |acc, i| Some((acc << 1) | self.get(i)? as u32))
    }

    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.bit_count).map(move |i| self.bits[i / 8] & (1 << (7 - i % 8)) != 0)
    }

    /// Keep the first `len` bits.
    pub fn truncate(&mut self, len: usize) {
        if len >= self.bit_count {
            return;
        }
        self.bits.truncate(len.div_ceil(8));
        if len % 8 != 0 {
            if let Some(last) = self.bits.last_mut() {
                *last &= !(0xFFu8 >> (len % 8));
            }
        }
        self.bit_count = len;
    }

    pub fn clear(&mut self) {
        self.bits.clear();
        self.bit_count = 0;
    }

    /// Bits `start..` as a new vector. Byte-aligned starts copy whole bytes.
    pub fn tail(&self, start: usize) -> BitVec {
        if start >= self.bit_count {
            return BitVec::new();
        }
        if start % 8 == 0 {
            return BitVec {
                bits: self.bits[start / 8..].to_vec(),
                bit_count: self.bit_count - start,
            };
        }
        let mut out = BitVec::with_capacity(self.bit_count - start);
        for bit in self.iter().skip(start) {
            out.push_bit(bit);
        }
        out
    }
}

impl fmt::Display for BitVec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self.iter() {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseBitsError(pub char);

impl fmt::Display for ParseBitsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid bit character {:?}", self.0)
    }
}

impl std::error::Error for ParseBitsError {}

impl FromStr for BitVec {
    type Err = ParseBitsError;

    /// Parse a string of `'0'` and `'1'` characters.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut out = BitVec::with_capacity(s.len());
        for c in s.chars() {
            match c {
                '0' => out.push_bit(false),
                '1' => out.push_bit(true),
                other => return Err(ParseBitsError(other)),
            }
        }
        Ok(out)
    }
}

impl FromIterator<bool> for BitVec {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        let mut out = BitVec::new();
        for bit in iter {
            out.push_bit(bit);
        }
        out
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn bits(s: &str) -> BitVec {
        s.parse().unwrap()
    }

    #[test]
    fn packs_msb_first() {
        let v = bits("1010000011");
        assert_eq!(v.len(), 10);
        assert_eq!(v.as_bytes(), &[0b1010_0000, 0b1100_0000]);
        assert_eq!(v.to_string(), "1010000011");
    }

    #[test]
    fn push_bits_writes_high_bit_first() {
        let mut v = BitVec::new();
        v.push_bits(0b110, 3);
        v.push_bits(6, 8);
        assert_eq!(v.to_string(), "11000000110");
        assert_eq!(v.read_bits(3, 8), Some(6));
        assert_eq!(v.read_bits(4, 8), None);
    }

    #[test]
    fn truncate_clears_dropped_bits() {
        let mut a = bits("1111111111");
        a.truncate(3);
        assert_eq!(a, bits("111"));
        assert_eq!(a.as_bytes(), &[0b1110_0000]);
    }

    #[test]
    fn extend_unaligned_and_aligned() {
        let mut a = bits("101");
        a.extend_from(&bits("11"));
        assert_eq!(a, bits("10111"));

        let mut b = bits("00000001");
        b.extend_from(&bits("1"));
        assert_eq!(b, bits("000000011"));
    }

    #[test]
    fn tail_matches_bitwise_skip() {
        let v = bits("110010101111000011");
        for start in 0..=v.len() + 1 {
            let expected: BitVec = v.iter().skip(start).collect();
            assert_eq!(v.tail(start), expected, "start {}", start);
        }
    }

    #[test]
    fn get_out_of_range() {
        let v = bits("01");
        assert_eq!(v.get(1), Some(true));
        assert_eq!(v.get(2), None);
    }

    #[test]
    fn rejects_non_binary_text() {
        assert_eq!("01x".parse::<BitVec>(), Err(ParseBitsError('x')));
    }
}
