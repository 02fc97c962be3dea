use std::collections::{BTreeMap, HashMap};

use crate::bit_vec::{BitVec, Code};
use crate::error::{HuffmanError, Result};
use crate::frequency::FrequencyTable;
use crate::hufftree::{HuffNode, HuffmanTree};

/// Code to symbol lookup used by the decoder.
pub type ReverseMap = HashMap<Code, u8>;

/// Bidirectional mapping between bytes and their prefix-free codes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeBook {
    codes: BTreeMap<u8, Code>,
    reverse: ReverseMap,
}

impl CodeBook {
    /// A code book with no symbols, matching empty input.
    pub fn empty() -> Self {
        CodeBook::default()
    }

    /// Build the code book for `bytes` from scratch.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        match HuffmanTree::from_bytes(bytes)? {
            Some(tree) => CodeBook::from_tree(&tree),
            None => Ok(CodeBook::empty()),
        }
    }

    /// Walk the tree depth-first, appending 0 for left and 1 for right.
    ///
    /// A tree that is a single leaf gets the one-bit code `0`.
    pub fn from_tree(tree: &HuffmanTree) -> Result<Self> {
        let mut book = CodeBook::empty();

        if let HuffNode::Leaf { byte, .. } = tree.root {
            book.insert(byte, BitVec::from_iter([false]))?;
            return Ok(book);
        }

        let mut stack = vec![(&tree.root, BitVec::new())];
        while let Some((node, path)) = stack.pop() {
            match node {
                HuffNode::Leaf { byte, .. } => book.insert(*byte, path)?,
                HuffNode::Internal { left, right, .. } => {
                    let mut right_path = path.clone();
                    right_path.push_bit(true);
                    let mut left_path = path;
                    left_path.push_bit(false);
                    stack.push((&**right, right_path));
                    stack.push((&**left, left_path));
                }
            }
        }

        tracing::debug!(
            symbols = book.len(),
            max_code_len = book.max_code_len(),
            "code book derived"
        );
        Ok(book)
    }

    fn insert(&mut self, byte: u8, code: Code) -> Result<()> {
        if self.codes.contains_key(&byte) {
            return Err(HuffmanError::MalformedTree(format!(
                "byte 0x{:02x} appears on more than one leaf",
                byte
            )));
        }
        self.reverse.insert(code.clone(), byte);
        self.codes.insert(byte, code);
        Ok(())
    }

    pub fn code_of(&self, byte: u8) -> Result<&Code> {
        self.codes
            .get(&byte)
            .ok_or(HuffmanError::MissingCode { byte })
    }

    pub fn symbol_of(&self, code: &Code) -> Option<u8> {
        self.reverse.get(code).copied()
    }

    pub fn reverse_map(&self) -> &ReverseMap {
        &self.reverse
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Entries in ascending byte order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &Code)> + '_ {
        self.codes.iter().map(|(&byte, code)| (byte, code))
    }

    pub fn max_code_len(&self) -> usize {
        self.codes.values().map(BitVec::len).max().unwrap_or(0)
    }

    /// Payload size in bits for an input with these frequencies.
    pub fn encoded_bits(&self, frequencies: &FrequencyTable) -> Result<usize> {
        frequencies.iter().try_fold(0usize, |acc, (byte, count)| {
            Ok(acc + self.code_of(byte)?.len() * count)
        })
    }
}
