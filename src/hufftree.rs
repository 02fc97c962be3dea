use std::cmp::Ordering;
use std::fmt::Write as _;

use crate::error::Result;
use crate::frequency::FrequencyTable;
use crate::min_heap::MinHeap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HuffNode {
    Leaf {
        weight: usize,
        byte: u8,
    },
    Internal {
        weight: usize,
        left: Box<HuffNode>,
        right: Box<HuffNode>,
    },
}

impl HuffNode {
    pub fn new(b: u8, f: usize) -> Self {
        HuffNode::Leaf { weight: f, byte: b }
    }

    pub fn weight(&self) -> usize {
        match self {
            HuffNode::Leaf { weight, .. } => *weight,
            HuffNode::Internal { weight, .. } => *weight,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, HuffNode::Leaf { .. })
    }

    /// `a` becomes the left (bit 0) child, `b` the right (bit 1) child.
    pub fn merge(a: Self, b: Self) -> Self {
        let weight = a.weight() + b.weight();
        HuffNode::Internal {
            weight,
            left: Box::new(a),
            right: Box::new(b),
        }
    }
}

/// Queue entry: frequency first, then the order the node entered the queue.
///
/// Leaves enter in ascending byte order and every merged node gets a fresh,
/// larger sequence number, so equal weights always pop in the same order.
#[derive(Debug)]
struct Ranked {
    weight: usize,
    seq: usize,
    node: HuffNode,
}

impl PartialEq for Ranked {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Ranked {}

impl PartialOrd for Ranked {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Ranked {
    fn cmp(&self, other: &Self) -> Ordering {
        self.weight
            .cmp(&other.weight)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    pub root: HuffNode,
}

impl HuffmanTree {
    /// Count byte frequencies and build the tree. `None` for empty input.
    pub fn from_bytes(bytes: &[u8]) -> Result<Option<Self>> {
        HuffmanTree::from_frequencies(&FrequencyTable::from_bytes(bytes))
    }

    /// Build the tree by repeatedly merging the two lightest nodes.
    ///
    /// The first node popped becomes the left child. A table with a single
    /// entry yields a lone leaf as root; an empty table yields `None`.
    pub fn from_frequencies(frequencies: &FrequencyTable) -> Result<Option<Self>> {
        if frequencies.is_empty() {
            return Ok(None);
        }

        let nodes: Vec<Ranked> = frequencies
            .iter()
            .enumerate()
            .map(|(seq, (byte, count))| Ranked {
                weight: count,
                seq,
                node: HuffNode::new(byte, count),
            })
            .collect();
        let mut seq = nodes.len();
        let mut heap = MinHeap::build(nodes)?;

        while heap.heap_size() > 1 {
            let x = heap.extract_min()?;
            let y = heap.extract_min()?;
            let z = HuffNode::merge(x.node, y.node);

            heap.insert(Ranked {
                weight: z.weight(),
                seq,
                node: z,
            });
            seq += 1;
        }

        let root = heap.extract_min()?.node;
        let tree = HuffmanTree { root };
        tracing::debug!(
            leaves = frequencies.len(),
            weight = tree.weight(),
            depth = tree.depth(),
            "huffman tree built"
        );
        Ok(Some(tree))
    }

    /// Total weight at the root, equal to the input length.
    pub fn weight(&self) -> usize {
        self.root.weight()
    }

    pub fn leaf_count(&self) -> usize {
        self.nodes().filter(|(node, _)| node.is_leaf()).count()
    }

    /// Length of the longest root-to-leaf path. A lone leaf has depth 0.
    pub fn depth(&self) -> usize {
        self.nodes().map(|(_, depth)| depth).max().unwrap_or(0)
    }

    /// Pre-order walk yielding each node with its depth.
    fn nodes(&self) -> impl Iterator<Item = (&HuffNode, usize)> + '_ {
        let mut stack = vec![(&self.root, 0)];
        std::iter::from_fn(move || {
            let (node, depth) = stack.pop()?;
            if let HuffNode::Internal { left, right, .. } = node {
                stack.push((&**right, depth + 1));
                stack.push((&**left, depth + 1));
            }
            Some((node, depth))
        })
    }

    /// Indented text rendering of the tree, one node per line.
    pub fn render(&self) -> String {
        let mut out = String::new();
        let mut stack = vec![(&self.root, 0usize, "root")];
        while let Some((node, depth, label)) = stack.pop() {
            let indent = "  ".repeat(depth);
            match node {
                HuffNode::Leaf { byte, weight } => {
                    let _ = writeln!(
                        out,
                        "{}{}-> Leaf: {} ({}) [weight: {}]",
                        indent,
                        label,
                        printable(*byte),
                        byte,
                        weight
                    );
                }
                HuffNode::Internal {
                    weight,
                    left,
                    right,
                } => {
                    let _ = writeln!(out, "{}{}-> Internal [weight: {}]", indent, label, weight);
                    stack.push((&**right, depth + 1, "R"));
                    stack.push((&**left, depth + 1, "L"));
                }
            }
        }
        out
    }
}

fn printable(byte: u8) -> String {
    if byte.is_ascii_graphic() {
        format!("'{}'", byte as char)
    } else {
        format!("0x{:02x}", byte)
    }
}
