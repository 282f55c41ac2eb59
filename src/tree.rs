use std::cmp::Ordering;
use std::collections::BinaryHeap;

use tracing::debug;

use crate::code::{CodeTable, Codeword};
use crate::error::Result;
use crate::frequency::FrequencyTable;

/// Index of a node inside a [`HuffmanTree`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeType {
    Leaf(u8),
    Internal { left: NodeId, right: NodeId },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub node_type: NodeType,
    pub weight: u64,
}

/// Heap entry for a node that has not been merged yet.
///
/// Ordered so that `BinaryHeap` pops the smallest weight first, ties going
/// to the node that was allocated earlier in the arena.
#[derive(Debug, PartialEq, Eq)]
struct Parentless {
    weight: u64,
    id: NodeId,
}

impl Ord for Parentless {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .weight
            .cmp(&self.weight)
            .then_with(|| other.id.cmp(&self.id))
    }
}

impl PartialOrd for Parentless {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Huffman tree stored as an arena of nodes.
///
/// Leaves occupy the first slots in ascending symbol order; every merge
/// appends one internal node. Children are referenced by index, so a node
/// "has a parent" exactly when some later internal node names it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    nodes: Vec<Node>,
    root: NodeId,
}

impl HuffmanTree {
    /// Build the tree by repeatedly merging the two lightest parentless nodes.
    ///
    /// The first node popped becomes the left child (bit 0). Returns `None`
    /// for an empty table.
    pub fn build(frequencies: &FrequencyTable) -> Option<Self> {
        let mut nodes: Vec<Node> = Vec::with_capacity(frequencies.len().saturating_mul(2));
        let mut pqueue = BinaryHeap::with_capacity(frequencies.len());

        for (symbol, weight) in frequencies.iter() {
            let id = NodeId(nodes.len());
            nodes.push(Node {
                node_type: NodeType::Leaf(symbol),
                weight,
            });
            pqueue.push(Parentless { weight, id });
        }

        let mut root = None;
        while let Some(ln) = pqueue.pop() {
            let Some(rn) = pqueue.pop() else {
                root = Some(ln.id);
                break;
            };

            let id = NodeId(nodes.len());
            let weight = ln.weight.saturating_add(rn.weight);
            nodes.push(Node {
                node_type: NodeType::Internal {
                    left: ln.id,
                    right: rn.id,
                },
                weight,
            });
            pqueue.push(Parentless { weight, id });
        }

        let root = root?;
        debug!(
            symbols = frequencies.len(),
            nodes = nodes.len(),
            weight = nodes[root.0].weight,
            "built huffman tree"
        );

        Some(Self { nodes, root })
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Node)> + '_ {
        self.nodes.iter().enumerate().map(|(i, node)| (NodeId(i), node))
    }

    /// Weight of the root, i.e. the total number of encoded symbols.
    /// Saturates at `u64::MAX` for tables whose counts overflow.
    pub fn weight(&self) -> u64 {
        self.node(self.root).weight
    }

    pub fn leaf_count(&self) -> usize {
        self.nodes
            .iter()
            .filter(|node| matches!(node.node_type, NodeType::Leaf(_)))
            .count()
    }

    pub fn internal_count(&self) -> usize {
        self.nodes.len() - self.leaf_count()
    }

    /// The symbol carried by `id`, if it is a leaf.
    pub fn symbol(&self, id: NodeId) -> Option<u8> {
        match self.node(id).node_type {
            NodeType::Leaf(symbol) => Some(symbol),
            NodeType::Internal { .. } => None,
        }
    }

    /// Follow one edge down from `id`: `false` goes left, `true` goes right.
    /// Leaves have no children.
    pub fn child(&self, id: NodeId, bit: bool) -> Option<NodeId> {
        match self.node(id).node_type {
            NodeType::Leaf(_) => None,
            NodeType::Internal { left, right } => Some(if bit { right } else { left }),
        }
    }

    /// Derive every symbol's codeword with one depth-first walk.
    ///
    /// Uses an explicit stack, so skewed trees cannot exhaust the call stack.
    /// A lone leaf at the root is assigned the single bit `0`.
    pub fn code_table(&self) -> Result<CodeTable> {
        let mut table = CodeTable::new();

        if let NodeType::Leaf(symbol) = self.node(self.root).node_type {
            table.insert(symbol, Codeword::from("0"))?;
            return Ok(table);
        }

        let mut stack = vec![(self.root, Codeword::new())];
        while let Some((id, code)) = stack.pop() {
            match self.node(id).node_type {
                NodeType::Leaf(symbol) => table.insert(symbol, code)?,
                NodeType::Internal { left, right } => {
                    stack.push((right, code.with(true)));
                    stack.push((left, code.with(false)));
                }
            }
        }

        Ok(table)
    }

    #[cfg(test)]
    pub(crate) fn from_parts(nodes: Vec<Node>, root: NodeId) -> Self {
        Self { nodes, root }
    }
}
