use proseutil_model::{Node, NodeType};

/// A node together with the position directly before it.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeWithPos {
    pub node: Node,
    pub pos: usize,
}

/// An ancestor found by the parent searches.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentNodeWithPos {
    /// Position directly before the node.
    pub pos: usize,
    /// Position where the node's content starts.
    pub start: usize,
    pub depth: usize,
    pub node: Node,
}

/// The node wrapped by a node selection.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedNodeWithPos {
    pub node: Node,
    pub pos: usize,
    pub depth: usize,
}

/// A single node type or a set of them.
pub trait NodeTypeSet {
    fn contains_type(&self, node_type: &NodeType) -> bool;
}

impl NodeTypeSet for NodeType {
    fn contains_type(&self, node_type: &NodeType) -> bool {
        self == node_type
    }
}

impl NodeTypeSet for [NodeType] {
    fn contains_type(&self, node_type: &NodeType) -> bool {
        self.iter().any(|t| t == node_type)
    }
}

impl<const N: usize> NodeTypeSet for [NodeType; N] {
    fn contains_type(&self, node_type: &NodeType) -> bool {
        self.as_slice().contains_type(node_type)
    }
}

impl NodeTypeSet for Vec<NodeType> {
    fn contains_type(&self, node_type: &NodeType) -> bool {
        self.as_slice().contains_type(node_type)
    }
}

impl<T: NodeTypeSet + ?Sized> NodeTypeSet for &T {
    fn contains_type(&self, node_type: &NodeType) -> bool {
        (**self).contains_type(node_type)
    }
}

/// Whether `node`'s type is one of `types`.
pub fn equal_node_type(types: &impl NodeTypeSet, node: &Node) -> bool {
    types.contains_type(node.node_type())
}
