use thiserror::Error;

/// Errors raised while building a [`Schema`](crate::Schema) or creating nodes from one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("schema has no node types")]
    NoTopNode,

    #[error("schema has no `text` node type")]
    NoTextType,

    #[error("unknown node type `{0}`")]
    UnknownNodeType(String),

    #[error("unknown mark type `{0}`")]
    UnknownMarkType(String),

    #[error("node type `{node}` references unknown content `{content}`")]
    UnknownContent { node: String, content: String },

    #[error("node type `{parent}` does not allow `{child}` as content")]
    InvalidContent { parent: String, child: String },

    #[error("text nodes must not be empty")]
    EmptyText,
}

/// Raised when a document position does not exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PositionError {
    #[error("position {pos} out of range (document content size is {size})")]
    OutOfRange { pos: usize, size: usize },
}

/// Raised by the transaction primitives that can not be made total.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransformError {
    #[error("no node starts at position {pos}")]
    NoNodeAt { pos: usize },

    #[error("can not change the markup of the text node at {pos}")]
    TextNode { pos: usize },

    #[error("node type `{node_type}` does not allow the existing content")]
    InvalidContent { node_type: String },

    #[error(transparent)]
    Position(#[from] PositionError),
}
