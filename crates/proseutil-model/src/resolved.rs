use std::fmt;

use crate::error::PositionError;
use crate::node::Node;

#[derive(Clone)]
struct Level {
    node: Node,
    /// Index of the child of `node` that contains (or follows) the position.
    index: usize,
    /// Absolute position where that child starts.
    offset: usize,
}

/// A position resolved against a document, exposing its ancestor chain.
///
/// Depth 0 is the document itself; `depth()` is the innermost node whose
/// content contains the position. Positions inside text resolve to the
/// text's parent.
#[derive(Clone)]
pub struct ResolvedPos {
    pos: usize,
    path: Vec<Level>,
    parent_offset: usize,
}

impl ResolvedPos {
    pub(crate) fn resolve(doc: &Node, pos: usize) -> Result<Self, PositionError> {
        let size = doc.content_size();
        if pos > size {
            return Err(PositionError::OutOfRange { pos, size });
        }
        Ok(Self::resolve_clamped(doc, pos))
    }

    pub(crate) fn resolve_clamped(doc: &Node, pos: usize) -> Self {
        let pos = pos.min(doc.content_size());
        let mut path = Vec::new();
        let mut start = 0;
        let mut parent_offset = pos;
        let mut node = doc.clone();
        loop {
            let (index, offset) = node.content().find_index(parent_offset);
            let rem = parent_offset - offset;
            let child = node.child(index).cloned();
            path.push(Level {
                node,
                index,
                offset: start + offset,
            });
            if rem == 0 {
                break;
            }
            let Some(child) = child else { break };
            if child.is_text() {
                break;
            }
            parent_offset = rem - 1;
            start += offset + 1;
            node = child;
        }
        Self {
            pos,
            path,
            parent_offset,
        }
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn depth(&self) -> usize {
        self.path.len() - 1
    }

    /// Offset of the position inside its parent's content.
    pub fn parent_offset(&self) -> usize {
        self.parent_offset
    }

    /// The ancestor at `depth`. Panics if `depth > self.depth()`.
    pub fn node(&self, depth: usize) -> &Node {
        &self.path[depth].node
    }

    pub fn parent(&self) -> &Node {
        self.node(self.depth())
    }

    pub fn doc(&self) -> &Node {
        self.node(0)
    }

    /// Index into the ancestor at `depth`.
    pub fn index(&self, depth: usize) -> usize {
        self.path[depth].index
    }

    /// Index pointing after this position into the ancestor at `depth`.
    pub fn index_after(&self, depth: usize) -> usize {
        let step = if depth == self.depth() && self.text_offset() == 0 {
            0
        } else {
            1
        };
        self.index(depth) + step
    }

    /// Offset into the text node the position points into, or 0 on a boundary.
    pub fn text_offset(&self) -> usize {
        self.pos - self.path[self.depth()].offset
    }

    /// Where the content of the ancestor at `depth` starts.
    pub fn start(&self, depth: usize) -> usize {
        if depth == 0 {
            0
        } else {
            self.path[depth - 1].offset + 1
        }
    }

    /// Where the content of the ancestor at `depth` ends.
    pub fn end(&self, depth: usize) -> usize {
        self.start(depth) + self.node(depth).content_size()
    }

    /// The position directly before the ancestor at `depth`. The document
    /// itself has no position before it.
    pub fn before(&self, depth: usize) -> Option<usize> {
        (depth > 0).then(|| self.path[depth - 1].offset)
    }

    /// The position directly after the ancestor at `depth`.
    pub fn after(&self, depth: usize) -> Option<usize> {
        self.before(depth)
            .map(|before| before + self.node(depth).node_size())
    }

    /// The node directly before the position, if any. Inside text this is
    /// the part of the text node before the position.
    pub fn node_before(&self) -> Option<Node> {
        let index = self.index(self.depth());
        let offset = self.text_offset();
        if offset > 0 {
            return self.parent().child(index).map(|child| child.cut(0, offset));
        }
        if index == 0 {
            None
        } else {
            self.parent().child(index - 1).cloned()
        }
    }

    /// The node directly after the position, if any. Inside text this is
    /// the part of the text node after the position.
    pub fn node_after(&self) -> Option<Node> {
        let index = self.index(self.depth());
        let child = self.parent().child(index)?;
        let offset = self.text_offset();
        if offset > 0 {
            Some(child.cut(offset, child.node_size()))
        } else {
            Some(child.clone())
        }
    }

    /// The deepest depth whose content contains both this position and `pos`.
    pub fn shared_depth(&self, pos: usize) -> usize {
        (1..=self.depth())
            .rev()
            .find(|&depth| self.start(depth) <= pos && self.end(depth) >= pos)
            .unwrap_or(0)
    }
}

impl fmt::Debug for ResolvedPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path: Vec<String> = (1..=self.depth())
            .map(|d| format!("{}_{}", self.node(d).node_type().name(), self.index(d - 1)))
            .collect();
        write!(f, "{}:{}", path.join("/"), self.parent_offset)
    }
}
