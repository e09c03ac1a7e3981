use std::fmt;

use crate::node::Node;

/// An ordered, immutable sequence of child nodes with a cached size.
///
/// Adjacent text nodes with identical marks are joined on construction and
/// empty text nodes are dropped, so every fragment is in normal form.
#[derive(Clone, Default, PartialEq)]
pub struct Fragment {
    children: Vec<Node>,
    size: usize,
}

impl Fragment {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_node(node: Node) -> Self {
        Self::from_nodes([node])
    }

    pub fn from_nodes(nodes: impl IntoIterator<Item = Node>) -> Self {
        let mut children: Vec<Node> = Vec::new();
        for node in nodes {
            if node.is_text() && node.node_size() == 0 {
                continue;
            }
            if let Some(last) = children.last_mut()
                && let Some(joined) = last.join_text(&node)
            {
                *last = joined;
                continue;
            }
            children.push(node);
        }
        let size = children.iter().map(Node::node_size).sum();
        Self { children, size }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    pub fn child(&self, index: usize) -> Option<&Node> {
        self.children.get(index)
    }

    pub fn first_child(&self) -> Option<&Node> {
        self.children.first()
    }

    pub fn last_child(&self) -> Option<&Node> {
        self.children.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Node> {
        self.children.iter()
    }

    /// Finds the child containing `pos`, returning its index and the offset
    /// where it starts. A position on a boundary belongs to the following
    /// child; `pos == size` yields `(child_count, size)`.
    pub fn find_index(&self, pos: usize) -> (usize, usize) {
        if pos == 0 {
            return (0, 0);
        }
        if pos >= self.size {
            return (self.children.len(), self.size);
        }
        let mut cur = 0;
        for (index, child) in self.children.iter().enumerate() {
            let end = cur + child.node_size();
            if end >= pos {
                if end == pos {
                    return (index + 1, end);
                }
                return (index, cur);
            }
            cur = end;
        }
        (self.children.len(), cur)
    }

    /// Returns the part of this fragment between `from` and `to`.
    pub fn cut(&self, from: usize, to: usize) -> Fragment {
        let to = to.min(self.size);
        if from == 0 && to == self.size {
            return self.clone();
        }
        let mut result = Vec::new();
        if to > from {
            let mut pos = 0;
            for child in &self.children {
                if pos >= to {
                    break;
                }
                let end = pos + child.node_size();
                if end > from {
                    let piece = if pos < from || end > to {
                        if child.is_text() {
                            child.cut(from.saturating_sub(pos), to - pos)
                        } else {
                            child.cut(from.saturating_sub(pos + 1), to - pos - 1)
                        }
                    } else {
                        child.clone()
                    };
                    result.push(piece);
                }
                pos = end;
            }
        }
        Fragment::from_nodes(result)
    }

    /// Removes `from..to`. Nodes only partially covered by the range are
    /// kept and trimmed; untouched children are shared, not copied.
    pub(crate) fn remove_range(&self, from: usize, to: usize) -> Fragment {
        if from >= to {
            return self.clone();
        }
        let mut result = Vec::with_capacity(self.children.len());
        let mut pos = 0;
        for child in &self.children {
            let end = pos + child.node_size();
            if end <= from || pos >= to {
                result.push(child.clone());
            } else if from <= pos && end <= to {
                // fully covered
            } else if child.is_text() {
                if from > pos {
                    result.push(child.cut(0, from - pos));
                }
                if to < end {
                    result.push(child.cut(to - pos, end - pos));
                }
            } else {
                let inner_start = pos + 1;
                let inner_from = from.max(inner_start) - inner_start;
                let inner_to = to.min(end - 1).max(inner_start) - inner_start;
                result.push(child.copy(child.content().remove_range(inner_from, inner_to)));
            }
            pos = end;
        }
        Fragment::from_nodes(result)
    }

    /// Inserts `content` at `pos`, descending into the child that contains it
    /// and splitting text when the position falls inside a text node.
    pub(crate) fn insert_at(&self, pos: usize, content: &Fragment) -> Fragment {
        if content.is_empty() {
            return self.clone();
        }
        let pos = pos.min(self.size);
        let (index, offset) = self.find_index(pos);
        let mut result: Vec<Node> =
            Vec::with_capacity(self.children.len() + content.child_count() + 1);
        result.extend(self.children[..index].iter().cloned());

        if offset == pos {
            result.extend(content.iter().cloned());
            result.extend(self.children[index..].iter().cloned());
        } else {
            let child = &self.children[index];
            let rel = pos - offset;
            if child.is_text() {
                result.push(child.cut(0, rel));
                result.extend(content.iter().cloned());
                result.push(child.cut(rel, child.node_size()));
            } else {
                result.push(child.copy(child.content().insert_at(rel - 1, content)));
            }
            result.extend(self.children[index + 1..].iter().cloned());
        }
        Fragment::from_nodes(result)
    }

    /// Calls `f` for every descendant with its position relative to `start`.
    /// Returning `false` skips that node's own descendants.
    pub(crate) fn walk<F>(&self, start: usize, f: &mut F)
    where
        F: FnMut(&Node, usize) -> bool,
    {
        let mut pos = start;
        for child in &self.children {
            if f(child, pos) && !child.content().is_empty() {
                child.content().walk(pos + 1, f);
            }
            pos += child.node_size();
        }
    }

    pub fn text_content(&self) -> String {
        self.children.iter().map(Node::text_content).collect()
    }
}

impl<'a> IntoIterator for &'a Fragment {
    type Item = &'a Node;
    type IntoIter = std::slice::Iter<'a, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.children.iter()
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, child) in self.children.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{child}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{self}>")
    }
}
