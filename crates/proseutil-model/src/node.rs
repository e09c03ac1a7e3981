use std::fmt;
use std::sync::Arc;

use crate::attrs::{AttrValue, Attrs};
use crate::error::PositionError;
use crate::fragment::Fragment;
use crate::mark::Mark;
use crate::resolved::ResolvedPos;
use crate::schema::NodeType;

struct NodeInner {
    node_type: NodeType,
    attrs: Attrs,
    marks: Vec<Mark>,
    content: Fragment,
    /// `Some` for text nodes only.
    text: Option<String>,
    /// Cached `chars().count()` of `text`.
    text_len: usize,
}

/// An immutable document node.
///
/// Nodes are reference counted: cloning is cheap and edits rebuild only the
/// path from the changed node up to the root, sharing every other subtree.
///
/// Sizes follow the usual position model: a text node counts one per
/// character, a leaf counts one, and any other node counts its content plus
/// an opening and a closing token.
#[derive(Clone)]
pub struct Node(Arc<NodeInner>);

impl Node {
    pub(crate) fn element(
        node_type: NodeType,
        attrs: Attrs,
        content: impl IntoIterator<Item = Node>,
        marks: Vec<Mark>,
    ) -> Self {
        Node(Arc::new(NodeInner {
            node_type,
            attrs,
            marks,
            content: Fragment::from_nodes(content),
            text: None,
            text_len: 0,
        }))
    }

    pub(crate) fn text_node(node_type: NodeType, text: String, marks: Vec<Mark>) -> Self {
        let text_len = text.chars().count();
        Node(Arc::new(NodeInner {
            node_type,
            attrs: Attrs::new(),
            marks,
            content: Fragment::empty(),
            text: Some(text),
            text_len,
        }))
    }

    /// Whether both handles point at the very same shared node.
    pub fn ptr_eq(a: &Node, b: &Node) -> bool {
        Arc::ptr_eq(&a.0, &b.0)
    }

    pub fn node_type(&self) -> &NodeType {
        &self.0.node_type
    }

    pub fn attrs(&self) -> &Attrs {
        &self.0.attrs
    }

    pub fn attr(&self, name: &str) -> Option<&AttrValue> {
        self.0.attrs.get(name)
    }

    pub fn marks(&self) -> &[Mark] {
        &self.0.marks
    }

    pub fn content(&self) -> &Fragment {
        &self.0.content
    }

    /// The text of a text node.
    pub fn text(&self) -> Option<&str> {
        self.0.text.as_deref()
    }

    pub fn is_text(&self) -> bool {
        self.0.text.is_some()
    }

    pub fn is_inline(&self) -> bool {
        self.0.node_type.is_inline()
    }

    pub fn is_block(&self) -> bool {
        self.0.node_type.is_block()
    }

    pub fn is_textblock(&self) -> bool {
        self.0.node_type.is_textblock()
    }

    pub fn is_leaf(&self) -> bool {
        self.0.node_type.is_leaf()
    }

    pub fn is_atom(&self) -> bool {
        self.0.node_type.is_atom()
    }

    pub fn child_count(&self) -> usize {
        self.0.content.child_count()
    }

    pub fn child(&self, index: usize) -> Option<&Node> {
        self.0.content.child(index)
    }

    pub fn first_child(&self) -> Option<&Node> {
        self.0.content.first_child()
    }

    pub fn last_child(&self) -> Option<&Node> {
        self.0.content.last_child()
    }

    pub fn node_size(&self) -> usize {
        if self.is_text() {
            self.0.text_len
        } else if self.is_leaf() {
            1
        } else {
            self.0.content.size() + 2
        }
    }

    pub fn content_size(&self) -> usize {
        self.0.content.size()
    }

    pub fn text_content(&self) -> String {
        match &self.0.text {
            Some(text) => text.clone(),
            None => self.0.content.text_content(),
        }
    }

    /// Same type, attributes and marks.
    pub fn same_markup(&self, other: &Node) -> bool {
        self.0.node_type == other.0.node_type
            && self.0.attrs == other.0.attrs
            && self.0.marks == other.0.marks
    }

    /// A node with this node's markup and the given content.
    pub fn copy(&self, content: Fragment) -> Node {
        if self.is_text() {
            return self.clone();
        }
        Node(Arc::new(NodeInner {
            node_type: self.0.node_type.clone(),
            attrs: self.0.attrs.clone(),
            marks: self.0.marks.clone(),
            content,
            text: None,
            text_len: 0,
        }))
    }

    /// A node with this node's content and new markup.
    pub fn with_markup(&self, node_type: NodeType, attrs: Attrs, marks: Vec<Mark>) -> Node {
        let attrs = node_type.compute_attrs(attrs);
        if let Some(text) = &self.0.text {
            return Node::text_node(node_type, text.clone(), marks);
        }
        Node(Arc::new(NodeInner {
            node_type,
            attrs,
            marks,
            content: self.0.content.clone(),
            text: None,
            text_len: 0,
        }))
    }

    pub(crate) fn with_text(&self, text: String) -> Node {
        Node::text_node(self.0.node_type.clone(), text, self.0.marks.clone())
    }

    /// Joins two text nodes carrying the same marks.
    pub(crate) fn join_text(&self, other: &Node) -> Option<Node> {
        let (left, right) = (self.text()?, other.text()?);
        if self.0.marks != other.0.marks {
            return None;
        }
        Some(self.with_text(format!("{left}{right}")))
    }

    /// The part of this node between `from` and `to`: characters for text
    /// nodes, content positions otherwise.
    pub fn cut(&self, from: usize, to: usize) -> Node {
        if let Some(text) = &self.0.text {
            let to = to.min(self.0.text_len);
            let from = from.min(to);
            if from == 0 && to == self.0.text_len {
                return self.clone();
            }
            return self.with_text(text.chars().skip(from).take(to - from).collect());
        }
        let to = to.min(self.content_size());
        if from == 0 && to == self.content_size() {
            return self.clone();
        }
        self.copy(self.0.content.cut(from, to))
    }

    /// The node starting at `pos` (or the text node containing it).
    pub fn node_at(&self, pos: usize) -> Option<&Node> {
        let mut node = self;
        let mut pos = pos;
        loop {
            let (index, offset) = node.content().find_index(pos);
            let child = node.child(index)?;
            if offset == pos || child.is_text() {
                return Some(child);
            }
            pos -= offset + 1;
            node = child;
        }
    }

    /// Visits every descendant in document order together with its position
    /// relative to the start of this node's content. When `f` returns
    /// `false` the children of that node are skipped; its siblings are not.
    pub fn descendants<F>(&self, mut f: F)
    where
        F: FnMut(&Node, usize) -> bool,
    {
        self.0.content.walk(0, &mut f);
    }

    pub fn resolve(&self, pos: usize) -> Result<ResolvedPos, PositionError> {
        ResolvedPos::resolve(self, pos)
    }

    /// Resolves `pos`, clamping it to the content of this node first.
    pub fn resolve_clamped(&self, pos: usize) -> ResolvedPos {
        ResolvedPos::resolve_clamped(self, pos)
    }

    /// Whether the children between `from_index` and `to_index` may be
    /// replaced by a node of `node_type`.
    pub fn can_replace_with(
        &self,
        from_index: usize,
        to_index: usize,
        node_type: &NodeType,
    ) -> bool {
        from_index <= to_index
            && to_index <= self.child_count()
            && self.0.node_type.allows(node_type)
    }

    /// Replaces `from..to` (positions relative to this node's content) with
    /// `content`.
    pub(crate) fn replace(&self, from: usize, to: usize, content: &Fragment) -> Node {
        let removed = self.0.content.remove_range(from, to);
        self.copy(removed.insert_at(from, content))
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        Node::ptr_eq(self, other)
            || (self.same_markup(other)
                && self.0.text == other.0.text
                && self.0.content == other.0.content)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = match &self.0.text {
            Some(text) => format!("{text:?}"),
            None if self.0.content.is_empty() => self.0.node_type.name().to_string(),
            None => format!("{}({})", self.0.node_type.name(), self.0.content),
        };
        for mark in self.0.marks.iter().rev() {
            out = format!("{}({out})", mark.mark_type().name());
        }
        f.write_str(&out)
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attrs::attrs;
    use crate::schema::basic;
    use pretty_assertions::assert_eq;

    fn sample() -> Node {
        let schema = basic().unwrap();
        let p1 = schema
            .node("paragraph", Attrs::new(), [schema.text("ab").unwrap()])
            .unwrap();
        let p2 = schema
            .node("paragraph", Attrs::new(), [schema.text("cde").unwrap()])
            .unwrap();
        schema.node("doc", Attrs::new(), [p1, p2]).unwrap()
    }

    #[test]
    fn sizes_follow_token_model() {
        let doc = sample();
        assert_eq!(doc.content_size(), 9);
        assert_eq!(doc.node_size(), 11);
        assert_eq!(doc.child(0).unwrap().node_size(), 4);
    }

    #[test]
    fn display_renders_nested_structure() {
        assert_eq!(sample().to_string(), r#"doc(paragraph("ab"), paragraph("cde"))"#);
    }

    #[test]
    fn node_at_finds_blocks_and_text() {
        let doc = sample();
        assert_eq!(doc.node_at(0).unwrap().node_type().name(), "paragraph");
        assert_eq!(doc.node_at(1).unwrap().text(), Some("ab"));
        assert_eq!(doc.node_at(2).unwrap().text(), Some("ab"));
        assert_eq!(doc.node_at(4).unwrap().node_type().name(), "paragraph");
        assert!(doc.node_at(9).is_none());
    }

    #[test]
    fn descendants_reports_positions_in_document_order() {
        let doc = sample();
        let mut seen = Vec::new();
        doc.descendants(|node, pos| {
            seen.push((node.to_string(), pos));
            true
        });
        assert_eq!(
            seen,
            vec![
                (r#"paragraph("ab")"#.to_string(), 0),
                (r#""ab""#.to_string(), 1),
                (r#"paragraph("cde")"#.to_string(), 4),
                (r#""cde""#.to_string(), 5),
            ]
        );
    }

    #[test]
    fn replace_shares_untouched_subtrees() {
        let schema = basic().unwrap();
        let doc = sample();
        let image = schema.node("image", attrs([("src", "x.png")]), []).unwrap();
        let edited = doc.replace(6, 6, &Fragment::from_node(image));

        assert_eq!(
            edited.to_string(),
            r#"doc(paragraph("ab"), paragraph("c", image, "de"))"#
        );
        assert!(Node::ptr_eq(
            edited.child(0).unwrap(),
            doc.child(0).unwrap()
        ));
    }

    #[test]
    fn replace_across_blocks_trims_without_joining() {
        let doc = sample();
        let edited = doc.replace(2, 7, &Fragment::empty());
        assert_eq!(edited.to_string(), r#"doc(paragraph("a"), paragraph("e"))"#);
    }

    #[test]
    fn adjacent_text_with_same_marks_is_joined() {
        let schema = basic().unwrap();
        let doc = sample();
        let edited = doc.replace(2, 2, &Fragment::from_node(schema.text("X").unwrap()));
        assert_eq!(edited.child(0).unwrap().child_count(), 1);
        assert_eq!(edited.child(0).unwrap().text_content(), "aXb");
    }

    #[test]
    fn can_replace_with_checks_type_and_index_range() {
        let schema = basic().unwrap();
        let doc = sample();
        let paragraph = schema.node_type("paragraph").unwrap();
        let text = schema.node_type("text").unwrap();

        assert!(doc.can_replace_with(0, 1, paragraph));
        assert!(!doc.can_replace_with(0, 1, text));
        assert!(!doc.can_replace_with(1, 0, paragraph));
        assert!(!doc.can_replace_with(0, 3, paragraph));
    }
}
