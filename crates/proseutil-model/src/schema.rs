//! Node and mark types, and the schema that ties them together.
//!
//! A schema is configured in code through [`Schema::builder`]. Content rules
//! are deliberately simple: a node type lists the node names and group names
//! it accepts as children, and [`NodeType::allows`] answers membership. That
//! membership test is the capability oracle behind
//! [`Node::can_replace_with`](crate::Node::can_replace_with).

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use crate::attrs::{AttrValue, Attrs};
use crate::error::SchemaError;
use crate::mark::Mark;
use crate::node::Node;

/// Name reserved for the text node type.
pub const TEXT_NODE: &str = "text";

/// Declarative description of a node type, consumed by [`SchemaBuilder::node`].
#[derive(Debug, Clone)]
pub struct NodeSpec {
    pub content: Vec<String>,
    pub group: Option<String>,
    pub inline: bool,
    pub atom: bool,
    pub selectable: bool,
    pub attrs: Attrs,
}

impl Default for NodeSpec {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeSpec {
    pub fn new() -> Self {
        Self {
            content: Vec::new(),
            group: None,
            inline: false,
            atom: false,
            selectable: true,
            attrs: Attrs::new(),
        }
    }

    /// Node names or group names accepted as children. Empty means leaf.
    pub fn content<I, S>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.content = items.into_iter().map(Into::into).collect();
        self
    }

    pub fn group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    pub fn inline(mut self) -> Self {
        self.inline = true;
        self
    }

    pub fn atom(mut self) -> Self {
        self.atom = true;
        self
    }

    pub fn unselectable(mut self) -> Self {
        self.selectable = false;
        self
    }

    /// Declares an attribute together with its default value.
    pub fn attr(mut self, name: impl Into<String>, default: impl Into<AttrValue>) -> Self {
        self.attrs.insert(name.into(), default.into());
        self
    }
}

/// Declarative description of a mark type.
#[derive(Debug, Clone, Default)]
pub struct MarkSpec {
    pub attrs: Attrs,
}

impl MarkSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attr(mut self, name: impl Into<String>, default: impl Into<AttrValue>) -> Self {
        self.attrs.insert(name.into(), default.into());
        self
    }
}

#[derive(Debug)]
struct NodeTypeInner {
    name: String,
    group: Option<String>,
    inline: bool,
    atom: bool,
    selectable: bool,
    default_attrs: Attrs,
    /// Resolved node type names accepted as children.
    content: BTreeSet<String>,
    inline_content: bool,
}

/// A node type of a [`Schema`]. Cheap to clone; compares by name.
#[derive(Clone)]
pub struct NodeType(Arc<NodeTypeInner>);

impl NodeType {
    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub fn group(&self) -> Option<&str> {
        self.0.group.as_deref()
    }

    pub fn is_text(&self) -> bool {
        self.0.name == TEXT_NODE
    }

    pub fn is_inline(&self) -> bool {
        self.0.inline
    }

    pub fn is_block(&self) -> bool {
        !self.0.inline
    }

    /// A block whose content is inline (paragraphs, headings).
    pub fn is_textblock(&self) -> bool {
        self.is_block() && self.0.inline_content
    }

    /// Whether this type accepts inline children.
    pub fn inline_content(&self) -> bool {
        self.0.inline_content
    }

    pub fn is_leaf(&self) -> bool {
        self.0.content.is_empty()
    }

    pub fn is_atom(&self) -> bool {
        self.is_leaf() || self.0.atom
    }

    pub fn is_selectable(&self) -> bool {
        self.0.selectable
    }

    pub fn default_attrs(&self) -> &Attrs {
        &self.0.default_attrs
    }

    /// Whether a node of `child` type may appear in this type's content.
    pub fn allows(&self, child: &NodeType) -> bool {
        self.0.content.contains(child.name())
    }

    /// Creates a node without validating `content` against this type.
    pub fn create(
        &self,
        attrs: Attrs,
        content: impl IntoIterator<Item = Node>,
        marks: Vec<Mark>,
    ) -> Node {
        Node::element(self.clone(), self.compute_attrs(attrs), content, marks)
    }

    /// Creates a node, failing when a child is not allowed by this type.
    pub fn create_checked(
        &self,
        attrs: Attrs,
        content: impl IntoIterator<Item = Node>,
        marks: Vec<Mark>,
    ) -> Result<Node, SchemaError> {
        let content: Vec<Node> = content.into_iter().collect();
        if let Some(child) = content.iter().find(|c| !self.allows(c.node_type())) {
            return Err(SchemaError::InvalidContent {
                parent: self.name().to_string(),
                child: child.node_type().name().to_string(),
            });
        }
        Ok(self.create(attrs, content, marks))
    }

    pub(crate) fn compute_attrs(&self, attrs: Attrs) -> Attrs {
        let mut merged = self.0.default_attrs.clone();
        merged.extend(attrs);
        merged
    }
}

impl PartialEq for NodeType {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0) || self.0.name == other.0.name
    }
}

impl Eq for NodeType {}

impl std::hash::Hash for NodeType {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.0.name.hash(state);
    }
}

impl fmt::Debug for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeType({})", self.0.name)
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.name)
    }
}

#[derive(Debug)]
struct MarkTypeInner {
    name: String,
    default_attrs: Attrs,
}

/// A mark type of a [`Schema`]. Cheap to clone; compares by name.
#[derive(Clone)]
pub struct MarkType(Arc<MarkTypeInner>);

impl MarkType {
    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub fn create(&self, attrs: Attrs) -> Mark {
        let mut merged = self.0.default_attrs.clone();
        merged.extend(attrs);
        Mark::new(self.clone(), merged)
    }

    /// Whether a mark of this type is present in `marks`.
    pub fn is_in_set(&self, marks: &[Mark]) -> bool {
        marks.iter().any(|m| m.mark_type() == self)
    }
}

impl PartialEq for MarkType {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0) || self.0.name == other.0.name
    }
}

impl Eq for MarkType {}

impl fmt::Debug for MarkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MarkType({})", self.0.name)
    }
}

/// The set of node and mark types a document may use.
#[derive(Debug, Clone)]
pub struct Schema {
    nodes: Vec<NodeType>,
    marks: Vec<MarkType>,
}

impl Schema {
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::default()
    }

    /// The first registered node type; documents are instances of it.
    pub fn top_node_type(&self) -> &NodeType {
        // Builder guarantees at least one node type.
        &self.nodes[0]
    }

    pub fn node_types(&self) -> &[NodeType] {
        &self.nodes
    }

    pub fn node_type(&self, name: &str) -> Result<&NodeType, SchemaError> {
        self.nodes
            .iter()
            .find(|t| t.name() == name)
            .ok_or_else(|| SchemaError::UnknownNodeType(name.to_string()))
    }

    pub fn mark_type(&self, name: &str) -> Result<&MarkType, SchemaError> {
        self.marks
            .iter()
            .find(|t| t.name() == name)
            .ok_or_else(|| SchemaError::UnknownMarkType(name.to_string()))
    }

    /// Creates a validated node of the named type with default marks.
    pub fn node(
        &self,
        name: &str,
        attrs: Attrs,
        content: impl IntoIterator<Item = Node>,
    ) -> Result<Node, SchemaError> {
        self.node_type(name)?
            .create_checked(attrs, content, Vec::new())
    }

    pub fn text(&self, text: &str) -> Result<Node, SchemaError> {
        self.text_with_marks(text, Vec::new())
    }

    pub fn text_with_marks(&self, text: &str, marks: Vec<Mark>) -> Result<Node, SchemaError> {
        if text.is_empty() {
            return Err(SchemaError::EmptyText);
        }
        let node_type = self
            .node_type(TEXT_NODE)
            .map_err(|_| SchemaError::NoTextType)?;
        Ok(Node::text_node(node_type.clone(), text.to_string(), marks))
    }

    pub fn mark(&self, name: &str, attrs: Attrs) -> Result<Mark, SchemaError> {
        Ok(self.mark_type(name)?.create(attrs))
    }
}

/// Collects node and mark specs and resolves them into a [`Schema`].
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    nodes: Vec<(String, NodeSpec)>,
    marks: Vec<(String, MarkSpec)>,
}

impl SchemaBuilder {
    pub fn node(mut self, name: impl Into<String>, spec: NodeSpec) -> Self {
        self.nodes.push((name.into(), spec));
        self
    }

    pub fn mark(mut self, name: impl Into<String>, spec: MarkSpec) -> Self {
        self.marks.push((name.into(), spec));
        self
    }

    pub fn build(self) -> Result<Schema, SchemaError> {
        if self.nodes.is_empty() {
            return Err(SchemaError::NoTopNode);
        }

        let is_inline = |name: &str, spec: &NodeSpec| name == TEXT_NODE || spec.inline;

        let mut nodes = Vec::with_capacity(self.nodes.len());
        for (name, spec) in &self.nodes {
            let mut content = BTreeSet::new();
            for item in &spec.content {
                let mut matched = false;
                for (other_name, other_spec) in &self.nodes {
                    if other_name == item || other_spec.group.as_deref() == Some(item.as_str()) {
                        content.insert(other_name.clone());
                        matched = true;
                    }
                }
                if !matched {
                    return Err(SchemaError::UnknownContent {
                        node: name.clone(),
                        content: item.clone(),
                    });
                }
            }

            let inline_content = self
                .nodes
                .iter()
                .any(|(n, s)| content.contains(n) && is_inline(n, s));

            nodes.push(NodeType(Arc::new(NodeTypeInner {
                name: name.clone(),
                group: spec.group.clone(),
                inline: is_inline(name, spec),
                atom: spec.atom,
                selectable: spec.selectable && name != TEXT_NODE,
                default_attrs: spec.attrs.clone(),
                content,
                inline_content,
            })));
        }

        let marks = self
            .marks
            .into_iter()
            .map(|(name, spec)| {
                MarkType(Arc::new(MarkTypeInner {
                    name,
                    default_attrs: spec.attrs,
                }))
            })
            .collect();

        Ok(Schema { nodes, marks })
    }
}

/// A general purpose schema: paragraphs, headings, quotes, code, images,
/// tables, plus `strong`, `em` and `link` marks.
pub fn basic() -> Result<Schema, SchemaError> {
    Schema::builder()
        .node("doc", NodeSpec::new().content(["block"]))
        .node(
            "paragraph",
            NodeSpec::new().content(["inline"]).group("block"),
        )
        .node(
            "heading",
            NodeSpec::new()
                .content(["inline"])
                .group("block")
                .attr("level", 1),
        )
        .node(
            "blockquote",
            NodeSpec::new().content(["block"]).group("block"),
        )
        .node("code_block", NodeSpec::new().content(["text"]).group("block"))
        .node("horizontal_rule", NodeSpec::new().group("block"))
        .node("table", NodeSpec::new().content(["table_row"]).group("block"))
        .node("table_row", NodeSpec::new().content(["table_cell"]))
        .node("table_cell", NodeSpec::new().content(["block"]))
        .node(
            "image",
            NodeSpec::new()
                .group("inline")
                .inline()
                .attr("src", "")
                .attr("alt", AttrValue::Null),
        )
        .node(
            "hard_break",
            NodeSpec::new().group("inline").inline().unselectable(),
        )
        .node(TEXT_NODE, NodeSpec::new().group("inline"))
        .mark("strong", MarkSpec::new())
        .mark("em", MarkSpec::new())
        .mark("link", MarkSpec::new().attr("href", ""))
        .build()
}
