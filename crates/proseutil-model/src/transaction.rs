use std::collections::BTreeMap;

use crate::attrs::{AttrValue, Attrs};
use crate::error::TransformError;
use crate::fragment::Fragment;
use crate::mapping::{Mapping, StepMap};
use crate::mark::Mark;
use crate::node::Node;
use crate::schema::NodeType;
use crate::selection::Selection;

/// A single recorded edit.
#[derive(Debug, Clone)]
pub enum Step {
    /// `from..to` replaced by `content`.
    Replace {
        from: usize,
        to: usize,
        content: Fragment,
    },
    /// The node at `pos` changed type, attributes or marks; content kept.
    SetMarkup { pos: usize, node: Node },
}

/// Sequential edit builder over an immutable base document.
///
/// The primitives (`delete`, `insert`, `replace_with`) record a step,
/// rebuild the document and map the selection through the change. They are
/// total: out-of-range positions are clamped rather than rejected.
///
/// Committing a transaction is the caller's business; nothing here does it.
#[derive(Debug, Clone)]
pub struct Transaction {
    before: Node,
    doc: Node,
    selection: Selection,
    steps: Vec<Step>,
    mapping: Mapping,
    time: u64,
    meta: BTreeMap<String, AttrValue>,
}

impl Transaction {
    pub fn new(doc: Node, selection: Selection) -> Self {
        Self {
            before: doc.clone(),
            doc,
            selection,
            steps: Vec::new(),
            mapping: Mapping::new(),
            time: 0,
            meta: BTreeMap::new(),
        }
    }

    /// The document this transaction started from.
    pub fn before(&self) -> &Node {
        &self.before
    }

    /// The current in-progress document.
    pub fn doc(&self) -> &Node {
        &self.doc
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn mapping(&self) -> &Mapping {
        &self.mapping
    }

    pub fn doc_changed(&self) -> bool {
        !self.steps.is_empty()
    }

    /// Logical timestamp; bumped by [`clone_with_fresh_time`](Self::clone_with_fresh_time).
    pub fn time(&self) -> u64 {
        self.time
    }

    pub fn set_time(&mut self, time: u64) -> &mut Self {
        self.time = time;
        self
    }

    /// A field-wise copy of this transaction with the next logical timestamp.
    pub fn clone_with_fresh_time(&self) -> Self {
        let mut next = self.clone();
        next.time = self.time.wrapping_add(1);
        next
    }

    pub fn meta(&self, key: &str) -> Option<&AttrValue> {
        self.meta.get(key)
    }

    pub fn set_meta(&mut self, key: impl Into<String>, value: impl Into<AttrValue>) -> &mut Self {
        self.meta.insert(key.into(), value.into());
        self
    }

    pub fn set_selection(&mut self, selection: Selection) -> &mut Self {
        self.selection = selection;
        self
    }

    pub fn delete(&mut self, from: usize, to: usize) -> &mut Self {
        self.replace(from, to, Fragment::empty())
    }

    pub fn insert(&mut self, pos: usize, node: Node) -> &mut Self {
        self.replace(pos, pos, Fragment::from_node(node))
    }

    pub fn replace_with(&mut self, from: usize, to: usize, node: Node) -> &mut Self {
        self.replace(from, to, Fragment::from_node(node))
    }

    /// Changes the type, attributes or marks of the node starting at `pos`.
    /// `None` keeps the node's current value; given attributes are merged
    /// over the node type's defaults.
    pub fn set_node_markup(
        &mut self,
        pos: usize,
        node_type: Option<&NodeType>,
        attrs: Option<Attrs>,
        marks: Option<Vec<Mark>>,
    ) -> Result<&mut Self, TransformError> {
        let node = self
            .doc
            .node_at(pos)
            .cloned()
            .ok_or(TransformError::NoNodeAt { pos })?;
        if node.is_text() {
            return Err(TransformError::TextNode { pos });
        }
        let node_type = node_type.unwrap_or(node.node_type()).clone();
        if let Some(child) = node.content().iter().find(|c| !node_type.allows(c.node_type())) {
            log::debug!(
                "{} does not allow existing child {}",
                node_type.name(),
                child.node_type().name()
            );
            return Err(TransformError::InvalidContent {
                node_type: node_type.name().to_string(),
            });
        }
        let attrs = attrs.unwrap_or_else(|| node.attrs().clone());
        let marks = marks.unwrap_or_else(|| node.marks().to_vec());
        let updated = node.with_markup(node_type, attrs, marks);

        self.doc = self
            .doc
            .replace(pos, pos + node.node_size(), &Fragment::from_node(updated.clone()));
        self.record(
            Step::SetMarkup { pos, node: updated },
            StepMap::identity(),
        );
        Ok(self)
    }

    fn replace(&mut self, from: usize, to: usize, content: Fragment) -> &mut Self {
        let (from, to) = self.clamp_range(from, to);
        if from == to && content.is_empty() {
            return self;
        }
        let old_size = self.doc.content_size();
        self.doc = self.doc.replace(from, to, &content);
        // Partially covered nodes survive a delete, so measure the real change.
        let new_size = (self.doc.content_size() + (to - from)).saturating_sub(old_size);
        self.record(
            Step::Replace { from, to, content },
            StepMap::new(from, to - from, new_size),
        );
        self
    }

    fn record(&mut self, step: Step, map: StepMap) {
        self.steps.push(step);
        self.mapping.append(map);
        self.selection = self.selection.map(&self.doc, &Mapping::from(map));
    }

    fn clamp_range(&self, from: usize, to: usize) -> (usize, usize) {
        let size = self.doc.content_size();
        let (lo, hi) = if from <= to { (from, to) } else { (to, from) };
        let clamped = (lo.min(size), hi.min(size));
        if clamped != (from, to) {
            log::warn!("clamping edit range {from}..{to} to {clamped:?} (document size {size})");
        }
        clamped
    }
}
