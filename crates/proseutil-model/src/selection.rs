//! Range and node selections.
//!
//! [`Selection`] is a closed tagged union. Code that needs the selected node
//! narrows to [`NodeSelection`] first, so there is no way to read a node
//! from a plain text cursor.

use crate::mapping::{Assoc, Mapping};
use crate::node::Node;
use crate::error::PositionError;
use crate::resolved::ResolvedPos;

/// Search direction through the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Backward,
    Forward,
}

impl Direction {
    pub fn reverse(self) -> Self {
        match self {
            Direction::Backward => Direction::Forward,
            Direction::Forward => Direction::Backward,
        }
    }
}

/// A text cursor or text range between `anchor` and `head`.
#[derive(Debug, Clone)]
pub struct TextSelection {
    anchor: ResolvedPos,
    head: ResolvedPos,
}

impl TextSelection {
    pub fn new(anchor: ResolvedPos, head: ResolvedPos) -> Self {
        Self { anchor, head }
    }

    pub fn cursor(pos: ResolvedPos) -> Self {
        Self {
            anchor: pos.clone(),
            head: pos,
        }
    }

    pub fn create(doc: &Node, anchor: usize, head: usize) -> Result<Self, PositionError> {
        Ok(Self::new(doc.resolve(anchor)?, doc.resolve(head)?))
    }

    pub fn anchor(&self) -> &ResolvedPos {
        &self.anchor
    }

    pub fn head(&self) -> &ResolvedPos {
        &self.head
    }

    pub fn from(&self) -> &ResolvedPos {
        if self.anchor.pos() <= self.head.pos() {
            &self.anchor
        } else {
            &self.head
        }
    }

    pub fn to(&self) -> &ResolvedPos {
        if self.anchor.pos() <= self.head.pos() {
            &self.head
        } else {
            &self.anchor
        }
    }

    pub fn empty(&self) -> bool {
        self.anchor.pos() == self.head.pos()
    }
}

/// A selection wrapping exactly one node.
#[derive(Debug, Clone)]
pub struct NodeSelection {
    from: ResolvedPos,
    to: ResolvedPos,
    node: Node,
}

impl NodeSelection {
    /// Selects the node directly after `from`, if there is one.
    pub fn new(from: ResolvedPos) -> Option<Self> {
        let node = from.node_after()?;
        let to = from.doc().resolve_clamped(from.pos() + node.node_size());
        Some(Self { from, to, node })
    }

    pub fn create(doc: &Node, pos: usize) -> Option<Self> {
        Self::new(doc.resolve(pos).ok()?)
    }

    /// Text is never node-selectable; other types opt out through their spec.
    pub fn is_selectable(node: &Node) -> bool {
        !node.is_text() && node.node_type().is_selectable()
    }

    pub fn node(&self) -> &Node {
        &self.node
    }

    pub fn from(&self) -> &ResolvedPos {
        &self.from
    }

    pub fn to(&self) -> &ResolvedPos {
        &self.to
    }
}

#[derive(Debug, Clone)]
pub enum Selection {
    Text(TextSelection),
    Node(NodeSelection),
}

impl Selection {
    pub fn from(&self) -> &ResolvedPos {
        match self {
            Selection::Text(sel) => sel.from(),
            Selection::Node(sel) => sel.from(),
        }
    }

    pub fn to(&self) -> &ResolvedPos {
        match self {
            Selection::Text(sel) => sel.to(),
            Selection::Node(sel) => sel.to(),
        }
    }

    pub fn anchor(&self) -> &ResolvedPos {
        match self {
            Selection::Text(sel) => sel.anchor(),
            Selection::Node(sel) => sel.from(),
        }
    }

    pub fn head(&self) -> &ResolvedPos {
        match self {
            Selection::Text(sel) => sel.head(),
            Selection::Node(sel) => sel.to(),
        }
    }

    pub fn empty(&self) -> bool {
        self.from().pos() == self.to().pos()
    }

    pub fn is_node_selection(&self) -> bool {
        matches!(self, Selection::Node(_))
    }

    pub fn as_node(&self) -> Option<&NodeSelection> {
        match self {
            Selection::Node(sel) => Some(sel),
            Selection::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&TextSelection> {
        match self {
            Selection::Text(sel) => Some(sel),
            Selection::Node(_) => None,
        }
    }

    /// Re-resolves this selection in `doc` after the edits in `mapping`.
    pub fn map(&self, doc: &Node, mapping: &Mapping) -> Selection {
        match self {
            Selection::Text(sel) => {
                let head = doc.resolve_clamped(mapping.map(sel.head.pos()));
                if !head.parent().node_type().inline_content() {
                    return Selection::near(&head, Direction::Forward);
                }
                let anchor = doc.resolve_clamped(mapping.map(sel.anchor.pos()));
                Selection::Text(TextSelection::new(anchor, head))
            }
            Selection::Node(sel) => {
                let result = mapping.map_result(sel.from.pos(), Assoc::After);
                let from = doc.resolve_clamped(result.pos);
                if result.deleted {
                    return Selection::near(&from, Direction::Forward);
                }
                match NodeSelection::new(from.clone()) {
                    Some(sel) => Selection::Node(sel),
                    None => Selection::near(&from, Direction::Forward),
                }
            }
        }
    }

    /// Finds the nearest valid selection starting at `pos` and moving in
    /// `dir`: a cursor inside a textblock, or (unless `text_only`) a node
    /// selection of a selectable atom.
    pub fn find_from(pos: &ResolvedPos, dir: Direction, text_only: bool) -> Option<Selection> {
        if pos.parent().node_type().inline_content() {
            return Some(Selection::Text(TextSelection::cursor(pos.clone())));
        }
        let doc = pos.doc();
        if let Some(found) = find_selection_in(
            doc,
            pos.parent(),
            pos.pos(),
            pos.index(pos.depth()),
            dir,
            text_only,
        ) {
            return Some(found);
        }
        for depth in (0..pos.depth()).rev() {
            let found = match dir {
                Direction::Backward => pos.before(depth + 1).and_then(|before| {
                    find_selection_in(
                        doc,
                        pos.node(depth),
                        before,
                        pos.index(depth),
                        dir,
                        text_only,
                    )
                }),
                Direction::Forward => pos.after(depth + 1).and_then(|after| {
                    find_selection_in(
                        doc,
                        pos.node(depth),
                        after,
                        pos.index(depth) + 1,
                        dir,
                        text_only,
                    )
                }),
            };
            if found.is_some() {
                return found;
            }
        }
        None
    }

    /// A valid selection near `pos`, preferring `bias`. Falls back to a raw
    /// cursor when the document has no valid selection point at all.
    pub fn near(pos: &ResolvedPos, bias: Direction) -> Selection {
        Self::find_from(pos, bias, false)
            .or_else(|| Self::find_from(pos, bias.reverse(), false))
            .unwrap_or_else(|| Selection::Text(TextSelection::cursor(pos.clone())))
    }

    pub fn at_start(doc: &Node) -> Selection {
        find_selection_in(doc, doc, 0, 0, Direction::Forward, false)
            .unwrap_or_else(|| Selection::Text(TextSelection::cursor(doc.resolve_clamped(0))))
    }
}

impl PartialEq for Selection {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Selection::Text(a), Selection::Text(b)) => {
                a.anchor.pos() == b.anchor.pos() && a.head.pos() == b.head.pos()
            }
            (Selection::Node(a), Selection::Node(b)) => a.from.pos() == b.from.pos(),
            _ => false,
        }
    }
}

impl From<TextSelection> for Selection {
    fn from(sel: TextSelection) -> Self {
        Selection::Text(sel)
    }
}

impl From<NodeSelection> for Selection {
    fn from(sel: NodeSelection) -> Self {
        Selection::Node(sel)
    }
}

/// `pos` is the position before child `index` when moving forward and the
/// position after child `index - 1` when moving backward.
fn find_selection_in(
    doc: &Node,
    node: &Node,
    pos: usize,
    index: usize,
    dir: Direction,
    text_only: bool,
) -> Option<Selection> {
    if node.node_type().inline_content() {
        return Some(Selection::Text(TextSelection::cursor(doc.resolve(pos).ok()?)));
    }
    let mut pos = pos;
    match dir {
        Direction::Forward => {
            for child in node.content().iter().skip(index) {
                if !child.is_atom() {
                    if let Some(found) =
                        find_selection_in(doc, child, pos + 1, 0, dir, text_only)
                    {
                        return Some(found);
                    }
                } else if !text_only && NodeSelection::is_selectable(child) {
                    return NodeSelection::create(doc, pos).map(Selection::Node);
                }
                pos += child.node_size();
            }
        }
        Direction::Backward => {
            for child in node.content().iter().take(index).rev() {
                if !child.is_atom() {
                    if let Some(found) = find_selection_in(
                        doc,
                        child,
                        pos - 1,
                        child.child_count(),
                        dir,
                        text_only,
                    ) {
                        return Some(found);
                    }
                } else if !text_only && NodeSelection::is_selectable(child) {
                    return NodeSelection::create(doc, pos - child.node_size())
                        .map(Selection::Node);
                }
                pos -= child.node_size();
            }
        }
    }
    None
}
