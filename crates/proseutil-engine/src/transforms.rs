//! Transaction mutators.
//!
//! Every mutator takes a transaction by reference and returns a
//! [`Cow`]: `Cow::Borrowed` hands back the very same transaction when the
//! operation does not apply, `Cow::Owned` carries a fresh copy (with the next
//! logical timestamp) that has the edit applied. The input is never
//! modified, so a mutator can be called again on its own no-op result and
//! will give the same answer.
//!
//! ```
//! use std::borrow::Cow;
//! use proseutil_engine::transforms::remove_selected_node;
//! use proseutil_model::{schema, Attrs, TextSelection, Transaction};
//!
//! let s = schema::basic().unwrap();
//! let p = s.node("paragraph", Attrs::new(), [s.text("ab").unwrap()]).unwrap();
//! let doc = s.node("doc", Attrs::new(), [p]).unwrap();
//! let tr = Transaction::new(doc.clone(), TextSelection::create(&doc, 1, 1).unwrap().into());
//!
//! // A text cursor has no selected node: nothing to remove.
//! assert!(matches!(remove_selected_node(&tr), Cow::Borrowed(_)));
//! ```

use std::borrow::Cow;

use proseutil_model::{
    Attrs, Direction, Mark, Node, NodeSelection, NodeType, ResolvedPos, Selection, Transaction,
};
use serde::{Deserialize, Serialize};

use crate::ancestor::{find_parent_node_of_type, find_position_of_node_before};
use crate::types::NodeTypeSet;

/// Options for [`safe_insert_with`].
///
/// Deserialises from a table with every key optional, so hosts can embed it
/// in their own settings files:
///
/// ```toml
/// position = 12
/// try_to_replace = true
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SafeInsertOptions {
    /// Insert relative to this position instead of the selection.
    pub position: Option<usize>,
    /// Replace a selected node or an empty textblock around the cursor
    /// before falling back to inserting.
    pub try_to_replace: bool,
}

fn unchanged<'a>(tr: &'a Transaction, reason: &str) -> Cow<'a, Transaction> {
    log::debug!("transaction unchanged: {reason}");
    Cow::Borrowed(tr)
}

/// Whether the container of `pos` accepts a node of `node_type` in the slot
/// `from_index..to_index`.
fn can_replace(
    pos: &ResolvedPos,
    depth: usize,
    from_index: usize,
    to_index: usize,
    node_type: &NodeType,
) -> bool {
    pos.node(depth).can_replace_with(from_index, to_index, node_type)
}

/// Whether `node` may be inserted at `pos` without splitting anything.
pub fn can_insert(pos: &ResolvedPos, node: &Node) -> bool {
    let index = pos.index(pos.depth());
    pos.parent().can_replace_with(index, index, node.node_type())
}

pub fn is_empty_textblock(node: &Node) -> bool {
    node.is_textblock() && node.content_size() == 0
}

/// Replaces the node enclosing `position` with `node`.
///
/// `position` resolves to the innermost node whose content contains it,
/// which is replaced as a whole when its own container accepts `node`'s
/// type in that slot.
pub fn replace_node_at_pos<'a>(
    tr: &'a Transaction,
    position: usize,
    node: &Node,
) -> Cow<'a, Transaction> {
    let Ok(pos) = tr.doc().resolve(position) else {
        return unchanged(tr, "position out of range");
    };
    let depth = pos.depth();
    let (Some(from), Some(to)) = (pos.before(depth), pos.after(depth)) else {
        return unchanged(tr, "the document itself cannot be replaced");
    };
    let index = pos.index(depth - 1);
    if !can_replace(&pos, depth - 1, index, index + 1, node.node_type()) {
        return unchanged(tr, "container does not accept the replacement");
    }

    let mut next = tr.clone_with_fresh_time();
    next.replace_with(from, to, node.clone());
    Cow::Owned(next)
}

/// Deletes the node enclosing `position`.
///
/// Always produces a new transaction, even when `position` sits directly in
/// the document and there is nothing to delete.
pub fn remove_node_at_pos(tr: &Transaction, position: usize) -> Cow<'_, Transaction> {
    let mut next = tr.clone_with_fresh_time();
    let pos = tr.doc().resolve_clamped(position);
    let depth = pos.depth();
    if let (Some(from), Some(to)) = (pos.before(depth), pos.after(depth)) {
        next.delete(from, to);
    }
    Cow::Owned(next)
}

pub fn remove_parent_node_of_type(
    tr: &Transaction,
    types: impl NodeTypeSet,
) -> Cow<'_, Transaction> {
    match find_parent_node_of_type(tr.selection(), types) {
        Some(parent) => remove_node_at_pos(tr, parent.start),
        None => unchanged(tr, "no parent of the requested type"),
    }
}

pub fn replace_parent_node_of_type<'a>(
    tr: &'a Transaction,
    types: impl NodeTypeSet,
    node: &Node,
) -> Cow<'a, Transaction> {
    match find_parent_node_of_type(tr.selection(), types) {
        Some(parent) => replace_node_at_pos(tr, parent.start, node),
        None => unchanged(tr, "no parent of the requested type"),
    }
}

pub fn remove_selected_node(tr: &Transaction) -> Cow<'_, Transaction> {
    let Selection::Node(selection) = tr.selection() else {
        return unchanged(tr, "not a node selection");
    };
    let (from, to) = (selection.from().pos(), selection.to().pos());
    let mut next = tr.clone_with_fresh_time();
    next.delete(from, to);
    Cow::Owned(next)
}

/// Replaces the selected node with `node` and selects the replacement.
pub fn replace_selected_node<'a>(tr: &'a Transaction, node: &Node) -> Cow<'a, Transaction> {
    let Selection::Node(selection) = tr.selection() else {
        return unchanged(tr, "not a node selection");
    };
    let (from, to) = (selection.from(), selection.to());
    let depth = from.depth();
    if !can_replace(
        from,
        depth,
        from.index(depth),
        to.index_after(depth),
        node.node_type(),
    ) {
        return unchanged(tr, "container does not accept the replacement");
    }

    let mut next = tr.clone_with_fresh_time();
    next.replace_with(from.pos(), to.pos(), node.clone());
    if let Some(selected) = NodeSelection::create(next.doc(), from.pos()) {
        next.set_selection(selected.into());
    }
    Cow::Owned(next)
}

/// Inserts `node` at the cursor, or right after the innermost ancestor
/// whose container accepts it.
pub fn safe_insert<'a>(tr: &'a Transaction, node: &Node) -> Cow<'a, Transaction> {
    safe_insert_with(tr, node, &SafeInsertOptions::default())
}

pub fn safe_insert_with<'a>(
    tr: &'a Transaction,
    node: &Node,
    options: &SafeInsertOptions,
) -> Cow<'a, Transaction> {
    if options.try_to_replace {
        if let Cow::Owned(next) = replace_selected_node(tr, node) {
            return Cow::Owned(next);
        }
        let from = tr.selection().from();
        if from.depth() > 0
            && is_empty_textblock(from.parent())
            && let Cow::Owned(next) = replace_node_at_pos(tr, from.pos(), node)
        {
            return Cow::Owned(next);
        }
    }

    let pos = match options.position {
        Some(position) => match tr.doc().resolve(position) {
            Ok(pos) => pos,
            Err(err) => return unchanged(tr, &err.to_string()),
        },
        None => tr.selection().from().clone(),
    };

    if can_insert(&pos, node) {
        let mut next = tr.clone_with_fresh_time();
        next.insert(pos.pos(), node.clone());
        return Cow::Owned(next);
    }

    for depth in (1..=pos.depth()).rev() {
        let Some(after) = pos.after(depth) else {
            continue;
        };
        let Ok(outside) = tr.doc().resolve(after) else {
            continue;
        };
        if can_insert(&outside, node) {
            log::debug!(
                "inserting {} after {} at depth {depth}",
                node.node_type().name(),
                pos.node(depth).node_type().name()
            );
            let mut next = tr.clone_with_fresh_time();
            next.insert(after, node.clone());
            return Cow::Owned(next);
        }
    }

    unchanged(tr, "no ancestor accepts the node")
}

/// Moves the selection to the nearest text position from `position` in
/// `dir`.
pub fn set_text_selection(
    tr: &Transaction,
    position: usize,
    dir: Direction,
) -> Cow<'_, Transaction> {
    let Ok(pos) = tr.doc().resolve(position) else {
        return unchanged(tr, "position out of range");
    };
    match Selection::find_from(&pos, dir, true) {
        Some(selection) => {
            let mut next = tr.clone_with_fresh_time();
            next.set_selection(selection);
            Cow::Owned(next)
        }
        None => unchanged(tr, "no text position in that direction"),
    }
}

pub fn select_parent_node_of_type(
    tr: &Transaction,
    types: impl NodeTypeSet,
) -> Cow<'_, Transaction> {
    if tr.selection().is_node_selection() {
        return unchanged(tr, "a node is already selected");
    }
    let Some(parent) = find_parent_node_of_type(tr.selection(), types) else {
        return unchanged(tr, "no parent of the requested type");
    };
    let Some(selection) = NodeSelection::create(tr.doc(), parent.pos) else {
        return unchanged(tr, "parent cannot be node-selected");
    };
    let mut next = tr.clone_with_fresh_time();
    next.set_selection(selection.into());
    Cow::Owned(next)
}

/// Changes the markup of the nearest ancestor of `types`. `attrs` are
/// merged over the ancestor's current attributes, keeping only those the
/// resulting type declares; `None` keeps the current type or marks.
pub fn set_parent_node_markup<'a>(
    tr: &'a Transaction,
    types: impl NodeTypeSet,
    node_type: Option<&NodeType>,
    attrs: Attrs,
    marks: Option<Vec<Mark>>,
) -> Cow<'a, Transaction> {
    let Some(parent) = find_parent_node_of_type(tr.selection(), types) else {
        return unchanged(tr, "no parent of the requested type");
    };
    let target = node_type.unwrap_or(parent.node.node_type());
    let mut merged = parent.node.attrs().clone();
    merged.extend(attrs);
    merged.retain(|name, _| target.default_attrs().contains_key(name));

    let mut next = tr.clone_with_fresh_time();
    match next.set_node_markup(parent.pos, node_type, Some(merged), marks) {
        Ok(_) => Cow::Owned(next),
        Err(err) => unchanged(tr, &err.to_string()),
    }
}

/// Removes the node directly before the selection.
///
/// Only a whole node ending at or before the selection's start is removed.
/// Inside inline content that is the sibling ending at the cursor; a cursor
/// in the middle of a text node leaves the transaction unchanged.
pub fn remove_node_before(tr: &Transaction) -> Cow<'_, Transaction> {
    let from = tr.selection().from();
    let Some(position) = find_position_of_node_before(tr.selection()) else {
        return unchanged(tr, "nothing before the selection");
    };

    let (start, end) = if position == from.pos() {
        // the backward step stayed on the cursor: inline content
        if from.text_offset() > 0 {
            return unchanged(tr, "selection starts inside a text node");
        }
        let Some(before) = from.node_before() else {
            return unchanged(tr, "nothing before the selection");
        };
        (from.pos() - before.node_size(), from.pos())
    } else {
        let Some(node) = tr.doc().node_at(position) else {
            return unchanged(tr, "no node at the preceding position");
        };
        let end = position + node.node_size();
        if end > from.pos() {
            return unchanged(tr, "preceding node overlaps the selection");
        }
        (position, end)
    };

    let mut next = tr.clone_with_fresh_time();
    next.delete(start, end);
    Cow::Owned(next)
}
