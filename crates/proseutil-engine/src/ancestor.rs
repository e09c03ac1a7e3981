//! Searches up the ancestor chain of a position or selection.
//!
//! Every search walks from the innermost ancestor outward and stops at the
//! first match, so the innermost matching ancestor always wins. The document
//! itself (depth 0) is never a candidate.

use proseutil_model::{Direction, Node, NodeSelection, ResolvedPos, Selection};

use crate::types::{ContentNodeWithPos, NodeTypeSet, SelectedNodeWithPos, equal_node_type};

/// Finds the innermost ancestor of `pos` (excluding the document) for which
/// `predicate` holds.
pub fn find_parent_node_closest_to_pos<P>(
    pos: &ResolvedPos,
    predicate: P,
) -> Option<ContentNodeWithPos>
where
    P: Fn(&Node) -> bool,
{
    let mut depth = pos.depth();
    while depth > 0 {
        let node = pos.node(depth);
        if predicate(node) {
            log::trace!(
                "ancestor {} matched at depth {depth}",
                node.node_type().name()
            );
            return Some(ContentNodeWithPos {
                pos: pos.before(depth).unwrap_or(0),
                start: pos.start(depth),
                depth,
                node: node.clone(),
            });
        }
        depth -= 1;
    }
    None
}

/// [`find_parent_node_closest_to_pos`] from the selection's `from` side.
pub fn find_parent_node<P>(selection: &Selection, predicate: P) -> Option<ContentNodeWithPos>
where
    P: Fn(&Node) -> bool,
{
    find_parent_node_closest_to_pos(selection.from(), predicate)
}

pub fn has_parent_node<P>(selection: &Selection, predicate: P) -> bool
where
    P: Fn(&Node) -> bool,
{
    find_parent_node(selection, predicate).is_some()
}

pub fn find_parent_node_of_type_closest_to_pos(
    pos: &ResolvedPos,
    types: impl NodeTypeSet,
) -> Option<ContentNodeWithPos> {
    find_parent_node_closest_to_pos(pos, |node| equal_node_type(&types, node))
}

pub fn find_parent_node_of_type(
    selection: &Selection,
    types: impl NodeTypeSet,
) -> Option<ContentNodeWithPos> {
    find_parent_node_of_type_closest_to_pos(selection.from(), types)
}

pub fn has_parent_node_of_type(selection: &Selection, types: impl NodeTypeSet) -> bool {
    find_parent_node_of_type(selection, types).is_some()
}

pub fn is_node_selection(selection: &Selection) -> bool {
    selection.is_node_selection()
}

/// Returns the selected node when its type is one of `types`.
///
/// Takes the narrowed [`NodeSelection`]: callers match on
/// [`Selection::Node`] (or use [`Selection::as_node`]) first. No ancestor
/// walk happens; the node and its position come from the selection.
pub fn find_selected_node_of_type(
    selection: &NodeSelection,
    types: impl NodeTypeSet,
) -> Option<SelectedNodeWithPos> {
    let node = selection.node();
    if !equal_node_type(&types, node) {
        return None;
    }
    Some(SelectedNodeWithPos {
        node: node.clone(),
        pos: selection.from().pos(),
        depth: selection.from().depth(),
    })
}

/// Position of the sibling directly before the selection.
///
/// Steps backward from `from` to the nearest valid selection point. If an
/// ancestor of that point has the same type as the preceding sibling (the
/// sibling is a container the step landed inside), its position wins;
/// otherwise the backward point's own position is returned. Inside inline
/// content the backward point is the selection start itself, so that is the
/// position returned. `None` when nothing precedes the selection.
pub fn find_position_of_node_before(selection: &Selection) -> Option<usize> {
    let from = selection.from();
    let node_before = from.node_before()?;
    let backward = Selection::find_from(from, Direction::Backward, false)?;

    if let Some(parent) = find_parent_node_of_type(&backward, node_before.node_type()) {
        return Some(parent.pos);
    }
    Some(backward.from().pos())
}
