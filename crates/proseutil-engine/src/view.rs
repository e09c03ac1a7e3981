//! Projection of document positions onto the rendered view.
//!
//! The view layer is abstracted by [`DomNode`]; the caller supplies the
//! position mapper (a `Fn(usize) -> DomAtPos<N>`) and this module only
//! normalises what it returns, so callers always get an element-like
//! reference and never a raw text fragment.

use proseutil_model::{Node, Selection};

use crate::ancestor::{find_parent_node, find_parent_node_of_type};
use crate::types::NodeTypeSet;

/// A handle into the rendered view.
pub trait DomNode: Clone {
    fn is_text(&self) -> bool;

    fn parent_node(&self) -> Option<Self>;

    /// The child at `offset`, when there is one.
    fn child_node(&self, offset: usize) -> Option<Self>;
}

/// What the view's position mapper returns: a view node and an offset into
/// its children (or into its text for text fragments).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomAtPos<N> {
    pub node: N,
    pub offset: usize,
}

/// The element-like view node for `position`.
///
/// A text fragment is replaced by its parent element. `None` when the
/// mapper returns a text fragment that has no parent to stand in for it.
pub fn find_dom_ref_at_pos<N, F>(position: usize, dom_at_pos: F) -> Option<N>
where
    N: DomNode,
    F: Fn(usize) -> DomAtPos<N>,
{
    let dom = dom_at_pos(position);

    if dom.node.is_text() {
        let parent = dom.node.parent_node();
        if parent.is_none() {
            log::warn!("detached text fragment at position {position}");
        }
        return parent;
    }

    match dom.node.child_node(dom.offset) {
        Some(child) if !child.is_text() => Some(child),
        _ => Some(dom.node),
    }
}

/// View reference of the innermost ancestor of the selection matching
/// `predicate`.
pub fn find_parent_dom_ref<N, P, F>(
    selection: &Selection,
    predicate: P,
    dom_at_pos: F,
) -> Option<N>
where
    N: DomNode,
    P: Fn(&Node) -> bool,
    F: Fn(usize) -> DomAtPos<N>,
{
    let parent = find_parent_node(selection, predicate)?;
    find_dom_ref_at_pos(parent.pos, dom_at_pos)
}

pub fn find_parent_dom_ref_of_type<N, F>(
    selection: &Selection,
    types: impl NodeTypeSet,
    dom_at_pos: F,
) -> Option<N>
where
    N: DomNode,
    F: Fn(usize) -> DomAtPos<N>,
{
    let parent = find_parent_node_of_type(selection, types)?;
    find_dom_ref_at_pos(parent.pos, dom_at_pos)
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::test_support::*;
    use pretty_assertions::assert_eq;

    /// `div > [ "hello", span > [ "x" ] ]` stored flat.
    struct Tree {
        parents: Vec<Option<usize>>,
        children: Vec<Vec<usize>>,
        text: Vec<bool>,
    }

    #[derive(Clone)]
    struct Fake {
        tree: Rc<Tree>,
        id: usize,
    }

    impl std::fmt::Debug for Fake {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "#{}", self.id)
        }
    }

    impl PartialEq for Fake {
        fn eq(&self, other: &Self) -> bool {
            self.id == other.id
        }
    }

    impl DomNode for Fake {
        fn is_text(&self) -> bool {
            self.tree.text[self.id]
        }

        fn parent_node(&self) -> Option<Self> {
            self.tree.parents[self.id].map(|id| self.at(id))
        }

        fn child_node(&self, offset: usize) -> Option<Self> {
            self.tree.children[self.id].get(offset).map(|&id| self.at(id))
        }
    }

    impl Fake {
        fn at(&self, id: usize) -> Self {
            Self {
                tree: Rc::clone(&self.tree),
                id,
            }
        }
    }

    // ids: 0 div, 1 "hello", 2 span, 3 "x"
    fn view() -> Fake {
        let tree = Tree {
            parents: vec![None, Some(0), Some(0), Some(2)],
            children: vec![vec![1, 2], vec![], vec![3], vec![]],
            text: vec![false, true, false, true],
        };
        Fake {
            tree: Rc::new(tree),
            id: 0,
        }
    }

    #[test]
    fn text_fragment_is_replaced_by_its_element() {
        let root = view();
        let found = find_dom_ref_at_pos(0, |_| DomAtPos {
            node: root.at(1),
            offset: 2,
        });
        assert_eq!(found.map(|n| n.id), Some(0));
    }

    #[test]
    fn element_child_at_offset_wins() {
        let root = view();
        let found = find_dom_ref_at_pos(0, |_| DomAtPos {
            node: root.clone(),
            offset: 1,
        });
        assert_eq!(found.map(|n| n.id), Some(2));
    }

    #[test]
    fn text_or_missing_child_keeps_the_element() {
        let root = view();
        let text_child = find_dom_ref_at_pos(0, |_| DomAtPos {
            node: root.clone(),
            offset: 0,
        });
        let past_end = find_dom_ref_at_pos(0, |_| DomAtPos {
            node: root.clone(),
            offset: 7,
        });
        assert_eq!(text_child.map(|n| n.id), Some(0));
        assert_eq!(past_end.map(|n| n.id), Some(0));
    }

    #[test]
    fn detached_text_fragment_gives_nothing() {
        let lone = Fake {
            tree: Rc::new(Tree {
                parents: vec![None],
                children: vec![vec![]],
                text: vec![true],
            }),
            id: 0,
        };
        let found = find_dom_ref_at_pos(3, |_| DomAtPos {
            node: lone.clone(),
            offset: 1,
        });
        assert_eq!(found, None);
    }

    #[test]
    fn parent_dom_ref_uses_ancestor_position() {
        let root = view();
        let tr = cursor_tr(doc(vec![p("ab"), p("cd")]), 6);

        let found = find_parent_dom_ref_of_type(tr.selection(), ty("paragraph"), |pos| {
            assert_eq!(pos, 4);
            DomAtPos {
                node: root.clone(),
                offset: 1,
            }
        });
        assert_eq!(found.map(|n| n.id), Some(2));

        let is_heading = |n: &Node| n.node_type().name() == "heading";
        let missing = find_parent_dom_ref(tr.selection(), is_heading, |_| DomAtPos {
            node: root.clone(),
            offset: 0,
        });
        assert_eq!(missing, None);
    }
}
