//! Queries over the descendants of a node.
//!
//! Results are in document order and carry the position directly before
//! each descendant, relative to the start of the searched node's content
//! (for a document that is the absolute position).
//!
//! With `descend == false` only direct children are visited.
//!
//! The node argument may be absent (`None`), which is rejected with
//! [`QueryError::InvalidArgument`]; plain `&Node` arguments convert
//! implicitly.

use proseutil_model::{Attrs, MarkType, Node, NodeType};

use crate::error::QueryError;
use crate::types::NodeWithPos;

fn require<'a>(node: impl Into<Option<&'a Node>>) -> Result<&'a Node, QueryError> {
    node.into().ok_or(QueryError::InvalidArgument("node"))
}

fn collect<P>(node: &Node, predicate: P, descend: bool) -> Vec<NodeWithPos>
where
    P: Fn(&Node) -> bool,
{
    let mut result = Vec::new();
    node.descendants(|child, pos| {
        if predicate(child) {
            result.push(NodeWithPos {
                node: child.clone(),
                pos,
            });
        }
        descend
    });
    result
}

/// Every descendant of `node` (or only its children) with positions.
pub fn flatten<'a>(
    node: impl Into<Option<&'a Node>>,
    descend: bool,
) -> Result<Vec<NodeWithPos>, QueryError> {
    Ok(collect(require(node)?, |_| true, descend))
}

/// [`flatten`] filtered by `predicate`.
pub fn find_children<'a, P>(
    node: impl Into<Option<&'a Node>>,
    predicate: P,
    descend: bool,
) -> Result<Vec<NodeWithPos>, QueryError>
where
    P: Fn(&Node) -> bool,
{
    Ok(collect(require(node)?, predicate, descend))
}

pub fn find_text_nodes<'a>(
    node: impl Into<Option<&'a Node>>,
    descend: bool,
) -> Result<Vec<NodeWithPos>, QueryError> {
    find_children(node, Node::is_text, descend)
}

pub fn find_inline_nodes<'a>(
    node: impl Into<Option<&'a Node>>,
    descend: bool,
) -> Result<Vec<NodeWithPos>, QueryError> {
    find_children(node, Node::is_inline, descend)
}

pub fn find_block_nodes<'a>(
    node: impl Into<Option<&'a Node>>,
    descend: bool,
) -> Result<Vec<NodeWithPos>, QueryError> {
    find_children(node, Node::is_block, descend)
}

pub fn find_children_by_attr<'a, P>(
    node: impl Into<Option<&'a Node>>,
    predicate: P,
    descend: bool,
) -> Result<Vec<NodeWithPos>, QueryError>
where
    P: Fn(&Attrs) -> bool,
{
    find_children(node, |child| predicate(child.attrs()), descend)
}

pub fn find_children_by_type<'a>(
    node: impl Into<Option<&'a Node>>,
    node_type: &NodeType,
    descend: bool,
) -> Result<Vec<NodeWithPos>, QueryError> {
    find_children(node, |child| child.node_type() == node_type, descend)
}

pub fn find_children_by_mark<'a>(
    node: impl Into<Option<&'a Node>>,
    mark_type: &MarkType,
    descend: bool,
) -> Result<Vec<NodeWithPos>, QueryError> {
    find_children(node, |child| mark_type.is_in_set(child.marks()), descend)
}

/// Whether `node` has a descendant of `node_type` at any depth.
pub fn contains<'a>(
    node: impl Into<Option<&'a Node>>,
    node_type: &NodeType,
) -> Result<bool, QueryError> {
    Ok(!find_children_by_type(node, node_type, true)?.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::*;
    use pretty_assertions::assert_eq;

    fn positions(found: &[NodeWithPos]) -> Vec<usize> {
        found.iter().map(|n| n.pos).collect()
    }

    #[test]
    fn flatten_descends_in_document_order() {
        let doc = doc(vec![p("ab"), p("c")]);
        let all = flatten(&doc, true).unwrap();
        assert_eq!(positions(&all), vec![0, 1, 4, 5]);
    }

    #[test]
    fn shallow_flatten_visits_only_children() {
        let quote = node("blockquote", vec![p("ab")]);
        let doc = doc(vec![quote, p("c")]);
        let children = flatten(&doc, false).unwrap();

        assert_eq!(children.len(), doc.child_count());
        assert_eq!(positions(&children), vec![0, 6]);
    }

    #[test]
    fn absent_node_is_invalid_argument() {
        let missing: Option<&Node> = None;
        assert_eq!(
            flatten(missing, true).unwrap_err(),
            QueryError::InvalidArgument("node")
        );
        assert!(contains(missing, &ty("paragraph")).is_err());
    }

    #[test]
    fn find_children_results_satisfy_predicate() {
        let doc = doc(vec![p("ab"), node("horizontal_rule", vec![]), p("c")]);
        let blocks = find_block_nodes(&doc, true).unwrap();
        assert!(blocks.iter().all(|n| n.node.is_block()));
        assert_eq!(blocks.len(), 3);

        let texts = find_text_nodes(&doc, true).unwrap();
        assert_eq!(positions(&texts), vec![1, 6]);
    }
}
