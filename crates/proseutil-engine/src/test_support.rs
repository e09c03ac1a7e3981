//! Document builders over the basic schema for unit tests.

use proseutil_model::{
    Attrs, Node, NodeSelection, NodeType, Schema, TextSelection, Transaction, schema,
};

pub fn basic() -> Schema {
    schema::basic().unwrap()
}

pub fn ty(name: &str) -> NodeType {
    basic().node_type(name).unwrap().clone()
}

pub fn node(name: &str, children: Vec<Node>) -> Node {
    basic().node(name, Attrs::new(), children).unwrap()
}

pub fn text(value: &str) -> Node {
    basic().text(value).unwrap()
}

pub fn doc(children: Vec<Node>) -> Node {
    node("doc", children)
}

pub fn p(value: &str) -> Node {
    node("paragraph", vec![text(value)])
}

pub fn cursor_tr(doc: Node, pos: usize) -> Transaction {
    let sel = TextSelection::create(&doc, pos, pos).unwrap();
    Transaction::new(doc, sel.into())
}

pub fn node_tr(doc: Node, pos: usize) -> Transaction {
    let sel = NodeSelection::create(&doc, pos).unwrap();
    Transaction::new(doc, sel.into())
}
