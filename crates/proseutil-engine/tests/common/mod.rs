// Shared builders for the integration tests. Each test binary uses a
// different subset, hence the allow.
#![allow(dead_code)]

use proseutil_model::{
    Attrs, Node, NodeSelection, NodeType, Schema, TextSelection, Transaction, schema,
};

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub struct Builder {
    pub schema: Schema,
}

impl Builder {
    pub fn basic() -> Self {
        Self {
            schema: schema::basic().unwrap(),
        }
    }

    pub fn with_schema(schema: Schema) -> Self {
        Self { schema }
    }

    pub fn ty(&self, name: &str) -> NodeType {
        self.schema.node_type(name).unwrap().clone()
    }

    pub fn node(&self, name: &str, children: Vec<Node>) -> Node {
        self.schema.node(name, Attrs::new(), children).unwrap()
    }

    pub fn text(&self, value: &str) -> Node {
        self.schema.text(value).unwrap()
    }

    pub fn p(&self, value: &str) -> Node {
        self.node("paragraph", vec![self.text(value)])
    }

    pub fn doc(&self, children: Vec<Node>) -> Node {
        self.node("doc", children)
    }

    pub fn rule(&self) -> Node {
        self.node("horizontal_rule", vec![])
    }

    pub fn image(&self) -> Node {
        self.node("image", vec![])
    }
}

pub fn cursor_tr(doc: Node, pos: usize) -> Transaction {
    let sel = TextSelection::create(&doc, pos, pos).unwrap();
    Transaction::new(doc, sel.into())
}

pub fn node_tr(doc: Node, pos: usize) -> Transaction {
    let sel = NodeSelection::create(&doc, pos).unwrap();
    Transaction::new(doc, sel.into())
}
