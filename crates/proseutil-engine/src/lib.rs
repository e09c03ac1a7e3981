//! # proseutil-engine
//!
//! Search and edit helpers layered over the [`proseutil_model`] document
//! model: find ancestors of a selection, enumerate descendants of a node,
//! project positions onto a rendered view, and apply structural edits to a
//! transaction without ever failing on "not applicable here".
//!
//! ## Module Structure
//!
//! ```text
//! proseutil-engine/
//! ├── ancestor.rs    # Innermost-first searches up a position's ancestor chain
//! ├── descendant.rs  # flatten and filtered descendant queries
//! ├── view.rs        # DomNode trait, position → view reference
//! ├── transforms.rs  # Cow-returning transaction mutators, safe_insert
//! ├── types.rs       # Result records and the NodeTypeSet trait
//! └── error.rs       # QueryError
//! ```
//!
//! ## Two kinds of "nothing"
//!
//! Missing required input (an absent node passed to a descendant query) is
//! a [`QueryError`]. A search that finds nothing returns `None` or an empty
//! list, and a mutator that cannot apply returns `Cow::Borrowed` of its
//! input. Mutators therefore chain without error plumbing:
//!
//! ```
//! use proseutil_engine::transforms::{remove_parent_node_of_type, safe_insert};
//! use proseutil_model::{schema, Attrs, TextSelection, Transaction};
//!
//! let s = schema::basic().unwrap();
//! let p = s.node("paragraph", Attrs::new(), [s.text("ab").unwrap()]).unwrap();
//! let doc = s.node("doc", Attrs::new(), [p]).unwrap();
//! let tr = Transaction::new(doc.clone(), TextSelection::create(&doc, 2, 2).unwrap().into());
//!
//! let rule = s.node("horizontal_rule", Attrs::new(), []).unwrap();
//! let tr = safe_insert(&tr, &rule);
//! let quote = s.node_type("blockquote").unwrap();
//! let tr = remove_parent_node_of_type(&tr, quote);
//!
//! assert_eq!(tr.doc().to_string(), r#"doc(paragraph("ab"), horizontal_rule)"#);
//! ```

pub mod ancestor;
pub mod descendant;
pub mod error;
pub mod transforms;
pub mod types;
pub mod view;

#[cfg(test)]
mod test_support;

pub use ancestor::*;
pub use descendant::*;
pub use error::QueryError;
pub use transforms::*;
pub use types::*;
pub use view::*;
