//! # proseutil-model
//!
//! The document model that the proseutil search and transform helpers work
//! against: an immutable, schema-typed tree addressed by integer positions.
//!
//! ## Position model
//!
//! Every node occupies a run of positions. Text counts one position per
//! character, a leaf node (an image, a rule) counts one, and every other node
//! counts its content plus one opening and one closing token:
//!
//! ```text
//! doc( paragraph( "ab" ) )
//!    0 1          2   3  4
//! ```
//!
//! Position 0 sits before the paragraph, 1 at the start of its content,
//! 3 after the `b`, 4 after the paragraph.
//!
//! ## Module Structure
//!
//! ```text
//! proseutil-model/
//! ├── schema.rs      # NodeSpec/MarkSpec, NodeType/MarkType, Schema builder
//! ├── attrs.rs       # Attribute values
//! ├── mark.rs        # Inline marks
//! ├── fragment.rs    # Child sequences with cached sizes
//! ├── node.rs        # Arc-shared immutable nodes
//! ├── resolved.rs    # ResolvedPos: ancestor chain of a position
//! ├── selection.rs   # Text and node selections
//! ├── mapping.rs     # Position mapping through edits
//! └── transaction.rs # Step-recording edit builder
//! ```
//!
//! ## Quick Start
//!
//! ```
//! use proseutil_model::{schema, Attrs, Transaction, TextSelection};
//!
//! let s = schema::basic().unwrap();
//! let paragraph = s.node("paragraph", Attrs::new(), [s.text("ab").unwrap()]).unwrap();
//! let doc = s.node("doc", Attrs::new(), [paragraph]).unwrap();
//!
//! let cursor = TextSelection::create(&doc, 2, 2).unwrap();
//! let mut tr = Transaction::new(doc, cursor.into());
//! tr.insert(2, s.text("X").unwrap());
//!
//! assert_eq!(tr.doc().to_string(), r#"doc(paragraph("aXb"))"#);
//! ```

pub mod attrs;
pub mod error;
pub mod fragment;
pub mod mapping;
pub mod mark;
pub mod node;
pub mod resolved;
pub mod schema;
pub mod selection;
pub mod transaction;

pub use attrs::{AttrValue, Attrs, attrs};
pub use error::{PositionError, SchemaError, TransformError};
pub use fragment::Fragment;
pub use mapping::{Assoc, MapResult, Mapping, StepMap};
pub use mark::Mark;
pub use node::Node;
pub use resolved::ResolvedPos;
pub use schema::{MarkSpec, MarkType, NodeSpec, NodeType, Schema, SchemaBuilder};
pub use selection::{Direction, NodeSelection, Selection, TextSelection};
pub use transaction::{Step, Transaction};
