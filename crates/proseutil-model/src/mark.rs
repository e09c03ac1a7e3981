use std::fmt;

use crate::attrs::{AttrValue, Attrs};
use crate::schema::MarkType;

/// An inline formatting tag attached to a node.
#[derive(Clone, PartialEq, Eq)]
pub struct Mark {
    mark_type: MarkType,
    attrs: Attrs,
}

impl Mark {
    pub(crate) fn new(mark_type: MarkType, attrs: Attrs) -> Self {
        Self { mark_type, attrs }
    }

    pub fn mark_type(&self) -> &MarkType {
        &self.mark_type
    }

    pub fn attrs(&self) -> &Attrs {
        &self.attrs
    }

    pub fn attr(&self, name: &str) -> Option<&AttrValue> {
        self.attrs.get(name)
    }
}

impl fmt::Debug for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.mark_type.name())?;
        if !self.attrs.is_empty() {
            write!(f, "{:?}", self.attrs)?;
        }
        Ok(())
    }
}
