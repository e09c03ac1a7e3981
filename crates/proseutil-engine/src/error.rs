use thiserror::Error;

/// Precondition violations raised by the descendant queries.
///
/// Not finding anything is never an error: queries return `None` or an
/// empty list and mutators hand back their input transaction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("invalid argument: `{0}` is required")]
    InvalidArgument(&'static str),
}
