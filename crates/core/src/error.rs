//! Registration-time validation errors

use teledeck_types::Size;
use thiserror::Error;

/// Why a view definition was rejected at registration time.
///
/// These never escape [`Registry::register`](crate::Registry::register):
/// the registration boundary logs the error and drops the one offending
/// view, leaving the rest of the catalog intact.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidViewError {
    #[error("no name specified for the view")]
    MissingName,
    #[error("a view already exists with the same name: {0}")]
    DuplicateName(String),
    #[error("no data types specified for {0}")]
    NoDataTypes(String),
    #[error("no size variants specified for {0}")]
    NoVariants(String),
    #[error("the preferred size {size} of {name} doesn't have an associated variant")]
    PreferredSizeWithoutVariant { name: String, size: Size },
}
