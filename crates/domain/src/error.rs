use thiserror::Error;

/// Data-layer errors
///
/// Clone + PartialEq so a fetch result can be fanned out to every caller
/// joined on the same in-flight request.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DataError {
    #[error("remote API error: {0}")]
    Remote(String),

    #[error("local store error: {0}")]
    Store(String),

    #[error("tags not available: {0}")]
    NotAvailable(String),
}

pub type Result<T> = std::result::Result<T, DataError>;
