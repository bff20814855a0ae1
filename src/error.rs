use thiserror::Error;

/// Errors returned by fallible list operations.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The operation needs at least one element.
    #[error("list is empty")]
    Empty,
}

pub type Result<T> = core::result::Result<T, Error>;
