use thiserror::Error;

/// Errors that can occur in the place store.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Malformed store file: {0}")]
    Malformed(String),

    #[error("Duplicate name: {0}")]
    DuplicateName(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("I/O error: {0}")]
    Io(String),
}
