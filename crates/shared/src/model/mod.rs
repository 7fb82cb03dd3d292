use thiserror::Error;

mod user;
pub use user::*;

mod exercise;
pub use exercise::*;

/// Failures surfaced by the persistence layer.
///
/// `DuplicateKey` is split out so callers can react to unique-constraint hits
/// without matching on sqlite error codes themselves.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("duplicate key")]
    DuplicateKey,
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),
}

impl StoreError {
    /// Translates unique-constraint violations into `DuplicateKey`, passing
    /// every other sqlite error through untouched.
    pub(crate) fn from_insert(err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::SqliteFailure(e, _)
                if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE =>
            {
                StoreError::DuplicateKey
            },
            e => StoreError::Sqlite(e),
        }
    }
}
