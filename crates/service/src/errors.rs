use thiserror::Error;

/// Infrastructure failures surfaced by a user repository.
///
/// Domain outcomes such as "no user with that id" or "create rejected" are
/// expressed in the `Ok` variant of the repository contract, never here.
/// `Clone` and `PartialEq` let callers assert that an error crossed the
/// service unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    #[error("database error: {0}")]
    Db(String),
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}
