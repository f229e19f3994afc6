use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Domain user (business view).
///
/// A nil id marks a transient instance that has not been persisted yet; the
/// repository assigns a real id on create and never changes it afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub full_name: String,
}

impl User {
    /// Transient user awaiting persistence.
    pub fn new(full_name: impl Into<String>) -> Self {
        Self { id: Uuid::nil(), full_name: full_name.into() }
    }

    /// True until the repository has assigned an identity.
    pub fn is_transient(&self) -> bool {
        self.id.is_nil()
    }
}
