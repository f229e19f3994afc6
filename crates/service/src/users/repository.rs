use async_trait::async_trait;
use uuid::Uuid;

use super::domain::User;
use crate::errors::RepositoryError;

/// Repository abstraction for user persistence.
///
/// Domain outcomes ride in the `Ok` variant: a missing row is `None`, a
/// rejected create is `Ok(None)`, a no-op delete is `Ok(false)`. `Err` is
/// reserved for infrastructure failures.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn get_all(&self) -> Result<Vec<User>, RepositoryError>;
    async fn get_by_id(&self, id: Uuid) -> Result<Option<User>, RepositoryError>;
    /// Persists the user, assigning a fresh id when the incoming one is nil.
    /// Returns the persisted value, or `None` when the write was rejected.
    async fn create(&self, user: User) -> Result<Option<User>, RepositoryError>;
    /// Returns `true` when a user existed and was removed.
    async fn delete_by_id(&self, id: Uuid) -> Result<bool, RepositoryError>;
}

/// Simple in-memory repositories for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// In-memory store that also records interactions, so tests can assert
    /// what the service passed through (create inputs as received, number of
    /// delete calls).
    #[derive(Default)]
    pub struct InMemoryUserRepository {
        users: Mutex<HashMap<Uuid, User>>, // key: user id
        create_inputs: Mutex<Vec<User>>,
        delete_calls: AtomicUsize,
    }

    impl InMemoryUserRepository {
        /// Store seeded with the given users.
        pub fn with_users(users: impl IntoIterator<Item = User>) -> Self {
            let repo = Self::default();
            {
                let mut map = repo.users.lock().unwrap();
                for user in users {
                    map.insert(user.id, user);
                }
            }
            repo
        }

        /// Create arguments exactly as the repository received them.
        pub fn create_inputs(&self) -> Vec<User> {
            self.create_inputs.lock().unwrap().clone()
        }

        pub fn delete_calls(&self) -> usize {
            self.delete_calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl UserRepository for InMemoryUserRepository {
        async fn get_all(&self) -> Result<Vec<User>, RepositoryError> {
            let users = self.users.lock().unwrap();
            Ok(users.values().cloned().collect())
        }

        async fn get_by_id(&self, id: Uuid) -> Result<Option<User>, RepositoryError> {
            let users = self.users.lock().unwrap();
            Ok(users.get(&id).cloned())
        }

        async fn create(&self, user: User) -> Result<Option<User>, RepositoryError> {
            self.create_inputs.lock().unwrap().push(user.clone());
            let mut users = self.users.lock().unwrap();
            let mut persisted = user;
            if persisted.id.is_nil() {
                persisted.id = Uuid::new_v4();
            }
            if users.contains_key(&persisted.id) {
                return Ok(None);
            }
            users.insert(persisted.id, persisted.clone());
            Ok(Some(persisted))
        }

        async fn delete_by_id(&self, id: Uuid) -> Result<bool, RepositoryError> {
            self.delete_calls.fetch_add(1, Ordering::SeqCst);
            let mut users = self.users.lock().unwrap();
            Ok(users.remove(&id).is_some())
        }
    }

    /// Repository whose every operation fails with a fixed error.
    pub struct FailingUserRepository {
        pub error: RepositoryError,
    }

    impl FailingUserRepository {
        pub fn new(error: RepositoryError) -> Self {
            Self { error }
        }
    }

    #[async_trait]
    impl UserRepository for FailingUserRepository {
        async fn get_all(&self) -> Result<Vec<User>, RepositoryError> {
            Err(self.error.clone())
        }

        async fn get_by_id(&self, _id: Uuid) -> Result<Option<User>, RepositoryError> {
            Err(self.error.clone())
        }

        async fn create(&self, _user: User) -> Result<Option<User>, RepositoryError> {
            Err(self.error.clone())
        }

        async fn delete_by_id(&self, _id: Uuid) -> Result<bool, RepositoryError> {
            Err(self.error.clone())
        }
    }
}
