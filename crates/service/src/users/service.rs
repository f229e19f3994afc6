use std::sync::Arc;
use std::time::Instant;

use tracing::instrument;
use uuid::Uuid;

use super::domain::User;
use super::repository::UserRepository;
use crate::errors::RepositoryError;
use crate::logging::{templates, LoggerAdapter};

/// User business service independent of web framework.
///
/// Wraps every repository operation with the same protocol: announce the
/// intent, measure elapsed time, report a failure with its original error,
/// and always close with a completion log carrying the elapsed milliseconds,
/// exactly once per call. Repository errors pass through unchanged.
pub struct UserService<R: UserRepository, L: LoggerAdapter> {
    repo: Arc<R>,
    logger: Arc<L>,
}

impl<R: UserRepository, L: LoggerAdapter> UserService<R, L> {
    pub fn new(repo: Arc<R>, logger: Arc<L>) -> Self {
        Self { repo, logger }
    }

    /// Fetch every user. An empty store yields an empty vec, not an error.
    ///
    /// # Examples
    /// ```
    /// use service::logging::TracingLogger;
    /// use service::users::repository::mock::InMemoryUserRepository;
    /// use service::users::UserService;
    /// use std::sync::Arc;
    /// let repo = Arc::new(InMemoryUserRepository::default());
    /// let svc = UserService::new(repo, Arc::new(TracingLogger));
    /// let users = tokio_test::block_on(svc.get_all()).unwrap();
    /// assert!(users.is_empty());
    /// ```
    #[instrument(skip(self))]
    pub async fn get_all(&self) -> Result<Vec<User>, RepositoryError> {
        self.logger.log_information(templates::RETRIEVING_ALL_USERS, &[]);
        let started = Instant::now();
        let result = self.repo.get_all().await;
        if let Err(err) = &result {
            self.logger.log_error(err, templates::ERR_RETRIEVING_ALL_USERS, &[]);
        }
        self.logger.log_information(
            templates::ALL_USERS_RETRIEVED,
            &[started.elapsed().as_millis().to_string()],
        );
        result
    }

    /// Fetch one user by id; `None` when no user matches.
    #[instrument(skip(self, id), fields(user_id = %id))]
    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<User>, RepositoryError> {
        self.logger.log_information(templates::RETRIEVING_USER, &[id.to_string()]);
        let started = Instant::now();
        let result = self.repo.get_by_id(id).await;
        if let Err(err) = &result {
            self.logger.log_error(err, templates::ERR_RETRIEVING_USER, &[id.to_string()]);
        }
        self.logger.log_information(
            templates::USER_RETRIEVED,
            &[id.to_string(), started.elapsed().as_millis().to_string()],
        );
        result
    }

    /// Persist a user, returning the stored value with its assigned id, or
    /// `None` when the repository rejected the write.
    ///
    /// # Examples
    /// ```
    /// use service::logging::TracingLogger;
    /// use service::users::repository::mock::InMemoryUserRepository;
    /// use service::users::{User, UserService};
    /// use std::sync::Arc;
    /// let repo = Arc::new(InMemoryUserRepository::default());
    /// let svc = UserService::new(repo, Arc::new(TracingLogger));
    /// let created = tokio_test::block_on(svc.create(User::new("Ahmad"))).unwrap().unwrap();
    /// assert!(!created.id.is_nil());
    /// assert_eq!(created.full_name, "Ahmad");
    /// ```
    #[instrument(skip(self, user), fields(user_id = %user.id, full_name = %user.full_name))]
    pub async fn create(&self, user: User) -> Result<Option<User>, RepositoryError> {
        let input_id = user.id;
        self.logger.log_information(
            templates::CREATING_USER,
            &[input_id.to_string(), user.full_name.clone()],
        );
        let started = Instant::now();
        let result = self.repo.create(user).await;
        if let Err(err) = &result {
            self.logger.log_error(err, templates::ERR_CREATING_USER, &[]);
        }
        // On success the completion log carries the assigned id; otherwise
        // the id as received.
        let completed_id = match &result {
            Ok(Some(created)) => created.id,
            _ => input_id,
        };
        self.logger.log_information(
            templates::USER_CREATED,
            &[completed_id.to_string(), started.elapsed().as_millis().to_string()],
        );
        result
    }

    /// Remove a user by id; `true` when a user existed and was removed.
    #[instrument(skip(self, id), fields(user_id = %id))]
    pub async fn delete_by_id(&self, id: Uuid) -> Result<bool, RepositoryError> {
        self.logger.log_information(templates::DELETING_USER, &[id.to_string()]);
        let started = Instant::now();
        let result = self.repo.delete_by_id(id).await;
        if let Err(err) = &result {
            self.logger.log_error(err, templates::ERR_DELETING_USER, &[id.to_string()]);
        }
        self.logger.log_information(
            templates::USER_DELETED,
            &[id.to_string(), started.elapsed().as_millis().to_string()],
        );
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::mock::{LogLevel, LogRecord, RecordingLogger};
    use crate::users::repository::mock::{FailingUserRepository, InMemoryUserRepository};

    type MockService = UserService<InMemoryUserRepository, RecordingLogger>;

    fn service_with(
        repo: InMemoryUserRepository,
    ) -> (MockService, Arc<InMemoryUserRepository>, Arc<RecordingLogger>) {
        let repo = Arc::new(repo);
        let logger = Arc::new(RecordingLogger::default());
        (UserService::new(repo.clone(), logger.clone()), repo, logger)
    }

    fn failing_service(
        error: RepositoryError,
    ) -> (UserService<FailingUserRepository, RecordingLogger>, Arc<RecordingLogger>) {
        let logger = Arc::new(RecordingLogger::default());
        let svc = UserService::new(Arc::new(FailingUserRepository::new(error)), logger.clone());
        (svc, logger)
    }

    fn elapsed_ms(record: &LogRecord, index: usize) -> u128 {
        record.args[index].parse().expect("elapsed arg should be numeric milliseconds")
    }

    fn sample_user(name: &str) -> User {
        User { id: Uuid::new_v4(), full_name: name.to_string() }
    }

    #[tokio::test]
    async fn get_all_returns_empty_when_store_is_empty() {
        let (svc, _, logger) = service_with(InMemoryUserRepository::default());

        let users = svc.get_all().await.unwrap();

        assert!(users.is_empty());
        assert!(logger.records().iter().all(|r| r.level == LogLevel::Information));
    }

    #[tokio::test]
    async fn get_all_returns_users_exactly_as_stored() {
        let ahmad = sample_user("Ahmad");
        let ali = sample_user("Ali");
        let (svc, _, _) =
            service_with(InMemoryUserRepository::with_users([ahmad.clone(), ali.clone()]));

        let mut users = svc.get_all().await.unwrap();

        users.sort_by_key(|u| u.id);
        let mut expected = vec![ahmad, ali];
        expected.sort_by_key(|u| u.id);
        assert_eq!(users, expected);
    }

    #[tokio::test]
    async fn get_all_logs_intent_then_completion_exactly_once() {
        let (svc, _, logger) = service_with(InMemoryUserRepository::default());

        svc.get_all().await.unwrap();

        let records = logger.records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].template, templates::RETRIEVING_ALL_USERS);
        assert!(records[0].args.is_empty());
        assert_eq!(records[1].template, templates::ALL_USERS_RETRIEVED);
        let _ = elapsed_ms(&records[1], 0);
    }

    #[tokio::test]
    async fn get_all_propagates_repository_errors_unchanged() {
        let failure = RepositoryError::Unavailable("connection refused".into());
        let (svc, logger) = failing_service(failure.clone());

        let err = svc.get_all().await.unwrap_err();

        assert_eq!(err, failure);
        let records = logger.records();
        assert_eq!(
            logger.templates(),
            vec![
                templates::RETRIEVING_ALL_USERS,
                templates::ERR_RETRIEVING_ALL_USERS,
                templates::ALL_USERS_RETRIEVED,
            ]
        );
        assert_eq!(records[1].level, LogLevel::Error);
        assert_eq!(records[1].error, Some(failure));
        let _ = elapsed_ms(&records[2], 0);
    }

    #[tokio::test]
    async fn get_by_id_returns_the_stored_user_unchanged() {
        let ahmad = sample_user("Ahmad");
        let (svc, _, _) = service_with(InMemoryUserRepository::with_users([ahmad.clone()]));

        let found = svc.get_by_id(ahmad.id).await.unwrap();

        assert_eq!(found, Some(ahmad));
    }

    #[tokio::test]
    async fn get_by_id_returns_none_for_unknown_ids_without_error() {
        let (svc, _, logger) = service_with(InMemoryUserRepository::with_users([sample_user(
            "Ahmad",
        )]));

        let found = svc.get_by_id(Uuid::new_v4()).await.unwrap();

        assert_eq!(found, None);
        assert!(logger.records().iter().all(|r| r.level == LogLevel::Information));
    }

    #[tokio::test]
    async fn get_by_id_logs_the_requested_id() {
        let ahmad = sample_user("Ahmad");
        let (svc, _, logger) = service_with(InMemoryUserRepository::with_users([ahmad.clone()]));

        svc.get_by_id(ahmad.id).await.unwrap();

        let records = logger.records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].template, templates::RETRIEVING_USER);
        assert_eq!(records[0].args, vec![ahmad.id.to_string()]);
        assert_eq!(records[1].template, templates::USER_RETRIEVED);
        assert_eq!(records[1].args[0], ahmad.id.to_string());
        let _ = elapsed_ms(&records[1], 1);
    }

    #[tokio::test]
    async fn get_by_id_propagates_repository_errors_unchanged() {
        let failure = RepositoryError::Db("broken pipe".into());
        let (svc, logger) = failing_service(failure.clone());
        let id = Uuid::new_v4();

        let err = svc.get_by_id(id).await.unwrap_err();

        assert_eq!(err, failure);
        assert_eq!(
            logger.templates(),
            vec![templates::RETRIEVING_USER, templates::ERR_RETRIEVING_USER, templates::USER_RETRIEVED]
        );
        let records = logger.records();
        assert_eq!(records[1].error, Some(failure));
        assert_eq!(records[1].args, vec![id.to_string()]);
    }

    #[tokio::test]
    async fn create_returns_the_persisted_user_with_an_assigned_id() {
        let (svc, repo, _) = service_with(InMemoryUserRepository::default());

        let created = svc.create(User::new("Ali")).await.unwrap().unwrap();

        assert!(!created.id.is_nil());
        assert_eq!(created.full_name, "Ali");
        // The transient id reaches the repository untouched.
        let inputs = repo.create_inputs();
        assert_eq!(inputs.len(), 1);
        assert!(inputs[0].id.is_nil());
    }

    #[tokio::test]
    async fn create_returns_none_when_the_repository_rejects_the_write() {
        let existing = sample_user("Ahmad");
        let (svc, _, logger) =
            service_with(InMemoryUserRepository::with_users([existing.clone()]));

        let outcome = svc.create(existing).await.unwrap();

        assert_eq!(outcome, None);
        assert!(logger.records().iter().all(|r| r.level == LogLevel::Information));
    }

    #[tokio::test]
    async fn create_logs_the_input_id_then_the_assigned_id() {
        let (svc, _, logger) = service_with(InMemoryUserRepository::default());

        let created = svc.create(User::new("Ali")).await.unwrap().unwrap();

        let records = logger.records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].template, templates::CREATING_USER);
        assert_eq!(records[0].args, vec![Uuid::nil().to_string(), "Ali".to_string()]);
        assert_eq!(records[1].template, templates::USER_CREATED);
        assert_eq!(records[1].args[0], created.id.to_string());
        let _ = elapsed_ms(&records[1], 1);
    }

    #[tokio::test]
    async fn create_completion_keeps_the_input_id_when_rejected() {
        let existing = sample_user("Ahmad");
        let (svc, _, logger) =
            service_with(InMemoryUserRepository::with_users([existing.clone()]));

        svc.create(existing.clone()).await.unwrap();

        let records = logger.records();
        assert_eq!(records[1].template, templates::USER_CREATED);
        assert_eq!(records[1].args[0], existing.id.to_string());
    }

    #[tokio::test]
    async fn create_propagates_repository_errors_unchanged() {
        let failure = RepositoryError::Db("constraint failed".into());
        let (svc, logger) = failing_service(failure.clone());

        let err = svc.create(User::new("Ali")).await.unwrap_err();

        assert_eq!(err, failure);
        assert_eq!(
            logger.templates(),
            vec![templates::CREATING_USER, templates::ERR_CREATING_USER, templates::USER_CREATED]
        );
        let records = logger.records();
        assert_eq!(records[1].error, Some(failure));
        // Nothing was persisted, so completion reports the id as received.
        assert_eq!(records[2].args[0], Uuid::nil().to_string());
    }

    #[tokio::test]
    async fn delete_by_id_returns_true_when_a_user_existed() {
        let ahmad = sample_user("Ahmad");
        let (svc, repo, logger) =
            service_with(InMemoryUserRepository::with_users([ahmad.clone()]));

        let deleted = svc.delete_by_id(ahmad.id).await.unwrap();

        assert!(deleted);
        assert_eq!(repo.delete_calls(), 1);
        assert_eq!(logger.records().len(), 2);
    }

    #[tokio::test]
    async fn delete_by_id_returns_false_for_unknown_ids_without_error() {
        let (svc, repo, logger) = service_with(InMemoryUserRepository::default());

        let deleted = svc.delete_by_id(Uuid::new_v4()).await.unwrap();

        assert!(!deleted);
        assert_eq!(repo.delete_calls(), 1);
        assert!(logger.records().iter().all(|r| r.level == LogLevel::Information));
    }

    #[tokio::test]
    async fn delete_by_id_logs_the_requested_id() {
        let ahmad = sample_user("Ahmad");
        let (svc, _, logger) = service_with(InMemoryUserRepository::with_users([ahmad.clone()]));

        svc.delete_by_id(ahmad.id).await.unwrap();

        let records = logger.records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].template, templates::DELETING_USER);
        assert_eq!(records[0].args, vec![ahmad.id.to_string()]);
        assert_eq!(records[1].template, templates::USER_DELETED);
        assert_eq!(records[1].args[0], ahmad.id.to_string());
        let _ = elapsed_ms(&records[1], 1);
    }

    #[tokio::test]
    async fn delete_by_id_propagates_repository_errors_unchanged() {
        let failure = RepositoryError::Unavailable("pool exhausted".into());
        let (svc, logger) = failing_service(failure.clone());
        let id = Uuid::new_v4();

        let err = svc.delete_by_id(id).await.unwrap_err();

        assert_eq!(err, failure);
        assert_eq!(
            logger.templates(),
            vec![templates::DELETING_USER, templates::ERR_DELETING_USER, templates::USER_DELETED]
        );
        let records = logger.records();
        assert_eq!(records[1].level, LogLevel::Error);
        assert_eq!(records[1].error, Some(failure));
        let _ = elapsed_ms(&records[2], 1);
    }
}
