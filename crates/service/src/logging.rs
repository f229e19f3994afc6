//! Logging facade for the user service.
//!
//! Operation logs are part of the service contract: dashboards and tests key
//! on the exact message wording, so the templates live here as constants and
//! every sink renders them the same way. `TracingLogger` forwards to the
//! `tracing` backend; `mock::RecordingLogger` captures records for tests.

use std::io;

use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

use crate::errors::RepositoryError;

/// Message templates with positional `{n}` placeholders.
pub mod templates {
    pub const RETRIEVING_ALL_USERS: &str = "Retrieving all users";
    pub const ALL_USERS_RETRIEVED: &str = "All users retrieved in {0}ms";

    pub const RETRIEVING_USER: &str = "Retrieving user with id: {0}";
    pub const USER_RETRIEVED: &str = "User with id {0} retrieved in {1}ms";

    pub const CREATING_USER: &str = "Creating user with id {0} and name: {1}";
    pub const USER_CREATED: &str = "User with id {0} created in {1}ms";

    pub const DELETING_USER: &str = "Deleting user with id: {0}";
    pub const USER_DELETED: &str = "User with id {0} deleted in {1}ms";

    pub const ERR_RETRIEVING_ALL_USERS: &str = "Something went wrong while retrieving all users";
    pub const ERR_RETRIEVING_USER: &str = "Something went wrong while retrieving user with id {0}";
    pub const ERR_CREATING_USER: &str = "Something went wrong while creating a user";
    pub const ERR_DELETING_USER: &str = "Something went wrong while deleting user with id {0}";
}

fn render(template: &str, args: &[String]) -> String {
    let mut out = template.to_string();
    for (i, arg) in args.iter().enumerate() {
        out = out.replace(&format!("{{{i}}}"), arg);
    }
    out
}

/// Typed sink for the service's operation logs.
///
/// The service hands over a template plus its positional arguments rather
/// than a rendered string, so sinks can index on the template identity.
pub trait LoggerAdapter: Send + Sync {
    fn log_information(&self, template: &'static str, args: &[String]);
    fn log_error(&self, error: &RepositoryError, template: &'static str, args: &[String]);
}

/// Production sink forwarding to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogger;

impl LoggerAdapter for TracingLogger {
    fn log_information(&self, template: &'static str, args: &[String]) {
        info!("{}", render(template, args));
    }

    fn log_error(&self, error: &RepositoryError, template: &'static str, args: &[String]) {
        error!(error = %error, "{}", render(template, args));
    }
}

/// Initialize tracing subscriber with sensible defaults and stdout writer.
/// - Respects `RUST_LOG` if set
/// - Falls back to `info,tower_http=info,axum=info`
/// - Writes to stdout to improve visibility in environments that hide stderr
pub fn init_logging_default() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=info,axum=info"));
    let _ = fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .with_writer(|| io::stdout())
        .try_init();
}

/// Initialize tracing subscriber with JSON structured output.
/// - Respects `RUST_LOG` if set, defaults to `info`
/// - Writes to stdout for consistent container logging behavior
pub fn init_logging_json() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .json()
        .with_writer(|| io::stdout())
        .try_init();
}

/// Recording sink for tests and doc examples.
pub mod mock {
    use std::sync::Mutex;

    use super::LoggerAdapter;
    use crate::errors::RepositoryError;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum LogLevel {
        Information,
        Error,
    }

    /// One captured log call, template and arguments unrendered.
    #[derive(Debug, Clone)]
    pub struct LogRecord {
        pub level: LogLevel,
        pub template: &'static str,
        pub args: Vec<String>,
        pub error: Option<RepositoryError>,
    }

    #[derive(Default)]
    pub struct RecordingLogger {
        records: Mutex<Vec<LogRecord>>,
    }

    impl RecordingLogger {
        /// Snapshot of all records in call order.
        pub fn records(&self) -> Vec<LogRecord> {
            self.records.lock().unwrap().clone()
        }

        /// How many times a template was logged, at any level.
        pub fn count(&self, template: &'static str) -> usize {
            self.records.lock().unwrap().iter().filter(|r| r.template == template).count()
        }

        /// Templates in call order.
        pub fn templates(&self) -> Vec<&'static str> {
            self.records.lock().unwrap().iter().map(|r| r.template).collect()
        }
    }

    impl LoggerAdapter for RecordingLogger {
        fn log_information(&self, template: &'static str, args: &[String]) {
            self.records.lock().unwrap().push(LogRecord {
                level: LogLevel::Information,
                template,
                args: args.to_vec(),
                error: None,
            });
        }

        fn log_error(&self, error: &RepositoryError, template: &'static str, args: &[String]) {
            self.records.lock().unwrap().push(LogRecord {
                level: LogLevel::Error,
                template,
                args: args.to_vec(),
                error: Some(error.clone()),
            });
        }
    }
}
