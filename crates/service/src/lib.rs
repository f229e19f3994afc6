//! Service layer providing instrumented CRUD operations on top of models.
//! - Separates business logic from data access and from the web framework.
//! - Wraps each operation with contract log messages and timing.
//! - Provides clear error types and documented interfaces.

pub mod errors;
pub mod logging;
pub mod users;
