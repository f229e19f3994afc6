//! Users module: three-layer architecture (domain, repository, service).
//!
//! The service wraps every repository operation with intent and completion
//! logs plus elapsed-time measurement; repositories are swappable behind the
//! `UserRepository` trait.

pub mod domain;
pub mod repo;
pub mod repository;
pub mod service;

pub use domain::User;
pub use service::UserService;
