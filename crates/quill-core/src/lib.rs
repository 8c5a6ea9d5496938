//! # Quill Core
//!
//! The domain layer of Quill.
//! Entities, error types and the repository ports the infrastructure implements.

pub mod domain;
pub mod error;
pub mod ports;

pub use error::{DomainError, RepoError};
