//! Remote persistence API client for Markpress.
//!
//! The article store is an external collaborator with four operations
//! (list, fetch, create, update). This crate defines the [`DocumentStore`]
//! trait for that seam, the HTTP implementation, the response envelope, and
//! the injected authentication session.

/// Store trait, HTTP implementation, and response envelope.
pub mod api;
/// Injected authentication session.
pub mod auth;
/// Client error taxonomy.
pub mod error;
/// Recording fake store for tests in this and dependent crates.
pub mod testing;

pub use api::{ApiResponse, DocumentStore, HttpDocumentStore, CODE_OK};
pub use auth::{AuthSession, AuthUser};
pub use error::ClientError;
