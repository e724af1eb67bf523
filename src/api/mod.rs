//! Web form shell.
//!
//! Serves the upload page and a single summary action. The router is
//! composable: `summary_router()` returns a `Router` that can be mounted on
//! any axum server instance, and `server` binds it to the configured address.

pub mod endpoints;
pub mod error;
pub mod page;
pub mod router;
pub mod server;
pub mod types;

pub use router::summary_router;
pub use server::{serve, ServerError};
pub use types::ApiContext;
