//! Neon management API client.
//!
//! Thin request/response mapping over the Neon console API: project and
//! branch CRUD, connection URIs, and the current-user profile. Every
//! operation is a single-attempt HTTPS call with a bearer credential —
//! no retries, no caching.
//!
//! Two error policies coexist, preserved from the observed behavior of
//! the service this replaces: most read/list/create operations fold a
//! non-2xx status into a `{"error": ...}` JSON value the model can read,
//! while [`NeonClient::delete_project`], [`NeonClient::get_connection_uri`]
//! and [`NeonClient::get_current_user_info`] return an [`Err`] instead.
//! Transport and body-parse failures always return [`Err`].

pub use branches::BranchParams;
pub use client::NeonClient;
pub use error::NeonError;
pub use projects::{ConnectionUriParams, DEFAULT_PG_VERSION};

pub mod branches;
mod client;
mod error;
pub mod projects;
pub mod users;

/// Result alias for Neon API calls.
pub type Result<T, E = NeonError> = std::result::Result<T, E>;

/// Base URL of the Neon console API.
pub const BASE_URL: &str = "https://console.neon.tech/api/v2";
