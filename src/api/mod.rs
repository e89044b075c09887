//! # API Module
//!
//! HTTP endpoints served by the temporary local server during the OAuth
//! authorization flow.
//!
//! ## Endpoints
//!
//! - [`callback`] - Receives the authorization code from Spotify's
//!   authorization server and completes the PKCE code-for-token exchange.
//! - [`health`] - Health check returning application status and version,
//!   useful to verify the server came up before starting the flow.
//!
//! The routes are wired into an axum router by [`crate::server`]; the server
//! only lives for the duration of one `auth` command.

mod callback;
mod health;

pub use callback::callback;
pub use health::health;
