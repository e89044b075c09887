//! # CLI Module
//!
//! User-facing command implementations. Each function backs one subcommand
//! of the binary and coordinates configuration, the stored token, the
//! Spotify integration layer and the synchronization engine, translating
//! failures into colored console output and a non-zero exit.
//!
//! ## Commands
//!
//! - [`auth`] - Spotify OAuth authentication flow (PKCE)
//! - [`sync`] - Merge the configured source playlists into the target
//! - [`playlists`] - List the authenticated user's playlists
//!
//! Long-running fetches show an indicatif spinner; listings render through
//! tabled. All fatal paths go through the `error!` macro, which prints the
//! triggering error as the last line and exits with code 1.

mod auth;
mod playlists;
mod sync;

pub use auth::auth;
pub use playlists::playlists;
pub use sync::sync;
