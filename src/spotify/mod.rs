//! # Spotify Integration Module
//!
//! This module is the integration layer between the synchronization engine
//! and the Spotify Web API. It handles HTTP communication, authentication
//! and the JSON wire format; everything above it works with plain data.
//!
//! ## Core Modules
//!
//! ### Authentication Module
//!
//! [`auth`] - Implements the OAuth 2.0 PKCE (Proof Key for Code Exchange)
//! flow: verifier/challenge generation, a temporary local callback server,
//! browser hand-off, code-for-token exchange and token refresh. PKCE avoids
//! storing a client secret on disk.
//!
//! ### Playlist Module
//!
//! [`playlist`] - Playlist metadata, the paginated "my playlists" listing,
//! playlist creation, and batched track writes.
//!
//! ### Tracks Module
//!
//! [`tracks`] - The paginated track listing of a single playlist.
//!
//! ## API Coverage
//!
//! - `GET /playlists/{id}/tracks` - one page of a playlist's tracks
//! - `GET /me/playlists` - one page of the user's playlists
//! - `GET /playlists/{id}` - playlist metadata
//! - `POST /users/{user_id}/playlists` - create a playlist
//! - `POST /playlists/{playlist_id}/tracks` - add up to 100 tracks
//! - `POST /api/token` - token exchange and refresh
//!
//! ## Error Handling
//!
//! Every operation requires a bearer token obtained beforehand; the
//! functions here never trigger an authorization flow themselves. Non-success
//! statuses and transport failures surface as [`crate::error::SyncError`]
//! variants matching the operation (fetch, create, write). The only retry at
//! this layer is for 502 Bad Gateway on read calls, which Spotify emits
//! transiently; everything else propagates immediately.
//!
//! ## Thread Safety
//!
//! All operations are async and issue one request at a time. Shared state is
//! limited to the authentication flow's `Arc<Mutex<_>>` hand-off between the
//! callback server and the waiting CLI command.

pub mod auth;
pub mod playlist;
pub mod tracks;
