//! Configuration management for the Spotify playlist merger.
//!
//! This module handles loading and accessing configuration values from
//! environment variables and `.env` files. It provides a centralized way to
//! manage application configuration including Spotify API credentials, server
//! settings, and the playlist selection for a synchronization run.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults (where applicable)

use dotenv;
use std::{env, path::PathBuf};

use crate::error::SyncError;

/// Playlist selection for a synchronization run.
///
/// `source_playlists` holds the raw references exactly as configured; each
/// entry may be a bare playlist id or a shareable playlist URL and is
/// normalized by the resolver, not here.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    pub source_playlists: Vec<String>,
    pub target_name: String,
    pub user_id: String,
}

/// Loads environment variables from a `.env` file in the local data directory.
///
/// Creates the necessary directory structure if it doesn't exist and loads
/// environment variables from a `.env` file located in the platform-specific
/// local data directory under `spomcli/.env`. This allows users to store
/// configuration securely without hardcoding sensitive values.
///
/// # Directory Structure
///
/// The function looks for the `.env` file in:
/// - Linux: `~/.local/share/spomcli/.env`
/// - macOS: `~/Library/Application Support/spomcli/.env`
/// - Windows: `%LOCALAPPDATA%/spomcli/.env`
///
/// # Errors
///
/// This function will return an error if:
/// - The parent directory cannot be created
/// - The `.env` file cannot be read or parsed
pub async fn load_env() -> Result<(), String> {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("spomcli/.env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    dotenv::from_path(path).map_err(|e| e.to_string())?;
    Ok(())
}

/// Reads and validates the playlist selection for a synchronization run.
///
/// Consumes three environment variables:
/// - `SPOTIFY_SOURCE_PLAYLISTS` - comma-separated playlist ids or shareable
///   playlist URLs contributing tracks to the merge
/// - `SPOTIFY_TARGET_PLAYLIST_NAME` - display name of the playlist tracks are
///   synced into (created if absent)
/// - `SPOTIFY_USER_ID` - the Spotify user owning the target playlist
///
/// # Errors
///
/// Returns [`SyncError::Configuration`] when a variable is missing, the
/// source list is empty after trimming, or the target name or user id is
/// empty. Malformed individual references are rejected later by the
/// resolver.
pub fn sync_config() -> Result<SyncConfig, SyncError> {
    let sources = env::var("SPOTIFY_SOURCE_PLAYLISTS")
        .map_err(|_| SyncError::Configuration("SPOTIFY_SOURCE_PLAYLISTS must be set".into()))?;
    let source_playlists: Vec<String> = sources
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();
    if source_playlists.is_empty() {
        return Err(SyncError::Configuration(
            "at least one source playlist must be configured".into(),
        ));
    }

    let target_name = env::var("SPOTIFY_TARGET_PLAYLIST_NAME")
        .map_err(|_| SyncError::Configuration("SPOTIFY_TARGET_PLAYLIST_NAME must be set".into()))?
        .trim()
        .to_string();
    if target_name.is_empty() {
        return Err(SyncError::Configuration(
            "target playlist name can not be empty".into(),
        ));
    }

    let user_id = env::var("SPOTIFY_USER_ID")
        .map_err(|_| SyncError::Configuration("SPOTIFY_USER_ID must be set".into()))?
        .trim()
        .to_string();
    if user_id.is_empty() {
        return Err(SyncError::Configuration("user id can not be empty".into()));
    }

    Ok(SyncConfig {
        source_playlists,
        target_name,
        user_id,
    })
}

/// Returns the server address for the local OAuth callback server.
///
/// Retrieves the `SERVER_ADDRESS` environment variable which specifies
/// the address and port where the local HTTP server should bind for
/// handling OAuth callbacks during the authentication flow.
///
/// # Panics
///
/// Panics if the `SERVER_ADDRESS` environment variable is not set.
pub fn server_addr() -> String {
    env::var("SERVER_ADDRESS").expect("SERVER_ADDRESS must be set")
}

/// Returns the Spotify API client ID for authentication.
///
/// Retrieves the `SPOTIFY_API_AUTH_CLIENT_ID` environment variable which
/// contains the client ID obtained when registering the application with
/// Spotify's developer platform.
///
/// # Panics
///
/// Panics if the `SPOTIFY_API_AUTH_CLIENT_ID` environment variable is not set.
pub fn spotify_client_id() -> String {
    env::var("SPOTIFY_API_AUTH_CLIENT_ID").expect("SPOTIFY_API_AUTH_CLIENT_ID must be set")
}

/// Returns the Spotify OAuth redirect URI.
///
/// Retrieves the `SPOTIFY_API_REDIRECT_URI` environment variable which
/// specifies the callback URL that Spotify should redirect to after user
/// authorization. This must match the redirect URI registered in the Spotify
/// application settings.
///
/// # Panics
///
/// Panics if the `SPOTIFY_API_REDIRECT_URI` environment variable is not set.
pub fn spotify_redirect_uri() -> String {
    env::var("SPOTIFY_API_REDIRECT_URI").expect("SPOTIFY_API_REDIRECT_URI must be set")
}

/// Returns the Spotify API scope permissions.
///
/// Retrieves the `SPOTIFY_API_AUTH_SCOPE` environment variable which defines
/// the scope of permissions requested during OAuth authentication. Writing to
/// a public target playlist requires at least `playlist-modify-public`.
///
/// # Panics
///
/// Panics if the `SPOTIFY_API_AUTH_SCOPE` environment variable is not set.
pub fn spotify_scope() -> String {
    env::var("SPOTIFY_API_AUTH_SCOPE").expect("SPOTIFY_API_AUTH_SCOPE must be set")
}

/// Returns the Spotify OAuth authorization URL.
///
/// Retrieves the `SPOTIFY_API_AUTH_URL` environment variable which contains
/// the base URL for Spotify's OAuth authorization endpoint. This is where
/// users are redirected to grant permissions to the application.
///
/// # Panics
///
/// Panics if the `SPOTIFY_API_AUTH_URL` environment variable is not set.
pub fn spotify_apiauth_url() -> String {
    env::var("SPOTIFY_API_AUTH_URL").expect("SPOTIFY_API_AUTH_URL must be set")
}

/// Returns the Spotify Web API base URL.
///
/// Retrieves the `SPOTIFY_API_URL` environment variable which contains the
/// base URL for Spotify's Web API endpoints. This is used for all API
/// operations after authentication.
///
/// # Panics
///
/// Panics if the `SPOTIFY_API_URL` environment variable is not set.
pub fn spotify_apiurl() -> String {
    env::var("SPOTIFY_API_URL").expect("SPOTIFY_API_URL must be set")
}

/// Returns the Spotify OAuth token exchange URL.
///
/// Retrieves the `SPOTIFY_API_TOKEN_URL` environment variable which contains
/// the URL for exchanging authorization codes for access tokens during the
/// OAuth flow, and for refreshing expired tokens.
///
/// # Panics
///
/// Panics if the `SPOTIFY_API_TOKEN_URL` environment variable is not set.
pub fn spotify_apitoken_url() -> String {
    env::var("SPOTIFY_API_TOKEN_URL").expect("SPOTIFY_API_TOKEN_URL must be set")
}
