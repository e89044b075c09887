use std::time::Duration;

use reqwest::{Client, StatusCode};
use tokio::time::sleep;

use crate::{
    config,
    error::SyncError,
    sync::paginate::Page,
    types::{
        AddTracksRequest, AddTracksResponse, CreatePlaylistRequest, PlaylistInfo, Track,
        UserPlaylistsResponse,
    },
};

/// Page size of the my-playlists listing endpoint.
const PLAYLISTS_PAGE_LIMIT: usize = 20;

/// Description attached to a target playlist on creation.
const TARGET_PLAYLIST_DESCRIPTION: &str = "Autogenerated playlist";

/// Retrieves the metadata of a single playlist.
///
/// # Returns
///
/// Returns a `Result` containing:
/// - `Ok(PlaylistInfo)` - Identity, name and visibility flags of the playlist
/// - `Err(SyncError::Fetch)` - Network error, non-success status (including
///   an unknown playlist id), or a malformed response body
pub async fn playlist_info(token: &str, playlist_id: &str) -> Result<PlaylistInfo, SyncError> {
    let api_url = format!(
        "{uri}/playlists/{id}",
        uri = &config::spotify_apiurl(),
        id = playlist_id
    );

    let client = Client::new();
    let response = client
        .get(&api_url)
        .bearer_auth(token)
        .send()
        .await
        .map_err(|e| SyncError::Fetch(e.to_string()))?
        .error_for_status()
        .map_err(|e| SyncError::Fetch(e.to_string()))?;

    response
        .json::<PlaylistInfo>()
        .await
        .map_err(|e| SyncError::Fetch(e.to_string()))
}

/// Retrieves one page of the authenticated user's playlists.
///
/// # Arguments
///
/// * `token` - Valid access token for Spotify API authentication
/// * `offset` - Index of the first playlist to return
///
/// # Returns
///
/// Returns a `Result` containing:
/// - `Ok(Page<PlaylistInfo>)` - Up to 20 playlists starting at `offset`,
///   plus the authoritative total count
/// - `Err(SyncError::Fetch)` - Network error, non-success status, or a
///   malformed response body
///
/// # Retry Logic
///
/// 502 Bad Gateway responses are retried after a 10-second delay. Other
/// errors are propagated immediately.
pub async fn user_playlists_page(
    token: String,
    offset: usize,
) -> Result<Page<PlaylistInfo>, SyncError> {
    loop {
        let api_url = format!(
            "{uri}/me/playlists?limit={limit}&offset={offset}",
            uri = &config::spotify_apiurl(),
            limit = PLAYLISTS_PAGE_LIMIT,
            offset = offset
        );

        let client = Client::new();
        let response = client.get(&api_url).bearer_auth(&token).send().await;

        let response = match response {
            Ok(resp) => match resp.error_for_status() {
                Ok(valid_response) => valid_response,
                Err(err) => {
                    if let Some(status) = err.status() {
                        if status == StatusCode::BAD_GATEWAY {
                            sleep(Duration::from_secs(10)).await;
                            continue; // retry
                        }
                    }
                    return Err(SyncError::Fetch(err.to_string()));
                }
            },
            Err(err) => {
                return Err(SyncError::Fetch(err.to_string()));
            } // network or reqwest error
        };

        let body = response
            .json::<UserPlaylistsResponse>()
            .await
            .map_err(|e| SyncError::Fetch(e.to_string()))?;

        return Ok(Page {
            items: body.items,
            total: body.total,
        });
    }
}

/// Creates a public playlist owned by `user_id`.
///
/// The playlist is created with a fixed description so autogenerated targets
/// are recognizable in the Spotify UI.
///
/// # Errors
///
/// Returns [`SyncError::Create`] on network errors, non-success statuses
/// (for example a missing `playlist-modify-public` scope), or a malformed
/// response body.
pub async fn create(token: &str, user_id: &str, name: &str) -> Result<PlaylistInfo, SyncError> {
    let api_url = format!(
        "{uri}/users/{user}/playlists",
        uri = &config::spotify_apiurl(),
        user = user_id
    );

    let body = CreatePlaylistRequest {
        name: name.to_string(),
        description: TARGET_PLAYLIST_DESCRIPTION.to_string(),
        public: true,
        collaborative: false,
    };

    let client = Client::new();
    let response = client
        .post(&api_url)
        .bearer_auth(token)
        .json(&body)
        .send()
        .await
        .map_err(|e| SyncError::Create(e.to_string()))?
        .error_for_status()
        .map_err(|e| SyncError::Create(e.to_string()))?;

    response
        .json::<PlaylistInfo>()
        .await
        .map_err(|e| SyncError::Create(e.to_string()))
}

/// Adds one chunk of tracks to a playlist.
///
/// Tracks are sent as canonical `spotify:track:{id}` URIs. The endpoint
/// accepts at most 100 uris per call; the batch writer enforces that bound
/// before calling here.
///
/// # Returns
///
/// Returns the snapshot id identifying the playlist version after the write.
///
/// # Errors
///
/// Returns [`SyncError::Write`] on network errors, non-success statuses, or
/// a malformed response body.
pub async fn add_tracks(
    token: String,
    playlist_id: String,
    tracks: Vec<Track>,
) -> Result<String, SyncError> {
    let api_url = format!(
        "{uri}/playlists/{id}/tracks",
        uri = &config::spotify_apiurl(),
        id = playlist_id
    );

    let body = AddTracksRequest {
        uris: tracks.iter().map(|t| t.uri()).collect(),
    };

    let client = Client::new();
    let response = client
        .post(&api_url)
        .bearer_auth(&token)
        .json(&body)
        .send()
        .await
        .map_err(|e| SyncError::Write(e.to_string()))?
        .error_for_status()
        .map_err(|e| SyncError::Write(e.to_string()))?;

    let body = response
        .json::<AddTracksResponse>()
        .await
        .map_err(|e| SyncError::Write(e.to_string()))?;

    Ok(body.snapshot_id)
}
