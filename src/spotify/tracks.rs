use std::time::Duration;

use reqwest::{Client, StatusCode};
use tokio::time::sleep;

use crate::{
    config,
    error::SyncError,
    sync::paginate::Page,
    types::{PlaylistTracksResponse, Track},
};

/// Page size of the playlist-tracks listing endpoint.
const TRACKS_PAGE_LIMIT: usize = 100;

/// Retrieves one page of a playlist's tracks from the Spotify Web API.
///
/// # Arguments
///
/// * `token` - Valid access token for Spotify API authentication
/// * `playlist_id` - Spotify ID of the playlist to list
/// * `offset` - Index of the first track to return
///
/// # Returns
///
/// Returns a `Result` containing:
/// - `Ok(Page<Track>)` - Up to 100 tracks starting at `offset`, plus the
///   authoritative total size of the playlist
/// - `Err(SyncError::Fetch)` - Network error, non-success status, or a
///   malformed response body
///
/// # Retry Logic
///
/// 502 Bad Gateway responses are retried after a 10-second delay. Other
/// errors are propagated immediately.
pub async fn playlist_tracks_page(
    token: String,
    playlist_id: String,
    offset: usize,
) -> Result<Page<Track>, SyncError> {
    loop {
        let api_url = format!(
            "{uri}/playlists/{id}/tracks?limit={limit}&offset={offset}",
            uri = &config::spotify_apiurl(),
            id = playlist_id,
            limit = TRACKS_PAGE_LIMIT,
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
            .json::<PlaylistTracksResponse>()
            .await
            .map_err(|e| SyncError::Fetch(e.to_string()))?;

        return Ok(Page {
            items: body.items.into_iter().map(|item| item.track).collect(),
            total: body.total,
        });
    }
}
