use std::future::Future;

use crate::{error::SyncError, info, types::PlaylistInfo};

/// Normalizes a configured playlist reference to a bare playlist id.
///
/// Accepts either a bare id, which passes through unchanged, or a shareable
/// URL of the form `.../playlist/{id}[?query]`, from which the id segment is
/// extracted with any query string stripped.
///
/// # Errors
///
/// Returns [`SyncError::Configuration`] for an empty reference, a URL whose
/// id segment is missing, or a URL without a `/playlist/` segment.
pub fn normalize_reference(reference: &str) -> Result<String, SyncError> {
    let reference = reference.trim();
    if reference.is_empty() {
        return Err(SyncError::Configuration("empty playlist reference".into()));
    }

    if let Some((_, rest)) = reference.split_once("/playlist/") {
        let id = rest.split(['?', '/']).next().unwrap_or("");
        if id.is_empty() {
            return Err(SyncError::Configuration(format!(
                "playlist URL is missing its id segment: {reference}"
            )));
        }
        return Ok(id.to_string());
    }

    if reference.contains("://") {
        return Err(SyncError::Configuration(format!(
            "URL does not point at a playlist: {reference}"
        )));
    }

    Ok(reference.to_string())
}

/// Finds a reusable target among the user's playlists: the name must match
/// exactly and the playlist must be public.
pub fn find_existing<'a>(playlists: &'a [PlaylistInfo], name: &str) -> Option<&'a PlaylistInfo> {
    playlists
        .iter()
        .find(|p| p.name == name && p.public.unwrap_or(false))
}

/// Resolves the target playlist id, creating the playlist if necessary.
///
/// `playlists` is the complete listing of the user's playlists; if one of
/// them matches by exact name and is public its id is reused and `create` is
/// never invoked. Otherwise `create` is invoked exactly once and the created
/// playlist's id is returned.
///
/// The check-then-create is not atomic against a concurrent external
/// creation of a same-named playlist. That race is accepted for a
/// single-operator tool and intentionally not reconciled here.
pub async fn resolve_target<F, Fut>(
    playlists: &[PlaylistInfo],
    name: &str,
    create: F,
) -> Result<String, SyncError>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<PlaylistInfo, SyncError>>,
{
    if let Some(existing) = find_existing(playlists, name) {
        info!("Target playlist {} already exists", name);
        return Ok(existing.id.clone());
    }

    let created = create().await?;
    Ok(created.id)
}
