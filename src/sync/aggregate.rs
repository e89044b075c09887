use std::future::Future;

use crate::{
    error::SyncError,
    info,
    sync::{
        paginate::{self, Page},
        trackset::TrackSet,
    },
    types::{PlaylistInfo, Track},
};

/// Fetches every source playlist's full track list and unions them into a
/// single id-keyed set.
///
/// `page_of` is the listing capability: called with a playlist id and an
/// offset, it returns one page of that playlist's tracks. Sources are
/// processed in the given order and each one is paginated to completion
/// before the next starts. A per-source summary (track count and names) is
/// printed for operator visibility; it carries no functional weight.
///
/// # Errors
///
/// The first fetch error aborts the aggregation; no partial set is returned.
pub async fn aggregate<F, Fut>(
    sources: &[PlaylistInfo],
    mut page_of: F,
) -> Result<TrackSet, SyncError>
where
    F: FnMut(String, usize) -> Fut,
    Fut: Future<Output = Result<Page<Track>, SyncError>>,
{
    let mut merged = TrackSet::new();

    for source in sources {
        let tracks = paginate::fetch_all(|offset| page_of(source.id.clone(), offset)).await?;

        info!("Playlist {} has {} tracks:", source.name, tracks.len());
        for track in &tracks {
            println!("\t- {}", track.name);
        }

        merged.extend(tracks);
    }

    Ok(merged)
}
