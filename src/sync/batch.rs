use std::future::Future;

use crate::{error::SyncError, types::Track};

/// Hard per-request item limit of the add-tracks endpoint.
pub const WRITE_CHUNK_LIMIT: usize = 100;

/// Writes `tracks` to the target in consecutive chunks of at most
/// [`WRITE_CHUNK_LIMIT`] items.
///
/// `write_chunk` is the write capability: it receives one chunk and returns
/// the snapshot id of the playlist after the write. Snapshot ids are not
/// used further. Chunks are issued strictly sequentially in order; the first
/// failure aborts the remaining chunks so that an interrupted run leaves a
/// deterministic, inspectable prefix written. An empty track list issues no
/// calls at all.
///
/// Returns the number of tracks written.
pub async fn write_all<F, Fut>(tracks: &[Track], mut write_chunk: F) -> Result<usize, SyncError>
where
    F: FnMut(Vec<Track>) -> Fut,
    Fut: Future<Output = Result<String, SyncError>>,
{
    let mut written = 0;

    for chunk in tracks.chunks(WRITE_CHUNK_LIMIT) {
        write_chunk(chunk.to_vec()).await?;
        written += chunk.len();
    }

    Ok(written)
}
