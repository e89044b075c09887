//! # Playlist Synchronization Engine
//!
//! This module implements the end-to-end merge of several source playlists
//! into one target playlist. The moving parts are deliberately small and
//! separately testable:
//!
//! - [`paginate`] - exhaustive fetch loop over any offset-paginated listing
//! - [`trackset`] - id-keyed track set with first-insertion-wins semantics
//! - [`aggregate`] - union of all source playlists' tracks
//! - [`resolve`] - playlist reference normalization and target resolution
//! - [`diff`] - id-membership difference between sources and target
//! - [`batch`] - size-bounded sequential writes to the target
//!
//! [`run`] sequences them as a single forward pass; no stage is ever
//! revisited. Remote calls are strictly sequential: pagination offsets
//! depend on what has been accumulated, and write chunks are ordered so an
//! aborted run leaves a deterministic prefix written.
//!
//! Each component takes its remote interaction as an injected capability
//! (a closure returning a future), so the engine itself never constructs
//! HTTP requests and the whole of it can be exercised without a network.
//! The first error at any stage aborts the run; [`StageError`] carries the
//! stage it happened in together with the underlying [`SyncError`].

pub mod aggregate;
pub mod batch;
pub mod diff;
pub mod paginate;
pub mod resolve;
pub mod trackset;

use std::fmt;

use thiserror::Error;

use crate::{config::SyncConfig, error::SyncError, info, spotify, success, types::Track};

/// Stages of a synchronization run, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    SourcesResolved,
    SourceTracksAggregated,
    TargetResolved,
    TargetTracksFetched,
    DeltaComputed,
    DeltaWritten,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::SourcesResolved => "SourcesResolved",
            Stage::SourceTracksAggregated => "SourceTracksAggregated",
            Stage::TargetResolved => "TargetResolved",
            Stage::TargetTracksFetched => "TargetTracksFetched",
            Stage::DeltaComputed => "DeltaComputed",
            Stage::DeltaWritten => "DeltaWritten",
        };
        write!(f, "{name}")
    }
}

/// A run aborted at `stage` with the triggering error retained.
#[derive(Debug, Error)]
#[error("sync aborted at {stage}: {source}")]
pub struct StageError {
    pub stage: Stage,
    #[source]
    pub source: SyncError,
}

fn at(stage: Stage) -> impl FnOnce(SyncError) -> StageError {
    move |source| StageError { stage, source }
}

/// Outcome of a completed run.
///
/// `target_id` is `None` only for a dry run against a target playlist that
/// does not exist yet.
#[derive(Debug)]
pub struct SyncReport {
    pub target_id: Option<String>,
    pub source_count: usize,
    pub unique_tracks: usize,
    pub tracks_missing: usize,
    pub tracks_added: usize,
}

/// Runs one synchronization pass.
///
/// Resolves the configured source references, aggregates their tracks,
/// resolves or creates the target playlist, fetches its current tracks,
/// computes the delta and writes it in chunks. With `dry_run` the delta is
/// computed and reported but the target is neither created nor written.
///
/// # Errors
///
/// The first failing stage aborts the run and is returned as [`StageError`].
/// Nothing is retried and no partially failed stage is resumed.
pub async fn run(
    token: &str,
    config: &SyncConfig,
    dry_run: bool,
) -> Result<SyncReport, StageError> {
    // Resolve each configured reference to a playlist identity.
    let mut sources = Vec::with_capacity(config.source_playlists.len());
    for reference in &config.source_playlists {
        let id = resolve::normalize_reference(reference).map_err(at(Stage::SourcesResolved))?;
        let playlist = spotify::playlist::playlist_info(token, &id)
            .await
            .map_err(at(Stage::SourcesResolved))?;
        sources.push(playlist);
    }
    info!("Resolved {} source playlists", sources.len());

    // Union all source tracks, deduplicated by id.
    let merged = aggregate::aggregate(&sources, |playlist_id, offset| {
        spotify::tracks::playlist_tracks_page(token.to_string(), playlist_id, offset)
    })
    .await
    .map_err(at(Stage::SourceTracksAggregated))?;
    info!("Total unique tracks: {}", merged.len());

    // Reuse the target playlist if a public one with the configured name
    // exists, otherwise create it.
    let my_playlists =
        paginate::fetch_all(|offset| spotify::playlist::user_playlists_page(token.to_string(), offset))
            .await
            .map_err(at(Stage::TargetResolved))?;
    info!("User has {} playlists", my_playlists.len());

    let target_id = if dry_run {
        resolve::find_existing(&my_playlists, &config.target_name).map(|p| p.id.clone())
    } else {
        let id = resolve::resolve_target(&my_playlists, &config.target_name, || async {
            info!("Creating target playlist {}", config.target_name);
            spotify::playlist::create(token, &config.user_id, &config.target_name).await
        })
        .await
        .map_err(at(Stage::TargetResolved))?;
        Some(id)
    };

    match &target_id {
        Some(id) => info!("Target playlist id: {}", id),
        None => info!(
            "Target playlist {} does not exist yet and would be created",
            config.target_name
        ),
    }

    // Fetch the target's current tracks. A target that does not exist yet
    // (dry run only) has none.
    let target_tracks: Vec<Track> = match &target_id {
        Some(id) => {
            let tracks = paginate::fetch_all(|offset| {
                spotify::tracks::playlist_tracks_page(token.to_string(), id.clone(), offset)
            })
            .await
            .map_err(at(Stage::TargetTracksFetched))?;
            info!("Target playlist has {} tracks", tracks.len());
            tracks
        }
        None => Vec::new(),
    };

    let missing = diff::delta(&merged, &target_tracks);
    info!("New tracks to add: {}", missing.len());
    for track in &missing {
        println!("\t- {}", track.name);
    }

    let tracks_added = match (&target_id, dry_run) {
        (Some(id), false) => {
            let written = batch::write_all(&missing, |chunk| {
                spotify::playlist::add_tracks(token.to_string(), id.clone(), chunk)
            })
            .await
            .map_err(at(Stage::DeltaWritten))?;
            success!("Added {} tracks to target playlist", written);
            written
        }
        _ => 0,
    };

    Ok(SyncReport {
        target_id,
        source_count: sources.len(),
        unique_tracks: merged.len(),
        tracks_missing: missing.len(),
        tracks_added,
    })
}
