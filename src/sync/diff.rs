use std::collections::HashSet;

use crate::{sync::trackset::TrackSet, types::Track};

/// Returns every source track whose id is absent from the target's tracks.
///
/// Membership is decided by id alone; two tracks with the same id but
/// different names never produce a delta entry. The result preserves the
/// source set's insertion order. Running the diff against a target that
/// already holds all source tracks yields an empty delta, which is what
/// makes repeated runs idempotent.
pub fn delta(sources: &TrackSet, target: &[Track]) -> Vec<Track> {
    let target_ids: HashSet<&str> = target.iter().map(|t| t.id.as_str()).collect();

    sources
        .iter()
        .filter(|t| !target_ids.contains(t.id.as_str()))
        .cloned()
        .collect()
}
