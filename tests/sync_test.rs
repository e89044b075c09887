use std::cell::{Cell, RefCell};

use spomcli::error::SyncError;
use spomcli::sync::paginate::{Page, fetch_all};
use spomcli::sync::trackset::TrackSet;
use spomcli::sync::{Stage, StageError, aggregate, batch, diff, resolve};
use spomcli::types::{PlaylistInfo, Track};

// Helper to create a test track
fn track(id: &str, name: &str) -> Track {
    Track {
        id: id.to_string(),
        name: name.to_string(),
    }
}

// Helper to create a test playlist
fn playlist(id: &str, name: &str, public: bool) -> PlaylistInfo {
    PlaylistInfo {
        id: id.to_string(),
        name: name.to_string(),
        public: Some(public),
        collaborative: false,
        description: Some("Autogenerated playlist".to_string()),
    }
}

fn many_tracks(n: usize) -> Vec<Track> {
    (0..n)
        .map(|i| track(&format!("id{i}"), &format!("Track {i}")))
        .collect()
}

async fn paginate_in_chunks(data: &[u32], chunk: usize) -> Vec<u32> {
    fetch_all(|offset| {
        let items: Vec<u32> = data.iter().skip(offset).take(chunk).copied().collect();
        let total = data.len();
        async move { Ok(Page { items, total }) }
    })
    .await
    .unwrap()
}

#[tokio::test]
async fn pagination_collects_all_items_in_order() {
    let data: Vec<u32> = (0..7).collect();

    // Any page size must yield the complete collection in original order
    for chunk in [1, 2, 3, 4, 7, 10] {
        assert_eq!(paginate_in_chunks(&data, chunk).await, data);
    }
}

#[tokio::test]
async fn pagination_requests_offsets_matching_accumulated_size() {
    let data: Vec<u32> = (0..7).collect();
    let offsets = RefCell::new(Vec::new());

    let fetched = fetch_all(|offset| {
        offsets.borrow_mut().push(offset);
        let items: Vec<u32> = data.iter().skip(offset).take(3).copied().collect();
        async move { Ok(Page { items, total: 7 }) }
    })
    .await
    .unwrap();

    assert_eq!(fetched, data);
    assert_eq!(*offsets.borrow(), vec![0, 3, 6]);
}

#[tokio::test]
async fn pagination_of_an_empty_collection_is_empty() {
    let fetched: Vec<u32> = fetch_all(|_offset| async {
        Ok(Page {
            items: Vec::<u32>::new(),
            total: 0,
        })
    })
    .await
    .unwrap();

    assert!(fetched.is_empty());
}

#[tokio::test]
async fn pagination_rejects_empty_page_with_items_outstanding() {
    let calls = Cell::new(0u32);

    let result: Result<Vec<u32>, _> = fetch_all(|_offset| {
        calls.set(calls.get() + 1);
        async {
            Ok(Page {
                items: Vec::<u32>::new(),
                total: 5,
            })
        }
    })
    .await;

    // Must fail fast instead of looping on the malformed response
    assert!(matches!(result, Err(SyncError::Fetch(_))));
    assert_eq!(calls.get(), 1);
}

#[tokio::test]
async fn pagination_propagates_fetch_errors() {
    let result: Result<Vec<u32>, _> =
        fetch_all(|_offset| async { Err(SyncError::Fetch("boom".into())) }).await;

    match result {
        Err(SyncError::Fetch(msg)) => assert_eq!(msg, "boom"),
        other => panic!("expected fetch error, got {other:?}"),
    }
}

#[tokio::test]
async fn aggregation_unions_sources_without_duplicates() {
    let sources = vec![playlist("s1", "Rock", true), playlist("s2", "Pop", true)];

    let merged = aggregate::aggregate(&sources, |playlist_id, offset| {
        let all = match playlist_id.as_str() {
            "s1" => vec![track("a", "A"), track("b", "B"), track("c", "C")],
            _ => vec![track("b", "B"), track("d", "D")],
        };
        let total = all.len();
        let items: Vec<Track> = all.into_iter().skip(offset).take(2).collect();
        async move { Ok(Page { items, total }) }
    })
    .await
    .unwrap();

    assert_eq!(merged.len(), 4);
    let ids: Vec<&str> = merged.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b", "c", "d"]);
}

#[tokio::test]
async fn aggregation_result_size_is_order_independent() {
    let forward = vec![playlist("s1", "Rock", true), playlist("s2", "Pop", true)];
    let backward = vec![playlist("s2", "Pop", true), playlist("s1", "Rock", true)];

    for sources in [forward, backward] {
        let merged = aggregate::aggregate(&sources, |playlist_id, offset| {
            let all = match playlist_id.as_str() {
                "s1" => vec![track("a", "A"), track("b", "B"), track("c", "C")],
                _ => vec![track("b", "B"), track("d", "D")],
            };
            let total = all.len();
            let items: Vec<Track> = all.into_iter().skip(offset).collect();
            async move { Ok(Page { items, total }) }
        })
        .await
        .unwrap();

        assert_eq!(merged.len(), 4);
    }
}

#[test]
fn track_identity_is_id_only() {
    assert_eq!(track("x", "Name"), track("x", "Other Name"));
    assert_ne!(track("x", "Name"), track("y", "Name"));

    let mut set = TrackSet::new();
    assert!(set.insert(track("x", "Name")));
    assert!(!set.insert(track("x", "Renamed")));

    assert_eq!(set.len(), 1);
    // First insertion wins
    assert_eq!(set.iter().next().unwrap().name, "Name");
    assert!(set.contains_id("x"));
    assert!(!set.contains_id("y"));
}

#[test]
fn diff_returns_source_tracks_missing_from_target() {
    let sources: TrackSet = vec![track("a", "A"), track("b", "B"), track("c", "C")]
        .into_iter()
        .collect();
    let target = vec![track("b", "B")];

    let missing = diff::delta(&sources, &target);
    let ids: Vec<&str> = missing.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "c"]);
}

#[test]
fn diff_of_identical_sets_is_empty() {
    // A second run right after a successful sync must compute no delta
    let tracks = vec![track("a", "A"), track("b", "B")];
    let sources: TrackSet = tracks.clone().into_iter().collect();

    assert!(diff::delta(&sources, &tracks).is_empty());
}

#[test]
fn diff_ignores_display_name_drift() {
    let sources: TrackSet = vec![track("a", "Old Title")].into_iter().collect();
    let target = vec![track("a", "New Title")];

    assert!(diff::delta(&sources, &target).is_empty());
}

#[tokio::test]
async fn batch_writer_chunks_at_the_api_limit() {
    let tracks = many_tracks(250);
    let sizes = RefCell::new(Vec::new());

    let written = batch::write_all(&tracks, |chunk| {
        sizes.borrow_mut().push(chunk.len());
        async { Ok("snapshot".to_string()) }
    })
    .await
    .unwrap();

    assert_eq!(written, 250);
    assert_eq!(*sizes.borrow(), vec![100, 100, 50]);
}

#[tokio::test]
async fn batch_writer_issues_no_calls_for_an_empty_delta() {
    let tracks: Vec<Track> = Vec::new();
    let calls = Cell::new(0u32);

    let written = batch::write_all(&tracks, |_chunk| {
        calls.set(calls.get() + 1);
        async { Ok(String::new()) }
    })
    .await
    .unwrap();

    assert_eq!(written, 0);
    assert_eq!(calls.get(), 0);
}

#[tokio::test]
async fn batch_writer_aborts_on_first_failed_chunk() {
    let tracks = many_tracks(250);
    let calls = Cell::new(0u32);

    let result = batch::write_all(&tracks, |_chunk| {
        calls.set(calls.get() + 1);
        let fail = calls.get() == 2;
        async move {
            if fail {
                Err(SyncError::Write("chunk rejected".into()))
            } else {
                Ok("snapshot".to_string())
            }
        }
    })
    .await;

    // Chunk 3 is never attempted and the chunk-2 error is retained
    assert_eq!(calls.get(), 2);
    match result {
        Err(SyncError::Write(msg)) => assert_eq!(msg, "chunk rejected"),
        other => panic!("expected write error, got {other:?}"),
    }
}

#[test]
fn stage_error_reports_stage_and_cause() {
    let err = StageError {
        stage: Stage::DeltaWritten,
        source: SyncError::Write("chunk rejected".into()),
    };

    let msg = err.to_string();
    assert!(msg.contains("DeltaWritten"));
    assert!(msg.contains("chunk rejected"));
}

#[test]
fn reference_extraction_from_shareable_url() {
    assert_eq!(
        resolve::normalize_reference("https://open.spotify.com/playlist/XYZ123?si=abc").unwrap(),
        "XYZ123"
    );
    assert_eq!(
        resolve::normalize_reference("https://open.spotify.com/playlist/XYZ123").unwrap(),
        "XYZ123"
    );
    // A bare id passes through unchanged
    assert_eq!(resolve::normalize_reference("XYZ123").unwrap(), "XYZ123");
    assert_eq!(resolve::normalize_reference("  XYZ123 ").unwrap(), "XYZ123");
}

#[test]
fn malformed_references_are_configuration_errors() {
    let malformed = [
        "",
        "   ",
        "https://open.spotify.com/playlist/",
        "https://open.spotify.com/playlist/?si=abc",
        "https://open.spotify.com/track/XYZ123",
    ];

    for reference in malformed {
        assert!(
            matches!(
                resolve::normalize_reference(reference),
                Err(SyncError::Configuration(_))
            ),
            "accepted {reference:?}"
        );
    }
}

#[tokio::test]
async fn target_resolution_reuses_exact_public_match() {
    let mine = vec![
        playlist("p1", "Other", true),
        playlist("p2", "Merged Picks", true),
    ];
    let created = Cell::new(false);

    let id = resolve::resolve_target(&mine, "Merged Picks", || {
        created.set(true);
        async { Ok(playlist("new", "Merged Picks", true)) }
    })
    .await
    .unwrap();

    assert_eq!(id, "p2");
    assert!(!created.get());
}

#[tokio::test]
async fn target_resolution_creates_when_no_public_name_match() {
    // Same name but private, plus an unrelated playlist: neither is reusable
    let mut mine = vec![
        playlist("p1", "Merged Picks", false),
        playlist("p2", "Other", true),
    ];
    mine.push(PlaylistInfo {
        id: "p3".to_string(),
        name: "Merged Picks".to_string(),
        public: None,
        collaborative: false,
        description: None,
    });

    let calls = Cell::new(0u32);

    let id = resolve::resolve_target(&mine, "Merged Picks", || {
        calls.set(calls.get() + 1);
        async { Ok(playlist("new", "Merged Picks", true)) }
    })
    .await
    .unwrap();

    assert_eq!(id, "new");
    assert_eq!(calls.get(), 1);
}

#[test]
fn find_existing_requires_exact_name_and_public() {
    let mine = vec![
        playlist("p1", "merged picks", true),
        playlist("p2", "Merged Picks", false),
        playlist("p3", "Merged Picks", true),
    ];

    let found = resolve::find_existing(&mine, "Merged Picks").unwrap();
    assert_eq!(found.id, "p3");
    assert!(resolve::find_existing(&mine, "Absent").is_none());
}
