use crate::{config, error, info, management::TokenManager, success, sync};

pub async fn sync(dry_run: bool) {
    let sync_config = match config::sync_config() {
        Ok(c) => c,
        Err(e) => error!("{}", e),
    };

    let mut token_mgr = match TokenManager::load().await {
        Ok(t) => t,
        Err(e) => {
            error!(
                "Failed to load token. Please run spomcli auth\n Error: {}",
                e
            );
        }
    };
    let token = token_mgr.get_valid_token().await;

    info!(
        "Merging {} source playlists into {}",
        sync_config.source_playlists.len(),
        sync_config.target_name
    );

    match sync::run(&token, &sync_config, dry_run).await {
        Ok(report) => {
            if dry_run {
                success!(
                    "Dry run complete. {} unique tracks, {} of them missing from the target.",
                    report.unique_tracks,
                    report.tracks_missing
                );
            } else {
                success!(
                    "Sync complete. Added {} of {} unique tracks.",
                    report.tracks_added,
                    report.unique_tracks
                );
            }
        }
        Err(e) => error!("{}", e),
    }
}
