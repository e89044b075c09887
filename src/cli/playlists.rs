use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tabled::Table;

use crate::{
    error,
    management::TokenManager,
    spotify,
    sync::paginate,
    types::PlaylistTableRow,
    warning,
};

pub async fn playlists() {
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

    let pb = ProgressBar::new_spinner();
    pb.set_message("Fetching playlists...");
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );

    let result =
        paginate::fetch_all(|offset| spotify::playlist::user_playlists_page(token.clone(), offset))
            .await;
    pb.finish_and_clear();

    match result {
        Ok(playlists) => {
            let mut sorted = playlists;
            sorted.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));

            let rows: Vec<PlaylistTableRow> = sorted
                .into_iter()
                .map(|p| PlaylistTableRow {
                    name: p.name,
                    visibility: match p.public {
                        Some(true) => "public".to_string(),
                        _ => "private".to_string(),
                    },
                    id: p.id,
                })
                .collect();

            let table = Table::new(rows);
            println!("{}", table);
        }
        Err(e) => warning!("Failed to load playlists. Err: {}", e),
    }
}
