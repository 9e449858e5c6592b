//! `favorites` command handlers.

use clap::Subcommand;
use tablefind_core::{AppConfig, CanonicalRestaurant};

use crate::render;
use crate::search::report;
use crate::upstream::Upstream;

/// Sub-commands available under `favorites`.
#[derive(Debug, Subcommand)]
pub enum FavoritesCommands {
    /// List saved favorites
    List,
    /// Add a restaurant to favorites, or remove it if already saved
    Toggle {
        /// Restaurant key as printed by `search`
        key: String,
    },
}

/// Prints every saved favorite.
pub(crate) fn run_favorites_list(config: &AppConfig) {
    let session = crate::open_session(config);
    let favorites = session.favorites();
    if favorites.is_empty() {
        println!("no favorites saved; use `favorites toggle <key>` to add one");
        return;
    }
    println!("{}", render::results_table(favorites.iter(), |_| true));
}

/// Saved favorite whose id or detail key is `key`.
fn find_saved<'a>(
    saved: impl IntoIterator<Item = &'a CanonicalRestaurant>,
    key: &str,
) -> Option<CanonicalRestaurant> {
    saved
        .into_iter()
        .find(|r| r.id == key || r.detail_key() == key)
        .cloned()
}

/// Toggles `key` in the favorites.
///
/// Removing a saved favorite needs no network; adding one first fetches the
/// restaurant's details so the saved record is complete.
///
/// # Errors
///
/// Returns an error if the detail lookup or the favorites write fails.
pub(crate) async fn run_favorites_toggle(config: &AppConfig, key: &str) -> anyhow::Result<()> {
    let mut session = crate::open_session(config);

    let record = if let Some(saved) = find_saved(session.favorites().iter(), key) {
        saved
    } else {
        let upstream = Upstream::from_config(config)?;
        session
            .open_with_detail(&upstream, key)
            .await
            .map_err(report)?;
        session
            .selection()
            .record()
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("no restaurant found for '{key}'"))?
    };

    let favorites = session.toggle_favorite(&record).map_err(report)?;
    if favorites.contains(&record.id) {
        println!("added {} to favorites ({} saved)", record.name, favorites.len());
    } else {
        println!("removed {} from favorites ({} saved)", record.name, favorites.len());
    }
    Ok(())
}
