//! `search` and `show` command handlers.

use tablefind_core::{AppConfig, Cuisine, SearchCriteria};
use tablefind_provider::SearchQuery;
use tablefind_session::{SearchOutcome, SessionError};

use crate::render;
use crate::upstream::Upstream;

/// Search flags as parsed from the command line.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct SearchArgs {
    pub(crate) name: String,
    pub(crate) location: String,
    pub(crate) food_type: String,
    pub(crate) cuisine: Option<Cuisine>,
    pub(crate) coordinates: Option<(f64, f64)>,
}

impl SearchArgs {
    /// Builds the query, falling back to `remembered` when no criteria flag
    /// was given.
    pub(crate) fn into_query(self, remembered: &SearchCriteria) -> SearchQuery {
        let criteria = SearchCriteria {
            name: self.name,
            location: self.location,
            food_type: self.food_type,
            cuisine: self.cuisine,
        };
        let criteria = if criteria.is_empty() && !remembered.is_empty() {
            tracing::info!(?remembered, "no criteria given; reusing the last search");
            remembered.clone()
        } else {
            criteria
        };

        let query = SearchQuery::new(criteria);
        match self.coordinates {
            Some((lat, lng)) => query.with_coordinates(lat, lng),
            None => query,
        }
    }
}

/// Turns a session error into a CLI error carrying the user-facing message.
pub(crate) fn report(err: SessionError) -> anyhow::Error {
    let message = err.user_message();
    anyhow::Error::new(err).context(message)
}

/// Runs a search and prints the filtered results.
///
/// # Errors
///
/// Returns an error if the provider cannot be built or the search fails.
pub(crate) async fn run_search(config: &AppConfig, args: SearchArgs) -> anyhow::Result<()> {
    let upstream = Upstream::from_config(config)?;
    let mut session = crate::open_session(config);

    let query = args.into_query(session.criteria());
    let outcome = session.submit(&upstream, query).await.map_err(report)?;

    match outcome {
        SearchOutcome::Loaded { count } => {
            let visible = session.visible_results();
            println!(
                "{}",
                render::results_table(visible.iter().copied(), |id| session.is_favorite(id))
            );
            println!("{} of {count} results match", visible.len());
        }
        SearchOutcome::NoResults | SearchOutcome::Superseded => {
            if let Some(message) = outcome.user_message() {
                println!("{message}");
            }
        }
    }
    Ok(())
}

/// Fetches one restaurant's details and prints them.
///
/// # Errors
///
/// Returns an error if the provider cannot be built or the lookup fails.
pub(crate) async fn run_show(config: &AppConfig, key: &str) -> anyhow::Result<()> {
    let upstream = Upstream::from_config(config)?;
    let mut session = crate::open_session(config);

    session
        .open_with_detail(&upstream, key)
        .await
        .map_err(report)?;

    if let Some(record) = session.selection().record() {
        print!(
            "{}",
            render::detail_card(record, session.image_url(record), session.is_favorite(&record.id))
        );
    }
    Ok(())
}
