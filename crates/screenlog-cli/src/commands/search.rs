use crate::output::{Output, OutputFormat};
use color_eyre::Result;
use comfy_table::Table;
use indicatif::ProgressBar;
use movie_log_core::{ListStore, Session};
use movie_log_models::{ListKind, MovieSummary, WatchedMovie};
use movie_log_remote::Catalog;
use serde_json::json;
use std::time::Duration;

/// Spinner for catalog round trips; only in interactive human output.
fn progress_spinner(output: &Output, message: &str) -> Option<ProgressBar> {
    if output.is_quiet() || output.format() != OutputFormat::Human {
        return None;
    }
    let spinner = ProgressBar::new_spinner();
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    Some(spinner)
}

/// One character per list the title belongs to: ♥ favorites, ✓ watched,
/// ◷ plan-to-watch. Empty when signed out.
fn membership_flags(store: Option<&ListStore>, imdb_id: &str) -> String {
    let Some(store) = store else {
        return String::new();
    };
    let mut flags = String::new();
    if store.contains(ListKind::Favorites, imdb_id) {
        flags.push('♥');
    }
    if store.contains(ListKind::Watched, imdb_id) {
        flags.push('✓');
    }
    if store.contains(ListKind::PlanToWatch, imdb_id) {
        flags.push('◷');
    }
    flags
}

fn membership_names(store: Option<&ListStore>, imdb_id: &str) -> Vec<&'static str> {
    let Some(store) = store else {
        return Vec::new();
    };
    ListKind::ALL
        .iter()
        .filter(|kind| store.contains(**kind, imdb_id))
        .map(|kind| kind.field_name())
        .collect()
}

pub async fn run_search(query: &str, output: &Output) -> Result<()> {
    let config = super::load_config()?;
    let catalog = super::catalog_client(&config);
    let session = super::try_open_session(&config).await;
    let store = session.as_ref().map(Session::store);

    let spinner = progress_spinner(output, "Searching catalog...");
    let results = match catalog.search(query).await {
        Ok(results) => results,
        Err(e) => {
            // network failure degrades to an empty result set
            tracing::warn!("Catalog search failed: {}", e);
            Vec::new()
        }
    };
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    if results.is_empty() {
        output.warn(format!("No results for \"{}\"", query));
        return Ok(());
    }

    match output.format() {
        OutputFormat::Human => {
            let mut table = Table::new();
            table.set_header(vec!["Id", "Title", "Year", "Lists"]);
            for movie in &results {
                table.add_row(vec![
                    movie.imdb_id.clone(),
                    movie.title.clone(),
                    movie.year.clone(),
                    membership_flags(store, &movie.imdb_id),
                ]);
            }
            output.println(table.to_string());
        }
        OutputFormat::Json | OutputFormat::JsonPretty => {
            let results: Vec<_> = results
                .iter()
                .map(|movie| summary_json(movie, store))
                .collect();
            output.json(&json!({ "query": query, "results": results }));
        }
    }

    Ok(())
}

pub async fn run_browse(output: &Output) -> Result<()> {
    let config = super::load_config()?;
    let catalog = super::catalog_client(&config);
    let session = super::try_open_session(&config).await;
    let store = session.as_ref().map(Session::store);

    let spinner = progress_spinner(output, "Fetching recommended titles...");
    let movies = match catalog.lookup_many(&config.recommendations).await {
        Ok(movies) => movies,
        Err(e) => {
            tracing::warn!("Recommendation fetch failed: {}", e);
            Vec::new()
        }
    };
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    if movies.is_empty() {
        output.warn("No recommendations available right now");
        return Ok(());
    }

    match output.format() {
        OutputFormat::Human => {
            let mut table = Table::new();
            table.set_header(vec!["Id", "Title", "Year", "IMDb", "Runtime", "Lists"]);
            for movie in &movies {
                table.add_row(vec![
                    movie.imdb_id.clone(),
                    movie.title.clone(),
                    movie.year.clone(),
                    movie
                        .catalog_rating
                        .map(|r| format!("{:.1}", r))
                        .unwrap_or_else(|| "-".to_string()),
                    format!("{} min", movie.runtime_minutes),
                    membership_flags(store, &movie.imdb_id),
                ]);
            }
            output.println(table.to_string());
        }
        OutputFormat::Json | OutputFormat::JsonPretty => {
            let movies: Vec<_> = movies
                .iter()
                .map(|movie| detail_json(movie, store))
                .collect();
            output.json(&json!({ "recommendations": movies }));
        }
    }

    Ok(())
}

pub async fn run_show(id: &str, output: &Output) -> Result<()> {
    let config = super::load_config()?;
    let catalog = super::catalog_client(&config);
    let session = super::try_open_session(&config).await;
    let store = session.as_ref().map(Session::store);

    let spinner = progress_spinner(output, "Fetching title...");
    let movie = match catalog.details(id).await {
        Ok(movie) => movie,
        Err(e) => {
            tracing::warn!("Catalog lookup failed: {}", e);
            None
        }
    };
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    let Some(movie) = movie else {
        output.warn(format!("The catalog does not know \"{}\"", id));
        return Ok(());
    };

    match output.format() {
        OutputFormat::Human => {
            output.println(format!("{} ({})", movie.title, movie.year));
            output.println(format!("Id:          {}", movie.imdb_id));
            output.println(format!(
                "IMDb rating: {}",
                movie
                    .catalog_rating
                    .map(|r| format!("{:.1}", r))
                    .unwrap_or_else(|| "N/A".to_string())
            ));
            output.println(format!("Runtime:     {} min", movie.runtime_minutes));
            if let Some(user_rating) = store
                .and_then(|s| s.watched_entry(&movie.imdb_id))
                .and_then(|m| m.user_rating)
            {
                output.println(format!("Your rating: {}/10", user_rating));
            }
            let lists = membership_names(store, &movie.imdb_id);
            if !lists.is_empty() {
                output.println(format!("Lists:       {}", lists.join(", ")));
            }
            if !movie.plot.is_empty() {
                output.println(format!("\n{}", movie.plot));
            }
        }
        OutputFormat::Json | OutputFormat::JsonPretty => {
            output.json(&detail_json(&movie, store));
        }
    }

    Ok(())
}

fn summary_json(movie: &MovieSummary, store: Option<&ListStore>) -> serde_json::Value {
    json!({
        "imdbId": movie.imdb_id,
        "title": movie.title,
        "year": movie.year,
        "lists": membership_names(store, &movie.imdb_id),
    })
}

fn detail_json(movie: &WatchedMovie, store: Option<&ListStore>) -> serde_json::Value {
    let user_rating = store
        .and_then(|s| s.watched_entry(&movie.imdb_id))
        .and_then(|m| m.user_rating);
    json!({
        "imdbId": movie.imdb_id,
        "title": movie.title,
        "year": movie.year,
        "runtimeMinutes": movie.runtime_minutes,
        "catalogRating": movie.catalog_rating,
        "userRating": user_rating,
        "plot": movie.plot,
        "lists": membership_names(store, &movie.imdb_id),
    })
}
