use crate::output::{Output, OutputFormat};
use color_eyre::Result;
use comfy_table::Table;
use movie_log_core::{compute_stats, ToggleOutcome};
use movie_log_models::{ListCollections, ListKind};
use movie_log_remote::Catalog;
use serde_json::json;

pub async fn run_toggle(kind: ListKind, id: &str, output: &Output) -> Result<()> {
    let config = super::load_config()?;
    let mut session = super::open_session(&config).await?;

    // Toggling off needs no catalog round trip: the entry is already local
    if session.store().contains(kind, id) {
        session.remove(kind, id).await;
        output.success(format!("Removed {} from {}", id, kind));
        session.close();
        return Ok(());
    }

    let catalog = super::catalog_client(&config);
    let movie = match catalog.details(id).await {
        Ok(Some(movie)) => movie,
        Ok(None) => {
            output.warn(format!("The catalog does not know \"{}\"", id));
            session.close();
            return Ok(());
        }
        Err(e) => {
            output.error(format!("Catalog lookup failed: {}", e));
            session.close();
            return Ok(());
        }
    };

    let title = movie.title.clone();
    match session.toggle(kind, movie).await {
        ToggleOutcome::Added => output.success(format!("Added \"{}\" to {}", title, kind)),
        ToggleOutcome::Removed => output.success(format!("Removed \"{}\" from {}", title, kind)),
        ToggleOutcome::Rejected => {
            output.warn(format!("The catalog returned a malformed record for {}", id))
        }
    }
    session.close();
    Ok(())
}

pub async fn run_remove(kind: ListKind, id: &str, output: &Output) -> Result<()> {
    let config = super::load_config()?;
    let mut session = super::open_session(&config).await?;

    if session.remove(kind, id).await {
        output.success(format!("Removed {} from {}", id, kind));
    } else {
        // absent entries are a no-op, not an error
        output.info(format!("{} was not in {}", id, kind));
    }
    session.close();
    Ok(())
}

pub async fn run_rate(id: &str, rating: u8, output: &Output) -> Result<()> {
    let config = super::load_config()?;
    let mut session = super::open_session(&config).await?;

    if !(1..=10).contains(&rating) {
        output.warn("Ratings run from 1 to 10");
        session.close();
        return Ok(());
    }

    if session.rate(id, rating).await {
        let title = session
            .store()
            .watched_entry(id)
            .map(|m| m.title.clone())
            .unwrap_or_else(|| id.to_string());
        output.success(format!("Rated \"{}\" {}/10", title, rating));
    } else {
        output.warn(format!(
            "{} is not in your watched list; only watched titles can be rated",
            id
        ));
    }
    session.close();
    Ok(())
}

pub async fn run_list(kind: Option<ListKind>, output: &Output) -> Result<()> {
    let config = super::load_config()?;
    let session = super::open_session(&config).await?;
    let collections = session.store().collections();

    match output.format() {
        OutputFormat::Human => {
            let kinds = match kind {
                Some(kind) => vec![kind],
                None => ListKind::ALL.to_vec(),
            };
            for kind in kinds {
                render_list(kind, collections, output);
            }
        }
        OutputFormat::Json | OutputFormat::JsonPretty => match kind {
            Some(kind) => output.json(&list_json(kind, collections)),
            None => output.json(&serde_json::to_value(collections)?),
        },
    }

    session.close();
    Ok(())
}

fn render_list(kind: ListKind, collections: &ListCollections, output: &Output) {
    output.println(format!("{} ({})", kind, collections.len(kind)));

    if collections.len(kind) == 0 {
        output.println("  (empty)\n");
        return;
    }

    let mut table = Table::new();
    match kind {
        ListKind::Favorites => {
            table.set_header(vec!["Id", "Title", "Year"]);
            for movie in &collections.favorites {
                table.add_row(vec![
                    movie.imdb_id.clone(),
                    movie.title.clone(),
                    movie.year.clone(),
                ]);
            }
        }
        ListKind::Watched => {
            table.set_header(vec!["Id", "Title", "Year", "Runtime", "IMDb", "Mine"]);
            for movie in &collections.watched {
                table.add_row(vec![
                    movie.imdb_id.clone(),
                    movie.title.clone(),
                    movie.year.clone(),
                    format!("{} min", movie.runtime_minutes),
                    movie
                        .catalog_rating
                        .map(|r| format!("{:.1}", r))
                        .unwrap_or_else(|| "-".to_string()),
                    movie
                        .user_rating
                        .map(|r| format!("{}/10", r))
                        .unwrap_or_else(|| "-".to_string()),
                ]);
            }
        }
        ListKind::PlanToWatch => {
            table.set_header(vec!["Id", "Title", "Year", "Runtime", "IMDb"]);
            for movie in &collections.plan_to_watch {
                table.add_row(vec![
                    movie.imdb_id.clone(),
                    movie.title.clone(),
                    movie.year.clone(),
                    format!("{} min", movie.runtime_minutes),
                    movie
                        .catalog_rating
                        .map(|r| format!("{:.1}", r))
                        .unwrap_or_else(|| "-".to_string()),
                ]);
            }
        }
    }
    output.println(format!("{}\n", table));
}

fn list_json(kind: ListKind, collections: &ListCollections) -> serde_json::Value {
    match kind {
        ListKind::Favorites => json!({ "favorites": collections.favorites }),
        ListKind::Watched => json!({ "watched": collections.watched }),
        ListKind::PlanToWatch => json!({ "planToWatch": collections.plan_to_watch }),
    }
}

pub async fn run_stats(output: &Output) -> Result<()> {
    let config = super::load_config()?;
    let session = super::open_session(&config).await?;
    let stats = compute_stats(&session.store().collections().watched);

    match output.format() {
        OutputFormat::Human => {
            output.println(format!("{} movies watched", stats.watched_count));
            output.println(format!("Average IMDb rating: {}", stats.catalog_rating_display()));
            output.println(format!("Average your rating: {}", stats.user_rating_display()));
            output.println(format!("Total watch time:    {}", stats.runtime_display()));
        }
        OutputFormat::Json | OutputFormat::JsonPretty => {
            output.json(&json!({
                "watchedCount": stats.watched_count,
                "averageCatalogRating": stats.average_catalog_rating,
                "averageUserRating": stats.average_user_rating,
                "totalRuntimeFormatted": stats.total_runtime_formatted,
            }));
        }
    }

    session.close();
    Ok(())
}
