// Derived statistics over the watched collection

use movie_log_models::WatchedMovie;

const NOT_AVAILABLE: &str = "N/A";

/// Aggregates over the watched list. `None` means "not available" — the
/// average of zero defined values is a sentinel, never 0.0.
#[derive(Debug, Clone, PartialEq)]
pub struct WatchedStats {
    pub watched_count: usize,
    pub average_catalog_rating: Option<f64>,
    pub average_user_rating: Option<f64>,
    pub total_runtime_formatted: Option<String>,
}

impl WatchedStats {
    pub fn catalog_rating_display(&self) -> String {
        display_average(self.average_catalog_rating)
    }

    pub fn user_rating_display(&self) -> String {
        display_average(self.average_user_rating)
    }

    pub fn runtime_display(&self) -> String {
        self.total_runtime_formatted
            .clone()
            .unwrap_or_else(|| NOT_AVAILABLE.to_string())
    }
}

fn display_average(value: Option<f64>) -> String {
    match value {
        Some(avg) => format!("{:.1}", avg),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Mean of the defined values only; `None` when there are none.
fn average(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// "4h 24m" for 264 minutes.
pub fn format_runtime(total_minutes: u32) -> String {
    format!("{}h {}m", total_minutes / 60, total_minutes % 60)
}

pub fn compute_stats(watched: &[WatchedMovie]) -> WatchedStats {
    let catalog_ratings: Vec<f64> = watched.iter().filter_map(|m| m.catalog_rating).collect();
    let user_ratings: Vec<f64> = watched
        .iter()
        .filter_map(|m| m.user_rating.map(f64::from))
        .collect();
    let total_runtime: u32 = watched.iter().map(|m| m.runtime_minutes).sum();

    WatchedStats {
        watched_count: watched.len(),
        average_catalog_rating: average(&catalog_ratings),
        average_user_rating: average(&user_ratings),
        // a zero sum reads as "no runtime data", not "0h 0m"
        total_runtime_formatted: (total_runtime > 0).then(|| format_runtime(total_runtime)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(runtime: u32, catalog: Option<f64>, user: Option<u8>) -> WatchedMovie {
        WatchedMovie {
            imdb_id: "tt0000001".to_string(),
            title: "Test".to_string(),
            year: "2000".to_string(),
            poster_url: String::new(),
            runtime_minutes: runtime,
            catalog_rating: catalog,
            user_rating: user,
            plot: String::new(),
        }
    }

    #[test]
    fn test_empty_watched_reports_not_available() {
        let stats = compute_stats(&[]);
        assert_eq!(stats.watched_count, 0);
        assert_eq!(stats.average_catalog_rating, None);
        assert_eq!(stats.average_user_rating, None);
        assert_eq!(stats.total_runtime_formatted, None);
        assert_eq!(stats.catalog_rating_display(), "N/A");
        assert_eq!(stats.runtime_display(), "N/A");
    }

    #[test]
    fn test_average_user_rating() {
        let watched = vec![movie(0, None, Some(8)), movie(0, None, Some(6))];
        let stats = compute_stats(&watched);
        assert_eq!(stats.average_user_rating, Some(7.0));
        assert_eq!(stats.user_rating_display(), "7.0");
    }

    #[test]
    fn test_averages_skip_undefined_values() {
        let watched = vec![
            movie(0, Some(8.0), Some(9)),
            movie(0, None, None),
            movie(0, Some(6.0), None),
        ];
        let stats = compute_stats(&watched);
        // only the two defined catalog ratings count
        assert_eq!(stats.average_catalog_rating, Some(7.0));
        // only the single defined user rating counts
        assert_eq!(stats.average_user_rating, Some(9.0));
    }

    #[test]
    fn test_all_undefined_ratings_report_not_available() {
        let watched = vec![movie(90, None, None), movie(100, None, None)];
        let stats = compute_stats(&watched);
        assert_eq!(stats.average_catalog_rating, None);
        assert_eq!(stats.average_user_rating, None);
    }

    #[test]
    fn test_total_runtime_formatting() {
        let watched = vec![movie(148, None, None), movie(116, None, None)];
        let stats = compute_stats(&watched);
        assert_eq!(stats.total_runtime_formatted.as_deref(), Some("4h 24m"));
    }

    #[test]
    fn test_zero_total_runtime_reports_not_available() {
        let watched = vec![movie(0, Some(8.0), None)];
        let stats = compute_stats(&watched);
        assert_eq!(stats.total_runtime_formatted, None);
        assert_eq!(stats.runtime_display(), "N/A");
    }

    #[test]
    fn test_format_runtime() {
        assert_eq!(format_runtime(264), "4h 24m");
        assert_eq!(format_runtime(59), "0h 59m");
        assert_eq!(format_runtime(60), "1h 0m");
    }
}
