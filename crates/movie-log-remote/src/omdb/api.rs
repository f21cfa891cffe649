use movie_log_models::{MovieSummary, WatchedMovie};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::error::RemoteError;

// OMDb API base URL
const API_BASE: &str = "https://www.omdbapi.com/";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(rename = "Search", default)]
    search: Vec<SearchHit>,
    #[serde(rename = "Response")]
    response: String,
    #[serde(rename = "Error")]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    #[serde(rename = "imdbID")]
    imdb_id: String,
    #[serde(rename = "Title")]
    title: String,
    #[serde(rename = "Year", default)]
    year: String,
    #[serde(rename = "Poster", default)]
    poster: String,
}

#[derive(Debug, Deserialize)]
struct TitleResponse {
    #[serde(rename = "Response")]
    response: String,
    #[serde(rename = "Error")]
    error: Option<String>,
    #[serde(rename = "imdbID")]
    imdb_id: Option<String>,
    #[serde(rename = "Title")]
    title: Option<String>,
    #[serde(rename = "Year")]
    year: Option<String>,
    #[serde(rename = "Poster")]
    poster: Option<String>,
    #[serde(rename = "Runtime")]
    runtime: Option<String>,
    #[serde(rename = "imdbRating")]
    imdb_rating: Option<String>,
    #[serde(rename = "Plot")]
    plot: Option<String>,
}

/// OMDb uses the literal string "N/A" for absent fields.
fn normalize_text(raw: Option<String>) -> String {
    match raw {
        Some(s) if s != "N/A" => s,
        _ => String::new(),
    }
}

/// Parse "148 min" into minutes. Anything unparseable counts as 0.
fn parse_runtime_minutes(raw: Option<&str>) -> u32 {
    raw.and_then(|s| s.split_whitespace().next())
        .and_then(|n| n.parse::<u32>().ok())
        .unwrap_or(0)
}

/// Parse "8.8" into a rating. "N/A" and out-of-range values are absent.
fn parse_catalog_rating(raw: Option<&str>) -> Option<f64> {
    raw.and_then(|s| s.parse::<f64>().ok())
        .filter(|r| (0.0..=10.0).contains(r))
}

fn summaries_from_response(response: SearchResponse) -> Vec<MovieSummary> {
    if response.response != "True" {
        // "Movie not found!" and "Too many results." both mean no usable hits
        debug!(
            "OMDb search returned no results: {}",
            response.error.as_deref().unwrap_or("unknown reason")
        );
        return Vec::new();
    }

    response
        .search
        .into_iter()
        .filter(|hit| !hit.imdb_id.is_empty())
        .map(|hit| MovieSummary {
            imdb_id: hit.imdb_id,
            title: hit.title,
            year: hit.year,
            poster_url: normalize_text(Some(hit.poster)),
        })
        .collect()
}

fn movie_from_response(response: TitleResponse) -> Option<WatchedMovie> {
    if response.response != "True" {
        debug!(
            "OMDb title lookup missed: {}",
            response.error.as_deref().unwrap_or("unknown reason")
        );
        return None;
    }

    let imdb_id = response.imdb_id.filter(|id| !id.is_empty())?;
    Some(WatchedMovie {
        imdb_id,
        title: normalize_text(response.title),
        year: normalize_text(response.year),
        poster_url: normalize_text(response.poster),
        runtime_minutes: parse_runtime_minutes(response.runtime.as_deref()),
        catalog_rating: parse_catalog_rating(response.imdb_rating.as_deref()),
        user_rating: None,
        plot: normalize_text(response.plot),
    })
}

/// Free-text search, summaries only.
pub async fn search(
    client: &Client,
    api_key: &str,
    query: &str,
) -> Result<Vec<MovieSummary>, RemoteError> {
    let url = format!(
        "{}?apikey={}&s={}",
        API_BASE,
        api_key,
        urlencoding::encode(query.trim())
    );

    let response = client.get(&url).send().await?;
    if !response.status().is_success() {
        let status = response.status();
        let error_text = response.text().await.unwrap_or_default();
        return Err(RemoteError::api("omdb", status.as_u16(), error_text));
    }

    let body: SearchResponse = response.json().await?;
    Ok(summaries_from_response(body))
}

/// Full detail lookup by catalog id. Unknown ids are `None`, not errors.
pub async fn title_by_id(
    client: &Client,
    api_key: &str,
    imdb_id: &str,
) -> Result<Option<WatchedMovie>, RemoteError> {
    let url = format!(
        "{}?apikey={}&i={}&plot=short",
        API_BASE,
        api_key,
        urlencoding::encode(imdb_id.trim())
    );

    let response = client.get(&url).send().await?;
    if !response.status().is_success() {
        let status = response.status();
        let error_text = response.text().await.unwrap_or_default();
        return Err(RemoteError::api("omdb", status.as_u16(), error_text));
    }

    let body: TitleResponse = response.json().await?;
    Ok(movie_from_response(body))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_runtime_minutes() {
        assert_eq!(parse_runtime_minutes(Some("148 min")), 148);
        assert_eq!(parse_runtime_minutes(Some("90")), 90);
        assert_eq!(parse_runtime_minutes(Some("N/A")), 0);
        assert_eq!(parse_runtime_minutes(Some("")), 0);
        assert_eq!(parse_runtime_minutes(None), 0);
    }

    #[test]
    fn test_parse_catalog_rating() {
        assert_eq!(parse_catalog_rating(Some("8.8")), Some(8.8));
        assert_eq!(parse_catalog_rating(Some("N/A")), None);
        assert_eq!(parse_catalog_rating(Some("11.2")), None);
        assert_eq!(parse_catalog_rating(None), None);
    }

    #[test]
    fn test_search_response_parsing() {
        let body = r#"{
            "Search": [
                {"Title": "Inception", "Year": "2010", "imdbID": "tt1375666", "Type": "movie", "Poster": "https://m.media-amazon.com/inception.jpg"},
                {"Title": "Inception: The Cobol Job", "Year": "2010", "imdbID": "tt5295894", "Type": "movie", "Poster": "N/A"}
            ],
            "totalResults": "2",
            "Response": "True"
        }"#;
        let response: SearchResponse = serde_json::from_str(body).unwrap();
        let summaries = summaries_from_response(response);

        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].imdb_id, "tt1375666");
        assert_eq!(summaries[0].title, "Inception");
        assert_eq!(summaries[0].year, "2010");
        assert!(summaries[0].poster_url.starts_with("https://"));
        // "N/A" poster normalizes to empty
        assert_eq!(summaries[1].poster_url, "");
    }

    #[test]
    fn test_search_response_no_results() {
        let body = r#"{"Response": "False", "Error": "Movie not found!"}"#;
        let response: SearchResponse = serde_json::from_str(body).unwrap();
        assert!(summaries_from_response(response).is_empty());
    }

    #[test]
    fn test_title_response_parsing() {
        let body = r#"{
            "Title": "Inception",
            "Year": "2010",
            "Runtime": "148 min",
            "Plot": "A thief who steals corporate secrets.",
            "imdbRating": "8.8",
            "imdbID": "tt1375666",
            "Poster": "N/A",
            "Response": "True"
        }"#;
        let response: TitleResponse = serde_json::from_str(body).unwrap();
        let movie = movie_from_response(response).unwrap();

        assert_eq!(movie.imdb_id, "tt1375666");
        assert_eq!(movie.runtime_minutes, 148);
        assert_eq!(movie.catalog_rating, Some(8.8));
        assert_eq!(movie.user_rating, None);
        assert_eq!(movie.poster_url, "");
        assert_eq!(movie.plot, "A thief who steals corporate secrets.");
    }

    #[test]
    fn test_title_response_not_found() {
        let body = r#"{"Response": "False", "Error": "Incorrect IMDb ID."}"#;
        let response: TitleResponse = serde_json::from_str(body).unwrap();
        assert!(movie_from_response(response).is_none());
    }

    #[test]
    fn test_title_response_all_fields_na() {
        let body = r#"{
            "Title": "Obscure Short",
            "Year": "N/A",
            "Runtime": "N/A",
            "Plot": "N/A",
            "imdbRating": "N/A",
            "imdbID": "tt0000001",
            "Poster": "N/A",
            "Response": "True"
        }"#;
        let response: TitleResponse = serde_json::from_str(body).unwrap();
        let movie = movie_from_response(response).unwrap();

        assert_eq!(movie.runtime_minutes, 0);
        assert_eq!(movie.catalog_rating, None);
        assert_eq!(movie.year, "");
        assert_eq!(movie.plot, "");
    }
}
