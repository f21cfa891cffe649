//! Firestore typed-value encoding for the profile document.
//!
//! Firestore documents carry `{"fields": {name: {stringValue: ...}}}` trees
//! rather than plain JSON. Integers travel as strings, so decoding must
//! accept both `integerValue` and `doubleValue` for numeric fields.

use movie_log_models::{ListCollections, MovieSummary, WatchedMovie};
use serde_json::{json, Map, Value};

pub(crate) fn encode_collections(collections: &ListCollections) -> Map<String, Value> {
    let mut fields = Map::new();
    fields.insert(
        "favorites".to_string(),
        array_value(collections.favorites.iter().map(encode_summary).collect()),
    );
    fields.insert(
        "watched".to_string(),
        array_value(collections.watched.iter().map(encode_watched).collect()),
    );
    fields.insert(
        "planToWatch".to_string(),
        array_value(collections.plan_to_watch.iter().map(encode_watched).collect()),
    );
    fields
}

pub(crate) fn decode_collections(fields: &Map<String, Value>) -> ListCollections {
    ListCollections {
        favorites: array_entries(fields, "favorites")
            .filter_map(decode_summary)
            .collect(),
        watched: array_entries(fields, "watched")
            .filter_map(decode_watched)
            .collect(),
        plan_to_watch: array_entries(fields, "planToWatch")
            .filter_map(decode_watched)
            .collect(),
    }
}

// --- encoding ---

fn string_value(s: &str) -> Value {
    json!({ "stringValue": s })
}

fn integer_value(n: i64) -> Value {
    // Firestore int64 values are string-encoded in the REST representation
    json!({ "integerValue": n.to_string() })
}

fn double_value(v: f64) -> Value {
    json!({ "doubleValue": v })
}

fn array_value(values: Vec<Value>) -> Value {
    json!({ "arrayValue": { "values": values } })
}

fn map_value(fields: Map<String, Value>) -> Value {
    json!({ "mapValue": { "fields": fields } })
}

fn encode_summary(movie: &MovieSummary) -> Value {
    let mut fields = Map::new();
    fields.insert("imdbId".to_string(), string_value(&movie.imdb_id));
    fields.insert("title".to_string(), string_value(&movie.title));
    fields.insert("year".to_string(), string_value(&movie.year));
    fields.insert("posterUrl".to_string(), string_value(&movie.poster_url));
    map_value(fields)
}

fn encode_watched(movie: &WatchedMovie) -> Value {
    let mut fields = Map::new();
    fields.insert("imdbId".to_string(), string_value(&movie.imdb_id));
    fields.insert("title".to_string(), string_value(&movie.title));
    fields.insert("year".to_string(), string_value(&movie.year));
    fields.insert("posterUrl".to_string(), string_value(&movie.poster_url));
    fields.insert(
        "runtimeMinutes".to_string(),
        integer_value(movie.runtime_minutes as i64),
    );
    if let Some(rating) = movie.catalog_rating {
        fields.insert("catalogRating".to_string(), double_value(rating));
    }
    if let Some(rating) = movie.user_rating {
        fields.insert("userRating".to_string(), integer_value(rating as i64));
    }
    fields.insert("plot".to_string(), string_value(&movie.plot));
    map_value(fields)
}

// --- decoding ---

/// Map entries of an arrayValue field, skipping non-map elements.
fn array_entries<'a>(
    fields: &'a Map<String, Value>,
    name: &str,
) -> impl Iterator<Item = &'a Map<String, Value>> {
    fields
        .get(name)
        .and_then(|v| v.get("arrayValue"))
        .and_then(|v| v.get("values"))
        .and_then(|v| v.as_array())
        .map(|values| values.as_slice())
        .unwrap_or_default()
        .iter()
        .filter_map(|v| {
            v.get("mapValue")
                .and_then(|m| m.get("fields"))
                .and_then(|f| f.as_object())
        })
}

fn field_str(fields: &Map<String, Value>, name: &str) -> String {
    fields
        .get(name)
        .and_then(|v| v.get("stringValue"))
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string()
}

fn field_number(fields: &Map<String, Value>, name: &str) -> Option<f64> {
    let value = fields.get(name)?;
    if let Some(int) = value.get("integerValue") {
        // May arrive as "148" or 148 depending on the producer
        return int
            .as_str()
            .and_then(|s| s.parse::<f64>().ok())
            .or_else(|| int.as_f64());
    }
    value.get("doubleValue").and_then(|v| v.as_f64())
}

fn decode_summary(fields: &Map<String, Value>) -> Option<MovieSummary> {
    let imdb_id = field_str(fields, "imdbId");
    if imdb_id.is_empty() {
        return None;
    }
    Some(MovieSummary {
        imdb_id,
        title: field_str(fields, "title"),
        year: field_str(fields, "year"),
        poster_url: field_str(fields, "posterUrl"),
    })
}

fn decode_watched(fields: &Map<String, Value>) -> Option<WatchedMovie> {
    let imdb_id = field_str(fields, "imdbId");
    if imdb_id.is_empty() {
        return None;
    }
    Some(WatchedMovie {
        imdb_id,
        title: field_str(fields, "title"),
        year: field_str(fields, "year"),
        poster_url: field_str(fields, "posterUrl"),
        runtime_minutes: field_number(fields, "runtimeMinutes")
            .filter(|n| *n >= 0.0)
            .map(|n| n as u32)
            .unwrap_or(0),
        catalog_rating: field_number(fields, "catalogRating").filter(|r| (0.0..=10.0).contains(r)),
        user_rating: field_number(fields, "userRating")
            .map(|n| n as u8)
            .filter(|r| (1..=10).contains(r)),
        plot: field_str(fields, "plot"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_document() -> Map<String, Value> {
        let doc = json!({
            "favorites": { "arrayValue": { "values": [
                { "mapValue": { "fields": {
                    "imdbId": { "stringValue": "tt1375666" },
                    "title": { "stringValue": "Inception" },
                    "year": { "stringValue": "2010" },
                    "posterUrl": { "stringValue": "" }
                } } }
            ] } },
            "watched": { "arrayValue": { "values": [
                { "mapValue": { "fields": {
                    "imdbId": { "stringValue": "tt0111161" },
                    "title": { "stringValue": "The Shawshank Redemption" },
                    "year": { "stringValue": "1994" },
                    "posterUrl": { "stringValue": "" },
                    "runtimeMinutes": { "integerValue": "142" },
                    "catalogRating": { "doubleValue": 9.3 },
                    "userRating": { "integerValue": 10 },
                    "plot": { "stringValue": "Two imprisoned men bond over a number of years." }
                } } }
            ] } },
            "planToWatch": { "arrayValue": { "values": [] } }
        });
        doc.as_object().unwrap().clone()
    }

    #[test]
    fn test_decode_sample_document() {
        let collections = decode_collections(&sample_document());

        assert_eq!(collections.favorites.len(), 1);
        assert_eq!(collections.favorites[0].imdb_id, "tt1375666");

        assert_eq!(collections.watched.len(), 1);
        let watched = &collections.watched[0];
        // integerValue as string and as raw number both decode
        assert_eq!(watched.runtime_minutes, 142);
        assert_eq!(watched.catalog_rating, Some(9.3));
        assert_eq!(watched.user_rating, Some(10));

        assert!(collections.plan_to_watch.is_empty());
    }

    #[test]
    fn test_decode_skips_entries_without_id() {
        let doc = json!({
            "favorites": { "arrayValue": { "values": [
                { "mapValue": { "fields": { "title": { "stringValue": "Nameless" } } } }
            ] } }
        });
        let collections = decode_collections(doc.as_object().unwrap());
        assert!(collections.favorites.is_empty());
    }

    #[test]
    fn test_decode_missing_fields_is_empty() {
        let collections = decode_collections(&Map::new());
        assert!(collections.is_empty());
    }

    #[test]
    fn test_encode_shape() {
        let collections = ListCollections {
            favorites: Vec::new(),
            watched: vec![WatchedMovie {
                imdb_id: "tt0133093".to_string(),
                title: "The Matrix".to_string(),
                year: "1999".to_string(),
                poster_url: String::new(),
                runtime_minutes: 136,
                catalog_rating: Some(8.7),
                user_rating: None,
                plot: String::new(),
            }],
            plan_to_watch: Vec::new(),
        };

        let fields = encode_collections(&collections);
        assert!(fields.contains_key("favorites"));
        assert!(fields.contains_key("planToWatch"));

        let entry = &fields["watched"]["arrayValue"]["values"][0]["mapValue"]["fields"];
        // int64 fields are string-encoded on the wire
        assert_eq!(entry["runtimeMinutes"]["integerValue"], "136");
        assert_eq!(entry["catalogRating"]["doubleValue"], 8.7);
        // unset user rating is omitted, not null
        assert!(entry.get("userRating").is_none());
    }

    #[test]
    fn test_out_of_range_values_are_dropped() {
        let doc = json!({
            "watched": { "arrayValue": { "values": [
                { "mapValue": { "fields": {
                    "imdbId": { "stringValue": "tt0000001" },
                    "runtimeMinutes": { "integerValue": "-20" },
                    "catalogRating": { "doubleValue": 23.0 },
                    "userRating": { "integerValue": "0" }
                } } }
            ] } }
        });
        let collections = decode_collections(doc.as_object().unwrap());
        let watched = &collections.watched[0];
        assert_eq!(watched.runtime_minutes, 0);
        assert_eq!(watched.catalog_rating, None);
        assert_eq!(watched.user_rating, None);
    }
}
