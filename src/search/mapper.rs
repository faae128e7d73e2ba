//! Response mapping: provider document to display records

use std::time::{SystemTime, UNIX_EPOCH};

use crate::backend::types::{GenerateContentResponse, MapsChunk};
use super::query::SearchQuery;

pub const FALLBACK_TEXT: &str = "I found some restaurants that match what you asked for!";
const UNKNOWN_NAME: &str = "Unknown restaurant";
const MISSING_URI: &str = "#";
const CARD_DESCRIPTION: &str = "Open the map for current opening hours and the full reviews.";

/// A verified map link backing the recommendation text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    pub title: String,
    pub uri: String,
}

/// Display record for one grounded place
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestaurantCard {
    /// Unique within one response only
    pub id: String,
    pub name: String,
    pub map_url: String,
    pub description: String,
    pub match_reason: String,
    pub review_snippets: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchOutcome {
    pub text: String,
    pub restaurants: Vec<RestaurantCard>,
    pub sources: Vec<Source>,
}

/// Map a response using the current time for card ids
pub fn map_response(response: &GenerateContentResponse, query: &SearchQuery) -> SearchOutcome {
    let stamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default();
    map_response_at(response, query, stamp)
}

pub fn map_response_at(response: &GenerateContentResponse, query: &SearchQuery, stamp: u128) -> SearchOutcome {
    let text = response.text();
    let text = if text.is_empty() {
        FALLBACK_TEXT.to_string()
    } else {
        text
    };

    let mut sources: Vec<Source> = Vec::new();
    let mut restaurants = Vec::new();

    for (index, chunk) in response.grounding_chunks().iter().enumerate() {
        let Some(maps) = chunk.maps.as_ref() else {
            continue;
        };
        let title = maps.title.clone().unwrap_or_else(|| UNKNOWN_NAME.to_string());
        let uri = maps.uri.clone().unwrap_or_else(|| MISSING_URI.to_string());

        if !sources.iter().any(|s| s.uri == uri) {
            sources.push(Source {
                title: title.clone(),
                uri: uri.clone(),
            });
        }

        restaurants.push(RestaurantCard {
            id: format!("res-{}-{}", index, stamp),
            name: title,
            map_url: uri,
            description: CARD_DESCRIPTION.to_string(),
            match_reason: format!(
                "Located in {} and a match for your taste in \"{}\".",
                query.location, query.preference
            ),
            review_snippets: review_snippets(maps),
        });
    }

    tracing::debug!(
        restaurants = restaurants.len(),
        sources = sources.len(),
        "Mapped provider response"
    );

    SearchOutcome {
        text,
        restaurants,
        sources,
    }
}

/// Flatten the snippets of every answer source, dropping empty entries
fn review_snippets(maps: &MapsChunk) -> Vec<String> {
    maps.place_answer_sources
        .iter()
        .flat_map(|sources| sources.iter())
        .flat_map(|source| source.review_snippets.iter())
        .filter_map(|snippet| snippet.as_text())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::query::MinRating;
    use serde_json::json;

    fn query() -> SearchQuery {
        SearchQuery::new("Taipei", "Authentic Asian", MinRating::Four)
    }

    fn response(value: serde_json::Value) -> GenerateContentResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_shared_uri_gives_one_source_two_cards() {
        let resp = response(json!({
            "candidates": [{
                "content": { "parts": [{ "text": "Two picks." }] },
                "groundingMetadata": { "groundingChunks": [
                    { "maps": { "title": "Din Tai Fung", "uri": "https://maps.google.com/?cid=1" } },
                    { "maps": { "title": "Din Tai Fung (Xinyi)", "uri": "https://maps.google.com/?cid=1" } }
                ]}
            }]
        }));

        let outcome = map_response(&resp, &query());
        assert_eq!(outcome.sources.len(), 1);
        assert_eq!(outcome.sources[0].title, "Din Tai Fung");
        assert_eq!(outcome.restaurants.len(), 2);
        assert_eq!(outcome.restaurants[1].name, "Din Tai Fung (Xinyi)");
        assert_ne!(outcome.restaurants[0].id, outcome.restaurants[1].id);
    }

    #[test]
    fn test_empty_response_falls_back() {
        let outcome = map_response(&GenerateContentResponse::default(), &query());
        assert_eq!(outcome.text, FALLBACK_TEXT);
        assert!(outcome.restaurants.is_empty());
        assert!(outcome.sources.is_empty());
    }

    #[test]
    fn test_whitespace_text_and_snippets_kept_verbatim() {
        let resp = response(json!({
            "candidates": [{
                "content": { "parts": [{ "text": "  " }] },
                "groundingMetadata": { "groundingChunks": [
                    { "maps": { "title": "X", "uri": "x", "placeAnswerSources": {
                        "reviewSnippets": [" Juicy dumplings ", ""]
                    } } }
                ]}
            }]
        }));

        let outcome = map_response(&resp, &query());
        assert_eq!(outcome.text, "  ");
        assert_eq!(
            outcome.restaurants[0].review_snippets,
            vec![" Juicy dumplings ".to_string()]
        );
    }

    #[test]
    fn test_chunks_without_maps_are_skipped() {
        let resp = response(json!({
            "candidates": [{
                "groundingMetadata": { "groundingChunks": [
                    { "web": { "uri": "https://blog.example" } },
                    { "maps": { "uri": "https://maps.google.com/?cid=7" } },
                    { "maps": { "title": "No Link" } }
                ]}
            }]
        }));

        let outcome = map_response_at(&resp, &query(), 1000);
        assert_eq!(outcome.restaurants.len(), 2);
        assert_eq!(outcome.restaurants[0].id, "res-1-1000");
        assert_eq!(outcome.restaurants[0].name, "Unknown restaurant");
        assert_eq!(outcome.restaurants[1].map_url, "#");
        let uris: Vec<&str> = outcome.sources.iter().map(|s| s.uri.as_str()).collect();
        assert_eq!(uris, vec!["https://maps.google.com/?cid=7", "#"]);
    }

    #[test]
    fn test_sources_keep_first_appearance_order() {
        let resp = response(json!({
            "candidates": [{
                "groundingMetadata": { "groundingChunks": [
                    { "maps": { "title": "B", "uri": "b" } },
                    { "maps": { "title": "A", "uri": "a" } },
                    { "maps": { "title": "B again", "uri": "b" } }
                ]}
            }]
        }));
        let outcome = map_response(&resp, &query());
        let titles: Vec<&str> = outcome.sources.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["B", "A"]);
    }

    #[test]
    fn test_review_snippets_flattened() {
        let resp = response(json!({
            "candidates": [{
                "groundingMetadata": { "groundingChunks": [
                    { "maps": {
                        "title": "Raohe Night Market",
                        "uri": "https://maps.google.com/?cid=3",
                        "placeAnswerSources": [
                            { "reviewSnippets": ["Pepper buns are a must", "", null] },
                            {},
                            { "reviewSnippets": [{ "title": "Crowded but worth it" }] }
                        ]
                    } }
                ]}
            }]
        }));

        let outcome = map_response(&resp, &query());
        assert_eq!(
            outcome.restaurants[0].review_snippets,
            vec!["Pepper buns are a must".to_string(), "Crowded but worth it".to_string()]
        );
    }

    #[test]
    fn test_match_reason_mentions_query() {
        let resp = response(json!({
            "candidates": [{ "groundingMetadata": { "groundingChunks": [
                { "maps": { "title": "X", "uri": "x" } }
            ]}}]
        }));
        let card = &map_response(&resp, &query()).restaurants[0];
        assert!(card.match_reason.contains("Taipei"));
        assert!(card.match_reason.contains("Authentic Asian"));
        assert!(card.review_snippets.is_empty());
    }

    #[test]
    fn test_mapping_is_stable_apart_from_ids() {
        let resp = response(json!({
            "candidates": [{
                "content": { "parts": [{ "text": "Enjoy." }] },
                "groundingMetadata": { "groundingChunks": [
                    { "maps": { "title": "X", "uri": "x" } },
                    { "maps": { "title": "Y", "uri": "y" } }
                ]}
            }]
        }));

        let first = map_response_at(&resp, &query(), 1);
        let second = map_response_at(&resp, &query(), 2);
        assert_ne!(first, second);

        let strip = |mut outcome: SearchOutcome| {
            for card in &mut outcome.restaurants {
                card.id.clear();
            }
            outcome
        };
        assert_eq!(strip(first), strip(second));
    }
}
