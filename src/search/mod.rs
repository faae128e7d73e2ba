//! Restaurant search pipeline
//!
//! compose request -> provider call -> map response. Any provider failure
//! surfaces as `SearchError::SearchFailed`; nothing partial is returned.

pub mod mapper;
pub mod query;

use std::future::Future;

use crate::backend::api::GeminiClient;
use crate::backend::types::{GenerateContentRequest, GenerateContentResponse};
use crate::error::{ApiError, SearchError};

pub use mapper::{map_response, RestaurantCard, SearchOutcome, Source};
pub use query::{MinRating, SearchQuery};

/// Something that can answer a generation request
pub trait RecommendationProvider {
    fn generate_content(
        &self,
        request: &GenerateContentRequest,
    ) -> impl Future<Output = Result<GenerateContentResponse, ApiError>> + Send;
}

impl RecommendationProvider for GeminiClient {
    fn generate_content(
        &self,
        request: &GenerateContentRequest,
    ) -> impl Future<Output = Result<GenerateContentResponse, ApiError>> + Send {
        GeminiClient::generate_content(self, request)
    }
}

/// Run one search against the provider
pub async fn search_restaurants<P: RecommendationProvider>(
    provider: &P,
    model: &str,
    query: &SearchQuery,
) -> Result<SearchOutcome, SearchError> {
    tracing::info!(
        location = %query.location,
        preference = %query.preference,
        min_rating = %query.min_rating,
        biased = query.coordinates.is_some(),
        "Searching restaurants"
    );

    let request = query.compose(model);
    let response = provider.generate_content(&request).await.map_err(|e| {
        tracing::error!("Gemini API error: {}", e);
        SearchError::SearchFailed
    })?;

    let outcome = map_response(&response, query);
    tracing::info!(
        restaurants = outcome.restaurants.len(),
        sources = outcome.sources.len(),
        "Search complete"
    );
    Ok(outcome)
}
