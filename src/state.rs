//! Search state snapshots and their transitions
//!
//! A `SearchState` is never mutated field by field: every transition builds
//! the next snapshot whole. Each search start is tagged with a fresh request
//! id, and a completion only applies when it carries the latest id.

use crate::search::{RestaurantCard, SearchOutcome, Source};

pub type RequestId = u64;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchState {
    pub is_loading: bool,
    pub error: Option<String>,
    pub results: Vec<RestaurantCard>,
    pub ai_response: String,
    pub grounding_sources: Vec<Source>,
    /// Id of the most recently issued request
    pub latest_request: RequestId,
}

#[derive(Debug, Clone)]
pub enum Transition {
    Started,
    Succeeded(RequestId, SearchOutcome),
    Failed(RequestId, String),
}

impl SearchState {
    /// Apply a transition, returning the next snapshot
    pub fn apply(&self, transition: Transition) -> SearchState {
        match transition {
            Transition::Started => SearchState {
                is_loading: true,
                latest_request: self.latest_request + 1,
                ..SearchState::default()
            },
            Transition::Succeeded(id, outcome) if id == self.latest_request => SearchState {
                is_loading: false,
                error: None,
                results: outcome.restaurants,
                ai_response: outcome.text,
                grounding_sources: outcome.sources,
                latest_request: id,
            },
            Transition::Failed(id, message) if id == self.latest_request => SearchState {
                error: Some(message),
                latest_request: id,
                ..SearchState::default()
            },
            Transition::Succeeded(id, _) | Transition::Failed(id, _) => {
                tracing::debug!(
                    stale = id,
                    latest = self.latest_request,
                    "Ignoring completion of superseded search"
                );
                self.clone()
            }
        }
    }

    /// Nothing searched yet, or the last search was cleared
    pub fn is_idle(&self) -> bool {
        !self.is_loading && self.ai_response.is_empty() && self.error.is_none()
    }
}
