//! Query composition: user input to a maps-grounded generation request

use std::fmt;

use crate::backend::types::{
    Content, GenerateContentRequest, GoogleMaps, LatLng, RetrievalConfig, Tool, ToolConfig,
};
use crate::geo::{parse_coordinates, Coordinates};

const SYSTEM_INSTRUCTION: &str = "You are an expert on world cuisine and food culture. Your job is to help the user find the perfect real-world restaurant.

Core rules:
1. You MUST use the Google Maps tool, and only the Google Maps tool, to find restaurants that actually exist.
2. Never invent restaurant names or addresses.
3. Strictly respect the user's preference (for example non-Western, Asian cuisine, healthy food). Use your culinary knowledge to judge whether a venue fits that category.
4. Every recommended restaurant must be rated above the user's minimum rating.
5. In your text answer, briefly describe each restaurant's specialties and atmosphere and why it fits the user's request.
6. Every recommendation must come with a matching link in the Google Maps grounding metadata.";

/// Minimum star rating the user can pick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MinRating {
    Three,
    ThreeAndHalf,
    #[default]
    Four,
    FourAndHalf,
}

impl MinRating {
    pub const ALL: [MinRating; 4] = [
        MinRating::Three,
        MinRating::ThreeAndHalf,
        MinRating::Four,
        MinRating::FourAndHalf,
    ];

    pub fn value(self) -> f32 {
        match self {
            MinRating::Three => 3.0,
            MinRating::ThreeAndHalf => 3.5,
            MinRating::Four => 4.0,
            MinRating::FourAndHalf => 4.5,
        }
    }

    pub fn from_value(value: f32) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.value() == value)
    }
}

impl fmt::Display for MinRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

/// One submitted search
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    pub location: String,
    pub preference: String,
    pub min_rating: MinRating,
    pub coordinates: Option<Coordinates>,
}

impl SearchQuery {
    /// Build a query, picking up coordinates when the location is a decimal pair
    pub fn new(location: impl Into<String>, preference: impl Into<String>, min_rating: MinRating) -> Self {
        let location = location.into();
        let coordinates = parse_coordinates(&location);
        Self {
            location,
            preference: preference.into(),
            min_rating,
            coordinates,
        }
    }

    fn prompt(&self) -> String {
        format!(
            "Please find restaurants in \"{}\" that match \"{}\" and are rated at least {} stars. Use the Google Maps tool to make your recommendations.",
            self.location, self.preference, self.min_rating
        )
    }

    /// The request sent to the provider for this query
    pub fn compose(&self, model: &str) -> GenerateContentRequest {
        let tool_config = self.coordinates.map(|c| ToolConfig {
            retrieval_config: RetrievalConfig {
                lat_lng: LatLng {
                    latitude: c.latitude,
                    longitude: c.longitude,
                },
            },
        });

        GenerateContentRequest {
            model: model.to_string(),
            contents: vec![Content::user(self.prompt())],
            system_instruction: Content::system(SYSTEM_INSTRUCTION),
            tools: vec![Tool { google_maps: GoogleMaps {} }],
            tool_config,
        }
    }
}
