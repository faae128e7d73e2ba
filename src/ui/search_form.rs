//! Search form: uncommitted input state and its view
//!
//! The form owns what the user is typing. It only hands a query to the app
//! once both text fields are filled in and no search is running.

use iced::widget::{button, column, container, row, text, text_input, Space, Text};
use iced::{Alignment, Element, Length, Padding};

use super::theme::{self, LightTheme};
use crate::geo::Coordinates;
use crate::search::{MinRating, SearchQuery};

/// One-click preference shortcuts
pub const PREFERENCE_TAGS: [&str; 5] = [
    "Non-Western",
    "Quiet Work Spot",
    "Cheap Eats",
    "Romantic Dinner",
    "Authentic Asian",
];

const LOCATION_FAILED_ALERT: &str = "Could not detect location. Please type it manually.";

#[derive(Debug, Clone, Default)]
pub struct SearchForm {
    location: String,
    preference: String,
    min_rating: MinRating,
    using_detected_location: bool,
    locating: bool,
    alert: Option<String>,
}

#[derive(Debug, Clone)]
pub enum FormMessage {
    LocationChanged(String),
    PreferenceChanged(String),
    RatingSelected(MinRating),
    TagSelected(&'static str),
    DetectLocation,
    LocationDetected(Result<Coordinates, String>),
    DismissAlert,
    Submit,
}

/// What the app must do in response to a form message
#[derive(Debug, Clone, PartialEq)]
pub enum FormAction {
    Search(SearchQuery),
    DetectLocation,
}

impl SearchForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn preference(&self) -> &str {
        &self.preference
    }

    pub fn using_detected_location(&self) -> bool {
        self.using_detected_location
    }

    /// Blocking notice the user must dismiss, if any
    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    fn can_submit(&self, is_loading: bool) -> bool {
        !is_loading && !self.location.trim().is_empty() && !self.preference.trim().is_empty()
    }

    pub fn update(&mut self, message: FormMessage, is_loading: bool) -> Option<FormAction> {
        if self.alert.is_some() && !matches!(message, FormMessage::DismissAlert) {
            return None;
        }

        match message {
            FormMessage::LocationChanged(location) => {
                self.location = location;
                self.using_detected_location = false;
                None
            }
            FormMessage::PreferenceChanged(preference) => {
                self.preference = preference;
                None
            }
            FormMessage::RatingSelected(rating) => {
                self.min_rating = rating;
                None
            }
            FormMessage::TagSelected(tag) => {
                self.preference = tag.to_string();
                None
            }
            FormMessage::DetectLocation => {
                if self.locating {
                    return None;
                }
                self.locating = true;
                Some(FormAction::DetectLocation)
            }
            FormMessage::LocationDetected(Ok(coords)) => {
                self.locating = false;
                self.location = coords.format();
                self.using_detected_location = true;
                None
            }
            FormMessage::LocationDetected(Err(e)) => {
                tracing::error!("Location error: {}", e);
                self.locating = false;
                self.alert = Some(LOCATION_FAILED_ALERT.to_string());
                None
            }
            FormMessage::DismissAlert => {
                self.alert = None;
                None
            }
            FormMessage::Submit => {
                if !self.can_submit(is_loading) {
                    return None;
                }
                Some(FormAction::Search(SearchQuery::new(
                    self.location.trim(),
                    self.preference.trim(),
                    self.min_rating,
                )))
            }
        }
    }

    pub fn view(&self, is_loading: bool) -> Element<'_, FormMessage> {
        let locate_label = if self.locating {
            "…"
        } else if self.using_detected_location() {
            "◉"
        } else {
            "⌖"
        };
        let locate = button(text(locate_label).size(16))
            .on_press_maybe((!self.locating).then_some(FormMessage::DetectLocation))
            .padding(Padding::from([10.0, 12.0]))
            .style(theme::choice_button(self.using_detected_location()));

        let location = column![
            field_label("Where are you?"),
            row![
                text_input("City or Neighborhood", self.location())
                    .on_input(FormMessage::LocationChanged)
                    .on_submit(FormMessage::Submit)
                    .padding(12)
                    .style(theme::input),
                locate,
            ]
            .spacing(8)
            .align_y(Alignment::Center),
        ]
        .spacing(8)
        .width(Length::FillPortion(1));

        let preference = column![
            field_label("What are you craving?"),
            text_input("e.g., Non-western food", self.preference())
                .on_input(FormMessage::PreferenceChanged)
                .on_submit(FormMessage::Submit)
                .padding(12)
                .style(theme::input),
        ]
        .spacing(8)
        .width(Length::FillPortion(1));

        let ratings = MinRating::ALL.iter().fold(row![].spacing(6), |r, rating| {
            r.push(
                button(text(format!("{}+ ★", rating)).size(13).center())
                    .on_press(FormMessage::RatingSelected(*rating))
                    .padding(Padding::from([11.0, 4.0]))
                    .width(Length::Fill)
                    .style(theme::choice_button(*rating == self.min_rating)),
            )
        });
        let rating = column![field_label("Min Rating"), ratings]
            .spacing(8)
            .width(Length::FillPortion(1));

        let submit_label = if is_loading {
            "Analyzing Vibes..."
        } else {
            "Find High-Rated Spots"
        };
        let submit = button(text(submit_label).size(16).width(Length::Fill).center())
            .on_press_maybe(self.can_submit(is_loading).then_some(FormMessage::Submit))
            .padding(16)
            .width(Length::Fill)
            .style(theme::primary_button);

        let tags = PREFERENCE_TAGS.into_iter().fold(row![].spacing(8), |r, tag| {
            r.push(
                button(text(tag).size(12))
                    .on_press(FormMessage::TagSelected(tag))
                    .padding(Padding::from([6.0, 12.0]))
                    .style(theme::chip_button),
            )
        });

        container(
            column![
                row![location, preference, rating].spacing(24),
                Space::with_height(8),
                submit,
                tags,
            ]
            .spacing(16),
        )
        .padding(28)
        .width(Length::Fill)
        .style(theme::card)
        .into()
    }
}

fn field_label(label: &str) -> Text<'_> {
    text(label).size(13).color(LightTheme::TEXT)
}
