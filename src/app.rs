//! Core application state and Iced application implementation
//!
//! The window shows the search form, the AI commentary with its map sources
//! and a grid of restaurant cards. Search state lives in one `SearchState`
//! snapshot that is replaced on every transition.

use iced::widget::{
    button, center, column, container, mouse_area, opaque, row, scrollable, stack, text, Row, Space,
};
use iced::keyboard::Key;
use iced::{keyboard, Alignment, Background, Color, Element, Event, Length, Padding, Subscription, Task, Theme};

use crate::backend::api::GeminiClient;
use crate::config::Config;
use crate::geo::{Coordinates, Geolocator};
use crate::error::SearchError;
use crate::search::{search_restaurants, RestaurantCard, SearchOutcome, SearchQuery, Source};
use crate::state::{RequestId, SearchState, Transition};
use crate::ui::search_form::{FormAction, FormMessage, SearchForm};
use crate::ui::theme::{self, LightTheme};
use crate::ui::{header, restaurant_card};

/// Cards and sources per grid row
const GRID_COLUMNS: usize = 3;

// ============================================================================
// Application State
// ============================================================================

pub struct DineWise {
    form: SearchForm,
    state: SearchState,
    client: GeminiClient,
    geolocator: Geolocator,
    model: String,
}

#[derive(Debug, Clone)]
pub enum Message {
    Form(FormMessage),
    SearchFinished(RequestId, Result<SearchOutcome, SearchError>),
    LocationDetected(Result<Coordinates, String>),
    OpenLink(String),
    IcedEvent(Event),
}

impl DineWise {
    pub fn new(config: Config) -> (Self, Task<Message>) {
        let app = Self {
            form: SearchForm::new(),
            state: SearchState::default(),
            client: GeminiClient::from_config(&config),
            geolocator: Geolocator::new(&config.geolocation_url),
            model: config.model,
        };
        (app, Task::none())
    }

    pub fn title(&self) -> String {
        String::from("DineWise AI")
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Form(form_message) => {
                match self.form.update(form_message, self.state.is_loading) {
                    Some(FormAction::Search(query)) => self.start_search(query),
                    Some(FormAction::DetectLocation) => {
                        let geolocator = self.geolocator.clone();
                        Task::perform(
                            async move { geolocator.current_position().await },
                            |result| Message::LocationDetected(result.map_err(|e| e.to_string())),
                        )
                    }
                    None => Task::none(),
                }
            }

            Message::SearchFinished(id, result) => {
                let transition = match result {
                    Ok(outcome) => Transition::Succeeded(id, outcome),
                    Err(e) => Transition::Failed(id, e.to_string()),
                };
                self.state = self.state.apply(transition);
                Task::none()
            }

            Message::LocationDetected(result) => {
                self.form
                    .update(FormMessage::LocationDetected(result), self.state.is_loading);
                Task::none()
            }

            Message::OpenLink(url) => {
                open_link(&url);
                Task::none()
            }

            Message::IcedEvent(event) => {
                if let Event::Keyboard(keyboard::Event::KeyPressed {
                    key: Key::Named(keyboard::key::Named::Escape),
                    ..
                }) = event
                {
                    return self.update(Message::Form(FormMessage::DismissAlert));
                }
                Task::none()
            }
        }
    }

    fn start_search(&mut self, query: SearchQuery) -> Task<Message> {
        self.state = self.state.apply(Transition::Started);
        let id = self.state.latest_request;
        let client = self.client.clone();
        let model = self.model.clone();

        Task::perform(
            async move { search_restaurants(&client, &model, &query).await },
            move |result| Message::SearchFinished(id, result),
        )
    }

    pub fn view(&self) -> Element<'_, Message> {
        let hero = column![
            row![
                text("Find Your Next ").size(44).color(LightTheme::TEXT),
                text("Flavor").size(44).color(LightTheme::PRIMARY),
            ],
            text("DineWise uses Gemini's live map data to find, filter and verify the best-rated places near you.")
                .size(16)
                .color(LightTheme::TEXT_MUTED),
        ]
        .spacing(8)
        .align_x(Alignment::Center);

        let mut body = column![
            container(hero).center_x(Length::Fill),
            self.form.view(self.state.is_loading).map(Message::Form),
        ]
        .spacing(32)
        .padding(Padding::from([40.0, 48.0]))
        .max_width(1200.0);

        if let Some(error) = &self.state.error {
            body = body.push(self.view_error(error));
        }
        if !self.state.ai_response.is_empty() {
            body = body.push(self.view_ai_response());
        }
        if !self.state.results.is_empty() {
            body = body.push(self.view_results());
        }
        if self.state.is_idle() {
            body = body.push(view_empty_hint());
        }

        let page = container(column![
            header::view(),
            scrollable(container(body).center_x(Length::Fill)).height(Length::Fill),
        ])
        .width(Length::Fill)
        .height(Length::Fill)
        .style(theme::page);

        match self.form.alert() {
            Some(alert) => stack![page, view_alert(alert)].into(),
            None => page.into(),
        }
    }

    fn view_error<'a>(&self, error: &'a str) -> Element<'a, Message> {
        container(
            row![
                text("⚠").size(24),
                column![text("Oops! Search failed").size(15), text(error).size(13)].spacing(4),
            ]
            .spacing(16)
            .align_y(Alignment::Center),
        )
        .padding(24)
        .width(Length::Fill)
        .style(theme::error_banner)
        .into()
    }

    fn view_ai_response(&self) -> Element<'_, Message> {
        let mut section = column![
            text("AI expert analysis").size(20).color(LightTheme::TEXT),
            text(&self.state.ai_response).size(17).color(LightTheme::TEXT),
        ]
        .spacing(24);

        if !self.state.grounding_sources.is_empty() {
            section = section.push(column![
                text("MAP SOURCE VERIFICATION").size(12).color(LightTheme::TEXT_MUTED),
                grid(&self.state.grounding_sources, view_source),
            ]
            .spacing(16));
        }

        container(section)
            .padding(40)
            .width(Length::Fill)
            .style(theme::card)
            .into()
    }

    fn view_results(&self) -> Element<'_, Message> {
        let count = container(text(format!("{} results", self.state.results.len())).size(12))
            .padding(Padding::from([6.0, 14.0]))
            .style(theme::badge);

        column![
            row![
                text("Restaurants that match").size(24).color(LightTheme::TEXT),
                Space::with_width(Length::Fill),
                count,
            ]
            .align_y(Alignment::Center),
            grid(&self.state.results, view_card),
        ]
        .spacing(24)
        .into()
    }

    pub fn subscription(&self) -> Subscription<Message> {
        iced::event::listen().map(Message::IcedEvent)
    }

    pub fn theme(&self) -> Theme {
        Theme::Light
    }
}

// ============================================================================
// View helpers
// ============================================================================

fn view_card(card: &RestaurantCard) -> Element<'_, Message> {
    restaurant_card::view(card, Message::OpenLink)
}

fn view_source(source: &Source) -> Element<'_, Message> {
    button(
        row![
            text("G").size(14).color(LightTheme::PRIMARY),
            text(&source.title).size(13).width(Length::Fill),
            text("›").size(14),
        ]
        .spacing(10)
        .align_y(Alignment::Center),
    )
    .on_press(Message::OpenLink(source.uri.clone()))
    .padding(Padding::from([12.0, 16.0]))
    .width(Length::FillPortion(1))
    .style(theme::chip_button)
    .into()
}

/// Lay items out in rows of `GRID_COLUMNS`, padding the last row
fn grid<'a, T>(items: &'a [T], render: fn(&'a T) -> Element<'a, Message>) -> Element<'a, Message> {
    let rows = items.chunks(GRID_COLUMNS).map(|chunk| -> Element<'a, Message> {
        let mut cells: Vec<Element<'a, Message>> = chunk.iter().map(render).collect();
        while cells.len() < GRID_COLUMNS {
            cells.push(Space::with_width(Length::FillPortion(1)).into());
        }
        Row::with_children(cells).spacing(24).into()
    });
    iced::widget::Column::with_children(rows).spacing(24).into()
}

fn view_empty_hint<'a>() -> Element<'a, Message> {
    column![
        text("🍽").size(48),
        text("Ready to start your food adventure?").size(18).color(LightTheme::TEXT_MUTED),
        text("Enter a place and what you feel like eating; the AI expert handles the rest.")
            .size(13)
            .color(LightTheme::TEXT_PLACEHOLDER),
    ]
    .spacing(8)
    .width(Length::Fill)
    .align_x(Alignment::Center)
    .into()
}

fn view_alert(alert: &str) -> Element<'_, Message> {
    let dialog = container(
        column![
            text(alert).size(15).color(LightTheme::TEXT),
            button(text("OK").size(14))
                .on_press(Message::Form(FormMessage::DismissAlert))
                .padding(Padding::from([8.0, 24.0]))
                .style(theme::primary_button),
        ]
        .spacing(16)
        .align_x(Alignment::End),
    )
    .padding(24)
    .max_width(420.0)
    .style(theme::card);

    opaque(
        mouse_area(center(opaque(dialog)).style(|_theme| container::Style {
            background: Some(Background::Color(Color { a: 0.4, ..Color::BLACK })),
            ..Default::default()
        }))
        .on_press(Message::Form(FormMessage::DismissAlert)),
    )
}

/// Hand a map URL to the OS default handler
fn open_link(url: &str) {
    if url.is_empty() || url == "#" {
        tracing::debug!("Ignoring link without a target");
        return;
    }
    match open::that(url) {
        Ok(()) => tracing::info!("Opened {}", url),
        Err(e) => tracing::warn!("Could not open {}: {}", url, e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SEARCH_FAILED_MESSAGE;
    use crate::search::MinRating;

    fn app() -> DineWise {
        let mut config = Config::default();
        config.api_key = Some("test-key".into());
        DineWise::new(config).0
    }

    fn type_query(app: &mut DineWise, location: &str, preference: &str) {
        let _ = app.update(Message::Form(FormMessage::LocationChanged(location.into())));
        let _ = app.update(Message::Form(FormMessage::PreferenceChanged(preference.into())));
    }

    #[test]
    fn test_submit_starts_loading() {
        let mut app = app();
        type_query(&mut app, "Taipei", "Cheap Eats");
        let _ = app.update(Message::Form(FormMessage::Submit));

        assert!(app.state.is_loading);
        assert_eq!(app.state.latest_request, 1);
    }

    #[test]
    fn test_empty_form_does_not_start() {
        let mut app = app();
        type_query(&mut app, "Taipei", "");
        let _ = app.update(Message::Form(FormMessage::Submit));

        assert!(!app.state.is_loading);
        assert_eq!(app.state.latest_request, 0);
    }

    #[test]
    fn test_failure_state() {
        let mut app = app();
        type_query(&mut app, "Taipei", "Cheap Eats");
        let _ = app.update(Message::Form(FormMessage::Submit));
        let _ = app.update(Message::SearchFinished(1, Err(SearchError::SearchFailed)));

        assert!(!app.state.is_loading);
        assert_eq!(app.state.error.as_deref(), Some(SEARCH_FAILED_MESSAGE));
        assert!(app.state.results.is_empty());
        assert!(app.state.ai_response.is_empty());
        assert!(app.state.grounding_sources.is_empty());
    }

    #[test]
    fn test_stale_result_ignored() {
        let mut app = app();
        let _ = app.start_search(SearchQuery::new("Taipei", "tea", MinRating::Four));
        let _ = app.start_search(SearchQuery::new("Tainan", "tea", MinRating::Four));

        let late = SearchOutcome {
            text: "old".into(),
            ..SearchOutcome::default()
        };
        let _ = app.update(Message::SearchFinished(1, Ok(late)));
        assert!(app.state.is_loading);
        assert!(app.state.ai_response.is_empty());
    }
}
