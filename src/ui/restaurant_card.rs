//! Restaurant card widget

use iced::widget::{button, column, container, row, text, Column, Space};
use iced::{Alignment, Background, Border, Element, Length, Padding};

use super::theme::{self, LightTheme};
use crate::search::RestaurantCard;

/// Snippets shown per card; the record may hold more
pub const MAX_SNIPPETS: usize = 2;

const CATEGORY: &str = "Local food & restaurants";

/// Render one card; `on_open` receives the card's map URL
pub fn view<'a, Message: Clone + 'a>(
    card: &'a RestaurantCard,
    on_open: impl Fn(String) -> Message + 'a,
) -> Element<'a, Message> {
    let verified = container(text("✓ Maps verified").size(11))
        .padding(Padding::from([4.0, 10.0]))
        .style(theme::badge);

    let snippets = card
        .review_snippets
        .iter()
        .take(MAX_SNIPPETS)
        .fold(Column::new().spacing(6), |col, snippet| {
            col.push(
                container(text(format!("“{}”", snippet)).size(12).color(LightTheme::TEXT_MUTED))
                    .padding(8)
                    .width(Length::Fill)
                    .style(|_theme| container::Style {
                        background: Some(Background::Color(LightTheme::SURFACE_MUTED)),
                        border: Border::default().rounded(8.0),
                        ..Default::default()
                    }),
            )
        });

    let open = button(
        text("View on Google Maps  ↗")
            .size(14)
            .width(Length::Fill)
            .center(),
    )
    .on_press(on_open(card.map_url.clone()))
    .padding(12)
    .width(Length::Fill)
    .style(theme::primary_button);

    let body = column![
        row![
            text(&card.name).size(18).color(LightTheme::TEXT).width(Length::Fill),
            verified,
        ]
        .spacing(8)
        .align_y(Alignment::Center),
        text(CATEGORY).size(12).color(LightTheme::PRIMARY),
        text(format!("\"{}\"", card.match_reason))
            .size(13)
            .color(LightTheme::TEXT_MUTED),
        text(&card.description).size(12).color(LightTheme::TEXT_PLACEHOLDER),
        snippets,
        Space::with_height(4),
        open,
    ]
    .spacing(10);

    container(body)
        .padding(20)
        .width(Length::FillPortion(1))
        .height(Length::Shrink)
        .style(theme::card)
        .into()
}
