//! Static branding bar

use iced::widget::{container, row, text, Space};
use iced::{Alignment, Background, Border, Element, Length, Padding};

use super::theme::LightTheme;

pub fn view<'a, Message: 'a>() -> Element<'a, Message> {
    let logo = container(text("◎").size(20).color(iced::Color::WHITE))
        .padding(Padding::from([6.0, 10.0]))
        .style(|_theme| container::Style {
            background: Some(Background::Color(LightTheme::PRIMARY)),
            border: Border::default().rounded(10.0),
            ..Default::default()
        });

    container(
        row![
            logo,
            text("DineWise AI").size(22).color(LightTheme::TEXT),
            Space::with_width(Length::Fill),
            text("Maps-grounded picks").size(13).color(LightTheme::TEXT_MUTED),
        ]
        .spacing(12)
        .align_y(Alignment::Center),
    )
    .padding(Padding::from([14.0, 24.0]))
    .width(Length::Fill)
    .style(|_theme| container::Style {
        background: Some(Background::Color(LightTheme::SURFACE)),
        border: Border {
            color: LightTheme::BORDER,
            width: 1.0,
            radius: 0.0.into(),
        },
        ..Default::default()
    })
    .into()
}
