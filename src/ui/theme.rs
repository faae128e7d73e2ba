//! Theme configuration

use iced::widget::{button, container, text_input};
use iced::{Background, Border, Color, Shadow, Theme, Vector};

/// Light theme colors, emerald accent
pub struct LightTheme;

impl LightTheme {
    pub const BACKGROUND: Color = Color::from_rgb(0.976, 0.980, 0.984);
    pub const SURFACE: Color = Color::WHITE;
    pub const SURFACE_MUTED: Color = Color::from_rgb(0.953, 0.957, 0.965);
    pub const BORDER: Color = Color::from_rgb(0.898, 0.906, 0.922);
    pub const PRIMARY: Color = Color::from_rgb(0.020, 0.588, 0.412);
    pub const PRIMARY_SOFT: Color = Color::from_rgb(0.925, 0.992, 0.961);
    pub const TEXT: Color = Color::from_rgb(0.067, 0.094, 0.153);
    pub const TEXT_MUTED: Color = Color::from_rgb(0.420, 0.447, 0.502);
    pub const TEXT_PLACEHOLDER: Color = Color::from_rgb(0.612, 0.639, 0.686);
    pub const DISABLED: Color = Color::from_rgb(0.820, 0.835, 0.859);
    pub const ERROR: Color = Color::from_rgb(0.600, 0.106, 0.106);
    pub const ERROR_SOFT: Color = Color::from_rgb(0.996, 0.949, 0.949);
}

pub fn card(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(LightTheme::SURFACE)),
        border: Border {
            color: LightTheme::BORDER,
            width: 1.0,
            radius: 16.0.into(),
        },
        shadow: Shadow {
            color: Color { a: 0.06, ..Color::BLACK },
            offset: Vector::new(0.0, 4.0),
            blur_radius: 16.0,
        },
        ..Default::default()
    }
}

pub fn page(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(LightTheme::BACKGROUND)),
        ..Default::default()
    }
}

pub fn error_banner(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(LightTheme::ERROR_SOFT)),
        text_color: Some(LightTheme::ERROR),
        border: Border {
            color: Color { a: 0.2, ..LightTheme::ERROR },
            width: 1.0,
            radius: 16.0.into(),
        },
        ..Default::default()
    }
}

pub fn badge(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(LightTheme::PRIMARY_SOFT)),
        text_color: Some(LightTheme::PRIMARY),
        border: Border::default().rounded(999.0),
        ..Default::default()
    }
}

pub fn input(_theme: &Theme, status: text_input::Status) -> text_input::Style {
    let border_color = match status {
        text_input::Status::Focused => LightTheme::PRIMARY,
        _ => LightTheme::BORDER,
    };
    text_input::Style {
        background: Background::Color(LightTheme::SURFACE),
        border: Border {
            color: border_color,
            width: 1.0,
            radius: 12.0.into(),
        },
        icon: LightTheme::TEXT_MUTED,
        placeholder: LightTheme::TEXT_PLACEHOLDER,
        value: LightTheme::TEXT,
        selection: LightTheme::PRIMARY_SOFT,
    }
}

/// Filled emerald button; grey when disabled
pub fn primary_button(_theme: &Theme, status: button::Status) -> button::Style {
    let background = match status {
        button::Status::Disabled => LightTheme::DISABLED,
        button::Status::Hovered | button::Status::Pressed => Color { a: 0.9, ..LightTheme::PRIMARY },
        button::Status::Active => LightTheme::PRIMARY,
    };
    button::Style {
        background: Some(Background::Color(background)),
        text_color: Color::WHITE,
        border: Border::default().rounded(12.0),
        ..Default::default()
    }
}

/// Outlined choice button, filled when `selected`
pub fn choice_button(selected: bool) -> impl Fn(&Theme, button::Status) -> button::Style {
    move |_theme, status| {
        let hovered = matches!(status, button::Status::Hovered);
        let (background, text_color, border_color) = if selected {
            (LightTheme::PRIMARY, Color::WHITE, LightTheme::PRIMARY)
        } else if hovered {
            (LightTheme::PRIMARY_SOFT, LightTheme::PRIMARY, LightTheme::PRIMARY)
        } else {
            (LightTheme::SURFACE, LightTheme::TEXT_MUTED, LightTheme::BORDER)
        };
        button::Style {
            background: Some(Background::Color(background)),
            text_color,
            border: Border {
                color: border_color,
                width: 1.0,
                radius: 12.0.into(),
            },
            ..Default::default()
        }
    }
}

/// Quiet pill used for preference shortcuts and source links
pub fn chip_button(_theme: &Theme, status: button::Status) -> button::Style {
    let (background, text_color) = match status {
        button::Status::Hovered | button::Status::Pressed => (LightTheme::PRIMARY_SOFT, LightTheme::PRIMARY),
        _ => (LightTheme::SURFACE_MUTED, LightTheme::TEXT_MUTED),
    };
    button::Style {
        background: Some(Background::Color(background)),
        text_color,
        border: Border {
            color: LightTheme::BORDER,
            width: 1.0,
            radius: 999.0.into(),
        },
        ..Default::default()
    }
}
