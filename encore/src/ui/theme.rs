//! Theme management for the Encore UI. A persisted [`ThemePreference`]
//! selects between two Catppuccin palettes, and the helpers below derive
//! widget styles from whichever palette is active.

use iced::theme::Theme;
use serde::{Deserialize, Serialize};

/// User-selectable color scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ThemePreference {
    Light,
    Dark,
}

impl Default for ThemePreference {
    fn default() -> Self {
        ThemePreference::Light
    }
}

impl ThemePreference {
    /// Convert preference to an iced theme.
    pub fn to_iced_theme(self) -> Theme {
        match self {
            ThemePreference::Light => Theme::CatppuccinLatte,
            ThemePreference::Dark => Theme::CatppuccinMocha,
        }
    }

    /// Toggle between light and dark.
    pub fn toggle(self) -> Self {
        match self {
            ThemePreference::Light => ThemePreference::Dark,
            ThemePreference::Dark => ThemePreference::Light,
        }
    }

    /// Get display name for the preference.
    pub fn name(&self) -> &str {
        match self {
            ThemePreference::Light => "Light",
            ThemePreference::Dark => "Dark",
        }
    }
}

/// Style helpers that derive widget styles from the active theme palette.
pub mod styles {
    use iced::widget::{button, container};
    use iced::{Background, Border, Theme};

    /// Thin separator line between sections.
    pub fn divider(theme: &Theme) -> container::Style {
        let palette = theme.extended_palette();
        container::Style {
            background: Some(Background::Color(palette.background.strong.color)),
            ..Default::default()
        }
    }

    /// Header strip at the top of a screen.
    pub fn panel_header(theme: &Theme) -> container::Style {
        let palette = theme.extended_palette();
        container::Style {
            background: Some(Background::Color(palette.background.weak.color)),
            ..Default::default()
        }
    }

    /// Bordered card used for list entries and dialogs.
    pub fn card(theme: &Theme) -> container::Style {
        let palette = theme.extended_palette();
        container::Style {
            background: Some(Background::Color(palette.background.weak.color)),
            border: Border {
                color: palette.background.strong.color,
                width: 1.0,
                radius: 8.0.into(),
            },
            ..Default::default()
        }
    }

    /// Dimming layer behind modal dialogs.
    pub fn modal_overlay(theme: &Theme) -> container::Style {
        let palette = theme.extended_palette();
        let mut color = palette.background.base.color;
        color.a = 0.85;
        container::Style {
            background: Some(Background::Color(color)),
            ..Default::default()
        }
    }

    /// Placeholder box standing in for album art.
    pub fn thumbnail(theme: &Theme) -> container::Style {
        let palette = theme.extended_palette();
        container::Style {
            background: Some(Background::Color(palette.background.strong.color)),
            border: Border {
                color: palette.background.strong.color,
                width: 1.0,
                radius: 6.0.into(),
            },
            ..Default::default()
        }
    }

    /// Small round indicator for peers that are online.
    pub fn online_dot(theme: &Theme) -> container::Style {
        let palette = theme.extended_palette();
        container::Style {
            background: Some(Background::Color(palette.success.base.color)),
            border: Border {
                radius: 5.0.into(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    /// Bubble for messages from the other side.
    pub fn message_incoming(theme: &Theme) -> container::Style {
        let palette = theme.extended_palette();
        container::Style {
            background: Some(Background::Color(palette.background.strong.color)),
            border: Border {
                radius: 12.0.into(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    /// Bubble for messages the user sent.
    pub fn message_outgoing(theme: &Theme) -> container::Style {
        let palette = theme.extended_palette();
        container::Style {
            background: Some(Background::Color(palette.primary.base.color)),
            text_color: Some(palette.primary.base.text),
            border: Border {
                radius: 12.0.into(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    /// Danger button style for destructive actions.
    pub fn button_danger(theme: &Theme, status: button::Status) -> button::Style {
        let palette = theme.extended_palette();
        let background = match status {
            button::Status::Active | button::Status::Pressed => palette.danger.base.color,
            button::Status::Hovered => palette.danger.strong.color,
            button::Status::Disabled => {
                let mut color = palette.danger.base.color;
                color.a = 0.5;
                color
            }
        };
        button::Style {
            background: Some(Background::Color(background)),
            text_color: palette.danger.base.text,
            border: Border {
                radius: 6.0.into(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    /// Flat button that only shows its icon.
    pub fn button_icon(theme: &Theme, status: button::Status) -> button::Style {
        let palette = theme.extended_palette();
        let background = match status {
            button::Status::Hovered => Some(Background::Color(palette.background.weak.color)),
            _ => None,
        };
        button::Style {
            background,
            text_color: palette.background.base.text,
            border: Border {
                radius: 6.0.into(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    /// Outlined pill for selectable options.
    pub fn button_chip(theme: &Theme, status: button::Status) -> button::Style {
        let palette = theme.extended_palette();
        let background = match status {
            button::Status::Hovered => palette.background.strong.color,
            _ => palette.background.weak.color,
        };
        button::Style {
            background: Some(Background::Color(background)),
            text_color: palette.background.base.text,
            border: Border {
                color: palette.background.strong.color,
                width: 1.0,
                radius: 16.0.into(),
            },
            ..Default::default()
        }
    }

    /// Filled pill for options that are currently selected.
    pub fn button_chip_selected(theme: &Theme, status: button::Status) -> button::Style {
        let palette = theme.extended_palette();
        let background = match status {
            button::Status::Hovered => palette.primary.strong.color,
            _ => palette.primary.base.color,
        };
        button::Style {
            background: Some(Background::Color(background)),
            text_color: palette.primary.base.text,
            border: Border {
                color: palette.primary.strong.color,
                width: 1.0,
                radius: 16.0.into(),
            },
            ..Default::default()
        }
    }
}

/// Color helpers for text and icons.
pub mod colors {
    use iced::{Color, Theme};

    pub fn text_primary(theme: &Theme) -> Color {
        theme.extended_palette().background.base.text
    }

    pub fn text_secondary(theme: &Theme) -> Color {
        let mut color = theme.extended_palette().background.base.text;
        color.a = 0.7;
        color
    }

    pub fn text_muted(theme: &Theme) -> Color {
        let mut color = theme.extended_palette().background.base.text;
        color.a = 0.5;
        color
    }

    pub fn text_error(theme: &Theme) -> Color {
        theme.extended_palette().danger.strong.color
    }

    pub fn text_success(theme: &Theme) -> Color {
        theme.extended_palette().success.strong.color
    }

    pub fn primary(theme: &Theme) -> Color {
        theme.extended_palette().primary.strong.color
    }

    /// Readable foreground for content sitting on the primary color.
    pub fn text_on_primary(theme: &Theme) -> Color {
        theme.extended_palette().primary.base.text
    }
}
