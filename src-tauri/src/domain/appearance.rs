//! Usage: Map appearance settings to concrete style values (fixed lookup tables, pure).
//!
//! The host resolves the style and pushes it to the presentation layer (`appearance:apply`);
//! `auto` is resolved against the OS color scheme passed in by the caller.

use crate::settings::defaults::{
    DEFAULT_ACCENT_COLOR, DEFAULT_FONT_FAMILY, DEFAULT_FONT_SIZE, DEFAULT_THEME,
    DEFAULT_TITLEBAR_BUTTON_STYLE,
};
use crate::settings::{keys, SettingsStore};
use serde::Serialize;

const MIN_FONT_SIZE: u32 = 10;
const MAX_FONT_SIZE: u32 = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeChoice {
    Light,
    Dark,
    Auto,
}

impl ThemeChoice {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            "auto" => Some(Self::Auto),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolvedTheme {
    Light,
    Dark,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Palette {
    pub background: &'static str,
    pub surface: &'static str,
    pub titlebar: &'static str,
    pub text: &'static str,
    pub text_muted: &'static str,
    pub border: &'static str,
}

const LIGHT_PALETTE: Palette = Palette {
    background: "#ffffff",
    surface: "#f3f3f3",
    titlebar: "#e9e9e9",
    text: "#1b1b1b",
    text_muted: "#5f5f5f",
    border: "#d4d4d4",
};

const DARK_PALETTE: Palette = Palette {
    background: "#1e1e1e",
    surface: "#252526",
    titlebar: "#2d2d30",
    text: "#e6e6e6",
    text_muted: "#9d9d9d",
    border: "#3c3c3c",
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonStyle {
    Windows,
    Macos,
    Minimal,
}

impl ButtonStyle {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "windows" => Some(Self::Windows),
            "macos" => Some(Self::Macos),
            "minimal" => Some(Self::Minimal),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ButtonShape {
    /// Side of the titlebar the buttons sit on.
    pub placement: &'static str,
    pub shape: &'static str,
    pub width_px: u32,
    pub height_px: u32,
    pub gap_px: u32,
}

fn button_shape(style: ButtonStyle) -> ButtonShape {
    match style {
        ButtonStyle::Windows => ButtonShape {
            placement: "right",
            shape: "rect",
            width_px: 46,
            height_px: 32,
            gap_px: 0,
        },
        ButtonStyle::Macos => ButtonShape {
            placement: "left",
            shape: "circle",
            width_px: 12,
            height_px: 12,
            gap_px: 8,
        },
        ButtonStyle::Minimal => ButtonShape {
            placement: "right",
            shape: "flat",
            width_px: 28,
            height_px: 28,
            gap_px: 4,
        },
    }
}

/// Raw appearance values as stored, before any validation.
#[derive(Debug, Clone, PartialEq)]
pub struct AppearanceInput {
    pub theme: String,
    pub font_family: String,
    pub font_size: Option<f64>,
    pub accent_color: String,
    pub titlebar_button_style: String,
}

impl AppearanceInput {
    pub fn from_store(store: &SettingsStore) -> Self {
        Self {
            theme: store.str_at(keys::THEME),
            font_family: store.str_at(keys::FONT_FAMILY),
            font_size: store.f64_at(keys::FONT_SIZE),
            accent_color: store.str_at(keys::ACCENT_COLOR),
            titlebar_button_style: store.str_at(keys::TITLEBAR_BUTTON_STYLE),
        }
    }

    pub fn theme_choice(&self) -> ThemeChoice {
        ThemeChoice::parse(&self.theme)
            .or_else(|| ThemeChoice::parse(DEFAULT_THEME))
            .unwrap_or(ThemeChoice::Dark)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppliedStyle {
    pub theme: ThemeChoice,
    pub resolved_theme: ResolvedTheme,
    pub palette: Palette,
    pub font_family: String,
    pub font_size_px: u32,
    pub accent_color: String,
    pub titlebar_button_style: ButtonStyle,
    pub titlebar_buttons: ButtonShape,
}

fn is_hex_color(value: &str) -> bool {
    let Some(digits) = value.strip_prefix('#') else {
        return false;
    };
    matches!(digits.len(), 3 | 6) && digits.chars().all(|c| c.is_ascii_hexdigit())
}

fn font_size_px(raw: Option<f64>) -> u32 {
    match raw {
        Some(size) if size.is_finite() && size > 0.0 => {
            (size.round() as u32).clamp(MIN_FONT_SIZE, MAX_FONT_SIZE)
        }
        _ => DEFAULT_FONT_SIZE,
    }
}

pub fn resolve_theme(choice: ThemeChoice, os_prefers_dark: bool) -> ResolvedTheme {
    match choice {
        ThemeChoice::Light => ResolvedTheme::Light,
        ThemeChoice::Dark => ResolvedTheme::Dark,
        ThemeChoice::Auto if os_prefers_dark => ResolvedTheme::Dark,
        ThemeChoice::Auto => ResolvedTheme::Light,
    }
}

pub fn resolve(input: &AppearanceInput, os_prefers_dark: bool) -> AppliedStyle {
    let theme = input.theme_choice();
    let resolved_theme = resolve_theme(theme, os_prefers_dark);
    let palette = match resolved_theme {
        ResolvedTheme::Light => LIGHT_PALETTE,
        ResolvedTheme::Dark => DARK_PALETTE,
    };

    let font_family = match input.font_family.trim() {
        "" => DEFAULT_FONT_FAMILY.to_string(),
        family => family.to_string(),
    };

    let accent_color = match input.accent_color.trim() {
        color if is_hex_color(color) => color.to_ascii_lowercase(),
        _ => DEFAULT_ACCENT_COLOR.to_string(),
    };

    let titlebar_button_style = ButtonStyle::parse(&input.titlebar_button_style)
        .or_else(|| ButtonStyle::parse(DEFAULT_TITLEBAR_BUTTON_STYLE))
        .unwrap_or(ButtonStyle::Windows);

    AppliedStyle {
        theme,
        resolved_theme,
        palette,
        font_family,
        font_size_px: font_size_px(input.font_size),
        accent_color,
        titlebar_button_style,
        titlebar_buttons: button_shape(titlebar_button_style),
    }
}
