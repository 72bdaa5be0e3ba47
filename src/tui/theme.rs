use ratatui::style::Color;

use crate::model::{TargetKind, UiConfig};

/// Parsed color theme for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    pub text: Color,
    pub text_bright: Color,
    pub highlight: Color,
    pub dim: Color,
    pub red: Color,
    pub yellow: Color,
    pub green: Color,
    pub cyan: Color,
    pub purple: Color,
    pub selection_bg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            background: Color::Rgb(0x20, 0x22, 0x25),
            text: Color::Rgb(0xDC, 0xDD, 0xDE),
            text_bright: Color::Rgb(0xFF, 0xFF, 0xFF),
            highlight: Color::Rgb(0x58, 0x65, 0xF2),
            dim: Color::Rgb(0x8E, 0x92, 0x97),
            red: Color::Rgb(0xED, 0x42, 0x45),
            yellow: Color::Rgb(0xFE, 0xE7, 0x5C),
            green: Color::Rgb(0x57, 0xF2, 0x87),
            cyan: Color::Rgb(0x44, 0xDD, 0xFF),
            purple: Color::Rgb(0xCC, 0x66, 0xFF),
            selection_bg: Color::Rgb(0x2F, 0x31, 0x36),
        }
    }
}

/// Parse a hex color string like "#FF4444" into an RGB Color
fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

impl Theme {
    /// Create a theme from UI config, falling back to defaults
    pub fn from_config(ui: &UiConfig) -> Self {
        let mut theme = Theme::default();

        for (key, value) in &ui.colors {
            let Some(color) = parse_hex_color(value) else {
                log::warn!("ignoring color {} = {:?}: expected #RRGGBB", key, value);
                continue;
            };
            match key.as_str() {
                "background" => theme.background = color,
                "text" => theme.text = color,
                "text_bright" => theme.text_bright = color,
                "highlight" => theme.highlight = color,
                "dim" => theme.dim = color,
                "red" => theme.red = color,
                "yellow" => theme.yellow = color,
                "green" => theme.green = color,
                "cyan" => theme.cyan = color,
                "purple" => theme.purple = color,
                "selection_bg" => theme.selection_bg = color,
                other => log::warn!("unknown color slot \"{}\"", other),
            }
        }

        theme
    }

    /// Badge color for a target kind
    pub fn kind_color(&self, kind: TargetKind) -> Color {
        match kind {
            TargetKind::Integer => self.cyan,
            TargetKind::String => self.purple,
        }
    }
}
