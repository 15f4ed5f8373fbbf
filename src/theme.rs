use log::info;
use ratatui::style::Color;
use serde::Deserialize;
use thiserror::Error;

/// Named six-colour palette used by the renderer.
///
/// Colours are presentation only; nothing in the engine reads them.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct GameTheme {
    pub name: String,
    pub background: Color,
    pub snake_head: Color,
    pub snake_body: Color,
    pub food: Color,
    pub grid_line: Color,
    pub text: Color,
}

/// Palette as exchanged in JSON, every colour a `#RRGGBB` string.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeSpec {
    pub name: String,
    pub background_color: String,
    pub snake_head_color: String,
    pub snake_body_color: String,
    pub food_color: String,
    pub grid_color: String,
    pub text_color: String,
}

#[derive(Debug, Error)]
pub enum ThemeParseError {
    #[error("json parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{field}: '{value}' is not a hex colour")]
    InvalidColor { field: &'static str, value: String },
}

impl TryFrom<ThemeSpec> for GameTheme {
    type Error = ThemeParseError;

    fn try_from(spec: ThemeSpec) -> Result<Self, Self::Error> {
        Ok(Self {
            background: color_field("backgroundColor", &spec.background_color)?,
            snake_head: color_field("snakeHeadColor", &spec.snake_head_color)?,
            snake_body: color_field("snakeBodyColor", &spec.snake_body_color)?,
            food: color_field("foodColor", &spec.food_color)?,
            grid_line: color_field("gridColor", &spec.grid_color)?,
            text: color_field("textColor", &spec.text_color)?,
            name: spec.name,
        })
    }
}

/// Parses a palette from its JSON form.
pub fn parse_theme(raw: &str) -> Result<GameTheme, ThemeParseError> {
    let spec = serde_json::from_str::<ThemeSpec>(raw)?;
    GameTheme::try_from(spec)
}

fn color_field(field: &'static str, value: &str) -> Result<Color, ThemeParseError> {
    parse_hex_color(value).ok_or_else(|| ThemeParseError::InvalidColor {
        field,
        value: value.to_owned(),
    })
}

/// Parses `#RRGGBB` or `#RGB`.
#[must_use]
pub fn parse_hex_color(value: &str) -> Option<Color> {
    let hex = value.trim().strip_prefix('#')?;
    if !hex.is_ascii() {
        return None;
    }

    match hex.len() {
        6 => {
            let red = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let green = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let blue = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some(Color::Rgb(red, green, blue))
        }
        3 => {
            let channel = |idx: usize| {
                u8::from_str_radix(&hex[idx..=idx], 16)
                    .ok()
                    .map(|nibble| nibble * 17)
            };
            Some(Color::Rgb(channel(0)?, channel(1)?, channel(2)?))
        }
        _ => None,
    }
}

/// Slate background with emerald snake and rose food.
#[must_use]
pub fn classic_neon() -> GameTheme {
    GameTheme {
        name: "Classic Neon".to_owned(),
        background: Color::Rgb(0x0f, 0x17, 0x2a),
        snake_head: Color::Rgb(0x10, 0xb9, 0x81),
        snake_body: Color::Rgb(0x34, 0xd3, 0x99),
        food: Color::Rgb(0xf4, 0x3f, 0x5e),
        grid_line: Color::Rgb(0x1e, 0x29, 0x3b),
        text: Color::Rgb(0xf1, 0xf5, 0xf9),
    }
}

fn deep_ocean() -> GameTheme {
    GameTheme {
        name: "Deep Ocean".to_owned(),
        background: Color::Rgb(0x03, 0x16, 0x2b),
        snake_head: Color::Rgb(0x22, 0xd3, 0xee),
        snake_body: Color::Rgb(0x06, 0xb6, 0xd4),
        food: Color::Rgb(0xfa, 0xcc, 0x15),
        grid_line: Color::Rgb(0x0c, 0x2a, 0x4a),
        text: Color::Rgb(0xe0, 0xf2, 0xfe),
    }
}

fn ember() -> GameTheme {
    GameTheme {
        name: "Ember".to_owned(),
        background: Color::Rgb(0x1c, 0x10, 0x0b),
        snake_head: Color::Rgb(0xfb, 0x92, 0x3c),
        snake_body: Color::Rgb(0xea, 0x58, 0x0c),
        food: Color::Rgb(0xfd, 0xe0, 0x47),
        grid_line: Color::Rgb(0x2e, 0x1a, 0x12),
        text: Color::Rgb(0xff, 0xed, 0xd5),
    }
}

fn terminal_default() -> GameTheme {
    GameTheme {
        name: "Terminal".to_owned(),
        background: Color::Reset,
        snake_head: Color::White,
        snake_body: Color::Green,
        food: Color::Red,
        grid_line: Color::DarkGray,
        text: Color::Gray,
    }
}

/// Ordered set of palettes the player can cycle through.
#[derive(Debug, Clone)]
pub struct ThemeCatalog {
    themes: Vec<GameTheme>,
    selected_idx: usize,
}

impl ThemeCatalog {
    /// Catalog of the bundled palettes, first one selected.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            themes: vec![classic_neon(), deep_ocean(), ember(), terminal_default()],
            selected_idx: 0,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.themes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.themes.is_empty()
    }

    #[must_use]
    pub fn current(&self) -> &GameTheme {
        &self.themes[self.selected_idx]
    }

    pub fn select_next(&mut self) {
        self.selected_idx = (self.selected_idx + 1) % self.themes.len();
    }

    /// Selects the theme whose name matches case-insensitively, ignoring
    /// spaces, dashes and underscores.
    pub fn select_by_name(&mut self, name: &str) -> bool {
        let wanted = normalize_name(name);
        if let Some(idx) = self
            .themes
            .iter()
            .position(|theme| normalize_name(&theme.name) == wanted)
        {
            self.selected_idx = idx;
            return true;
        }

        false
    }

    /// Adds a generated palette and selects it. A palette with the same name
    /// replaces the earlier one.
    pub fn insert_generated(&mut self, theme: GameTheme) {
        info!("theme '{}' added", theme.name);
        if let Some(idx) = self.themes.iter().position(|t| t.name == theme.name) {
            self.themes[idx] = theme;
            self.selected_idx = idx;
        } else {
            self.themes.push(theme);
            self.selected_idx = self.themes.len() - 1;
        }
    }

    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.themes.iter().map(|theme| theme.name.as_str()).collect()
    }
}

fn normalize_name(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}
