//! Optional text-to-palette generation backed by the Gemini REST API.
//!
//! Generation runs on a worker thread and reports back over a channel; any
//! failure, including a missing API key, surfaces as an absent theme and the
//! caller keeps its current palette.

use std::env;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use std::time::Duration;

use log::{info, warn};
use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;

use crate::theme::{parse_theme, GameTheme, ThemeParseError};

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_MODEL: &str = "gemini-2.5-flash";
const API_KEY_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum PaletteError {
    #[error("no API key set in GEMINI_API_KEY or API_KEY")]
    MissingCredential,
    #[error("palette request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("palette response contained no text")]
    EmptyResponse,
    #[error("palette response is not a valid theme: {0}")]
    Theme(#[from] ThemeParseError),
}

/// Source of generated palettes.
pub trait PaletteGenerator: Send {
    fn generate(&self, prompt: &str) -> Result<GameTheme, PaletteError>;
}

/// Palette generator calling Gemini's `generateContent` endpoint with a
/// JSON response schema.
pub struct GeminiPalette {
    client: Client,
    api_key: String,
    model: String,
}

impl GeminiPalette {
    /// Builds a generator from the first non-empty API key variable.
    pub fn from_env() -> Result<Self, PaletteError> {
        let api_key = API_KEY_VARS
            .iter()
            .filter_map(|name| env::var(name).ok())
            .find(|value| !value.trim().is_empty())
            .ok_or(PaletteError::MissingCredential)?;

        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;

        Ok(Self {
            client,
            api_key,
            model: DEFAULT_MODEL.to_owned(),
        })
    }
}

impl PaletteGenerator for GeminiPalette {
    fn generate(&self, prompt: &str) -> Result<GameTheme, PaletteError> {
        let url = format!("{API_BASE}/models/{}:generateContent", self.model);
        let response = self
            .client
            .post(url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request_body(prompt))
            .send()?
            .error_for_status()?
            .json::<GenerateResponse>()?;

        theme_from_response(response)
    }
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

fn request_body(prompt: &str) -> serde_json::Value {
    let color = |description: &str| json!({ "type": "STRING", "description": description });

    json!({
        "contents": [{
            "parts": [{
                "text": format!(
                    "Generate a color theme for a modern snake game based on this description: \
                     \"{prompt}\". Ensure high contrast between the snake, food, and background. \
                     Return hex color codes."
                )
            }]
        }],
        "generationConfig": {
            "responseMimeType": "application/json",
            "responseSchema": {
                "type": "OBJECT",
                "properties": {
                    "name": { "type": "STRING", "description": "A creative name for the theme" },
                    "backgroundColor": color("Hex code for the game canvas background"),
                    "snakeHeadColor": color("Hex code for the snake's head"),
                    "snakeBodyColor": color("Hex code for the snake's body"),
                    "foodColor": color("Hex code for the food item"),
                    "gridColor": color("Hex code for the grid lines (subtle)"),
                    "textColor": color("Hex code for UI text that contrasts with background"),
                },
                "required": [
                    "name", "backgroundColor", "snakeHeadColor", "snakeBodyColor",
                    "foodColor", "gridColor", "textColor"
                ]
            }
        }
    })
}

fn theme_from_response(response: GenerateResponse) -> Result<GameTheme, PaletteError> {
    let text = response
        .candidates
        .into_iter()
        .filter_map(|candidate| candidate.content)
        .flat_map(|content| content.parts)
        .find_map(|part| part.text.filter(|text| !text.trim().is_empty()))
        .ok_or(PaletteError::EmptyResponse)?;

    Ok(parse_theme(&text)?)
}

/// Runs `generator` and collapses any failure into `None`.
pub fn generate_theme(generator: &dyn PaletteGenerator, prompt: &str) -> Option<GameTheme> {
    match generator.generate(prompt) {
        Ok(theme) => {
            info!("generated theme '{}' for prompt {prompt:?}", theme.name);
            Some(theme)
        }
        Err(error) => {
            warn!("theme generation failed: {error}");
            None
        }
    }
}

/// State of an in-flight palette request.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum PalettePoll {
    Pending,
    Ready(GameTheme),
    Failed,
}

/// Handle to a palette being generated on a worker thread.
#[derive(Debug)]
pub struct PaletteRequest {
    prompt: String,
    rx: Receiver<Option<GameTheme>>,
}

impl PaletteRequest {
    /// Starts generating a palette for `prompt` in the background.
    #[must_use]
    pub fn spawn(generator: Box<dyn PaletteGenerator>, prompt: String) -> Self {
        let (tx, rx) = mpsc::channel();
        let worker_prompt = prompt.clone();

        let spawned = thread::Builder::new()
            .name("palette".to_owned())
            .spawn(move || {
                let theme = generate_theme(generator.as_ref(), &worker_prompt);
                let _ = tx.send(theme);
            });
        if let Err(error) = spawned {
            // The sender was dropped with the closure, so polling reports Failed.
            warn!("cannot start palette worker: {error}");
        }

        Self { prompt, rx }
    }

    /// Request whose generator could not be built; always reports failure.
    #[must_use]
    pub fn failed(prompt: String) -> Self {
        let (_, rx) = mpsc::channel();
        Self { prompt, rx }
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Checks for a result without blocking.
    pub fn poll(&self) -> PalettePoll {
        match self.rx.try_recv() {
            Ok(Some(theme)) => PalettePoll::Ready(theme),
            Ok(None) | Err(TryRecvError::Disconnected) => PalettePoll::Failed,
            Err(TryRecvError::Empty) => PalettePoll::Pending,
        }
    }
}
