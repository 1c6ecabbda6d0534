//! HTTP client for a Gemini-style `generateContent` endpoint.

use std::time::Duration;

use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use crate::command::{parse_commands, ArchitectCommand};
use crate::error::{ArchitectError, Result};
use crate::service::ArchitectService;

const SYSTEM_INSTRUCTION: &str = "\
You design small block structures for a voxel building game.
Answer a building request with the blocks to place, as a JSON array of
objects shaped like {\"pos\": [x, y, z], \"texture\": \"<block>\"}.

Coordinates are whole numbers on a 1-unit grid. y is up and the lowest
layer of blocks sits at y = 0, directly on the ground. Keep structures
near the origin.

Blocks:
- dirt, grass: terrain and gardens
- cobblestone, stone: foundations and heavy walls
- log, wood, plank: frames, walls and floors
- glass: windows and light walls
- leaves: foliage and decoration

Pick materials to suit the requested style:
- Modern: mostly glass, stone and plank
- Medieval: cobblestone with log frames and plank floors
- Fantasy: mixed materials in tall, slender shapes
- Sci-Fi: stone hulls with glass panels
- Rustic: log, wood and dirt
- Futuristic: glass and stone in clean geometric forms
- Underwater: glass domes over stone, with leaves as plant life

Build complete structures with solid walls and roofs. Reply with the JSON
array only.";

/// Connection settings for [`GeminiArchitect`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ArchitectSettings {
    /// API base URL, without the `/models/...` suffix.
    pub endpoint: String,
    /// Model name.
    pub model: String,
    /// Environment variable holding the API key.
    pub api_key_env: String,
    /// Whole-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ArchitectSettings {
    fn default() -> Self {
        Self {
            endpoint: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            model: "gemini-3-flash-preview".to_string(),
            api_key_env: "GEMINI_API_KEY".to_string(),
            timeout_secs: 30,
        }
    }
}

impl ArchitectSettings {
    /// Full `generateContent` URL.
    #[must_use]
    pub fn url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.endpoint.trim_end_matches('/'),
            self.model
        )
    }
}

/// Architect backed by a Gemini-compatible REST API.
#[derive(Debug, Clone)]
pub struct GeminiArchitect {
    client: reqwest::Client,
    settings: ArchitectSettings,
    api_key: String,
}

impl GeminiArchitect {
    /// Create a client with an explicit API key.
    pub fn new(settings: ArchitectSettings, api_key: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            settings,
            api_key: api_key.into(),
        })
    }

    /// Create a client reading the API key from `settings.api_key_env`.
    pub fn from_env(settings: ArchitectSettings) -> Result<Self> {
        let key = std::env::var(&settings.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| ArchitectError::MissingApiKey(settings.api_key_env.clone()))?;
        Self::new(settings, key)
    }

    #[must_use]
    pub const fn settings(&self) -> &ArchitectSettings {
        &self.settings
    }

    async fn send(&self, prompt: &str) -> Result<Vec<ArchitectCommand>> {
        let url = self.settings.url();
        debug!(%url, "sending architect request");
        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request_body(prompt))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ArchitectError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let reply: GenerateResponse = response.json().await?;
        let text = reply.text().ok_or(ArchitectError::EmptyResponse)?;
        parse_commands(text)
    }
}

impl ArchitectService for GeminiArchitect {
    async fn generate(&self, prompt: &str) -> Result<Vec<ArchitectCommand>> {
        self.send(prompt).await
    }
}

/// JSON body for a structured-output generation request.
fn request_body(prompt: &str) -> Value {
    json!({
        "systemInstruction": {
            "parts": [{ "text": SYSTEM_INSTRUCTION }]
        },
        "contents": [{
            "role": "user",
            "parts": [{ "text": prompt }]
        }],
        "generationConfig": {
            "responseMimeType": "application/json",
            "responseSchema": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "pos": {
                            "type": "ARRAY",
                            "items": { "type": "NUMBER" },
                            "description": "Block position [x, y, z]"
                        },
                        "texture": {
                            "type": "STRING",
                            "description": "Block type tag"
                        }
                    },
                    "required": ["pos", "texture"]
                }
            }
        }
    })
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

impl GenerateResponse {
    /// Text of the first part of the first candidate.
    fn text(&self) -> Option<&str> {
        self.candidates
            .first()?
            .content
            .as_ref()?
            .parts
            .first()?
            .text
            .as_deref()
    }
}
