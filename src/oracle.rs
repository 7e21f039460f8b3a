//! The "Zen master": a text-generation call that supplies trail text.
//!
//! One opaque request/response exchange against a Gemini-style
//! `generateContent` endpoint. Whatever happens on the wire, callers get a
//! string back: empty answers and failures are replaced with fixed phrases.

use serde::{Deserialize, Serialize};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

use crate::error::GenerationError;

pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Used when the caller sends an empty prompt.
pub const DEFAULT_PROMPT: &str = "Generate a new Zen poem about the current moment.";
/// Prompt behind the page's "new insight" button.
pub const REFRESH_PROMPT: &str =
    "Generate a short, evocative Zen poem about mindfulness and the beauty of white ink on a moonlit night.";

/// Substituted when the service answers without any text.
pub const EMPTY_FALLBACK: &str = "一花一世界，一叶一菩提。";
/// Substituted when the exchange fails.
pub const ERROR_FALLBACK: &str = "心若无尘，花开自香。";

pub const HISTORY_LIMIT: usize = 5;

const SYSTEM_INSTRUCTION: &str = "You are a Zen Master, a master of Shuimo (ink-wash) aesthetics and Eastern philosophy. \
Your task is to provide short, profound Zen insights, poems, or koans. \
Keep the responses concise (under 30 words) so they can be rendered as flowing ink characters. \
Response should be primarily in beautiful Literary Chinese (Classical Chinese) with a brief modern translation or reflection if needed, or pure elegant modern Chinese. \
Focus on themes of nature, emptiness, presence, and the \"one flower, one world\" philosophy.";

#[wasm_bindgen]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ZenMode {
    Poetry,
    Philosophy,
    Koan,
}

impl Default for ZenMode {
    fn default() -> Self {
        ZenMode::Poetry
    }
}

impl ZenMode {
    fn hint(self) -> &'static str {
        match self {
            ZenMode::Poetry => "Answer with a short poem.",
            ZenMode::Philosophy => "Answer with a brief philosophical reflection.",
            ZenMode::Koan => "Answer with a single koan.",
        }
    }
}

// --- Wire format --------------------------------------------------------------

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'static str>,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    top_p: f32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    system_instruction: Content,
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

impl GenerateRequest {
    pub fn new(prompt: &str, mode: ZenMode) -> Self {
        let prompt = if prompt.trim().is_empty() { DEFAULT_PROMPT } else { prompt };
        Self {
            system_instruction: Content {
                role: None,
                parts: vec![Part { text: format!("{SYSTEM_INSTRUCTION} {}", mode.hint()) }],
            },
            contents: vec![Content { role: Some("user"), parts: vec![Part { text: prompt.to_owned() }] }],
            generation_config: GenerationConfig { temperature: 0.8, top_p: 0.9 },
        }
    }
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

/// Text of the first candidate, parts concatenated. `None` if there is none.
pub fn parse_response(body: &str) -> Result<Option<String>, GenerationError> {
    let resp: GenerateResponse = serde_json::from_str(body)?;
    let text = resp
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|c| c.parts.into_iter().map(|p| p.text).collect::<String>());
    Ok(text)
}

/// Collapse an exchange outcome into display text. Never fails.
pub fn resolve(outcome: Result<Option<String>, GenerationError>) -> String {
    match outcome {
        Ok(Some(text)) if !text.trim().is_empty() => text,
        Ok(_) => EMPTY_FALLBACK.to_owned(),
        Err(err) => {
            log::error!("zen oracle: {err}");
            ERROR_FALLBACK.to_owned()
        }
    }
}

// --- History ------------------------------------------------------------------

/// Most recent insights, newest first, capped at [`HISTORY_LIMIT`].
#[derive(Clone, Debug, Default)]
pub struct InsightHistory {
    items: Vec<String>,
}

impl InsightHistory {
    pub fn record(&mut self, text: impl Into<String>) {
        self.items.insert(0, text.into());
        self.items.truncate(HISTORY_LIMIT);
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.items.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(String::as_str)
    }
}

// --- Browser client -----------------------------------------------------------

#[derive(Clone, Debug)]
pub struct OracleClient {
    api_key: String,
    model: String,
    endpoint: String,
    mode: ZenMode,
}

impl OracleClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_owned(),
            endpoint: DEFAULT_ENDPOINT.to_owned(),
            mode: ZenMode::default(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_mode(mut self, mode: ZenMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn url(&self) -> String {
        format!("{}/{}:generateContent?key={}", self.endpoint.trim_end_matches('/'), self.model, self.api_key)
    }

    /// Raw exchange; errors are surfaced.
    pub async fn request(&self, prompt: &str) -> Result<Option<String>, GenerationError> {
        let window = web_sys::window().ok_or(GenerationError::NoWindow)?;
        let body = serde_json::to_string(&GenerateRequest::new(prompt, self.mode))?;

        let init = RequestInit::new();
        init.set_method("POST");
        init.set_mode(RequestMode::Cors);
        init.set_body(&JsValue::from_str(&body));
        let request = Request::new_with_str_and_init(&self.url(), &init)?;
        request.headers().set("Content-Type", "application/json")?;

        let resp: Response = JsFuture::from(window.fetch_with_request(&request)).await?.dyn_into()?;
        if !resp.ok() {
            return Err(GenerationError::Status(resp.status()));
        }
        let text = JsFuture::from(resp.text()?).await?.as_string().ok_or(GenerationError::Body)?;
        parse_response(&text)
    }

    /// Exchange with fallbacks applied; always yields display text.
    pub async fn generate(&self, prompt: &str) -> String {
        resolve(self.request(prompt).await)
    }
}

/// JS entry point: ask the Zen master for fresh trail text.
#[wasm_bindgen]
pub async fn generate_zen_content(prompt: String, api_key: String, mode: Option<ZenMode>) -> String {
    OracleClient::new(api_key).with_mode(mode.unwrap_or_default()).generate(&prompt).await
}
