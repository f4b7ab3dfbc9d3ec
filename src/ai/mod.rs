//! Generative-text API client and the three call shapes built on it
//! (batch translation, trend analysis, blog drafting).

pub mod analyze;
pub mod blog;
pub mod translate;

use serde_json::{Value, json};
use tracing::{debug, warn};

pub use analyze::analyze_trend;
pub use blog::generate_blog_post;
pub use translate::translate_trends;

pub(crate) type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Static salt for the deterrent-grade key obfuscation. This is NOT a
/// security control: the salt ships with the binary and the scheme is a
/// single XOR, so anyone holding the obfuscated value can recover the key.
/// It only keeps the plaintext out of casual config-file greps.
const KEY_SALT: &str = "J@#$9s0d";

/// Reverse the static-salt XOR obfuscation applied to an API key at rest.
///
/// Input is the hex encoding of the key bytes, each XORed with the fold of
/// the salt bytes. Any malformed input yields an empty string.
pub fn deobfuscate_key(encrypted: &str) -> String {
    let salt = KEY_SALT.bytes().fold(0u8, |a, b| a ^ b);
    let hex = encrypted.trim();
    if hex.is_empty() || hex.len() % 2 != 0 {
        return String::new();
    }
    let mut out = Vec::with_capacity(hex.len() / 2);
    for i in (0..hex.len()).step_by(2) {
        match u8::from_str_radix(&hex[i..i + 2], 16) {
            Ok(b) => out.push(b ^ salt),
            Err(_) => return String::new(),
        }
    }
    String::from_utf8(out).unwrap_or_default()
}

/// Resolve the API credential: obfuscated env var first, then the plaintext
/// variables. `None` disables every AI-backed feature.
pub fn resolve_api_key() -> Option<String> {
    if let Ok(enc) = std::env::var("TRENDSEA_API_KEY_ENCRYPTED") {
        let key = deobfuscate_key(&enc);
        if !key.is_empty() {
            return Some(key);
        }
        warn!("TRENDSEA_API_KEY_ENCRYPTED is set but could not be decoded");
    }
    for var in ["TRENDSEA_API_KEY", "GEMINI_API_KEY"] {
        if let Ok(key) = std::env::var(var)
            && !key.trim().is_empty()
        {
            return Some(key.trim().to_string());
        }
    }
    None
}

/// Thin client over the `generateContent` REST endpoint.
///
/// Holds the resolved credential and the configured model names. When no
/// credential resolved, every call site returns its fixed "not configured"
/// value without touching the network.
#[derive(Clone, Debug)]
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: Option<String>,
    /// Model for translation and analysis (latency-sensitive).
    pub flash_model: String,
    /// Model for long-form drafting.
    pub pro_model: String,
}

impl GeminiClient {
    /// Build a client from the environment and user settings.
    pub fn from_env(settings: &crate::theme::Settings) -> Self {
        let api_key = resolve_api_key();
        if api_key.is_none() {
            warn!("no AI credential found; AI features run in degraded mode");
        }
        Self {
            http: reqwest::Client::new(),
            api_key,
            flash_model: settings.flash_model.clone(),
            pro_model: settings.pro_model.clone(),
        }
    }

    /// Client with no credential; every AI feature degrades deterministically.
    pub fn disabled() -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: None,
            flash_model: crate::theme::Settings::default().flash_model,
            pro_model: crate::theme::Settings::default().pro_model,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// One `generateContent` call. `generation_config` is passed through
    /// verbatim (response MIME type, response schema); `None` requests plain
    /// text.
    pub async fn generate(
        &self,
        model: &str,
        prompt: &str,
        generation_config: Option<Value>,
    ) -> Result<String> {
        let Some(key) = self.api_key.as_deref() else {
            return Err("API key missing".into());
        };
        let url = format!("{API_BASE}/{model}:generateContent?key={key}");
        let mut body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
        });
        if let Some(cfg) = generation_config {
            body["generationConfig"] = cfg;
        }
        let resp = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await?
            .error_for_status()?;
        let v: Value = resp.json().await?;
        let text = v
            .pointer("/candidates/0/content/parts/0/text")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        if text.is_empty() {
            return Err("empty response from model".into());
        }
        debug!(model, chars = text.len(), "model response received");
        Ok(text)
    }
}
