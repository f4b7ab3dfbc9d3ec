//! Core application state types for Trendsea's TUI.
//!
//! This module defines the data structures shared across the application:
//! trend records parsed from the feed, AI analysis payloads, the messages
//! exchanged with background workers, and the central [`AppState`] container
//! mutated by the event and UI layers.

use ratatui::widgets::ListState;
use std::time::Instant;

/// One news article referencing a trend, carried as a sub-record.
///
/// Citations are owned exclusively by their parent [`TrendRecord`] and are
/// never shared between records.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct NewsCitation {
    /// Article headline.
    pub title: String,
    /// Short excerpt from the article body.
    pub snippet: String,
    /// Article URL (placeholder anchor when absent from the feed).
    pub url: String,
    /// Publisher name.
    pub source: String,
}

/// One ranked topic entry from the source feed for a given country.
///
/// Identity is positional within a single fetch batch; there is no persistent
/// identity across refreshes. Translation replaces records wholesale rather
/// than mutating them field by field.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TrendRecord {
    /// Topic title, possibly translated for display.
    pub title: String,
    /// Link to the trend page.
    pub link: String,
    /// Publish timestamp as reported by the feed (RFC 2822).
    pub pub_date: String,
    /// Free-text search-volume magnitude, e.g. "200+" (may be empty).
    pub approx_traffic: String,
    /// Markup-stripped description text (may be empty).
    pub description: String,
    /// Resolved image URL; always populated via the fallback chain.
    pub image_url: String,
    /// Attribution label; `"System"` marks the degraded mock entry.
    pub source: String,
    /// News citations in feed order.
    pub news_items: Vec<NewsCitation>,
}

/// Structured AI assessment of one trend. Transient; discarded when the
/// detail view closes or another trend is selected.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AnalysisResult {
    /// Why the topic is trending, in the display language.
    pub summary: String,
    /// Core category or driver, e.g. "Breaking News".
    pub reason: String,
    /// Related keywords without a leading `#`.
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Which language the dashboard currently displays.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LanguageMode {
    /// Feed text as fetched.
    Original,
    /// Titles rewritten into the home language.
    Translated,
}

/// Load request sent to the background feed worker.
#[derive(Clone, Debug)]
pub struct LoadRequest {
    /// Monotonic token used to discard superseded responses.
    pub id: u64,
    /// ISO-3166 alpha-2 country code.
    pub geo: String,
}

/// Fetched (untranslated) trends for a prior [`LoadRequest`].
#[derive(Clone, Debug)]
pub struct LoadOutcome {
    /// Echoed token from the originating request.
    pub id: u64,
    pub trends: Vec<TrendRecord>,
}

/// Translation request sent to the background localization worker.
#[derive(Clone, Debug)]
pub struct TranslateRequest {
    /// Load token the input trends belong to.
    pub id: u64,
    pub trends: Vec<TrendRecord>,
}

/// Translated trends for a prior [`TranslateRequest`]. Same length and order
/// as the input, always.
#[derive(Clone, Debug)]
pub struct TranslateOutcome {
    pub id: u64,
    pub trends: Vec<TrendRecord>,
}

/// Analysis request for one selected trend.
#[derive(Clone, Debug)]
pub struct AnalyzeRequest {
    /// Token tied to the detail view generation that asked for it.
    pub token: u64,
    pub trend: TrendRecord,
}

/// Completed analysis, matched back by token.
#[derive(Clone, Debug)]
pub struct AnalysisOutcome {
    pub token: u64,
    pub result: AnalysisResult,
}

/// Blog draft request carrying the trends visible when it was triggered.
#[derive(Clone, Debug)]
pub struct BlogRequest {
    pub token: u64,
    pub trends: Vec<TrendRecord>,
}

/// Finished blog draft, matched back by token.
#[derive(Clone, Debug)]
pub struct BlogOutcome {
    pub token: u64,
    pub content: String,
}

/// Modal dialog state for the UI.
#[derive(Debug, Clone, Default)]
pub enum Modal {
    #[default]
    None,
    /// Informational alert with a non-interactive message.
    Alert { message: String },
    /// Country selection overlay; `selected` indexes `countries::COUNTRIES`.
    CountryPicker { selected: usize },
}

/// Global application state shared by the event, worker, and UI layers.
///
/// Mutated only from the single event-loop task; workers communicate through
/// the outcome channels, so no synchronization primitive is needed.
#[derive(Debug)]
pub struct AppState {
    /// Trends currently rendered, most relevant first (feed order).
    pub trends: Vec<TrendRecord>,
    /// Untranslated trends as last fetched, kept to swap back to `Original`.
    pub original_trends: Vec<TrendRecord>,
    /// Cached translated list; warm cache means a language toggle needs no
    /// second remote call.
    pub translated_trends: Option<Vec<TrendRecord>>,
    /// Selected country code.
    pub country: String,
    /// Country whose feed is native to the display language.
    pub home_country: String,
    /// Original vs. translated display.
    pub language_mode: LanguageMode,
    /// True while the feed fetch is in flight.
    pub loading: bool,
    /// True while the localization call is in flight.
    pub translating: bool,
    /// True while a snapshot capture is being written.
    pub capturing: bool,
    /// Wall-clock time of the last successful load.
    pub last_updated: Option<chrono::DateTime<chrono::Local>>,

    /// Index into `trends` that is currently highlighted.
    pub selected: usize,
    /// List selection state for the trend list.
    pub list_state: ListState,
    /// Active modal dialog, if any.
    pub modal: Modal,

    // Detail view
    /// Trend opened in the detail view, if any.
    pub selected_trend: Option<TrendRecord>,
    /// Analysis for the detail view once it arrives.
    pub analysis: Option<AnalysisResult>,
    /// True while the analysis call is in flight.
    pub analyzing: bool,
    /// Token of the current detail view generation.
    pub analysis_token: u64,

    // Blog flow
    /// Whether the blog modal is shown.
    pub blog_open: bool,
    /// Generated draft text (empty until ready).
    pub blog_content: String,
    /// Captured dashboard snapshot spliced into the draft, if capture
    /// succeeded.
    pub blog_image: Option<String>,
    /// True from trigger until the draft text resolves.
    pub generating_blog: bool,
    /// Token of the current blog generation.
    pub blog_token: u64,

    // Load coordination
    /// Token of the newest issued load; older outcomes are discarded.
    pub latest_load_id: u64,
    /// Next load token to allocate.
    pub next_load_id: u64,

    /// Transient status line message.
    pub toast_message: Option<String>,
    /// Deadline after which the toast is cleared.
    pub toast_expires_at: Option<Instant>,

    /// Skip the network and serve the mock dataset (demo / tests).
    pub offline: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            trends: Vec::new(),
            original_trends: Vec::new(),
            translated_trends: None,
            country: crate::countries::HOME_COUNTRY.to_string(),
            home_country: crate::countries::HOME_COUNTRY.to_string(),
            language_mode: LanguageMode::Translated,
            loading: false,
            translating: false,
            capturing: false,
            last_updated: None,
            selected: 0,
            list_state: ListState::default(),
            modal: Modal::None,
            selected_trend: None,
            analysis: None,
            analyzing: false,
            analysis_token: 0,
            blog_open: false,
            blog_content: String::new(),
            blog_image: None,
            generating_blog: false,
            blog_token: 0,
            latest_load_id: 0,
            next_load_id: 1,
            toast_message: None,
            toast_expires_at: None,
            offline: false,
        }
    }
}

impl AppState {
    /// Whether the selected country's feed is already in the home language.
    pub fn at_home(&self) -> bool {
        self.country.eq_ignore_ascii_case(&self.home_country)
    }

    /// Show a transient status-line message for `secs` seconds.
    pub fn toast(&mut self, message: impl Into<String>, secs: u64) {
        self.toast_message = Some(message.into());
        self.toast_expires_at = Some(Instant::now() + std::time::Duration::from_secs(secs));
    }
}
