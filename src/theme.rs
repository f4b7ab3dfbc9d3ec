//! Color palette, XDG paths, and user settings for Trendsea's TUI.

use ratatui::style::Color;
use std::env;
use std::fs;
use std::path::PathBuf;

/// Application theme palette used by rendering code.
pub struct Theme {
    /// Primary background color for the canvas.
    pub base: Color,
    /// Slightly lighter background layer used behind panels.
    pub mantle: Color,
    /// Darkest background shade for deep contrast areas.
    pub crust: Color,
    /// Subtle surface color for component backgrounds.
    pub surface2: Color,
    /// Muted overlay line/border color (primary).
    pub overlay1: Color,
    /// Muted overlay line/border color (secondary).
    pub overlay2: Color,
    /// Primary foreground text color.
    pub text: Color,
    /// Secondary text for less prominent content.
    pub subtext0: Color,
    /// Accent color for selection and interactive highlights.
    pub sapphire: Color,
    /// Accent color for emphasized headings.
    pub mauve: Color,
    /// Success/positive state color.
    pub green: Color,
    /// Warning/attention state color.
    pub yellow: Color,
    /// Error/danger state color.
    pub red: Color,
    /// Accent color for subtle emphasis and borders.
    pub lavender: Color,
}

fn hex(rgb: (u8, u8, u8)) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}

/// Return the application's default theme palette.
pub fn theme() -> Theme {
    Theme {
        base: hex((0x1e, 0x1e, 0x2e)),
        mantle: hex((0x18, 0x18, 0x25)),
        crust: hex((0x11, 0x11, 0x1b)),
        surface2: hex((0x58, 0x5b, 0x70)),
        overlay1: hex((0x7f, 0x84, 0x9c)),
        overlay2: hex((0x93, 0x99, 0xb2)),
        text: hex((0xcd, 0xd6, 0xf4)),
        subtext0: hex((0xa6, 0xad, 0xc8)),
        sapphire: hex((0x74, 0xc7, 0xec)),
        mauve: hex((0xcb, 0xa6, 0xf7)),
        green: hex((0xa6, 0xe3, 0xa1)),
        yellow: hex((0xf9, 0xe2, 0xaf)),
        red: hex((0xf3, 0x8b, 0xa8)),
        lavender: hex((0xb4, 0xbe, 0xfe)),
    }
}

fn xdg_base_dir(var: &str, home_default: &[&str]) -> PathBuf {
    if let Ok(p) = env::var(var)
        && !p.trim().is_empty()
    {
        return PathBuf::from(p);
    }
    let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
    let mut base = PathBuf::from(home);
    for seg in home_default {
        base = base.join(seg);
    }
    base
}

/// Configuration directory (`~/.config/trendsea`), created on demand.
pub fn config_dir() -> PathBuf {
    let dir = xdg_base_dir("XDG_CONFIG_HOME", &[".config"]).join("trendsea");
    let _ = fs::create_dir_all(&dir);
    dir
}

/// Log directory under the config dir.
pub fn logs_dir() -> PathBuf {
    let dir = config_dir().join("logs");
    let _ = fs::create_dir_all(&dir);
    dir
}

/// State directory (`~/.local/state/trendsea`) for snapshot and blog
/// artifacts, created on demand.
pub fn state_dir() -> PathBuf {
    let dir = xdg_base_dir("XDG_STATE_HOME", &[".local", "state"]).join("trendsea");
    let _ = fs::create_dir_all(&dir);
    dir
}

/// User-tunable settings loaded from `settings.conf`.
#[derive(Clone, Debug)]
pub struct Settings {
    /// Feed proxy base URL; the country code and a cache-busting timestamp
    /// are appended as query parameters.
    pub proxy_url: String,
    /// Country whose feed is native to the display language.
    pub home_country: String,
    /// Country selected at startup.
    pub default_country: String,
    /// Model used for translation and analysis calls.
    pub flash_model: String,
    /// Model used for long-form blog drafting.
    pub pro_model: String,
    /// Column width of rendered snapshots.
    pub snapshot_width: u16,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            proxy_url: "https://djai.shop/rss-proxy".to_string(),
            home_country: crate::countries::HOME_COUNTRY.to_string(),
            default_country: crate::countries::HOME_COUNTRY.to_string(),
            flash_model: "gemini-3-flash-preview".to_string(),
            pro_model: "gemini-3-pro-preview".to_string(),
            snapshot_width: 120,
        }
    }
}

const SKELETON_SETTINGS: &str = "\
# Trendsea settings
#
# proxy_url        = https://djai.shop/rss-proxy
# home_country     = KR
# default_country  = KR
# flash_model      = gemini-3-flash-preview
# pro_model        = gemini-3-pro-preview
# snapshot_width   = 120
";

/// Load user settings from `settings.conf`, creating a commented skeleton on
/// first run. Falls back to [`Settings::default`] when missing or invalid.
pub fn settings() -> Settings {
    let path = config_dir().join("settings.conf");
    if !path.is_file() {
        let _ = fs::write(&path, SKELETON_SETTINGS);
    }
    let Ok(content) = fs::read_to_string(&path) else {
        return Settings::default();
    };
    parse_settings(&content)
}

fn strip_inline_comment(val: &str) -> &str {
    match val.find('#') {
        Some(i) => val[..i].trim(),
        None => val.trim(),
    }
}

pub(crate) fn parse_settings(content: &str) -> Settings {
    let mut out = Settings::default();
    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with("//") {
            continue;
        }
        let Some((raw_key, raw_val)) = trimmed.split_once('=') else {
            continue;
        };
        let key = raw_key.trim().to_lowercase().replace(['.', '-', ' '], "_");
        let val = strip_inline_comment(raw_val);
        if val.is_empty() {
            continue;
        }
        match key.as_str() {
            "proxy_url" => out.proxy_url = val.trim_end_matches('/').to_string(),
            "home_country" => out.home_country = val.to_ascii_uppercase(),
            "default_country" => out.default_country = val.to_ascii_uppercase(),
            "flash_model" => out.flash_model = val.to_string(),
            "pro_model" => out.pro_model = val.to_string(),
            "snapshot_width" => {
                if let Ok(v) = val.parse::<u16>() {
                    out.snapshot_width = v.clamp(40, 400);
                }
            }
            _ => {}
        }
    }
    out
}
