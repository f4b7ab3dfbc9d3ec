//! Dashboard snapshot capture and artifact export.
//!
//! The capture renders the dashboard into an off-screen buffer of fixed
//! width and serializes it row by row: every cell resolves to a concrete
//! glyph (blank cells become spaces), so the artifact is opaque and line
//! lengths are uniform regardless of the live terminal's size or theme.

use std::io::Write as _;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use ratatui::{Terminal, backend::TestBackend};
use tracing::{info, warn};

use crate::state::AppState;
use crate::util::file_stamp;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Render the current dashboard into a plain-text raster.
///
/// Fail-soft: `None` on any render failure. The caller decides whether that
/// is alert-worthy (direct screenshot) or tolerable (blog flow).
pub fn capture(app: &mut AppState, width: u16) -> Option<String> {
    let width = width.max(40);
    // Two rows per trend plus header/footer chrome.
    let rows = u16::try_from(app.trends.len()).unwrap_or(u16::MAX);
    let height = (rows.saturating_mul(2).saturating_add(10)).clamp(16, 300);

    let backend = TestBackend::new(width, height);
    let mut terminal = match Terminal::new(backend) {
        Ok(t) => t,
        Err(e) => {
            warn!(error = %e, "snapshot terminal init failed");
            return None;
        }
    };
    if let Err(e) = terminal.draw(|f| crate::ui::draw_dashboard(f, app)) {
        warn!(error = %e, "snapshot render failed");
        return None;
    }

    let buffer = terminal.backend().buffer();
    let mut out = String::with_capacity((width as usize + 1) * height as usize);
    for y in 0..height {
        for x in 0..width {
            match buffer.cell((x, y)) {
                Some(cell) => out.push_str(cell.symbol()),
                None => out.push(' '),
            }
        }
        out.push('\n');
    }
    Some(out)
}

/// Write a capture to a timestamped file under the state directory.
pub fn save(content: &str) -> Result<PathBuf> {
    let path = crate::theme::state_dir().join(format!("trendsea_snapshot_{}.txt", file_stamp()));
    std::fs::write(&path, content)?;
    info!(path = %path.display(), bytes = content.len(), "snapshot saved");
    Ok(path)
}

/// Write a blog draft to a timestamped Markdown file under the state
/// directory.
pub fn save_blog(content: &str) -> Result<PathBuf> {
    let path = crate::theme::state_dir().join(format!("trendsea_blog_{}.md", file_stamp()));
    std::fs::write(&path, content)?;
    info!(path = %path.display(), bytes = content.len(), "blog draft saved");
    Ok(path)
}

/// Copy text to the system clipboard. Wayland -> `wl-copy`; X11 -> `xclip`.
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    let (program, args): (&str, &[&str]) = if which::which("wl-copy").is_ok() {
        ("wl-copy", &[])
    } else if which::which("xclip").is_ok() {
        ("xclip", &["-selection", "clipboard"])
    } else {
        return Err("no clipboard tool found (install wl-clipboard or xclip)".into());
    };
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;
    if let Some(stdin) = child.stdin.as_mut() {
        stdin.write_all(text.as_bytes())?;
    }
    let status = child.wait()?;
    if !status.success() {
        return Err(format!("{program} exited with {status}").into());
    }
    Ok(())
}
