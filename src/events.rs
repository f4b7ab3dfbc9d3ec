//! Keyboard handling for the dashboard.
//!
//! Converts raw `crossterm` events into mutations on [`AppState`] and into
//! requests on the worker channels. All functions here are synchronous; any
//! long-running work happens in the worker tasks, so input stays responsive.

use crossterm::event::{Event as CEvent, KeyCode, KeyEventKind};
use tokio::sync::mpsc;

use crate::state::{
    AnalyzeRequest, AppState, BlogRequest, LanguageMode, LoadRequest, Modal, TranslateRequest,
};
use crate::theme::Settings;

/// Handle one terminal event. Returns `true` when the app should quit.
///
/// Channel send failures are ignored so input handling stays robust across
/// worker shutdowns.
pub fn handle_event(
    ev: CEvent,
    app: &mut AppState,
    settings: &Settings,
    load_tx: &mpsc::UnboundedSender<LoadRequest>,
    xlate_tx: &mpsc::UnboundedSender<TranslateRequest>,
    analyze_tx: &mpsc::UnboundedSender<AnalyzeRequest>,
    blog_tx: &mpsc::UnboundedSender<BlogRequest>,
) -> bool {
    let CEvent::Key(ke) = ev else {
        return false;
    };
    if ke.kind != KeyEventKind::Press {
        return false;
    }

    // Modal handling first; an open overlay swallows all input.
    match &app.modal {
        Modal::Alert { .. } => {
            if matches!(ke.code, KeyCode::Enter | KeyCode::Esc) {
                app.modal = Modal::None;
            }
            return false;
        }
        Modal::CountryPicker { selected } => {
            let mut sel = *selected;
            match ke.code {
                KeyCode::Esc => {
                    app.modal = Modal::None;
                }
                KeyCode::Up | KeyCode::Char('k') => {
                    sel = sel.saturating_sub(1);
                    app.modal = Modal::CountryPicker { selected: sel };
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    sel = (sel + 1).min(crate::countries::COUNTRIES.len() - 1);
                    app.modal = Modal::CountryPicker { selected: sel };
                }
                KeyCode::Enter => {
                    let code = crate::countries::COUNTRIES[sel].code.to_string();
                    app.modal = Modal::None;
                    crate::logic::change_country(app, &code, load_tx);
                }
                _ => {}
            }
            return false;
        }
        Modal::None => {}
    }

    // Blog modal
    if app.blog_open {
        match ke.code {
            KeyCode::Esc => crate::logic::close_blog(app),
            KeyCode::Char('e') if !app.generating_blog => export_blog(app),
            _ => {}
        }
        return false;
    }

    // Detail view
    if app.selected_trend.is_some() {
        if matches!(ke.code, KeyCode::Esc | KeyCode::Char('q')) {
            crate::logic::close_detail(app);
        }
        return false;
    }

    match ke.code {
        KeyCode::Char('q') => return true,
        KeyCode::Char('r') => crate::logic::request_load(app, load_tx),
        KeyCode::Char('c') => {
            app.modal = Modal::CountryPicker {
                selected: crate::countries::position(&app.country),
            };
        }
        KeyCode::Char('t') => {
            let next = match app.language_mode {
                LanguageMode::Original => LanguageMode::Translated,
                LanguageMode::Translated => LanguageMode::Original,
            };
            crate::logic::toggle_language(app, next, xlate_tx);
        }
        KeyCode::Up | KeyCode::Char('k') => crate::logic::move_selection(app, -1),
        KeyCode::Down | KeyCode::Char('j') => crate::logic::move_selection(app, 1),
        KeyCode::Enter => crate::logic::select_trend(app, analyze_tx),
        KeyCode::Char('s') => save_snapshot(app, settings),
        KeyCode::Char('b') => {
            if !app.trends.is_empty() {
                let shot = crate::snapshot::capture(app, settings.snapshot_width);
                crate::logic::start_blog(app, shot, blog_tx);
            }
        }
        _ => {}
    }
    false
}

/// Capture the board and write it to a timestamped file; a failed capture or
/// write surfaces as an alert instead of aborting anything.
fn save_snapshot(app: &mut AppState, settings: &Settings) {
    let Some(shot) = crate::snapshot::capture(app, settings.snapshot_width) else {
        app.modal = Modal::Alert {
            message: "캡처에 실패했습니다.".to_string(),
        };
        return;
    };
    match crate::snapshot::save(&shot) {
        Ok(path) => app.toast(format!("캡처 저장됨: {}", path.display()), 4),
        Err(e) => {
            app.modal = Modal::Alert {
                message: format!("캡처 저장 실패: {e}"),
            };
        }
    }
}

/// Save the finished draft and copy the export text to the clipboard.
fn export_blog(app: &mut AppState) {
    if app.blog_content.is_empty() {
        return;
    }
    let text = crate::ai::blog::export_text(&app.blog_content);
    match crate::snapshot::save_blog(&text) {
        Ok(path) => {
            if let Err(e) = crate::snapshot::copy_to_clipboard(&text) {
                app.modal = Modal::Alert {
                    message: format!("저장됨: {} (클립보드 복사 실패: {e})", path.display()),
                };
            } else {
                app.toast(format!("블로그 저장됨: {}", path.display()), 4);
            }
        }
        Err(e) => {
            app.modal = Modal::Alert {
                message: format!("블로그 저장 실패: {e}"),
            };
        }
    }
}
