//! View-state transitions for the dashboard.
//!
//! All state changes funnel through the intention-revealing operations here;
//! rendering code never pokes fields directly. Each fetch/translate sequence
//! carries a monotonically increasing token so a superseded request's late
//! response is discarded instead of overwriting newer state.

use tokio::sync::mpsc::UnboundedSender;
use tracing::debug;

use crate::state::{
    AnalysisOutcome, AnalyzeRequest, AppState, BlogOutcome, BlogRequest, LanguageMode,
    LoadOutcome, LoadRequest, TranslateOutcome, TranslateRequest,
};

/// Issue a fresh load for the currently selected country.
pub fn request_load(app: &mut AppState, load_tx: &UnboundedSender<LoadRequest>) {
    let id = app.next_load_id;
    app.next_load_id += 1;
    app.latest_load_id = id;
    app.loading = true;
    app.translating = false;
    app.trends.clear();
    // The previous batch must not survive into the new load's token scope: a
    // toggle pressed mid-flight would otherwise batch the old country's
    // trends into a request stamped with the fresh id.
    app.original_trends.clear();
    app.translated_trends = None;
    app.selected = 0;
    app.list_state.select(None);
    let _ = load_tx.send(LoadRequest {
        id,
        geo: app.country.clone(),
    });
}

/// Switch the dashboard to `code` and reload.
///
/// The home country always displays in the home language; any other country
/// defaults back to the original feed language until the user toggles.
pub fn change_country(app: &mut AppState, code: &str, load_tx: &UnboundedSender<LoadRequest>) {
    app.country = code.to_ascii_uppercase();
    app.language_mode = if app.at_home() {
        LanguageMode::Translated
    } else {
        LanguageMode::Original
    };
    request_load(app, load_tx);
}

/// Apply a completed fetch, chaining into translation when the translated
/// view is active for a foreign country.
pub fn on_trends_loaded(
    app: &mut AppState,
    outcome: LoadOutcome,
    xlate_tx: &UnboundedSender<TranslateRequest>,
) {
    if outcome.id != app.latest_load_id {
        debug!(
            stale = outcome.id,
            latest = app.latest_load_id,
            "discarding superseded load"
        );
        return;
    }
    app.loading = false;
    app.last_updated = Some(chrono::Local::now());
    app.original_trends = outcome.trends;
    app.trends = app.original_trends.clone();
    app.translated_trends = None;
    app.selected = 0;
    app.list_state
        .select(if app.trends.is_empty() { None } else { Some(0) });

    if !app.at_home()
        && app.language_mode == LanguageMode::Translated
        && !app.original_trends.is_empty()
    {
        app.translating = true;
        let _ = xlate_tx.send(TranslateRequest {
            id: outcome.id,
            trends: app.original_trends.clone(),
        });
    }
}

/// Swap the display language, reusing the cached translated list when it is
/// still warm so a double toggle costs exactly one remote call.
pub fn toggle_language(
    app: &mut AppState,
    mode: LanguageMode,
    xlate_tx: &UnboundedSender<TranslateRequest>,
) {
    if mode == app.language_mode || app.at_home() {
        return;
    }
    app.language_mode = mode;
    match mode {
        LanguageMode::Original => {
            app.trends = app.original_trends.clone();
        }
        LanguageMode::Translated => {
            if let Some(cached) = app.translated_trends.clone() {
                app.trends = cached;
            } else if !app.original_trends.is_empty() {
                app.translating = true;
                let _ = xlate_tx.send(TranslateRequest {
                    id: app.latest_load_id,
                    trends: app.original_trends.clone(),
                });
            }
        }
    }
}

/// Apply a completed translation; stale tokens are dropped.
pub fn on_translated(app: &mut AppState, outcome: TranslateOutcome) {
    if outcome.id != app.latest_load_id {
        debug!(
            stale = outcome.id,
            latest = app.latest_load_id,
            "discarding superseded translation"
        );
        return;
    }
    app.translating = false;
    app.translated_trends = Some(outcome.trends.clone());
    if app.language_mode == LanguageMode::Translated {
        app.trends = outcome.trends;
    }
}

/// Move the list highlight by `delta`, clamped to the trend list.
pub fn move_selection(app: &mut AppState, delta: i32) {
    if app.trends.is_empty() {
        return;
    }
    let last = app.trends.len() - 1;
    let next = if delta.is_negative() {
        app.selected.saturating_sub(delta.unsigned_abs() as usize)
    } else {
        (app.selected + delta as usize).min(last)
    };
    app.selected = next;
    app.list_state.select(Some(next));
}

/// Open the detail view for the highlighted trend and request its analysis.
pub fn select_trend(app: &mut AppState, analyze_tx: &UnboundedSender<AnalyzeRequest>) {
    let Some(trend) = app.trends.get(app.selected).cloned() else {
        return;
    };
    app.analysis_token += 1;
    app.selected_trend = Some(trend.clone());
    app.analysis = None;
    app.analyzing = true;
    let _ = analyze_tx.send(AnalyzeRequest {
        token: app.analysis_token,
        trend,
    });
}

/// Close the detail view; the transient analysis is discarded.
pub fn close_detail(app: &mut AppState) {
    app.selected_trend = None;
    app.analysis = None;
    app.analyzing = false;
}

/// Apply a completed analysis unless the detail view moved on.
pub fn on_analysis(app: &mut AppState, outcome: AnalysisOutcome) {
    if outcome.token != app.analysis_token || app.selected_trend.is_none() {
        return;
    }
    app.analyzing = false;
    app.analysis = Some(outcome.result);
}

/// Kick off the blog flow: the modal opens immediately behind a loading
/// placeholder, the capture result (possibly absent) is attached as-is, and
/// the draft request is dispatched. The draft never depends on the capture
/// having succeeded.
pub fn start_blog(
    app: &mut AppState,
    snapshot: Option<String>,
    blog_tx: &UnboundedSender<BlogRequest>,
) {
    app.blog_token += 1;
    app.blog_open = true;
    app.generating_blog = true;
    app.blog_content.clear();
    app.blog_image = snapshot;
    let _ = blog_tx.send(BlogRequest {
        token: app.blog_token,
        trends: app.trends.clone(),
    });
}

/// Apply a finished draft unless a newer blog run was started.
pub fn on_blog_ready(app: &mut AppState, outcome: BlogOutcome) {
    if outcome.token != app.blog_token {
        return;
    }
    app.generating_blog = false;
    app.blog_content = outcome.content;
}

/// Close the blog modal, keeping nothing of the run.
pub fn close_blog(app: &mut AppState) {
    app.blog_open = false;
    app.blog_content.clear();
    app.blog_image = None;
    app.generating_blog = false;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::TrendRecord;
    use tokio::sync::mpsc::{UnboundedReceiver, unbounded_channel};

    fn trends(titles: &[&str]) -> Vec<TrendRecord> {
        titles
            .iter()
            .map(|t| TrendRecord {
                title: (*t).to_string(),
                ..Default::default()
            })
            .collect()
    }

    fn drain<T>(rx: &mut UnboundedReceiver<T>) -> usize {
        let mut n = 0;
        while rx.try_recv().is_ok() {
            n += 1;
        }
        n
    }

    #[test]
    fn country_change_forces_home_language_and_away_default() {
        let (load_tx, mut load_rx) = unbounded_channel();
        let mut app = AppState::default();

        change_country(&mut app, "us", &load_tx);
        assert_eq!(app.country, "US");
        assert_eq!(app.language_mode, LanguageMode::Original);
        assert!(app.loading);

        // Toggle to translated abroad, then return home: home always forces
        // the translated-equivalent mode regardless of prior toggles.
        app.language_mode = LanguageMode::Translated;
        change_country(&mut app, "KR", &load_tx);
        assert_eq!(app.language_mode, LanguageMode::Translated);
        assert_eq!(drain(&mut load_rx), 2);
    }

    #[test]
    fn load_outcome_with_stale_token_is_discarded() {
        let (xlate_tx, _xlate_rx) = unbounded_channel();
        let (load_tx, _load_rx) = unbounded_channel();
        let mut app = AppState::default();

        change_country(&mut app, "US", &load_tx); // id 1
        change_country(&mut app, "JP", &load_tx); // id 2 supersedes

        on_trends_loaded(
            &mut app,
            crate::state::LoadOutcome {
                id: 1,
                trends: trends(&["stale"]),
            },
            &xlate_tx,
        );
        assert!(app.trends.is_empty());
        assert!(app.loading);

        on_trends_loaded(
            &mut app,
            crate::state::LoadOutcome {
                id: 2,
                trends: trends(&["fresh"]),
            },
            &xlate_tx,
        );
        assert_eq!(app.trends[0].title, "fresh");
        assert!(!app.loading);
    }

    #[test]
    fn loaded_home_feed_is_displayed_without_translation() {
        let (xlate_tx, mut xlate_rx) = unbounded_channel();
        let (load_tx, _load_rx) = unbounded_channel();
        let mut app = AppState::default();
        change_country(&mut app, "KR", &load_tx);

        let id = app.latest_load_id;
        on_trends_loaded(
            &mut app,
            crate::state::LoadOutcome {
                id,
                trends: trends(&["가", "나"]),
            },
            &xlate_tx,
        );
        assert_eq!(app.trends.len(), 2);
        assert_eq!(app.trends.len(), app.original_trends.len());
        assert!(!app.translating);
        assert_eq!(drain(&mut xlate_rx), 0);
    }

    #[test]
    fn double_toggle_with_warm_cache_makes_one_remote_call() {
        let (xlate_tx, mut xlate_rx) = unbounded_channel();
        let (load_tx, _load_rx) = unbounded_channel();
        let mut app = AppState::default();
        change_country(&mut app, "US", &load_tx);
        let id = app.latest_load_id;
        on_trends_loaded(
            &mut app,
            crate::state::LoadOutcome {
                id,
                trends: trends(&["one", "two"]),
            },
            &xlate_tx,
        );

        // First toggle to Translated issues the only remote call.
        toggle_language(&mut app, LanguageMode::Translated, &xlate_tx);
        assert!(app.translating);
        assert_eq!(drain(&mut xlate_rx), 1);
        on_translated(
            &mut app,
            TranslateOutcome {
                id,
                trends: trends(&["하나", "둘"]),
            },
        );
        assert_eq!(app.trends[0].title, "하나");

        // Translated -> Original -> Translated reuses the cache.
        toggle_language(&mut app, LanguageMode::Original, &xlate_tx);
        assert_eq!(app.trends[0].title, "one");
        toggle_language(&mut app, LanguageMode::Translated, &xlate_tx);
        assert_eq!(app.trends[0].title, "하나");
        assert_eq!(drain(&mut xlate_rx), 0);
    }

    #[test]
    fn translation_never_changes_length_or_order() {
        let (xlate_tx, _xlate_rx) = unbounded_channel();
        let (load_tx, _load_rx) = unbounded_channel();
        let mut app = AppState::default();
        change_country(&mut app, "FR", &load_tx);
        let id = app.latest_load_id;
        on_trends_loaded(
            &mut app,
            crate::state::LoadOutcome {
                id,
                trends: trends(&["a", "b", "c"]),
            },
            &xlate_tx,
        );
        on_translated(
            &mut app,
            TranslateOutcome {
                id,
                trends: trends(&["a", "b", "c"]),
            },
        );
        assert_eq!(app.trends.len(), app.original_trends.len());
    }

    #[test]
    fn stale_analysis_is_dropped_after_reselect() {
        let (analyze_tx, mut analyze_rx) = unbounded_channel();
        let mut app = AppState::default();
        app.trends = trends(&["x", "y"]);
        app.list_state.select(Some(0));

        select_trend(&mut app, &analyze_tx);
        let first_token = app.analysis_token;
        move_selection(&mut app, 1);
        select_trend(&mut app, &analyze_tx);
        assert_eq!(drain(&mut analyze_rx), 2);

        on_analysis(
            &mut app,
            AnalysisOutcome {
                token: first_token,
                result: crate::state::AnalysisResult {
                    summary: "stale".into(),
                    ..Default::default()
                },
            },
        );
        assert!(app.analysis.is_none());
        assert!(app.analyzing);
    }

    #[test]
    fn blog_flow_tolerates_failed_capture() {
        let (blog_tx, mut blog_rx) = unbounded_channel();
        let mut app = AppState::default();
        app.trends = trends(&["a"]);

        start_blog(&mut app, None, &blog_tx);
        assert!(app.blog_open);
        assert!(app.generating_blog);
        assert!(app.blog_image.is_none());
        assert_eq!(drain(&mut blog_rx), 1);

        let token = app.blog_token;
        on_blog_ready(
            &mut app,
            BlogOutcome {
                token,
                content: "# draft".into(),
            },
        );
        assert!(app.blog_open);
        assert!(!app.generating_blog);
        assert_eq!(app.blog_content, "# draft");
        assert!(app.blog_image.is_none());
    }

    #[test]
    fn toggle_during_load_cannot_batch_the_previous_countrys_trends() {
        let (load_tx, _load_rx) = unbounded_channel();
        let (xlate_tx, mut xlate_rx) = unbounded_channel();
        let mut app = AppState::default();

        change_country(&mut app, "US", &load_tx);
        let us_id = app.latest_load_id;
        on_trends_loaded(
            &mut app,
            crate::state::LoadOutcome {
                id: us_id,
                trends: trends(&["us one"]),
            },
            &xlate_tx,
        );

        // New fetch in flight: the old batch must already be gone, so the
        // toggle has nothing to send under the fresh token.
        change_country(&mut app, "JP", &load_tx);
        let jp_id = app.latest_load_id;
        toggle_language(&mut app, LanguageMode::Translated, &xlate_tx);
        assert_eq!(drain(&mut xlate_rx), 0);
        assert!(app.loading);
        assert!(!app.translating);

        // Even a forged stale-content outcome carrying the fresh id cannot
        // put the old country's titles on the new board.
        on_translated(
            &mut app,
            TranslateOutcome {
                id: jp_id,
                trends: trends(&["미국 하나"]),
            },
        );
        on_trends_loaded(
            &mut app,
            crate::state::LoadOutcome {
                id: jp_id,
                trends: trends(&["jp one", "jp two"]),
            },
            &xlate_tx,
        );
        assert_eq!(app.country, "JP");
        assert_eq!(app.trends.len(), app.original_trends.len());
        assert_eq!(app.original_trends[0].title, "jp one");
    }

    #[test]
    fn selection_clamps_at_list_edges() {
        let mut app = AppState::default();
        app.trends = trends(&["a", "b", "c"]);
        move_selection(&mut app, -1);
        assert_eq!(app.selected, 0);
        move_selection(&mut app, 10);
        assert_eq!(app.selected, 2);
    }
}
