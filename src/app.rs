//! Application runtime (terminal lifecycle, async workers, and event loop).
//!
//! This module owns the entire TUI runtime so the binary entrypoint stays
//! minimal. Workers communicate with the event loop over unbounded channels;
//! every outcome carries the token of the request that produced it so the
//! loop can discard anything a newer request has superseded.

use std::time::{Duration, Instant};

type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

use crossterm::{
    event,
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::{select, sync::mpsc};
use tracing::info;

use crate::ai::GeminiClient;
use crate::args::Args;
use crate::state::*;
use crate::ui::draw;

fn setup_terminal() -> Result<()> {
    enable_raw_mode()?;
    execute!(std::io::stdout(), EnterAlternateScreen)?;
    Ok(())
}

fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(std::io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}

/// Start the dashboard runtime and run the main event loop.
///
/// Initializes the terminal, spawns the feed/translate/analyze/blog workers,
/// performs the initial load, and drives rendering until quit. Returns
/// `Ok(())` on normal shutdown or an error when terminal setup fails.
pub async fn run(args: Args) -> Result<()> {
    let settings = crate::theme::settings();
    let client = GeminiClient::from_env(&settings);
    if !client.is_configured() {
        info!("no API key found; translation, analysis, and blog drafting disabled");
    }

    let mut app = AppState {
        country: args
            .country
            .as_deref()
            .unwrap_or(&settings.default_country)
            .to_ascii_uppercase(),
        home_country: settings.home_country.clone(),
        offline: args.offline,
        ..AppState::default()
    };

    setup_terminal()?;
    let backend = CrosstermBackend::new(std::io::stdout());
    let mut terminal = Terminal::new(backend)?;

    // Worker channels: requests flow out of the event loop, outcomes flow in.
    let (load_tx, mut load_req_rx) = mpsc::unbounded_channel::<LoadRequest>();
    let (loaded_tx, mut loaded_rx) = mpsc::unbounded_channel::<LoadOutcome>();
    let (xlate_tx, mut xlate_req_rx) = mpsc::unbounded_channel::<TranslateRequest>();
    let (xlated_tx, mut xlated_rx) = mpsc::unbounded_channel::<TranslateOutcome>();
    let (analyze_tx, mut analyze_req_rx) = mpsc::unbounded_channel::<AnalyzeRequest>();
    let (analyzed_tx, mut analyzed_rx) = mpsc::unbounded_channel::<AnalysisOutcome>();
    let (blog_tx, mut blog_req_rx) = mpsc::unbounded_channel::<BlogRequest>();
    let (blogged_tx, mut blogged_rx) = mpsc::unbounded_channel::<BlogOutcome>();

    // Feed loader
    {
        let http = reqwest::Client::new();
        let proxy_url = settings.proxy_url.clone();
        let offline = args.offline;
        tokio::spawn(async move {
            while let Some(req) = load_req_rx.recv().await {
                let trends = if offline {
                    crate::sources::mock_trends()
                } else {
                    crate::sources::fetch_trends(&http, &proxy_url, &req.geo).await
                };
                let _ = loaded_tx.send(LoadOutcome { id: req.id, trends });
            }
        });
    }

    // Translator
    {
        let client = client.clone();
        tokio::spawn(async move {
            while let Some(req) = xlate_req_rx.recv().await {
                let trends = crate::ai::translate::translate_trends(&client, req.trends).await;
                let _ = xlated_tx.send(TranslateOutcome { id: req.id, trends });
            }
        });
    }

    // Analyzer
    {
        let client = client.clone();
        tokio::spawn(async move {
            while let Some(req) = analyze_req_rx.recv().await {
                let result = crate::ai::analyze::analyze_trend(&client, &req.trend).await;
                let _ = analyzed_tx.send(AnalysisOutcome {
                    token: req.token,
                    result,
                });
            }
        });
    }

    // Blog drafter
    {
        let client = client.clone();
        tokio::spawn(async move {
            while let Some(req) = blog_req_rx.recv().await {
                let content = crate::ai::blog::generate_blog_post(&client, &req.trends).await;
                let _ = blogged_tx.send(BlogOutcome {
                    token: req.token,
                    content,
                });
            }
        });
    }

    // Input reader: crossterm polling stays on a blocking thread.
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<event::Event>();
    std::thread::spawn(move || {
        loop {
            if let Ok(true) = event::poll(Duration::from_millis(50))
                && let Ok(ev) = event::read()
            {
                if event_tx.send(ev).is_err() {
                    break;
                }
            }
        }
    });

    // Redraw tick (header clock, toast expiry, spinner states).
    let (tick_tx, mut tick_rx) = mpsc::unbounded_channel::<()>();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_millis(200));
        loop {
            interval.tick().await;
            if tick_tx.send(()).is_err() {
                break;
            }
        }
    });

    let start_country = app.country.clone();
    crate::logic::change_country(&mut app, &start_country, &load_tx);

    loop {
        let _ = terminal.draw(|f| draw(f, &mut app));

        select! {
            Some(ev) = event_rx.recv() => {
                if crate::events::handle_event(
                    ev, &mut app, &settings,
                    &load_tx, &xlate_tx, &analyze_tx, &blog_tx,
                ) {
                    break;
                }
            }
            Some(outcome) = loaded_rx.recv() => {
                crate::logic::on_trends_loaded(&mut app, outcome, &xlate_tx);
            }
            Some(outcome) = xlated_rx.recv() => {
                crate::logic::on_translated(&mut app, outcome);
            }
            Some(outcome) = analyzed_rx.recv() => {
                crate::logic::on_analysis(&mut app, outcome);
            }
            Some(outcome) = blogged_rx.recv() => {
                crate::logic::on_blog_ready(&mut app, outcome);
            }
            Some(_) = tick_rx.recv() => {
                if let Some(deadline) = app.toast_expires_at
                    && Instant::now() >= deadline
                {
                    app.toast_message = None;
                    app.toast_expires_at = None;
                }
            }
        }
    }

    restore_terminal()?;
    Ok(())
}
