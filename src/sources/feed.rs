//! Trends feed retrieval through the CORS proxy.
//!
//! The upstream feed provider rejects cross-origin and headless clients, so
//! requests go through a reverse proxy. The fetch contract is fail-soft: any
//! transport or parse failure resolves to the single-entry mock list and
//! callers never need an error branch.

use tracing::{info, warn};

use super::Result;
use crate::sources::parse::{looks_like_feed, parse_feed};
use crate::state::TrendRecord;

/// Degraded single-entry dataset served when the feed is unreachable. Flagged
/// with source `"System"` so the UI can show degraded-state messaging.
pub fn mock_trends() -> Vec<TrendRecord> {
    vec![TrendRecord {
        title: "Trends feed unavailable".to_string(),
        link: "#".to_string(),
        pub_date: chrono::Utc::now().to_rfc2822(),
        approx_traffic: "N/A".to_string(),
        description: "Unable to fetch real-time data due to network restrictions or proxy \
                      issues. Please try again later."
            .to_string(),
        image_url: "https://picsum.photos/800/600?grayscale".to_string(),
        source: "System".to_string(),
        news_items: Vec::new(),
    }]
}

async fn fetch_feed_body(http: &reqwest::Client, proxy_url: &str, geo: &str) -> Result<String> {
    // Cache-busting timestamp matches browser-client behavior; the proxy
    // caches aggressively otherwise.
    let t = chrono::Utc::now().timestamp_millis();
    let url = format!("{proxy_url}?geo={geo}&t={t}");
    let resp = http.get(&url).send().await?.error_for_status()?;
    Ok(resp.text().await?)
}

/// Fetch the trending-topics feed for `geo`.
///
/// One attempt, no retry: failures resolve immediately to [`mock_trends`].
/// A reachable but legitimately empty feed yields an empty list instead.
pub async fn fetch_trends(
    http: &reqwest::Client,
    proxy_url: &str,
    geo: &str,
) -> Vec<TrendRecord> {
    match fetch_feed_body(http, proxy_url, geo).await {
        Ok(body) if looks_like_feed(&body) => {
            let trends = parse_feed(&body);
            info!(geo, count = trends.len(), "fetched trends feed");
            trends
        }
        Ok(body) => {
            warn!(geo, bytes = body.len(), "proxy returned non-feed payload");
            mock_trends()
        }
        Err(e) => {
            warn!(geo, error = %e, "failed to fetch trends feed");
            mock_trends()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_list_is_single_system_entry() {
        let mock = mock_trends();
        assert_eq!(mock.len(), 1);
        assert_eq!(mock[0].source, "System");
        assert!(mock[0].news_items.is_empty());
    }

    #[test]
    fn non_feed_body_resolves_to_mock() {
        // Exercise the validation half of the fail-soft branch directly; the
        // transport half is covered by reqwest's own error paths.
        let body = "<html>502 Bad Gateway</html>";
        assert!(!looks_like_feed(body));
    }
}
