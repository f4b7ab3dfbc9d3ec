//! Batch localization of trend titles.
//!
//! All visible trends go into a single structured request rather than one
//! call per trend: each payload entry carries the trend title plus up to the
//! first two news-citation titles, keyed by a positional id. Responses are
//! matched back by that id, so a reordered or partial response leaves the
//! unmatched records untouched instead of dropping them.

use serde_json::{Value, json};
use tracing::warn;

use super::GeminiClient;
use crate::state::TrendRecord;
use crate::util::{s, str_arr};

/// How many news-citation titles per trend are included in the translation
/// payload. Bounds request size at the cost of untranslated later citations.
const NEWS_TITLES_PER_TREND: usize = 2;

fn build_payload(trends: &[TrendRecord]) -> Value {
    let entries: Vec<Value> = trends
        .iter()
        .enumerate()
        .map(|(id, t)| {
            let n: Vec<&str> = t
                .news_items
                .iter()
                .take(NEWS_TITLES_PER_TREND)
                .map(|c| c.title.as_str())
                .collect();
            json!({ "id": id, "t": t.title, "n": n })
        })
        .collect();
    Value::Array(entries)
}

fn build_prompt(payload: &Value) -> String {
    format!(
        "You are a professional news translator. Translate the following list of trending \
         topics and news headlines from their source language (English, Japanese, French, \
         etc.) to Korean.\n\
         - Ensure the translation is natural and suitable for a news dashboard.\n\
         - Maintain the proper nouns (names of people, companies) correctly in Korean.\n\n\
         Input JSON: {payload}\n\n\
         Return ONLY a JSON array with the exact same structure:\n\
         [{{ \"id\": number, \"t\": \"Korean Title\", \"n\": [\"Korean News 1\", \"Korean News 2\"] }}, ...]"
    )
}

/// Merge a translation response back onto the input records by positional id.
///
/// Output length and order always equal the input; records whose id is absent
/// from the response (or whose response entry is malformed) pass through
/// untouched. Visible because the matching rules are the contract worth
/// pinning in tests.
pub fn apply_translations(trends: &[TrendRecord], response: &Value) -> Vec<TrendRecord> {
    let entries = response.as_array().cloned().unwrap_or_default();
    trends
        .iter()
        .enumerate()
        .map(|(idx, trend)| {
            let Some(entry) = entries
                .iter()
                .find(|e| e.get("id").and_then(Value::as_u64) == Some(idx as u64))
            else {
                return trend.clone();
            };
            let mut out = trend.clone();
            let title = s(entry, "t");
            if !title.is_empty() {
                out.title = title;
            }
            for (i, translated) in str_arr(entry, "n").into_iter().enumerate() {
                if let Some(item) = out.news_items.get_mut(i)
                    && !translated.is_empty()
                {
                    item.title = translated;
                }
            }
            out
        })
        .collect()
}

/// Rewrite trend titles (and the first two news titles each) into the home
/// language. Fail-soft: any failure returns the input unchanged.
pub async fn translate_trends(
    client: &GeminiClient,
    trends: Vec<TrendRecord>,
) -> Vec<TrendRecord> {
    if !client.is_configured() || trends.is_empty() {
        return trends;
    }
    let payload = build_payload(&trends);
    let prompt = build_prompt(&payload);
    let config = json!({ "responseMimeType": "application/json" });
    match client
        .generate(&client.flash_model, &prompt, Some(config))
        .await
    {
        Ok(text) => match serde_json::from_str::<Value>(fence_trim(&text)) {
            Ok(parsed) => apply_translations(&trends, &parsed),
            Err(e) => {
                warn!(error = %e, "translation response was not valid JSON");
                trends
            }
        },
        Err(e) => {
            warn!(error = %e, "translation call failed");
            trends
        }
    }
}

/// Models occasionally wrap JSON in a Markdown code fence despite the MIME
/// hint; trim it before parsing.
fn fence_trim(text: &str) -> &str {
    let t = text.trim();
    let t = t
        .strip_prefix("```json")
        .or_else(|| t.strip_prefix("```"))
        .unwrap_or(t);
    t.strip_suffix("```").unwrap_or(t).trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::NewsCitation;

    fn trend(title: &str, news: &[&str]) -> TrendRecord {
        TrendRecord {
            title: title.to_string(),
            link: "https://example.org".to_string(),
            approx_traffic: "100+".to_string(),
            news_items: news
                .iter()
                .map(|t| NewsCitation {
                    title: (*t).to_string(),
                    ..Default::default()
                })
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn payload_caps_news_titles_at_two() {
        let trends = vec![trend("a", &["n1", "n2", "n3", "n4"])];
        let payload = build_payload(&trends);
        let n = payload[0]["n"].as_array().map(Vec::len);
        assert_eq!(n, Some(2));
        assert_eq!(payload[0]["id"], 0);
    }

    #[test]
    fn apply_preserves_length_and_order_on_reordered_response() {
        let trends = vec![trend("first", &[]), trend("second", &[]), trend("third", &[])];
        let response = serde_json::json!([
            { "id": 2, "t": "셋째", "n": [] },
            { "id": 0, "t": "첫째", "n": [] },
        ]);
        let out = apply_translations(&trends, &response);
        assert_eq!(out.len(), 3);
        assert_eq!(out[0].title, "첫째");
        // id 1 missing from the response: passed through untouched.
        assert_eq!(out[1].title, "second");
        assert_eq!(out[2].title, "셋째");
    }

    #[test]
    fn apply_rewrites_only_text_fields() {
        let trends = vec![trend("topic", &["headline a", "headline b", "headline c"])];
        let response = serde_json::json!([
            { "id": 0, "t": "주제", "n": ["제목 가", "제목 나"] }
        ]);
        let out = apply_translations(&trends, &response);
        assert_eq!(out[0].title, "주제");
        assert_eq!(out[0].news_items[0].title, "제목 가");
        assert_eq!(out[0].news_items[1].title, "제목 나");
        // Third citation is beyond the batch window and keeps its title.
        assert_eq!(out[0].news_items[2].title, "headline c");
        // Non-text fields carry over unchanged.
        assert_eq!(out[0].link, trends[0].link);
        assert_eq!(out[0].approx_traffic, trends[0].approx_traffic);
    }

    #[test]
    fn apply_with_garbage_response_returns_input() {
        let trends = vec![trend("a", &[]), trend("b", &[])];
        let out = apply_translations(&trends, &serde_json::json!({"not": "an array"}));
        assert_eq!(out, trends);
    }

    #[test]
    fn unconfigured_client_passes_input_through() {
        let trends = vec![trend("a", &[]), trend("b", &[])];
        let client = GeminiClient::disabled();
        let out = futures::executor::block_on(translate_trends(&client, trends.clone()));
        assert_eq!(out, trends);
    }

    #[test]
    fn fenced_json_is_trimmed_before_parsing() {
        assert_eq!(fence_trim("```json\n[1]\n```"), "[1]");
        assert_eq!(fence_trim("[1]"), "[1]");
    }
}
