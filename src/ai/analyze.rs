//! On-demand AI analysis of a single trend.

use serde_json::json;
use tracing::warn;

use super::GeminiClient;
use crate::state::{AnalysisResult, TrendRecord};

/// Reason reported when no credential is configured. Stable marker the UI and
/// tests rely on.
pub const REASON_KEY_MISSING: &str = "API Key Missing";

fn key_missing_result() -> AnalysisResult {
    AnalysisResult {
        summary: "API 키가 설정되지 않아 AI 분석을 수행할 수 없습니다. 환경 변수에 API 키를 \
                  설정해주세요."
            .to_string(),
        reason: REASON_KEY_MISSING.to_string(),
        tags: vec!["Error".to_string(), "Config".to_string()],
    }
}

fn unavailable_result() -> AnalysisResult {
    AnalysisResult {
        summary: "현재 트래픽이 많거나 데이터를 분석할 수 없습니다. 잠시 후 다시 시도해주세요."
            .to_string(),
        reason: "Analysis Unavailable".to_string(),
        tags: vec!["오류".to_string(), "재시도".to_string()],
    }
}

/// Build the prompt context preferentially from news citations, falling back
/// to the bare description when none exist.
fn context_for(trend: &TrendRecord) -> String {
    if trend.news_items.is_empty() {
        if trend.description.is_empty() {
            return "No specific details available.".to_string();
        }
        return trend.description.clone();
    }
    trend
        .news_items
        .iter()
        .enumerate()
        .map(|(idx, news)| {
            format!(
                "Article {}:\nTitle: {}\nSource: {}\nSnippet: {}",
                idx + 1,
                news.title,
                news.source,
                news.snippet
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn build_prompt(trend: &TrendRecord) -> String {
    format!(
        "Analyze the following trending topic based on the provided news articles.\n\n\
         Topic: {}\n\n\
         Relevant News Context:\n{}\n\n\
         Provide a JSON response with the following fields:\n\
         1. 'summary': A concise, natural summary explaining WHY this is trending right now \
         (in Korean). Use the news details to be specific.\n\
         2. 'reason': The core category or driver (e.g., \"Breaking News\", \"Entertainment\", \
         \"Sports\", \"Politics\") (in Korean).\n\
         3. 'tags': 3 relevant and specific keywords/hashtags (in Korean). Do NOT include the \
         '#' symbol in the strings.",
        trend.title,
        context_for(trend)
    )
}

/// Analyze one trend into a structured summary/category/tag set.
///
/// The response is schema-constrained so deserialization needs no defensive
/// parsing beyond a top-level emptiness check. Never errors: a missing
/// credential or any call failure maps to a fixed, displayable result.
pub async fn analyze_trend(client: &GeminiClient, trend: &TrendRecord) -> AnalysisResult {
    if !client.is_configured() {
        return key_missing_result();
    }
    let config = json!({
        "responseMimeType": "application/json",
        "responseSchema": {
            "type": "OBJECT",
            "properties": {
                "summary": { "type": "STRING" },
                "reason": { "type": "STRING" },
                "tags": { "type": "ARRAY", "items": { "type": "STRING" } },
            },
            "required": ["summary", "reason", "tags"],
        },
    });
    match client
        .generate(&client.flash_model, &build_prompt(trend), Some(config))
        .await
    {
        Ok(text) => match serde_json::from_str::<AnalysisResult>(&text) {
            Ok(result) if !result.summary.is_empty() => result,
            Ok(_) => {
                warn!(title = %trend.title, "analysis response was empty");
                unavailable_result()
            }
            Err(e) => {
                warn!(error = %e, title = %trend.title, "analysis response did not match schema");
                unavailable_result()
            }
        },
        Err(e) => {
            warn!(error = %e, title = %trend.title, "analysis call failed");
            unavailable_result()
        }
    }
}
