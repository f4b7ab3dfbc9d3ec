//! AI-authored blog draft generation from the visible trends.

use tracing::warn;

use super::GeminiClient;
use crate::state::TrendRecord;

/// Literal token the model embeds where the dashboard snapshot belongs.
pub const SCREENSHOT_PLACEHOLDER: &str = "{{SCREENSHOT_PLACEHOLDER}}";

/// Replacement written into exported drafts where no inline image can travel
/// with the text.
pub const UPLOAD_INSTRUCTION: &str = "(여기에 대시보드 스크린샷을 업로드하세요)";

/// Only the leading trends feed the draft; bounds prompt size.
const TOP_TRENDS: usize = 10;

fn not_configured_result() -> String {
    "API 키가 설정되지 않았습니다.".to_string()
}

fn failure_result() -> String {
    "블로그 글을 생성하는 중 오류가 발생했습니다.".to_string()
}

fn build_prompt(trends: &[TrendRecord]) -> String {
    let now = chrono::Local::now();
    let date_str = now.format("%Y년 %m월 %d일 (%a)").to_string();
    let time_str = now.format("%H:%M").to_string();

    let context = trends
        .iter()
        .take(TOP_TRENDS)
        .enumerate()
        .map(|(i, t)| {
            let info = t
                .news_items
                .first()
                .map(|n| n.title.clone())
                .unwrap_or_else(|| t.description.clone());
            format!(
                "{}. {} (Traffic: {})\n   Info: {}",
                i + 1,
                t.title,
                t.approx_traffic,
                info
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    format!(
        "You are a professional Tech & Lifestyle blogger in South Korea.\n\
         Write a blog post about today's top {TOP_TRENDS} real-time search trends.\n\n\
         Target Date: {date_str}\n\
         Target Time: {time_str}\n\n\
         Trends Data:\n{context}\n\n\
         Requirements:\n\
         1. **Format**: Use **Markdown** format.\n\
         2. **Title**: Catchy, includes date ({date_str}) and time ({time_str}).\n\
         3. **Structure**:\n\
            - **Introduction**: Mention the current date and time explicitly.\n\
            - **Image Placeholder**: Insert \"![Today's Trends]({SCREENSHOT_PLACEHOLDER})\" after intro.\n\
            - **Body**: List Top {TOP_TRENDS} trends.\n\
            - **Conclusion**: Wrap up.\n\
            - **Hashtags**: List at end.\n\n\
         Style:\n\
         - \"해요체\" (friendly polite).\n\
         - Short paragraphs."
    )
}

/// Strip a Markdown code-fence wrapper the model may have added around the
/// whole draft.
pub fn strip_fence(content: &str) -> String {
    let mut t = content.trim();
    for prefix in ["```markdown", "```md", "```"] {
        if let Some(rest) = t.strip_prefix(prefix) {
            t = rest.trim_start();
            break;
        }
    }
    if let Some(rest) = t.strip_suffix("```") {
        t = rest.trim_end();
    }
    t.to_string()
}

/// Produce the exportable draft text: the placeholder token becomes a literal
/// upload instruction, since the captured image cannot ride along in text.
pub fn export_text(content: &str) -> String {
    content.replace(SCREENSHOT_PLACEHOLDER, UPLOAD_INSTRUCTION)
}

/// Request a long-form Markdown draft covering the top trends.
///
/// Unconstrained free text (no schema); fail-soft to a displayable message in
/// the home language.
pub async fn generate_blog_post(client: &GeminiClient, trends: &[TrendRecord]) -> String {
    if !client.is_configured() {
        return not_configured_result();
    }
    match client
        .generate(&client.pro_model, &build_prompt(trends), None)
        .await
    {
        Ok(content) => strip_fence(&content),
        Err(e) => {
            warn!(error = %e, "blog draft call failed");
            failure_result()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::NewsCitation;

    #[test]
    fn fence_stripping_handles_wrapped_and_plain_drafts() {
        assert_eq!(strip_fence("```markdown\n# Title\nbody\n```"), "# Title\nbody");
        assert_eq!(strip_fence("```\ntext\n```"), "text");
        assert_eq!(strip_fence("# Title\nbody"), "# Title\nbody");
    }

    #[test]
    fn export_replaces_placeholder_with_upload_instruction() {
        let draft = format!("intro\n![Today's Trends]({SCREENSHOT_PLACEHOLDER})\nbody");
        let out = export_text(&draft);
        assert!(out.contains(UPLOAD_INSTRUCTION));
        assert!(!out.contains(SCREENSHOT_PLACEHOLDER));
    }

    #[test]
    fn prompt_caps_at_top_ten_and_prefers_first_citation() {
        let mut trends = Vec::new();
        for i in 0..15 {
            trends.push(TrendRecord {
                title: format!("topic {i}"),
                news_items: vec![NewsCitation {
                    title: format!("news {i}"),
                    ..Default::default()
                }],
                ..Default::default()
            });
        }
        let prompt = build_prompt(&trends);
        assert!(prompt.contains("topic 9"));
        assert!(!prompt.contains("topic 10"));
        assert!(prompt.contains("news 0"));
        assert!(prompt.contains(SCREENSHOT_PLACEHOLDER));
    }

    #[test]
    fn unconfigured_client_returns_fixed_message() {
        let client = GeminiClient::disabled();
        let out = futures::executor::block_on(generate_blog_post(&client, &[]));
        assert_eq!(out, "API 키가 설정되지 않았습니다.");
    }
}
