//! Trends feed parsing.
//!
//! The upstream feed is RSS with a `ht:` namespace carrying trend-specific
//! extensions (approximate traffic, picture, nested news items). Items are
//! parsed iteratively in document order; feed order is treated as rank order.

use scraper::{Html, Selector};
use tracing::debug;

use crate::state::{NewsCitation, TrendRecord};
use crate::util::{extract_between, percent_encode, unwrap_cdata, xml_unescape};

/// Minimal validation that a response body is the expected feed markup.
pub fn looks_like_feed(body: &str) -> bool {
    body.contains("<rss") || body.contains("<channel>")
}

/// Parse raw feed markup into trend records in document order.
///
/// A feed with zero `<item>` entries yields an empty list; the degraded mock
/// list is reserved for transport and parse failures, which the fetcher
/// handles.
pub fn parse_feed(xml: &str) -> Vec<TrendRecord> {
    let mut out = Vec::new();
    let mut pos = 0;
    while let Some(start) = xml[pos..].find("<item>") {
        let s = pos + start;
        let end = xml[s..].find("</item>").map_or(xml.len(), |e| s + e + 7);
        out.push(parse_item(&xml[s..end]));
        pos = end;
    }
    debug!(items = out.len(), "parsed trends feed");
    out
}

fn parse_item(chunk: &str) -> TrendRecord {
    let title = text_tag(chunk, "title").unwrap_or_else(|| "No Title".to_string());
    let link = text_tag(chunk, "link").unwrap_or_else(|| "#".to_string());
    let pub_date =
        text_tag(chunk, "pubDate").unwrap_or_else(|| chrono::Utc::now().to_rfc2822());
    let raw_description = text_tag(chunk, "description").unwrap_or_default();

    let approx_traffic = namespaced_tag(chunk, "approx_traffic").unwrap_or_default();
    let picture = namespaced_tag(chunk, "picture").unwrap_or_default();
    let picture_source = namespaced_tag(chunk, "picture_source").unwrap_or_default();

    let news_items = parse_news_items(chunk);

    // The feed escapes nested markup inside <description>; unescape once so
    // both image extraction and text stripping see real HTML.
    let description_html = xml_unescape(&raw_description);
    let image_url = resolve_image(&picture, &description_html, &title);
    let description = strip_markup(&description_html);

    let source = if picture_source.is_empty() {
        "Google Trends".to_string()
    } else {
        picture_source
    };

    TrendRecord {
        title,
        link,
        pub_date,
        approx_traffic,
        description,
        image_url,
        source,
        news_items,
    }
}

/// Extract the text content of `<tag>` within `chunk`, unwrapping CDATA and
/// decoding entities. Empty content counts as absent.
fn text_tag(chunk: &str, tag: &str) -> Option<String> {
    let open = format!("<{tag}>");
    let close = format!("</{tag}>");
    let inner = extract_between(chunk, &open, &close)?;
    let cleaned = xml_unescape(&unwrap_cdata(&inner));
    let trimmed = cleaned.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Extract a trend-extension tag, preferring the `ht:`-namespaced form and
/// falling back to the same-named plain tag.
fn namespaced_tag(chunk: &str, tag: &str) -> Option<String> {
    text_tag(chunk, &format!("ht:{tag}")).or_else(|| text_tag(chunk, tag))
}

fn parse_news_items(chunk: &str) -> Vec<NewsCitation> {
    let mut items = Vec::new();
    let mut pos = 0;
    while let Some(start) = chunk[pos..].find("<ht:news_item>") {
        let s = pos + start;
        let end = chunk[s..]
            .find("</ht:news_item>")
            .map_or(chunk.len(), |e| s + e + "</ht:news_item>".len());
        let block = &chunk[s..end];
        items.push(NewsCitation {
            title: namespaced_tag(block, "news_item_title").unwrap_or_default(),
            snippet: namespaced_tag(block, "news_item_snippet").unwrap_or_default(),
            url: namespaced_tag(block, "news_item_url").unwrap_or_else(|| "#".to_string()),
            source: namespaced_tag(block, "news_item_source").unwrap_or_default(),
        });
        pos = end;
    }
    items
}

/// Image fallback chain: explicit picture tag, then the first `<img src>` in
/// the description markup, then a deterministic placeholder seeded by the
/// percent-encoded title so the same trend resolves to the same image across
/// reloads.
fn resolve_image(picture: &str, description_html: &str, title: &str) -> String {
    if !picture.is_empty() {
        return picture.to_string();
    }
    if let Some(src) = first_img_src(description_html) {
        return src;
    }
    format!("https://picsum.photos/seed/{}/600/400", percent_encode(title))
}

fn first_img_src(html: &str) -> Option<String> {
    if html.is_empty() {
        return None;
    }
    let fragment = Html::parse_fragment(html);
    let sel = Selector::parse("img").ok()?;
    fragment
        .select(&sel)
        .find_map(|el| el.value().attr("src"))
        .map(|s| s.to_string())
}

/// Strip all markup from a description fragment, collapsing whitespace runs.
fn strip_markup(html: &str) -> String {
    if html.is_empty() {
        return String::new();
    }
    let fragment = Html::parse_fragment(html);
    let mut buf = String::new();
    let mut last_was_space = true;
    for text in fragment.root_element().text() {
        for ch in text.chars() {
            if ch.is_whitespace() {
                if !last_was_space {
                    buf.push(' ');
                    last_was_space = true;
                }
            } else {
                buf.push(ch);
                last_was_space = false;
            }
        }
    }
    buf.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(body: &str) -> String {
        format!("<rss><channel><item>{body}</item></channel></rss>")
    }

    const FULL_FEED: &str = r#"<rss xmlns:ht="https://trends.google.com/trending/rss" version="2.0"><channel>
      <item>
        <title>solar eclipse</title>
        <link>https://trends.example/a</link>
        <pubDate>Tue, 12 Aug 2025 04:00:00 -0700</pubDate>
        <ht:approx_traffic>500+</ht:approx_traffic>
        <description>&lt;a href="x"&gt;&lt;img src="https://img.example/a.jpg" /&gt;eclipse watchers gather&lt;/a&gt;</description>
        <ht:picture>https://pic.example/a.png</ht:picture>
        <ht:picture_source>Example Wire</ht:picture_source>
        <ht:news_item>
          <ht:news_item_title>Eclipse dazzles the coast</ht:news_item_title>
          <ht:news_item_snippet>Crowds flocked to the shoreline.</ht:news_item_snippet>
          <ht:news_item_url>https://news.example/1</ht:news_item_url>
          <ht:news_item_source>Coastal Times</ht:news_item_source>
        </ht:news_item>
        <ht:news_item>
          <ht:news_item_title>How to watch safely</ht:news_item_title>
          <ht:news_item_snippet></ht:news_item_snippet>
          <ht:news_item_source>Science Desk</ht:news_item_source>
        </ht:news_item>
      </item>
      <item>
        <title>second topic</title>
      </item>
    </channel></rss>"#;

    #[test]
    fn parses_entries_in_document_order() {
        let trends = parse_feed(FULL_FEED);
        assert_eq!(trends.len(), 2);
        assert_eq!(trends[0].title, "solar eclipse");
        assert_eq!(trends[1].title, "second topic");
    }

    #[test]
    fn empty_channel_yields_empty_list() {
        let trends = parse_feed("<rss><channel></channel></rss>");
        assert!(trends.is_empty());
    }

    #[test]
    fn extension_tags_prefer_namespaced_form() {
        let trends = parse_feed(FULL_FEED);
        assert_eq!(trends[0].approx_traffic, "500+");
        assert_eq!(trends[0].image_url, "https://pic.example/a.png");
        assert_eq!(trends[0].source, "Example Wire");

        let plain = parse_feed(&item("<title>t</title><approx_traffic>50+</approx_traffic>"));
        assert_eq!(plain[0].approx_traffic, "50+");
    }

    #[test]
    fn missing_fields_take_placeholders() {
        let trends = parse_feed(&item("<description>plain</description>"));
        assert_eq!(trends[0].title, "No Title");
        assert_eq!(trends[0].link, "#");
        assert!(!trends[0].pub_date.is_empty());
        assert_eq!(trends[0].source, "Google Trends");
    }

    #[test]
    fn image_falls_back_to_description_img_src() {
        let body = r#"<title>t</title><description>&lt;img src="https://img.example/d.jpg"&gt;text&lt;/img&gt;</description>"#;
        let trends = parse_feed(&item(body));
        assert_eq!(trends[0].image_url, "https://img.example/d.jpg");
    }

    #[test]
    fn image_placeholder_is_deterministic_per_title() {
        let body = "<title>김치 축제</title>";
        let a = parse_feed(&item(body));
        let b = parse_feed(&item(body));
        assert_eq!(a[0].image_url, b[0].image_url);
        assert_eq!(
            a[0].image_url,
            format!(
                "https://picsum.photos/seed/{}/600/400",
                percent_encode("김치 축제")
            )
        );
    }

    #[test]
    fn news_items_map_one_to_one_with_defaults() {
        let trends = parse_feed(FULL_FEED);
        let news = &trends[0].news_items;
        assert_eq!(news.len(), 2);
        assert_eq!(news[0].title, "Eclipse dazzles the coast");
        assert_eq!(news[0].url, "https://news.example/1");
        assert_eq!(news[1].snippet, "");
        // Missing URL defaults to the placeholder anchor.
        assert_eq!(news[1].url, "#");
        assert_eq!(news[1].source, "Science Desk");
    }

    #[test]
    fn description_is_stripped_of_markup() {
        let trends = parse_feed(FULL_FEED);
        assert_eq!(trends[0].description, "eclipse watchers gather");
    }

    #[test]
    fn cdata_titles_are_unwrapped() {
        let trends = parse_feed(&item("<title><![CDATA[wrapped &amp; decoded]]></title>"));
        assert_eq!(trends[0].title, "wrapped & decoded");
    }

    #[test]
    fn feed_marker_validation() {
        assert!(looks_like_feed("<rss version=\"2.0\">"));
        assert!(looks_like_feed("<channel>"));
        assert!(!looks_like_feed("<!DOCTYPE html><html>blocked</html>"));
    }
}
