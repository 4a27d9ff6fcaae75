//! Page probe: fetches the target document and extracts the structure
//! the checklist evaluates.
//!
//! Extraction is regex-based over the raw markup. That is deliberately
//! shallow: the checklist needs presence, counts, and short attribute
//! values, not a DOM.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

use sitelens_model::PageSnapshot;

use crate::error::{AuditError, Result};
use crate::providers::traits::PageProbe;

static TITLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<title[^>]*>(.*?)</title>").unwrap());
static META_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<meta\s[^>]*>").unwrap());
static LINK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<link\s[^>]*>").unwrap());
static HTML_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<html([^>]*)>").unwrap());
static HEADING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<h([1-6])[\s>]").unwrap());
static IMG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<img\s[^>]*>").unwrap());
static ANCHOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<a\s[^>]*>").unwrap());
static SCRIPT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<script[^>]*>.*?</script>").unwrap());
static STYLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<style[^>]*>.*?</style>").unwrap());
static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").unwrap());
static ATTR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)([a-zA-Z:-]+)\s*=\s*(?:"([^"]*)"|'([^']*)')"#)
        .unwrap()
});
static JSON_LD_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?is)<script[^>]*type\s*=\s*["']application/ld\+json["']"#)
        .unwrap()
});

/// Value of a named attribute inside one tag's raw text.
fn attr(tag: &str, name: &str) -> Option<String> {
    for capture in ATTR_RE.captures_iter(tag) {
        let key = capture.get(1)?.as_str();
        if key.eq_ignore_ascii_case(name) {
            let value = capture
                .get(2)
                .or_else(|| capture.get(3))
                .map(|m| m.as_str().trim().to_string());
            return value;
        }
    }
    None
}

fn is_internal_link(href: &str, base: &Url) -> bool {
    let href = href.trim();
    if href.is_empty()
        || href.starts_with('#')
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("javascript:")
    {
        return false;
    }
    match Url::parse(href) {
        Ok(absolute) => absolute.host_str() == base.host_str(),
        // Relative hrefs resolve against the page itself.
        Err(_) => true,
    }
}

/// Pure extraction of a [`PageSnapshot`] from raw markup.
pub fn parse_page(html: &str, base: &Url) -> PageSnapshot {
    let mut snapshot = PageSnapshot {
        title: TITLE_RE.captures(html).map(|c| {
            c[1].trim().split_whitespace().collect::<Vec<_>>().join(" ")
        }),
        ..Default::default()
    };

    for tag_match in META_RE.find_iter(html) {
        let tag = tag_match.as_str();
        if let Some(charset) = attr(tag, "charset") {
            snapshot.charset.get_or_insert(charset);
            continue;
        }
        let content = attr(tag, "content");
        if let Some(name) = attr(tag, "name") {
            let name = name.to_ascii_lowercase();
            match name.as_str() {
                "description" => {
                    snapshot.meta_description =
                        snapshot.meta_description.take().or(content);
                }
                "robots" => {
                    snapshot.meta_robots =
                        snapshot.meta_robots.take().or(content);
                }
                "viewport" => {
                    snapshot.viewport = snapshot.viewport.take().or(content);
                }
                "twitter:card" => snapshot.twitter_card = true,
                _ => {}
            }
        } else if let Some(property) = attr(tag, "property") {
            let property = property.to_ascii_lowercase();
            if property.starts_with("og:") {
                snapshot.og_properties.push(property);
            }
        } else if let Some(equiv) = attr(tag, "http-equiv")
            && equiv.eq_ignore_ascii_case("content-type")
            && let Some(content) = content
            && let Some(idx) = content.to_ascii_lowercase().find("charset=")
        {
            let charset = content[idx + "charset=".len()..]
                .trim()
                .to_string();
            snapshot.charset.get_or_insert(charset);
        }
    }

    for tag_match in LINK_RE.find_iter(html) {
        let tag = tag_match.as_str();
        let Some(rel) = attr(tag, "rel") else {
            continue;
        };
        let rel = rel.to_ascii_lowercase();
        if rel == "canonical" {
            if let Some(href) = attr(tag, "href") {
                snapshot.canonical.get_or_insert(href);
            }
        } else if rel.contains("icon") {
            snapshot.favicon = true;
        }
    }

    if let Some(html_tag) = HTML_RE.captures(html) {
        snapshot.lang = attr(&html_tag[0], "lang");
    }

    for capture in HEADING_RE.captures_iter(html) {
        // Capture group is a single digit by construction.
        let level: u8 = capture[1].parse().unwrap_or(6);
        snapshot.heading_levels.push(level);
        if level == 1 {
            snapshot.h1_count += 1;
        }
    }

    for tag_match in IMG_RE.find_iter(html) {
        snapshot.images_total += 1;
        let has_alt = attr(tag_match.as_str(), "alt")
            .is_some_and(|alt| !alt.is_empty());
        if !has_alt {
            snapshot.images_missing_alt += 1;
        }
    }

    for tag_match in ANCHOR_RE.find_iter(html) {
        let Some(href) = attr(tag_match.as_str(), "href") else {
            continue;
        };
        if is_internal_link(&href, base) {
            snapshot.internal_links += 1;
        } else if href.starts_with("http") {
            snapshot.external_links += 1;
        }
    }

    snapshot.json_ld_blocks = JSON_LD_RE.find_iter(html).count();

    let stripped = SCRIPT_RE.replace_all(html, " ");
    let stripped = STYLE_RE.replace_all(&stripped, " ");
    let stripped = TAG_RE.replace_all(&stripped, " ");
    snapshot.word_count = stripped.split_whitespace().count();

    snapshot
}

/// Live page probe over a shared reqwest client.
#[derive(Debug, Clone)]
pub struct WebPageProbe {
    client: reqwest::Client,
}

impl WebPageProbe {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PageProbe for WebPageProbe {
    async fn probe(&self, target: &Url) -> Result<PageSnapshot> {
        let response = self.client.get(target.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(AuditError::HttpStatus {
                status: status.as_u16(),
                url: target.to_string(),
            });
        }
        let final_url = response.url().clone();
        let body = response.text().await?;
        Ok(parse_page(&body, &final_url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>  Example   Page Title for Testing Extraction  </title>
  <meta name="description" content="A compact description of the sample page used by the parser tests.">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <meta name="robots" content="index, follow">
  <meta property="og:title" content="Example">
  <meta property="og:image" content="/hero.png">
  <meta name="twitter:card" content="summary">
  <link rel="canonical" href="https://example.com/sample">
  <link rel="icon" href="/favicon.ico">
  <script type="application/ld+json">{"@type":"WebPage"}</script>
</head>
<body>
  <h1>Main heading</h1>
  <h2>Sub heading</h2>
  <h3>Deeper</h3>
  <img src="/a.png" alt="described">
  <img src="/b.png">
  <a href="/internal">in</a>
  <a href="https://example.com/also-internal">in2</a>
  <a href="https://other.example.net/out">out</a>
  <p>Some words in the body for counting purposes.</p>
  <script>ignored_words_here();</script>
</body>
</html>"#;

    fn base() -> Url {
        Url::parse("https://example.com/sample").unwrap()
    }

    #[test]
    fn extracts_head_metadata() {
        let snap = parse_page(SAMPLE, &base());
        assert_eq!(
            snap.title.as_deref(),
            Some("Example Page Title for Testing Extraction")
        );
        assert!(snap.meta_description.is_some());
        assert_eq!(snap.charset.as_deref(), Some("utf-8"));
        assert_eq!(snap.lang.as_deref(), Some("en"));
        assert_eq!(
            snap.canonical.as_deref(),
            Some("https://example.com/sample")
        );
        assert!(snap.favicon);
        assert!(snap.twitter_card);
        assert_eq!(snap.og_properties, vec!["og:title", "og:image"]);
        assert_eq!(snap.json_ld_blocks, 1);
    }

    #[test]
    fn counts_structure() {
        let snap = parse_page(SAMPLE, &base());
        assert_eq!(snap.h1_count, 1);
        assert_eq!(snap.heading_levels, vec![1, 2, 3]);
        assert_eq!(snap.images_total, 2);
        assert_eq!(snap.images_missing_alt, 1);
        assert_eq!(snap.internal_links, 2);
        assert_eq!(snap.external_links, 1);
    }

    #[test]
    fn word_count_ignores_script_bodies() {
        let snap = parse_page(SAMPLE, &base());
        assert!(snap.word_count > 0);
        // The script body must not leak into the word count.
        let rendered = format!("{snap:?}");
        assert!(!rendered.contains("ignored_words_here"));
    }

    #[test]
    fn empty_document_yields_empty_snapshot() {
        let snap = parse_page("", &base());
        assert_eq!(snap, PageSnapshot::default());
    }

    #[test]
    fn single_quoted_attributes_are_read() {
        let html = "<meta name='description' content='quoted content here'>";
        let snap = parse_page(html, &base());
        assert_eq!(
            snap.meta_description.as_deref(),
            Some("quoted content here")
        );
    }
}
