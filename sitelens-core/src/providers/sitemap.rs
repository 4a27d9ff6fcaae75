//! Sitemap probe: looks for `/sitemap.xml` at the site root and
//! summarizes what it finds.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

use sitelens_model::SitemapSnapshot;

use crate::error::{AuditError, Result};
use crate::providers::traits::SitemapProbe;

static LOC_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<loc\s*>").unwrap());
static INDEX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<sitemapindex[\s>]").unwrap());

/// Shallow sitemap summary: entry count and whether this is an index of
/// further sitemaps. No URL extraction; the checklist only needs counts.
pub fn parse_sitemap(body: &str, location: &str) -> SitemapSnapshot {
    SitemapSnapshot {
        found: true,
        location: location.to_string(),
        url_count: LOC_RE.find_iter(body).count(),
        is_index: INDEX_RE.is_match(body),
    }
}

#[derive(Debug, Clone)]
pub struct WebSitemapProbe {
    client: reqwest::Client,
}

impl WebSitemapProbe {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SitemapProbe for WebSitemapProbe {
    async fn probe(&self, target: &Url) -> Result<SitemapSnapshot> {
        let sitemap_url = target.join("/sitemap.xml")?;
        let response = self.client.get(sitemap_url.clone()).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND
            || status == reqwest::StatusCode::GONE
        {
            return Ok(SitemapSnapshot {
                found: false,
                location: sitemap_url.to_string(),
                ..Default::default()
            });
        }
        if !status.is_success() {
            return Err(AuditError::HttpStatus {
                status: status.as_u16(),
                url: sitemap_url.to_string(),
            });
        }

        let body = response.text().await?;
        Ok(parse_sitemap(&body, sitemap_url.as_str()))
    }
}
