use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use url::Url;

use sitelens_model::{
    HttpSnapshot, PageSnapshot, RobotsSnapshot, SitemapSnapshot,
    SpeedSnapshot,
};

use crate::error::Result;

/// Fetches the page body and extracts document structure.
#[async_trait]
pub trait PageProbe: Send + Sync {
    async fn probe(&self, target: &Url) -> Result<PageSnapshot>;
}

/// Inspects the HTTP response line and security/delivery headers.
#[async_trait]
pub trait HttpProbe: Send + Sync {
    async fn probe(&self, target: &Url) -> Result<HttpSnapshot>;
}

/// Fetches and parses the site's robots.txt.
#[async_trait]
pub trait RobotsProbe: Send + Sync {
    async fn probe(&self, target: &Url) -> Result<RobotsSnapshot>;
}

/// Locates and samples the site's XML sitemap.
#[async_trait]
pub trait SitemapProbe: Send + Sync {
    async fn probe(&self, target: &Url) -> Result<SitemapSnapshot>;
}

/// Times a full page download to estimate delivery cost.
#[async_trait]
pub trait SpeedProbe: Send + Sync {
    async fn probe(&self, target: &Url) -> Result<SpeedSnapshot>;
}

/// The full set of providers a workflow can schedule from.
///
/// One trait object per known provider; the dispatcher picks the subset
/// an audit type actually needs.
#[derive(Clone)]
pub struct ProviderSet {
    pub page: Arc<dyn PageProbe>,
    pub http: Arc<dyn HttpProbe>,
    pub robots: Arc<dyn RobotsProbe>,
    pub sitemap: Arc<dyn SitemapProbe>,
    pub speed: Arc<dyn SpeedProbe>,
}

impl ProviderSet {
    pub fn new(
        page: Arc<dyn PageProbe>,
        http: Arc<dyn HttpProbe>,
        robots: Arc<dyn RobotsProbe>,
        sitemap: Arc<dyn SitemapProbe>,
        speed: Arc<dyn SpeedProbe>,
    ) -> Self {
        Self {
            page,
            http,
            robots,
            sitemap,
            speed,
        }
    }
}

impl fmt::Debug for ProviderSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderSet")
            .field("page", &"PageProbe")
            .field("http", &"HttpProbe")
            .field("robots", &"RobotsProbe")
            .field("sitemap", &"SitemapProbe")
            .field("speed", &"SpeedProbe")
            .finish()
    }
}
