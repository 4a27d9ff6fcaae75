use std::fmt::{self, Display};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Every check provider the engine knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ProviderKind {
    /// Fetches the page body and extracts document structure.
    Page,
    /// Inspects the HTTP response line and security/delivery headers.
    Http,
    /// Fetches and parses `/robots.txt`.
    Robots,
    /// Locates and samples the XML sitemap.
    Sitemap,
    /// Times a full page download to estimate delivery cost.
    Speed,
}

impl ProviderKind {
    /// Canonical execution order for the sequential dispatcher.
    ///
    /// Static by design: providers whose output feeds many checklist items
    /// run first, the slow full-download probe runs last. Checklist
    /// declaration order never influences execution order.
    pub const PRIORITY: [ProviderKind; 5] = [
        ProviderKind::Page,
        ProviderKind::Http,
        ProviderKind::Robots,
        ProviderKind::Sitemap,
        ProviderKind::Speed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Page => "page",
            ProviderKind::Http => "http",
            ProviderKind::Robots => "robots",
            ProviderKind::Sitemap => "sitemap",
            ProviderKind::Speed => "speed",
        }
    }
}

impl Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Document structure extracted from the target page's HTML.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PageSnapshot {
    pub title: Option<String>,
    pub meta_description: Option<String>,
    pub canonical: Option<String>,
    pub meta_robots: Option<String>,
    pub lang: Option<String>,
    pub charset: Option<String>,
    pub viewport: Option<String>,
    pub h1_count: usize,
    /// Heading levels (1..=6) in document order.
    pub heading_levels: Vec<u8>,
    pub images_total: usize,
    pub images_missing_alt: usize,
    /// `og:` property names present in the head.
    pub og_properties: Vec<String>,
    pub twitter_card: bool,
    pub json_ld_blocks: usize,
    pub word_count: usize,
    pub internal_links: usize,
    pub external_links: usize,
    pub favicon: bool,
}

/// Response-level facts about the target URL.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HttpSnapshot {
    pub status_code: u16,
    pub https: bool,
    /// URL after following redirects.
    pub final_url: String,
    pub hsts: bool,
    pub x_content_type_options: bool,
    pub cache_control: Option<String>,
    pub content_type: Option<String>,
}

/// Parsed view of the site's robots.txt.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RobotsSnapshot {
    pub found: bool,
    /// A wildcard agent group disallows the whole site.
    pub disallow_all: bool,
    pub rule_count: usize,
    pub sitemap_urls: Vec<String>,
}

/// Summary of the discovered XML sitemap.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SitemapSnapshot {
    pub found: bool,
    pub location: String,
    pub url_count: usize,
    pub is_index: bool,
}

/// Delivery cost of one full page download.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SpeedSnapshot {
    pub response_ms: u64,
    pub body_bytes: u64,
    pub compressed: bool,
}

/// Why a provider produced no usable data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum FailureKind {
    /// The provider call itself failed (network, parse, bad status).
    Upstream,
    /// The call was in flight when the workflow deadline elapsed.
    DeadlineExceeded,
    /// The deadline had already elapsed before the provider's turn.
    DeadlineSkipped,
}

/// A captured provider failure. Never propagated as an error; always
/// stored in [`ProviderResults`] in place of a snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ProviderFailure {
    pub kind: FailureKind,
    pub message: String,
}

impl ProviderFailure {
    pub fn upstream(message: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::Upstream,
            message: message.into(),
        }
    }

    pub fn deadline_exceeded() -> Self {
        Self {
            kind: FailureKind::DeadlineExceeded,
            message: "workflow timeout: exceeded during execution"
                .to_string(),
        }
    }

    pub fn deadline_skipped() -> Self {
        Self {
            kind: FailureKind::DeadlineSkipped,
            message: "workflow timeout: execution skipped".to_string(),
        }
    }
}

impl Display for ProviderFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Result of one provider invocation. Success and failure are exclusive
/// and immutable once stored.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ProviderOutcome<T> {
    Ok(T),
    Failed(ProviderFailure),
}

impl<T> ProviderOutcome<T> {
    pub fn is_ok(&self) -> bool {
        matches!(self, ProviderOutcome::Ok(_))
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            ProviderOutcome::Ok(data) => Some(data),
            ProviderOutcome::Failed(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&ProviderFailure> {
        match self {
            ProviderOutcome::Ok(_) => None,
            ProviderOutcome::Failed(failure) => Some(failure),
        }
    }
}

/// Everything one workflow run learned from its providers.
///
/// One named field per known provider; `None` means the provider was not
/// scheduled for this audit type. Owned exclusively by a single workflow
/// invocation.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ProviderResults {
    pub page: Option<ProviderOutcome<PageSnapshot>>,
    pub http: Option<ProviderOutcome<HttpSnapshot>>,
    pub robots: Option<ProviderOutcome<RobotsSnapshot>>,
    pub sitemap: Option<ProviderOutcome<SitemapSnapshot>>,
    pub speed: Option<ProviderOutcome<SpeedSnapshot>>,
}

impl ProviderResults {
    /// Whether the given provider was scheduled at all for this run.
    pub fn scheduled(&self, kind: ProviderKind) -> bool {
        match kind {
            ProviderKind::Page => self.page.is_some(),
            ProviderKind::Http => self.http.is_some(),
            ProviderKind::Robots => self.robots.is_some(),
            ProviderKind::Sitemap => self.sitemap.is_some(),
            ProviderKind::Speed => self.speed.is_some(),
        }
    }

    /// Whether the given provider was scheduled and produced a snapshot.
    pub fn succeeded(&self, kind: ProviderKind) -> bool {
        match kind {
            ProviderKind::Page => {
                self.page.as_ref().is_some_and(ProviderOutcome::is_ok)
            }
            ProviderKind::Http => {
                self.http.as_ref().is_some_and(ProviderOutcome::is_ok)
            }
            ProviderKind::Robots => {
                self.robots.as_ref().is_some_and(ProviderOutcome::is_ok)
            }
            ProviderKind::Sitemap => {
                self.sitemap.as_ref().is_some_and(ProviderOutcome::is_ok)
            }
            ProviderKind::Speed => {
                self.speed.as_ref().is_some_and(ProviderOutcome::is_ok)
            }
        }
    }

    /// The stored failure for a provider, if it was scheduled and failed.
    pub fn failure_of(&self, kind: ProviderKind) -> Option<&ProviderFailure> {
        match kind {
            ProviderKind::Page => {
                self.page.as_ref().and_then(ProviderOutcome::failure)
            }
            ProviderKind::Http => {
                self.http.as_ref().and_then(ProviderOutcome::failure)
            }
            ProviderKind::Robots => {
                self.robots.as_ref().and_then(ProviderOutcome::failure)
            }
            ProviderKind::Sitemap => {
                self.sitemap.as_ref().and_then(ProviderOutcome::failure)
            }
            ProviderKind::Speed => {
                self.speed.as_ref().and_then(ProviderOutcome::failure)
            }
        }
    }

    /// Record a failure for a provider slot without touching any stored
    /// success. Used by the dispatcher for deadline bookkeeping.
    pub fn record_failure(
        &mut self,
        kind: ProviderKind,
        failure: ProviderFailure,
    ) {
        match kind {
            ProviderKind::Page => {
                self.page = Some(ProviderOutcome::Failed(failure));
            }
            ProviderKind::Http => {
                self.http = Some(ProviderOutcome::Failed(failure));
            }
            ProviderKind::Robots => {
                self.robots = Some(ProviderOutcome::Failed(failure));
            }
            ProviderKind::Sitemap => {
                self.sitemap = Some(ProviderOutcome::Failed(failure));
            }
            ProviderKind::Speed => {
                self.speed = Some(ProviderOutcome::Failed(failure));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_covers_every_kind_once() {
        for kind in ProviderKind::PRIORITY {
            let occurrences = ProviderKind::PRIORITY
                .iter()
                .filter(|candidate| **candidate == kind)
                .count();
            assert_eq!(occurrences, 1, "{kind} duplicated in priority table");
        }
    }

    #[test]
    fn unscheduled_provider_reads_back_as_none() {
        let results = ProviderResults::default();
        assert!(!results.scheduled(ProviderKind::Page));
        assert!(!results.succeeded(ProviderKind::Page));
        assert!(results.failure_of(ProviderKind::Page).is_none());
    }

    #[test]
    fn failures_can_be_recorded_for_every_provider_slot() {
        let mut results = ProviderResults::default();
        for kind in ProviderKind::PRIORITY {
            results.record_failure(kind, ProviderFailure::upstream("down"));
        }
        for kind in ProviderKind::PRIORITY {
            assert!(results.scheduled(kind), "{kind} slot not filled");
            assert!(!results.succeeded(kind));
            assert_eq!(
                results.failure_of(kind).map(|f| f.kind),
                Some(FailureKind::Upstream),
                "{kind} failure missing"
            );
        }
    }

    #[test]
    fn recorded_failure_is_distinguishable() {
        let mut results = ProviderResults::default();
        results.record_failure(
            ProviderKind::Sitemap,
            ProviderFailure::deadline_skipped(),
        );
        let failure = results
            .failure_of(ProviderKind::Sitemap)
            .expect("failure stored");
        assert_eq!(failure.kind, FailureKind::DeadlineSkipped);
        assert!(failure.message.contains("workflow timeout"));
    }
}
