use crate::provider::ProviderKind;
use crate::status::CheckStatus;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Tagged evaluation kinds.
///
/// Checklist entries reference one of these instead of carrying a closure,
/// so checklist data stays serializable and the behavior table lives in one
/// place (`sitelens-core`). Kinds are shared across audit types; the same
/// kind may appear under different ids and weights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum EvalKind {
    TitlePresent,
    TitleLength,
    MetaDescriptionPresent,
    MetaDescriptionLength,
    SingleH1,
    HeadingOrder,
    ImageAltCoverage,
    CanonicalPresent,
    CanonicalMatchesFinalUrl,
    ViewportMeta,
    NotNoindex,
    HtmlLang,
    CharsetDeclared,
    OpenGraphBasics,
    TwitterCard,
    StructuredData,
    Favicon,
    WordCount,
    InternalLinkCount,
    HttpsScheme,
    Hsts,
    ContentTypeOptions,
    CacheControl,
    Compression,
    RobotsFound,
    RobotsNotBlockingAll,
    SitemapFound,
    SitemapNotEmpty,
    SitemapListedInRobots,
    ResponseTime,
    PageWeight,
}

/// One declarative checklist entry. Pure data, defined at process start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CheckItemSpec {
    /// Unique within one audit type's checklist.
    pub id: &'static str,
    pub category: &'static str,
    pub label: &'static str,
    /// Non-negative contribution to the weighted score.
    pub weight: u32,
    /// `false` marks the item as always requiring manual review.
    pub auto: bool,
    pub provider: Option<ProviderKind>,
    pub eval: Option<EvalKind>,
}

impl CheckItemSpec {
    /// Whether this item can ever contribute to the score. Depends only
    /// on the definition, never on a run's results.
    pub const fn scorable(&self) -> bool {
        self.auto && self.provider.is_some() && self.eval.is_some()
    }
}

/// What an evaluation function decided for one item.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Verdict {
    pub status: CheckStatus,
    pub detail: Option<String>,
}

impl Verdict {
    pub fn pass() -> Self {
        Self {
            status: CheckStatus::Pass,
            detail: None,
        }
    }

    pub fn pass_with(detail: impl Into<String>) -> Self {
        Self {
            status: CheckStatus::Pass,
            detail: Some(detail.into()),
        }
    }

    pub fn warn(detail: impl Into<String>) -> Self {
        Self {
            status: CheckStatus::Warn,
            detail: Some(detail.into()),
        }
    }

    pub fn fail(detail: impl Into<String>) -> Self {
        Self {
            status: CheckStatus::Fail,
            detail: Some(detail.into()),
        }
    }

    pub fn error(detail: impl Into<String>) -> Self {
        Self {
            status: CheckStatus::Error,
            detail: Some(detail.into()),
        }
    }
}
