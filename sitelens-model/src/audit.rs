use std::fmt::{self, Display};
use std::str::FromStr;

use crate::error::ModelError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Composite audit flavors exposed to callers.
///
/// Each type selects its own checklist; `Full` unions the other three.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum AuditType {
    /// On-page SEO fundamentals: title, description, headings, links.
    Seo,
    /// Content quality and social/share markup.
    Content,
    /// Transport, crawlability, and delivery concerns.
    Technical,
    /// Everything above in a single scored run.
    Full,
}

impl AuditType {
    pub const ALL: [AuditType; 4] = [
        AuditType::Seo,
        AuditType::Content,
        AuditType::Technical,
        AuditType::Full,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AuditType::Seo => "seo",
            AuditType::Content => "content",
            AuditType::Technical => "technical",
            AuditType::Full => "full",
        }
    }
}

impl Display for AuditType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuditType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "seo" => Ok(AuditType::Seo),
            "content" => Ok(AuditType::Content),
            "technical" => Ok(AuditType::Technical),
            "full" => Ok(AuditType::Full),
            other => Err(ModelError::UnknownAuditType(other.to_string())),
        }
    }
}
