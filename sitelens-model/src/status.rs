use std::fmt::{self, Display};
use std::str::FromStr;

use crate::error::ModelError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Final status of a single checklist item.
///
/// This is a closed set; the evaluator never produces anything outside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum CheckStatus {
    /// The audited condition holds.
    Pass,
    /// The condition holds partially or marginally.
    Warn,
    /// The condition does not hold.
    Fail,
    /// The backing provider data was unusable; excluded from scoring.
    Error,
    /// The item has no evaluation wired up yet.
    Skipped,
    /// The item requires human review and never contributes to the score.
    Manual,
}

impl CheckStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckStatus::Pass => "pass",
            CheckStatus::Warn => "warn",
            CheckStatus::Fail => "fail",
            CheckStatus::Error => "error",
            CheckStatus::Skipped => "skipped",
            CheckStatus::Manual => "manual",
        }
    }
}

impl Display for CheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CheckStatus {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pass" => Ok(CheckStatus::Pass),
            "warn" => Ok(CheckStatus::Warn),
            "fail" => Ok(CheckStatus::Fail),
            "error" => Ok(CheckStatus::Error),
            "skipped" => Ok(CheckStatus::Skipped),
            "manual" => Ok(CheckStatus::Manual),
            other => Err(ModelError::UnknownStatus(other.to_string())),
        }
    }
}
