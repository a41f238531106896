//! # Approval Status — Severity Lattice
//!
//! The four-valued outcome of evaluating a system against policies. Statuses
//! follow a strict severity ordering used for computing the overall verdict:
//!
//! ```text
//! Ordering (best → worst): Pass < Manual < Fail < Error
//!
//! overall = worst status present (errors outrank rule outcomes)
//! ```
//!
//! `Error` is reserved for structural failures (a declared dependency that
//! could not be resolved); rule matching never produces it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::policy::RuleAction;

/// The approval verdict for a system evaluation, or for one slice of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApprovalStatus {
    /// Every evaluated rule accepted the system's declarations.
    Pass,
    /// At least one rule requires manual review before approval.
    Manual,
    /// At least one rule rejected a declaration.
    Fail,
    /// A declared dependency could not be resolved; the system cannot be
    /// meaningfully rated.
    Error,
}

impl ApprovalStatus {
    /// Severity rank. Higher is worse.
    fn rank(self) -> u8 {
        match self {
            Self::Pass => 0,
            Self::Manual => 1,
            Self::Fail => 2,
            Self::Error => 3,
        }
    }

    /// The worse of the two statuses.
    ///
    /// `Error` is absorbing: `worst(x, Error) == Error` for all x. This
    /// ensures a single structural failure dominates the aggregate.
    pub fn worst(self, other: Self) -> Self {
        if self.rank() >= other.rank() {
            self
        } else {
            other
        }
    }

    /// Whether this status lets the system through without human attention.
    pub fn is_passing(self) -> bool {
        matches!(self, Self::Pass)
    }

    /// Stable uppercase name, matching the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pass => "PASS",
            Self::Manual => "MANUAL",
            Self::Fail => "FAIL",
            Self::Error => "ERROR",
        }
    }
}

impl PartialOrd for ApprovalStatus {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ApprovalStatus {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl fmt::Display for ApprovalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApprovalStatus {
    type Err = crate::error::PrivityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PASS" => Ok(Self::Pass),
            "MANUAL" => Ok(Self::Manual),
            "FAIL" => Ok(Self::Fail),
            "ERROR" => Ok(Self::Error),
            other => Err(crate::error::PrivityError::UnknownStatus {
                name: other.to_string(),
            }),
        }
    }
}

impl From<RuleAction> for ApprovalStatus {
    /// Map a matched rule's action to the status it contributes.
    ///
    /// `Error` has no corresponding action: it is produced only by
    /// structural dependency failures, never by rule matching.
    fn from(action: RuleAction) -> Self {
        match action {
            RuleAction::Accept => Self::Pass,
            RuleAction::Reject => Self::Fail,
            RuleAction::Require => Self::Manual,
        }
    }
}
