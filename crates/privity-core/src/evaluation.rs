//! # System Evaluation Result
//!
//! The immutable aggregate produced by one evaluation call: the per-status
//! rule findings, advisory warnings, structural errors, and the overall
//! verdict. Constructed once, never mutated, no independent persistence —
//! callers may serialize and store it outside this core.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::PrivityError;
use crate::identity::RuleKey;
use crate::status::ApprovalStatus;

/// Rule findings grouped by status, then by qualified rule key, collecting
/// the names of the declarations that triggered each rule.
///
/// `BTreeMap` on both levels keeps iteration and serialization
/// deterministic.
pub type StatusMap = BTreeMap<ApprovalStatus, BTreeMap<RuleKey, Vec<String>>>;

/// The result of evaluating one system against its policies and resolved
/// dependencies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemEvaluation {
    /// Rule findings by status and qualified rule key.
    pub status_map: StatusMap,
    /// Advisory coverage findings. Never affect the overall verdict.
    pub warnings: Vec<String>,
    /// Structural findings (unresolvable declared dependencies). A non-empty
    /// list forces the `Error` verdict.
    pub errors: Vec<String>,
    /// The single overall verdict, by severity precedence.
    pub overall_approval: ApprovalStatus,
}

impl SystemEvaluation {
    /// Render the evaluation for an external presentation layer: a JSON
    /// object keyed by status name, plus the warning and error lists.
    pub fn to_json_value(&self) -> Result<serde_json::Value, PrivityError> {
        Ok(serde_json::to_value(self)?)
    }
}
