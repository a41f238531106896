//! # Policies and Policy Rules
//!
//! A policy owns a set of rules; each rule carries match criteria over a
//! declaration's categories, use, qualifier, and subject categories, plus
//! the action it produces when all present criteria hold. Rule order within
//! a policy is irrelevant: every rule is evaluated independently and the
//! outcomes are aggregated by severity, not by first match.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::identity::{CategoryName, UseName};

/// The action a rule produces when it matches a declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleAction {
    /// The declaration is acceptable as declared.
    Accept,
    /// The declaration violates the policy.
    Reject,
    /// The declaration needs manual review before approval.
    Require,
}

impl RuleAction {
    /// Stable snake_case name, matching the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleAction::Accept => "accept",
            RuleAction::Reject => "reject",
            RuleAction::Require => "require",
        }
    }
}

impl fmt::Display for RuleAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a criterion's per-name match results combine into one verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    /// At least one declared name must match a criterion value.
    Any,
    /// Every declared name must match a criterion value.
    All,
    /// No declared name may match a criterion value.
    None,
}

/// One match criterion of a rule: a set of target names plus the fold that
/// combines per-name membership results.
///
/// Generic over the name type so the same fold serves category criteria
/// (hierarchy-expanded [`CategoryName`]s) and use criteria (exact
/// [`UseName`]s).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchCriteria<N: Ord> {
    /// The combining fold.
    pub kind: MatchKind,
    /// The names this criterion targets.
    pub values: BTreeSet<N>,
}

impl<N: Ord> MatchCriteria<N> {
    /// Build a criterion from a kind and an iterator of values.
    pub fn new(kind: MatchKind, values: impl IntoIterator<Item = N>) -> Self {
        Self {
            kind,
            values: values.into_iter().collect(),
        }
    }

    /// Fold per-name membership results into the criterion verdict.
    ///
    /// Over an empty declared set, `Any` is false while `All` and `None`
    /// are vacuously true.
    pub fn fold(&self, matches: impl IntoIterator<Item = bool>) -> bool {
        match self.kind {
            MatchKind::Any => matches.into_iter().any(|m| m),
            MatchKind::All => matches.into_iter().all(|m| m),
            MatchKind::None => !matches.into_iter().any(|m| m),
        }
    }
}

/// One rule within a policy.
///
/// Every criterion is optional; an absent criterion imposes no constraint.
/// A rule matches a declaration when all present criteria hold, and then
/// contributes its `action` to the evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyRule {
    /// Rule key, unique within its policy.
    pub key: String,
    /// Criterion over the declaration's data categories (hierarchy-aware).
    pub data_categories: Option<MatchCriteria<CategoryName>>,
    /// Criterion over the declaration's single data use (exact-name).
    pub data_uses: Option<MatchCriteria<UseName>>,
    /// Criterion over the declaration's subject categories (hierarchy-aware).
    pub data_subject_categories: Option<MatchCriteria<CategoryName>>,
    /// The declaration's qualifier must equal or descend from this node.
    pub data_qualifier: Option<CategoryName>,
    /// The action produced when the rule matches.
    pub action: RuleAction,
}

impl PolicyRule {
    /// A rule with no criteria (matches every declaration) and the given action.
    pub fn new(key: impl Into<String>, action: RuleAction) -> Self {
        Self {
            key: key.into(),
            data_categories: None,
            data_uses: None,
            data_subject_categories: None,
            data_qualifier: None,
            action,
        }
    }

    /// Constrain the rule to declarations whose categories satisfy `criteria`.
    pub fn with_data_categories(mut self, criteria: MatchCriteria<CategoryName>) -> Self {
        self.data_categories = Some(criteria);
        self
    }

    /// Constrain the rule to declarations whose use satisfies `criteria`.
    pub fn with_data_uses(mut self, criteria: MatchCriteria<UseName>) -> Self {
        self.data_uses = Some(criteria);
        self
    }

    /// Constrain the rule to declarations whose subject categories satisfy
    /// `criteria`.
    pub fn with_data_subject_categories(mut self, criteria: MatchCriteria<CategoryName>) -> Self {
        self.data_subject_categories = Some(criteria);
        self
    }

    /// Constrain the rule to declarations whose qualifier equals or descends
    /// from `qualifier`.
    pub fn with_data_qualifier(mut self, qualifier: CategoryName) -> Self {
        self.data_qualifier = Some(qualifier);
        self
    }
}

/// An organizational policy: a key and the rules it owns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Policy {
    /// Unique policy key.
    pub key: String,
    /// The rules this policy evaluates. Order is irrelevant.
    pub rules: Vec<PolicyRule>,
}

impl Policy {
    /// Build a policy from its key and rules.
    pub fn new(key: impl Into<String>, rules: Vec<PolicyRule>) -> Self {
        Self {
            key: key.into(),
            rules,
        }
    }
}
