//! # privity-engine — Policy Evaluation Engine
//!
//! Evaluates whether a declared data-processing system complies with a set
//! of organizational policies, given the taxonomy forests of its
//! organization. One call to [`evaluator::evaluate_system`] produces one
//! [`privity_core::SystemEvaluation`]: a status breakdown per matched rule,
//! coverage warnings, structural errors, and the single overall verdict.
//!
//! ## Determinism
//!
//! Given identical inputs (including the taxonomy snapshot), evaluation
//! produces structurally identical results. This is guaranteed by:
//! - BTree collections for every grouping and aggregation step
//! - Pure rule matching (no side effects, no ambient state)
//! - Severity-precedence verdict folding (`Error > Fail > Manual > Pass`)
//!
//! ## I/O
//!
//! None. Callers resolve the system, its dependent systems and datasets,
//! and the applicable policies before calling in; taxonomy access goes
//! through the [`privity_taxonomy::TaxonomyLookup`] seam against one
//! consistent snapshot. A failed evaluation call yields no result at all —
//! distinct from a returned evaluation whose verdict is `ERROR`.

pub mod evaluator;
pub mod merge;
pub mod rule;

pub use evaluator::{evaluate_policy_rules, evaluate_system};
pub use merge::{diff_declarations, merge_declarations};
pub use rule::rule_matches;
