//! # privity-core — Foundational Types for the Privity Stack
//!
//! This crate defines the domain types every other crate in the workspace
//! depends on. It has no internal crate dependencies — only `serde`,
//! `serde_json`, and `thiserror` from the external ecosystem.
//!
//! ## Design Principles
//!
//! 1. **Newtype wrappers for domain primitives.** Every identifier is a
//!    distinct type. You cannot pass a [`DatasetKey`] where a [`SystemKey`]
//!    is expected, and a [`CategoryName`] is never a bare string.
//!
//! 2. **Single [`TaxonomyKind`] enum.** The three taxonomy forests (data
//!    category, data qualifier, data subject category) share one algebra;
//!    the kind is data, not three parallel type hierarchies.
//!
//! 3. **[`ApprovalStatus`] is a severity lattice.** `Error > Fail > Manual
//!    > Pass`, with the ordering encoded once. Overall-verdict computation
//!    is a fold over that ordering, never an ad-hoc `if` chain.
//!
//! 4. **[`PrivityError`] hierarchy.** Structured errors with `thiserror` —
//!    no `Box<dyn Error>`, no `.unwrap()` outside tests.
//!
//! 5. **Deterministic collections.** Sets of names are `BTreeSet`, result
//!    maps are `BTreeMap`; identical inputs produce structurally identical
//!    outputs.

pub mod declaration;
pub mod error;
pub mod evaluation;
pub mod identity;
pub mod policy;
pub mod status;
pub mod system;
pub mod taxonomy;

// Re-export primary types at crate root for ergonomic imports.
pub use declaration::Declaration;
pub use error::PrivityError;
pub use evaluation::{StatusMap, SystemEvaluation};
pub use identity::{CategoryName, DatasetKey, OrganizationId, RuleKey, SystemKey, UseName};
pub use policy::{MatchCriteria, MatchKind, Policy, PolicyRule, RuleAction};
pub use status::ApprovalStatus;
pub use system::{Dataset, DatasetField, SystemObject};
pub use taxonomy::TaxonomyKind;
