//! # Error Types — Structured Error Hierarchy
//!
//! Defines the error type used throughout the Privity Stack. All errors use
//! `thiserror` for derive-based `Display` and `Error` implementations.
//!
//! ## Design
//!
//! - Taxonomy lookups **fail fast** on unknown names. Treating an unknown
//!   name as an empty closure would make `merge_and_reduce`/`diff` silently
//!   under-report coverage, so an unknown name is an error that propagates
//!   out of the whole evaluation call.
//! - Missing *dependencies* (a declared dataset or system the caller did not
//!   resolve) are **not** a Rust error: they are structural findings recorded
//!   in `SystemEvaluation::errors` and force the `Error` verdict.

use thiserror::Error;

use crate::identity::{CategoryName, OrganizationId};
use crate::taxonomy::TaxonomyKind;

/// Top-level error type for the Privity Stack.
#[derive(Error, Debug)]
pub enum PrivityError {
    /// A category name does not exist in the organization's taxonomy forest.
    #[error("unknown {kind} node {name} for organization {organization}")]
    UnknownCategory {
        /// Which forest the name was resolved against.
        kind: TaxonomyKind,
        /// The owning organization.
        organization: OrganizationId,
        /// The name that failed to resolve.
        name: CategoryName,
    },

    /// No taxonomy forest of the given kind is registered for the organization.
    #[error("no {kind} taxonomy registered for organization {organization}")]
    UnknownOrganization {
        /// The forest kind that was requested.
        kind: TaxonomyKind,
        /// The organization with no registered forest.
        organization: OrganizationId,
    },

    /// A taxonomy node names a parent that is not part of the forest.
    #[error("taxonomy node {child} references unknown parent {parent}")]
    UnknownParent {
        /// The node with the dangling parent link.
        child: CategoryName,
        /// The missing parent.
        parent: CategoryName,
    },

    /// The same node name was supplied twice when building a forest.
    #[error("duplicate taxonomy node {name}")]
    DuplicateNode {
        /// The duplicated name.
        name: CategoryName,
    },

    /// The parent links contain a cycle, so the structure is not a forest.
    #[error("taxonomy parent links form a cycle through {name}")]
    CycleDetected {
        /// A node on the detected cycle.
        name: CategoryName,
    },

    /// A taxonomy kind name failed to parse.
    #[error("unknown taxonomy kind {name:?}")]
    UnknownTaxonomyKind {
        /// The unrecognized kind name.
        name: String,
    },

    /// An approval status name failed to parse.
    #[error("unknown approval status {name:?}")]
    UnknownStatus {
        /// The unrecognized status name.
        name: String,
    },

    /// Serialization of an evaluation result failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
