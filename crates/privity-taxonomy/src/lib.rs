//! # privity-taxonomy — Category Forests and Hierarchy Algebra
//!
//! Taxonomies are forests: each organization has its own set of roots per
//! taxonomy kind, and a node's ancestors/descendants are determined by
//! parent links. Specificity implies containment — "contact_data" subsumes
//! "contact_data.email" — so comparing raw name sets produces false
//! positives. The algebra in this crate exists to eliminate those:
//!
//! - [`algebra::descendants_inclusive`] — a node plus all transitive
//!   descendants.
//! - [`algebra::merge_and_reduce`] — collapse a set to its most general,
//!   non-redundant members.
//! - [`algebra::diff`] — set difference where hierarchy containment counts
//!   as coverage.
//!
//! ## Structure
//!
//! - [`forest::TaxonomyForest`] validates parent links at construction and
//!   precomputes the inclusive descendant closure of every node, so queries
//!   never recompute transitive closures.
//! - [`index::TaxonomyLookup`] is the seam to the external taxonomy store;
//!   [`index::TaxonomyIndex`] is the in-memory implementation, keyed by
//!   `(organization, kind)`.
//!
//! ## Lookup Failure Policy
//!
//! Unknown names **fail fast** with [`privity_core::PrivityError`] rather
//! than resolving to an empty closure. An empty closure would make
//! `merge_and_reduce`/`diff` silently under-report coverage.

pub mod algebra;
pub mod forest;
pub mod index;

pub use algebra::{descendants_inclusive, diff, merge_and_reduce};
pub use forest::{TaxonomyForest, TaxonomyNode};
pub use index::{TaxonomyIndex, TaxonomyLookup};
