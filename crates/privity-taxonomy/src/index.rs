//! # Taxonomy Lookup Seam
//!
//! [`TaxonomyLookup`] is the boundary between the evaluation core and
//! whatever stores the taxonomies. The core only ever asks one question —
//! "what are the descendants of this node, inclusive?" — so a store may back
//! it with an adjacency list, a materialized path, or a closure table.
//!
//! [`TaxonomyIndex`] is the in-memory implementation: a registry of
//! validated [`TaxonomyForest`]s keyed by `(organization, kind)`, loaded
//! once per taxonomy snapshot.

use std::collections::{BTreeMap, BTreeSet};

use privity_core::{CategoryName, OrganizationId, PrivityError, TaxonomyKind};

use crate::forest::TaxonomyForest;

/// Read access to an organization's taxonomy forests.
///
/// Implementations must answer against a single consistent snapshot for the
/// duration of an evaluation call; read consistency under concurrent edits
/// is the store's responsibility, not the algebra's.
pub trait TaxonomyLookup {
    /// `name` plus all of its transitive descendants in the organization's
    /// forest of the given kind.
    ///
    /// Fails fast with [`PrivityError::UnknownCategory`] for a name that is
    /// not part of the forest, and [`PrivityError::UnknownOrganization`]
    /// when the organization has no forest of that kind.
    fn descendants_of_inclusive(
        &self,
        organization: &OrganizationId,
        kind: TaxonomyKind,
        name: &CategoryName,
    ) -> Result<BTreeSet<CategoryName>, PrivityError>;
}

/// In-memory registry of taxonomy forests per organization and kind.
#[derive(Debug, Clone, Default)]
pub struct TaxonomyIndex {
    forests: BTreeMap<(OrganizationId, TaxonomyKind), TaxonomyForest>,
}

impl TaxonomyIndex {
    /// An empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the forest of `kind` for `organization`.
    pub fn register(
        &mut self,
        organization: OrganizationId,
        kind: TaxonomyKind,
        forest: TaxonomyForest,
    ) {
        self.forests.insert((organization, kind), forest);
    }

    /// The registered forest, if any.
    pub fn forest(
        &self,
        organization: &OrganizationId,
        kind: TaxonomyKind,
    ) -> Option<&TaxonomyForest> {
        self.forests.get(&(organization.clone(), kind))
    }
}

impl TaxonomyLookup for TaxonomyIndex {
    fn descendants_of_inclusive(
        &self,
        organization: &OrganizationId,
        kind: TaxonomyKind,
        name: &CategoryName,
    ) -> Result<BTreeSet<CategoryName>, PrivityError> {
        let forest = self.forest(organization, kind).ok_or_else(|| {
            PrivityError::UnknownOrganization {
                kind,
                organization: organization.clone(),
            }
        })?;
        forest
            .descendants_of_inclusive(name)
            .cloned()
            .ok_or_else(|| PrivityError::UnknownCategory {
                kind,
                organization: organization.clone(),
                name: name.clone(),
            })
    }
}
