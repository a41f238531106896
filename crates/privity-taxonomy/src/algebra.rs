//! # Hierarchy-Aware Set Algebra
//!
//! Pure functions over sets of [`CategoryName`]s within one taxonomy forest.
//! All three operations are deterministic given a taxonomy snapshot, and all
//! three fail fast on names the forest does not contain.

use std::collections::{BTreeMap, BTreeSet};

use privity_core::{CategoryName, OrganizationId, PrivityError, TaxonomyKind};

use crate::index::TaxonomyLookup;

/// `name` plus all of its transitive descendants — everything `name`
/// subsumes.
pub fn descendants_inclusive(
    store: &impl TaxonomyLookup,
    organization: &OrganizationId,
    kind: TaxonomyKind,
    name: &CategoryName,
) -> Result<BTreeSet<CategoryName>, PrivityError> {
    store.descendants_of_inclusive(organization, kind, name)
}

/// Collapse `categories` to its minimal ancestor-covering form: drop every
/// element that is a strict descendant of another element, keeping only the
/// most general nodes.
///
/// Idempotent: reducing a reduced set changes nothing. Every input element
/// is subsumed by some element of the result.
pub fn merge_and_reduce(
    store: &impl TaxonomyLookup,
    organization: &OrganizationId,
    kind: TaxonomyKind,
    categories: &BTreeSet<CategoryName>,
) -> Result<BTreeSet<CategoryName>, PrivityError> {
    // One lookup per element; also validates every name up front.
    let mut closures: BTreeMap<&CategoryName, BTreeSet<CategoryName>> = BTreeMap::new();
    for name in categories {
        closures.insert(name, store.descendants_of_inclusive(organization, kind, name)?);
    }

    let reduced = categories
        .iter()
        .filter(|candidate| {
            !categories
                .iter()
                .filter(|other| other != candidate)
                .any(|other| closures[other].contains(*candidate))
        })
        .cloned()
        .collect();
    Ok(reduced)
}

/// Hierarchy-aware set difference: the elements of `merge_and_reduce(a)`
/// that are neither equal to nor a descendant of any element of `b`.
///
/// Asymmetric: a broad category in `b` covers all of its narrower
/// descendants appearing in `a`, but not the other way around.
pub fn diff(
    store: &impl TaxonomyLookup,
    organization: &OrganizationId,
    kind: TaxonomyKind,
    a: &BTreeSet<CategoryName>,
    b: &BTreeSet<CategoryName>,
) -> Result<BTreeSet<CategoryName>, PrivityError> {
    let reduced_a = merge_and_reduce(store, organization, kind, a)?;
    let reduced_b = merge_and_reduce(store, organization, kind, b)?;

    let mut covered = BTreeSet::new();
    for name in &reduced_b {
        covered.extend(store.descendants_of_inclusive(organization, kind, name)?);
    }

    Ok(reduced_a
        .into_iter()
        .filter(|name| !covered.contains(name))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forest::{TaxonomyForest, TaxonomyNode};
    use crate::index::TaxonomyIndex;

    const ORG: &str = "acme";
    const KIND: TaxonomyKind = TaxonomyKind::DataCategory;

    /// contact_data ── email ── work_email
    ///             └── phone
    /// location
    /// demographic
    fn fixture() -> TaxonomyIndex {
        let forest = TaxonomyForest::from_nodes([
            TaxonomyNode::root("contact_data"),
            TaxonomyNode::child("contact_data.email", "contact_data"),
            TaxonomyNode::child("contact_data.email.work", "contact_data.email"),
            TaxonomyNode::child("contact_data.phone", "contact_data"),
            TaxonomyNode::root("location"),
            TaxonomyNode::root("demographic"),
        ])
        .unwrap();
        let mut index = TaxonomyIndex::new();
        index.register(OrganizationId::from(ORG), KIND, forest);
        index
    }

    fn org() -> OrganizationId {
        OrganizationId::from(ORG)
    }

    fn names(values: &[&str]) -> BTreeSet<CategoryName> {
        values.iter().map(|v| CategoryName::from(*v)).collect()
    }

    #[test]
    fn reduce_drops_descendants_of_present_ancestors() {
        let index = fixture();
        let reduced = merge_and_reduce(
            &index,
            &org(),
            KIND,
            &names(&["contact_data", "contact_data.email", "contact_data.email.work", "location"]),
        )
        .unwrap();
        assert_eq!(reduced, names(&["contact_data", "location"]));
    }

    #[test]
    fn reduce_keeps_unrelated_siblings() {
        let index = fixture();
        let reduced = merge_and_reduce(
            &index,
            &org(),
            KIND,
            &names(&["contact_data.email", "contact_data.phone"]),
        )
        .unwrap();
        assert_eq!(reduced, names(&["contact_data.email", "contact_data.phone"]));
    }

    #[test]
    fn reduce_is_idempotent() {
        let index = fixture();
        let once = merge_and_reduce(
            &index,
            &org(),
            KIND,
            &names(&["contact_data", "contact_data.email", "location"]),
        )
        .unwrap();
        let twice = merge_and_reduce(&index, &org(), KIND, &once).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn reduce_unknown_name_fails() {
        let index = fixture();
        let result = merge_and_reduce(&index, &org(), KIND, &names(&["biometrics"]));
        assert!(matches!(result, Err(PrivityError::UnknownCategory { .. })));
    }

    #[test]
    fn diff_is_asymmetric() {
        let index = fixture();
        // A broad category on the right covers its descendants on the left...
        let narrow_vs_broad = diff(
            &index,
            &org(),
            KIND,
            &names(&["contact_data.email"]),
            &names(&["contact_data"]),
        )
        .unwrap();
        assert!(narrow_vs_broad.is_empty());

        // ...but a narrow category on the right does not cover its ancestor.
        let broad_vs_narrow = diff(
            &index,
            &org(),
            KIND,
            &names(&["contact_data"]),
            &names(&["contact_data.email"]),
        )
        .unwrap();
        assert_eq!(broad_vs_narrow, names(&["contact_data"]));
    }

    #[test]
    fn diff_empty_when_fully_covered() {
        let index = fixture();
        let result = diff(
            &index,
            &org(),
            KIND,
            &names(&["contact_data.email", "contact_data.phone"]),
            &names(&["contact_data", "location"]),
        )
        .unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn diff_reports_uncovered_elements_reduced() {
        let index = fixture();
        let result = diff(
            &index,
            &org(),
            KIND,
            &names(&["contact_data", "contact_data.email", "location"]),
            &names(&["location"]),
        )
        .unwrap();
        // contact_data.email is folded into contact_data by reduction.
        assert_eq!(result, names(&["contact_data"]));
    }

    #[test]
    fn diff_against_empty_right_side_keeps_reduced_left() {
        let index = fixture();
        let result = diff(
            &index,
            &org(),
            KIND,
            &names(&["contact_data.email", "contact_data"]),
            &BTreeSet::new(),
        )
        .unwrap();
        assert_eq!(result, names(&["contact_data"]));
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        const FIXTURE_NAMES: &[&str] = &[
            "contact_data",
            "contact_data.email",
            "contact_data.email.work",
            "contact_data.phone",
            "location",
            "demographic",
        ];

        fn arb_subset() -> impl Strategy<Value = BTreeSet<CategoryName>> {
            proptest::collection::btree_set(
                proptest::sample::select(FIXTURE_NAMES).prop_map(CategoryName::from),
                0..FIXTURE_NAMES.len(),
            )
        }

        proptest! {
            #[test]
            fn reduction_is_idempotent(set in arb_subset()) {
                let index = fixture();
                let once = merge_and_reduce(&index, &org(), KIND, &set).unwrap();
                let twice = merge_and_reduce(&index, &org(), KIND, &once).unwrap();
                prop_assert_eq!(once, twice);
            }

            #[test]
            fn reduction_covers_every_input(set in arb_subset()) {
                let index = fixture();
                let reduced = merge_and_reduce(&index, &org(), KIND, &set).unwrap();
                for name in &set {
                    let covered = reduced.iter().any(|kept| {
                        index
                            .descendants_of_inclusive(&org(), KIND, kept)
                            .unwrap()
                            .contains(name)
                    });
                    prop_assert!(covered, "{name} not covered by {reduced:?}");
                }
            }

            #[test]
            fn diff_empty_when_subsumed(a in arb_subset(), extra in arb_subset()) {
                let index = fixture();
                // b ⊇ a, so every element of a is subsumed (equality counts).
                let b: BTreeSet<CategoryName> = a.union(&extra).cloned().collect();
                let result = diff(&index, &org(), KIND, &a, &b).unwrap();
                prop_assert!(result.is_empty(), "diff(a, a ∪ extra) = {result:?}");
            }

            #[test]
            fn diff_result_is_subset_of_reduced_left(a in arb_subset(), b in arb_subset()) {
                let index = fixture();
                let result = diff(&index, &org(), KIND, &a, &b).unwrap();
                let reduced_a = merge_and_reduce(&index, &org(), KIND, &a).unwrap();
                prop_assert!(result.is_subset(&reduced_a));
            }
        }
    }
}
