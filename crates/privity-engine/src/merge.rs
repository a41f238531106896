//! # Declaration Merge/Diff Engine
//!
//! Declarations with the same `(data_qualifier, data_use)` describe the same
//! processing context, so they merge into one declaration whose category
//! sets are the reduced unions of the constituents. Diffing two declaration
//! collections compares merged groups pairwise and reports only what the
//! right side fails to cover.

use std::collections::{BTreeMap, BTreeSet};

use privity_core::{CategoryName, Declaration, OrganizationId, PrivityError, TaxonomyKind, UseName};
use privity_taxonomy::{diff, merge_and_reduce, TaxonomyLookup};

/// Accumulated constituents of one merge group.
#[derive(Default)]
struct Group {
    names: BTreeSet<String>,
    categories: BTreeSet<CategoryName>,
    subject_categories: BTreeSet<CategoryName>,
}

fn group_by_key(
    declarations: &[Declaration],
) -> BTreeMap<(CategoryName, UseName), Group> {
    let mut groups: BTreeMap<(CategoryName, UseName), Group> = BTreeMap::new();
    for declaration in declarations {
        let group = groups.entry(declaration.group_key()).or_default();
        group.names.insert(declaration.name.clone());
        group
            .categories
            .extend(declaration.data_categories.iter().cloned());
        group
            .subject_categories
            .extend(declaration.data_subject_categories.iter().cloned());
    }
    groups
}

/// Merge declarations by `(qualifier, use)` group.
///
/// Within each group, the unions of data categories and of subject
/// categories are collapsed to their minimal ancestor-covering form. The
/// merged declaration's name is the comma-joined sorted distinct names of
/// the constituents. Output is sorted by group key.
pub fn merge_declarations(
    store: &impl TaxonomyLookup,
    organization: &OrganizationId,
    declarations: &[Declaration],
) -> Result<Vec<Declaration>, PrivityError> {
    group_by_key(declarations)
        .into_iter()
        .map(|((qualifier, data_use), group)| {
            Ok(Declaration {
                name: group.names.iter().cloned().collect::<Vec<_>>().join(", "),
                data_categories: merge_and_reduce(
                    store,
                    organization,
                    TaxonomyKind::DataCategory,
                    &group.categories,
                )?,
                data_use,
                data_qualifier: qualifier,
                data_subject_categories: merge_and_reduce(
                    store,
                    organization,
                    TaxonomyKind::DataSubject,
                    &group.subject_categories,
                )?,
            })
        })
        .collect()
}

/// Hierarchy-aware diff of two declaration collections.
///
/// Both sides are merged first. For every group key of merged `a`, the
/// categories and subject categories are diffed against the matching group
/// of merged `b` (the empty set when `b` has no such group). A declaration
/// is emitted per key only when either diff is non-empty; fully covered
/// groups produce no finding.
pub fn diff_declarations(
    store: &impl TaxonomyLookup,
    organization: &OrganizationId,
    a: &[Declaration],
    b: &[Declaration],
) -> Result<Vec<Declaration>, PrivityError> {
    let merged_a = merge_declarations(store, organization, a)?;
    let merged_b = merge_declarations(store, organization, b)?;

    let b_by_key: BTreeMap<(CategoryName, UseName), &Declaration> = merged_b
        .iter()
        .map(|declaration| (declaration.group_key(), declaration))
        .collect();

    let empty = BTreeSet::new();
    let mut findings = Vec::new();
    for declaration in &merged_a {
        let covering = b_by_key.get(&declaration.group_key());
        let covering_categories = covering.map_or(&empty, |d| &d.data_categories);
        let covering_subjects = covering.map_or(&empty, |d| &d.data_subject_categories);

        let category_diff = diff(
            store,
            organization,
            TaxonomyKind::DataCategory,
            &declaration.data_categories,
            covering_categories,
        )?;
        let subject_diff = diff(
            store,
            organization,
            TaxonomyKind::DataSubject,
            &declaration.data_subject_categories,
            covering_subjects,
        )?;

        if !category_diff.is_empty() || !subject_diff.is_empty() {
            findings.push(Declaration {
                name: declaration.name.clone(),
                data_categories: category_diff,
                data_use: declaration.data_use.clone(),
                data_qualifier: declaration.data_qualifier.clone(),
                data_subject_categories: subject_diff,
            });
        }
    }
    Ok(findings)
}
