//! # Policy Rule Matching
//!
//! Pure predicate evaluation of one rule against one declaration. Category
//! and subject-category criteria are hierarchy-aware: a rule targeting a
//! broad node also matches declarations whose names descend from it. Use
//! criteria compare by exact name, and the qualifier criterion accepts the
//! rule's node or any descendant of it.

use std::collections::BTreeSet;

use privity_core::{
    CategoryName, Declaration, MatchCriteria, OrganizationId, PolicyRule, PrivityError,
    RuleAction, TaxonomyKind,
};
use privity_taxonomy::TaxonomyLookup;

/// Evaluate whether `criteria` holds over the declared category names,
/// counting hierarchy containment as membership.
fn hierarchy_criteria_holds(
    store: &impl TaxonomyLookup,
    organization: &OrganizationId,
    kind: TaxonomyKind,
    criteria: &MatchCriteria<CategoryName>,
    declared: &BTreeSet<CategoryName>,
) -> Result<bool, PrivityError> {
    // A declared name matches when it equals or descends from any criterion
    // value, i.e. when it falls inside the values' combined closure.
    let mut targets = BTreeSet::new();
    for value in &criteria.values {
        targets.extend(store.descendants_of_inclusive(organization, kind, value)?);
    }
    Ok(criteria.fold(declared.iter().map(|name| targets.contains(name))))
}

/// Match one rule against one declaration.
///
/// Returns `Some(action)` when every present criterion holds, `None` when
/// the rule does not apply to this declaration. Absent criteria impose no
/// constraint.
pub fn rule_matches(
    store: &impl TaxonomyLookup,
    organization: &OrganizationId,
    rule: &PolicyRule,
    declaration: &Declaration,
) -> Result<Option<RuleAction>, PrivityError> {
    if let Some(criteria) = &rule.data_categories {
        if !hierarchy_criteria_holds(
            store,
            organization,
            TaxonomyKind::DataCategory,
            criteria,
            &declaration.data_categories,
        )? {
            return Ok(None);
        }
    }

    if let Some(criteria) = &rule.data_uses {
        // A declaration carries exactly one use; uses are opaque names.
        let matched = criteria.values.contains(&declaration.data_use);
        if !criteria.fold([matched]) {
            return Ok(None);
        }
    }

    if let Some(criteria) = &rule.data_subject_categories {
        if !hierarchy_criteria_holds(
            store,
            organization,
            TaxonomyKind::DataSubject,
            criteria,
            &declaration.data_subject_categories,
        )? {
            return Ok(None);
        }
    }

    if let Some(qualifier) = &rule.data_qualifier {
        let closure =
            store.descendants_of_inclusive(organization, TaxonomyKind::DataQualifier, qualifier)?;
        if !closure.contains(&declaration.data_qualifier) {
            return Ok(None);
        }
    }

    Ok(Some(rule.action))
}
