//! # System Evaluator
//!
//! Orchestrates rule evaluation across all declarations × all applicable
//! policies, aggregates statuses, runs dependency-consistency checks, and
//! computes the single overall verdict.
//!
//! Evaluation is a single-pass, stateless pure computation: no intermediate
//! persisted state, no retries. Re-running with identical inputs (including
//! the taxonomy snapshot) yields an identical [`SystemEvaluation`].

use std::collections::{BTreeMap, BTreeSet};

use privity_core::{
    ApprovalStatus, CategoryName, Dataset, OrganizationId, Policy, PrivityError, RuleKey,
    StatusMap, SystemEvaluation, SystemObject, TaxonomyKind,
};
use privity_taxonomy::{descendants_inclusive, diff, merge_and_reduce, TaxonomyLookup};

use crate::merge::diff_declarations;
use crate::rule::rule_matches;

fn join_names(names: &BTreeSet<CategoryName>) -> String {
    names
        .iter()
        .map(CategoryName::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Evaluate every (declaration, policy, rule) triple and aggregate the
/// outcomes by status, then by qualified rule key, collecting the names of
/// the declarations that triggered each rule.
///
/// Triples where the rule does not apply contribute nothing. When any
/// non-`Pass` status is present, the `Pass` entry is removed entirely: once
/// something fails or needs review, a list of passing rules is noise. A map
/// containing only `Pass` is kept so callers can observe a clean result.
pub fn evaluate_policy_rules(
    store: &impl TaxonomyLookup,
    organization: &OrganizationId,
    policies: &[Policy],
    system: &SystemObject,
) -> Result<StatusMap, PrivityError> {
    let mut status_map = StatusMap::new();

    for declaration in &system.declarations {
        for policy in policies {
            for rule in &policy.rules {
                let Some(action) = rule_matches(store, organization, rule, declaration)? else {
                    continue;
                };
                let status = ApprovalStatus::from(action);
                let rule_key = RuleKey::qualified(&policy.key, &rule.key);
                tracing::debug!(
                    system = system.key.as_str(),
                    rule = rule_key.as_str(),
                    declaration = declaration.name.as_str(),
                    %status,
                    "rule matched declaration"
                );
                status_map
                    .entry(status)
                    .or_default()
                    .entry(rule_key)
                    .or_default()
                    .push(declaration.name.clone());
            }
        }
    }

    if status_map.keys().any(|status| *status != ApprovalStatus::Pass) {
        status_map.remove(&ApprovalStatus::Pass);
    }
    Ok(status_map)
}

/// Coverage check (a): for each (qualifier, merged-category-set) pair from
/// the system's own declarations, every dependent dataset must not expose
/// categories under that qualifier's closure beyond what the system
/// declares.
fn dataset_coverage_warnings(
    store: &impl TaxonomyLookup,
    system: &SystemObject,
    dependent_datasets: &[Dataset],
) -> Result<Vec<String>, PrivityError> {
    let organization = &system.organization_id;

    let mut declared_by_qualifier: BTreeMap<CategoryName, BTreeSet<CategoryName>> =
        BTreeMap::new();
    for declaration in &system.declarations {
        declared_by_qualifier
            .entry(declaration.data_qualifier.clone())
            .or_default()
            .extend(declaration.data_categories.iter().cloned());
    }

    let mut datasets: Vec<&Dataset> = dependent_datasets.iter().collect();
    datasets.sort_by(|a, b| a.key.cmp(&b.key));

    let mut warnings = Vec::new();
    for (qualifier, declared) in &declared_by_qualifier {
        let declared =
            merge_and_reduce(store, organization, TaxonomyKind::DataCategory, declared)?;
        let qualifier_closure =
            descendants_inclusive(store, organization, TaxonomyKind::DataQualifier, qualifier)?;

        for dataset in &datasets {
            let exposed = dataset.categories_for_qualifiers(&qualifier_closure);
            let uncovered = diff(
                store,
                organization,
                TaxonomyKind::DataCategory,
                &exposed,
                &declared,
            )?;
            if uncovered.is_empty() {
                continue;
            }
            tracing::warn!(
                system = system.key.as_str(),
                dataset = dataset.key.as_str(),
                qualifier = qualifier.as_str(),
                "dataset exposes undeclared categories"
            );
            warnings.push(format!(
                "The dataset {} exposes data categories [{}] under qualifier {} that are not covered by the system's declarations.",
                dataset.key,
                join_names(&uncovered),
                qualifier,
            ));
        }
    }
    Ok(warnings)
}

/// Coverage check (b): every dependent system's declarations must be covered
/// by this system's own declarations.
fn dependency_declaration_warnings(
    store: &impl TaxonomyLookup,
    system: &SystemObject,
    dependent_systems: &[SystemObject],
) -> Result<Vec<String>, PrivityError> {
    let organization = &system.organization_id;

    let mut dependents: Vec<&SystemObject> = dependent_systems.iter().collect();
    dependents.sort_by(|a, b| a.key.cmp(&b.key));

    let mut warnings = Vec::new();
    for dependent in dependents {
        let uncovered = diff_declarations(
            store,
            organization,
            &dependent.declarations,
            &system.declarations,
        )?;
        if uncovered.is_empty() {
            continue;
        }
        let details = uncovered
            .iter()
            .map(|declaration| {
                format!(
                    "{} (categories: [{}]; subjects: [{}])",
                    declaration.name,
                    join_names(&declaration.data_categories),
                    join_names(&declaration.data_subject_categories),
                )
            })
            .collect::<Vec<_>>()
            .join("; ");
        tracing::warn!(
            system = system.key.as_str(),
            dependent = dependent.key.as_str(),
            "dependent system declares processing not covered by this system"
        );
        warnings.push(format!(
            "The dependent system {} declares processing not covered by this system's declarations: {}.",
            dependent.key, details,
        ));
    }
    Ok(warnings)
}

/// Structural check: every declared dataset and system dependency must be
/// present among the resolved inputs. Missing keys render as one error per
/// entity kind; any error forces the `Error` verdict.
fn reference_errors(
    system: &SystemObject,
    dependent_systems: &[SystemObject],
    dependent_datasets: &[Dataset],
) -> Vec<String> {
    let mut errors = Vec::new();

    let resolved_datasets: BTreeSet<_> = dependent_datasets.iter().map(|d| &d.key).collect();
    let missing_datasets: Vec<&str> = system
        .datasets
        .iter()
        .filter(|key| !resolved_datasets.contains(key))
        .map(|key| key.as_str())
        .collect();
    if !missing_datasets.is_empty() {
        errors.push(format!(
            "The referenced datasets {} were not found.",
            missing_datasets.join(", ")
        ));
    }

    let resolved_systems: BTreeSet<_> = dependent_systems.iter().map(|s| &s.key).collect();
    let missing_systems: Vec<&str> = system
        .system_dependencies
        .iter()
        .filter(|key| !resolved_systems.contains(key))
        .map(|key| key.as_str())
        .collect();
    if !missing_systems.is_empty() {
        errors.push(format!(
            "The referenced systems {} were not found.",
            missing_systems.join(", ")
        ));
    }

    errors
}

/// Evaluate one system against its policies and resolved dependencies.
///
/// Produces the status breakdown, the coverage warnings (advisory only),
/// the structural errors, and the overall verdict by severity precedence:
/// errors force `Error`; otherwise the worst rule outcome wins; a system
/// with no findings passes. Warnings never affect the verdict.
///
/// Performs no I/O. Taxonomy lookup failures (unknown names) propagate as
/// `Err` — a failed call is distinct from a returned evaluation whose
/// verdict is `Error`.
pub fn evaluate_system(
    store: &impl TaxonomyLookup,
    system: &SystemObject,
    dependent_systems: &[SystemObject],
    dependent_datasets: &[Dataset],
    policies: &[Policy],
) -> Result<SystemEvaluation, PrivityError> {
    let status_map =
        evaluate_policy_rules(store, &system.organization_id, policies, system)?;

    let mut warnings = dataset_coverage_warnings(store, system, dependent_datasets)?;
    warnings.extend(dependency_declaration_warnings(
        store,
        system,
        dependent_systems,
    )?);

    let errors = reference_errors(system, dependent_systems, dependent_datasets);

    let overall_approval = if !errors.is_empty() {
        ApprovalStatus::Error
    } else {
        status_map
            .keys()
            .copied()
            .fold(ApprovalStatus::Pass, ApprovalStatus::worst)
    };

    tracing::debug!(
        system = system.key.as_str(),
        overall = overall_approval.as_str(),
        warnings = warnings.len(),
        errors = errors.len(),
        "system evaluation complete"
    );

    Ok(SystemEvaluation {
        status_map,
        warnings,
        errors,
        overall_approval,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use privity_core::{
        Declaration, DatasetField, DatasetKey, MatchCriteria, MatchKind, PolicyRule, RuleAction,
        SystemKey, UseName,
    };
    use privity_taxonomy::{TaxonomyForest, TaxonomyIndex, TaxonomyNode};

    fn org() -> OrganizationId {
        OrganizationId::from("acme")
    }

    fn fixture() -> TaxonomyIndex {
        let categories = TaxonomyForest::from_nodes([
            TaxonomyNode::root("contact_data"),
            TaxonomyNode::child("contact_data.email", "contact_data"),
            TaxonomyNode::root("location"),
            TaxonomyNode::root("demographic"),
        ])
        .unwrap();
        let subjects = TaxonomyForest::from_nodes([
            TaxonomyNode::root("customer"),
            TaxonomyNode::root("employee"),
        ])
        .unwrap();
        let qualifiers = TaxonomyForest::from_nodes([
            TaxonomyNode::root("identified"),
            TaxonomyNode::child("pseudonymized", "identified"),
        ])
        .unwrap();

        let mut index = TaxonomyIndex::new();
        index.register(org(), TaxonomyKind::DataCategory, categories);
        index.register(org(), TaxonomyKind::DataSubject, subjects);
        index.register(org(), TaxonomyKind::DataQualifier, qualifiers);
        index
    }

    fn declaration(name: &str, categories: &[&str], data_use: &str) -> Declaration {
        Declaration {
            name: name.to_string(),
            data_categories: categories.iter().map(|c| CategoryName::from(*c)).collect(),
            data_use: UseName::from(data_use),
            data_qualifier: CategoryName::from("identified"),
            data_subject_categories: [CategoryName::from("customer")].into(),
        }
    }

    fn system(declarations: Vec<Declaration>) -> SystemObject {
        SystemObject {
            organization_id: org(),
            key: SystemKey::from("checkout"),
            declarations,
            datasets: BTreeSet::new(),
            system_dependencies: BTreeSet::new(),
        }
    }

    fn use_rule(key: &str, action: RuleAction, data_use: &str) -> PolicyRule {
        PolicyRule::new(key, action)
            .with_data_uses(MatchCriteria::new(MatchKind::Any, [UseName::from(data_use)]))
    }

    #[test]
    fn status_map_groups_by_status_and_rule_key() {
        let index = fixture();
        let sys = system(vec![
            declaration("email marketing", &["contact_data.email"], "marketing"),
            declaration("profiling", &["demographic"], "profiling"),
        ]);
        let policies = vec![Policy::new(
            "primary",
            vec![
                use_rule("reject_marketing", RuleAction::Reject, "marketing"),
                use_rule("review_profiling", RuleAction::Require, "profiling"),
            ],
        )];

        let status_map = evaluate_policy_rules(&index, &org(), &policies, &sys).unwrap();
        assert_eq!(
            status_map[&ApprovalStatus::Fail][&RuleKey::qualified("primary", "reject_marketing")],
            vec!["email marketing".to_string()]
        );
        assert_eq!(
            status_map[&ApprovalStatus::Manual][&RuleKey::qualified("primary", "review_profiling")],
            vec!["profiling".to_string()]
        );
    }

    #[test]
    fn pass_entry_suppressed_when_other_statuses_present() {
        let index = fixture();
        let sys = system(vec![
            declaration("email marketing", &["contact_data.email"], "marketing"),
            declaration("analytics", &["location"], "analytics"),
        ]);
        let policies = vec![Policy::new(
            "primary",
            vec![
                use_rule("reject_marketing", RuleAction::Reject, "marketing"),
                use_rule("accept_analytics", RuleAction::Accept, "analytics"),
            ],
        )];

        let status_map = evaluate_policy_rules(&index, &org(), &policies, &sys).unwrap();
        assert!(status_map.contains_key(&ApprovalStatus::Fail));
        assert!(!status_map.contains_key(&ApprovalStatus::Pass));
    }

    #[test]
    fn pass_entry_kept_when_everything_passes() {
        let index = fixture();
        let sys = system(vec![declaration("analytics", &["location"], "analytics")]);
        let policies = vec![Policy::new(
            "primary",
            vec![use_rule("accept_analytics", RuleAction::Accept, "analytics")],
        )];

        let status_map = evaluate_policy_rules(&index, &org(), &policies, &sys).unwrap();
        assert!(status_map.contains_key(&ApprovalStatus::Pass));
        assert_eq!(status_map.len(), 1);
    }

    #[test]
    fn missing_dataset_reference_is_an_error() {
        let index = fixture();
        let mut sys = system(vec![declaration("analytics", &["location"], "analytics")]);
        sys.datasets.insert(DatasetKey::from("ds1"));

        let evaluation = evaluate_system(&index, &sys, &[], &[], &[]).unwrap();
        assert_eq!(
            evaluation.errors,
            vec!["The referenced datasets ds1 were not found.".to_string()]
        );
        assert_eq!(evaluation.overall_approval, ApprovalStatus::Error);
    }

    #[test]
    fn missing_system_reference_is_an_error() {
        let index = fixture();
        let mut sys = system(vec![]);
        sys.system_dependencies.insert(SystemKey::from("billing"));

        let evaluation = evaluate_system(&index, &sys, &[], &[], &[]).unwrap();
        assert_eq!(
            evaluation.errors,
            vec!["The referenced systems billing were not found.".to_string()]
        );
        assert_eq!(evaluation.overall_approval, ApprovalStatus::Error);
    }

    #[test]
    fn errors_outrank_rule_failures() {
        let index = fixture();
        let mut sys = system(vec![declaration("marketing", &["location"], "marketing")]);
        sys.datasets.insert(DatasetKey::from("ds1"));
        let policies = vec![Policy::new(
            "primary",
            vec![use_rule("reject_marketing", RuleAction::Reject, "marketing")],
        )];

        let evaluation = evaluate_system(&index, &sys, &[], &[], &policies).unwrap();
        assert!(evaluation.status_map.contains_key(&ApprovalStatus::Fail));
        assert_eq!(evaluation.overall_approval, ApprovalStatus::Error);
    }

    #[test]
    fn dataset_coverage_warning_names_dataset_qualifier_and_categories() {
        let index = fixture();
        let mut sys = system(vec![declaration(
            "emails",
            &["contact_data.email"],
            "marketing",
        )]);
        sys.datasets.insert(DatasetKey::from("orders"));

        let dataset = Dataset {
            key: DatasetKey::from("orders"),
            fields: vec![
                DatasetField {
                    name: "email".to_string(),
                    data_categories: [CategoryName::from("contact_data.email")].into(),
                    data_qualifier: CategoryName::from("identified"),
                },
                // Exposed at a qualifier inside the declared closure, but the
                // category is not declared.
                DatasetField {
                    name: "region".to_string(),
                    data_categories: [CategoryName::from("location")].into(),
                    data_qualifier: CategoryName::from("pseudonymized"),
                },
            ],
        };

        let evaluation = evaluate_system(&index, &sys, &[], &[dataset], &[]).unwrap();
        assert_eq!(evaluation.warnings.len(), 1);
        let warning = &evaluation.warnings[0];
        assert!(warning.contains("orders"));
        assert!(warning.contains("identified"));
        assert!(warning.contains("location"));
        // Advisory only.
        assert_eq!(evaluation.overall_approval, ApprovalStatus::Pass);
        assert!(evaluation.errors.is_empty());
    }

    #[test]
    fn covered_dataset_produces_no_warning() {
        let index = fixture();
        let mut sys = system(vec![declaration("contact", &["contact_data"], "marketing")]);
        sys.datasets.insert(DatasetKey::from("orders"));

        let dataset = Dataset {
            key: DatasetKey::from("orders"),
            fields: vec![DatasetField {
                name: "email".to_string(),
                // A descendant of the declared broad category.
                data_categories: [CategoryName::from("contact_data.email")].into(),
                data_qualifier: CategoryName::from("identified"),
            }],
        };

        let evaluation = evaluate_system(&index, &sys, &[], &[dataset], &[]).unwrap();
        assert!(evaluation.warnings.is_empty());
    }

    #[test]
    fn clean_system_passes_with_empty_findings() {
        let index = fixture();
        let sys = system(vec![declaration("demo", &["demographic"], "marketing")]);
        let policies = vec![Policy::new(
            "primary",
            vec![use_rule("accept_marketing", RuleAction::Accept, "marketing")],
        )];

        let evaluation = evaluate_system(&index, &sys, &[], &[], &policies).unwrap();
        assert_eq!(evaluation.overall_approval, ApprovalStatus::Pass);
        assert!(evaluation.warnings.is_empty());
        assert!(evaluation.errors.is_empty());
    }
}
