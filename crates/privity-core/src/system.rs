//! # Systems and Datasets
//!
//! A system is the evaluated entity: its privacy declarations plus its
//! declared dependencies on datasets and other systems. A dataset exposes
//! data categories per qualifier through its fields; the evaluator asks it
//! which categories it exposes under a (closure-expanded) qualifier set.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::declaration::Declaration;
use crate::identity::{CategoryName, DatasetKey, OrganizationId, SystemKey};

/// A declared data-processing system — the unit of evaluation.
///
/// All fields are read-only inputs for the duration of one evaluation; the
/// evaluator never mutates a system and never retains references past the
/// call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemObject {
    /// The organization whose taxonomies and policies apply.
    pub organization_id: OrganizationId,
    /// Unique system key.
    pub key: SystemKey,
    /// The system's privacy declarations.
    pub declarations: Vec<Declaration>,
    /// Keys of datasets this system declares it depends on.
    pub datasets: BTreeSet<DatasetKey>,
    /// Keys of other systems this system declares it depends on.
    pub system_dependencies: BTreeSet<SystemKey>,
}

/// One field of a dataset: a named column or attribute carrying data
/// categories at a specific qualifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetField {
    /// Field name within the dataset.
    pub name: String,
    /// Data categories this field carries.
    pub data_categories: BTreeSet<CategoryName>,
    /// Identifiability level of this field.
    pub data_qualifier: CategoryName,
}

/// A dataset a system may declare as a dependency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    /// Unique dataset key.
    pub key: DatasetKey,
    /// The dataset's fields.
    pub fields: Vec<DatasetField>,
}

impl Dataset {
    /// The data categories this dataset exposes under any of the given
    /// qualifiers: the union of categories over fields whose qualifier is a
    /// member of `qualifiers`.
    ///
    /// Callers expand a declared qualifier to its descendant-inclusive
    /// closure before asking, so a field at a more specific qualifier than
    /// the declared one still counts as exposed.
    pub fn categories_for_qualifiers(
        &self,
        qualifiers: &BTreeSet<CategoryName>,
    ) -> BTreeSet<CategoryName> {
        self.fields
            .iter()
            .filter(|field| qualifiers.contains(&field.data_qualifier))
            .flat_map(|field| field.data_categories.iter().cloned())
            .collect()
    }
}
