//! # Privacy Declarations
//!
//! A declaration is one privacy-practice statement within a system: "this
//! system processes these data categories, about these data subjects, at
//! this identifiability qualifier, for this use".

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::identity::{CategoryName, UseName};

/// One privacy-practice statement within a system.
///
/// `data_categories` and `data_subject_categories` may contain redundant
/// ancestor/descendant pairs until reduced by the hierarchy algebra; the
/// qualifier always denotes exactly one node (the most specific applicable
/// qualifier).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Declaration {
    /// Display label. Synthesized as a comma-joined list when declarations
    /// are merged.
    pub name: String,
    /// The kinds of personal data processed.
    pub data_categories: BTreeSet<CategoryName>,
    /// The purpose the data is processed for.
    pub data_use: UseName,
    /// Identifiability level of the processed data.
    pub data_qualifier: CategoryName,
    /// Whose data is processed.
    pub data_subject_categories: BTreeSet<CategoryName>,
}

impl Declaration {
    /// The merge/diff grouping key: declarations with the same qualifier and
    /// use describe the same processing context and are combined.
    pub fn group_key(&self) -> (CategoryName, UseName) {
        (self.data_qualifier.clone(), self.data_use.clone())
    }
}
