//! # Taxonomy Kinds
//!
//! The three taxonomy forests an organization maintains. All three share the
//! same tree-shaped structure and the same hierarchy algebra; the kind only
//! selects which forest a name is resolved against.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PrivityError;

/// Which of the three taxonomy forests a category name belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaxonomyKind {
    /// Classifies the kind of personal data (e.g. "contact_data.email").
    DataCategory,
    /// Classifies the identifiability of data (e.g. "identified").
    DataQualifier,
    /// Classifies whose data it is (e.g. "customer", "employee").
    DataSubject,
}

impl TaxonomyKind {
    /// All kinds, in a fixed order.
    pub fn all_kinds() -> &'static [TaxonomyKind] {
        &[
            TaxonomyKind::DataCategory,
            TaxonomyKind::DataQualifier,
            TaxonomyKind::DataSubject,
        ]
    }

    /// Stable snake_case name, matching the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            TaxonomyKind::DataCategory => "data_category",
            TaxonomyKind::DataQualifier => "data_qualifier",
            TaxonomyKind::DataSubject => "data_subject",
        }
    }
}

impl fmt::Display for TaxonomyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaxonomyKind {
    type Err = PrivityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "data_category" => Ok(TaxonomyKind::DataCategory),
            "data_qualifier" => Ok(TaxonomyKind::DataQualifier),
            "data_subject" => Ok(TaxonomyKind::DataSubject),
            other => Err(PrivityError::UnknownTaxonomyKind {
                name: other.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn as_str_roundtrip() {
        for kind in TaxonomyKind::all_kinds() {
            let parsed: TaxonomyKind = kind.as_str().parse().unwrap();
            assert_eq!(*kind, parsed);
        }
    }

    #[test]
    fn from_str_invalid() {
        assert!("data-category".parse::<TaxonomyKind>().is_err());
        assert!("".parse::<TaxonomyKind>().is_err());
    }

    #[test]
    fn serde_format_matches_as_str() {
        for kind in TaxonomyKind::all_kinds() {
            let json = serde_json::to_string(kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.as_str()));
        }
    }
}
