//! # Domain Identity Newtypes
//!
//! Newtype wrappers for all identifiers in the Privity Stack. These prevent
//! accidental identifier confusion — you cannot pass a `DatasetKey` where a
//! `SystemKey` is expected, and a taxonomy node name is never a bare string.
//!
//! All keys are human-authored strings (e.g. `"contact_data.email"`), so the
//! newtypes wrap `String` rather than a generated identifier type.

use serde::{Deserialize, Serialize};

/// Identifier of the organization that owns a taxonomy snapshot, a system,
/// or a policy. Taxonomies are forests scoped per organization.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct OrganizationId(pub String);

/// Name of a node in one of the three taxonomy forests (data category,
/// data qualifier, data subject category).
///
/// A `CategoryName` is opaque to the algebra: ancestry is determined by the
/// parent-link structure of the owning forest, never by parsing the name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CategoryName(pub String);

/// Name of a data use (e.g. `"marketing"`).
///
/// Data uses are not one of the three taxonomy forests; they compare by
/// exact name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UseName(pub String);

/// Unique key of an evaluated system.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SystemKey(pub String);

/// Unique key of a dataset a system may declare as a dependency.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DatasetKey(pub String);

/// Qualified key of a policy rule within a status map: `"{policy}.{rule}"`.
///
/// The qualification makes rule findings unambiguous when multiple policies
/// reuse rule names.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RuleKey(pub String);

impl RuleKey {
    /// Compose the qualified key for `rule` belonging to `policy`.
    pub fn qualified(policy_key: &str, rule_key: &str) -> Self {
        Self(format!("{policy_key}.{rule_key}"))
    }
}

macro_rules! string_newtype_impls {
    ($($ty:ident),+ $(,)?) => {
        $(
            impl $ty {
                /// Wrap a string value.
                pub fn new(value: impl Into<String>) -> Self {
                    Self(value.into())
                }

                /// Access the inner string.
                pub fn as_str(&self) -> &str {
                    &self.0
                }
            }

            impl std::fmt::Display for $ty {
                fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    write!(f, "{}", self.0)
                }
            }

            impl From<&str> for $ty {
                fn from(value: &str) -> Self {
                    Self(value.to_string())
                }
            }
        )+
    };
}

string_newtype_impls!(
    OrganizationId,
    CategoryName,
    UseName,
    SystemKey,
    DatasetKey,
    RuleKey,
);
