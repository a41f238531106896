//! # Taxonomy Forest
//!
//! A parent-link forest over [`CategoryName`]s with the inclusive descendant
//! closure of every node precomputed at construction. Construction validates
//! the structure (no duplicates, no dangling parents, no cycles); queries
//! are pure lookups against the precomputed closure.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use privity_core::{CategoryName, PrivityError};

/// One node of a taxonomy forest: a name and an optional parent link.
/// Roots have no parent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxonomyNode {
    /// The node's name, unique within the forest.
    pub name: CategoryName,
    /// The parent node, or `None` for a root.
    pub parent: Option<CategoryName>,
}

impl TaxonomyNode {
    /// A root node.
    pub fn root(name: impl Into<CategoryName>) -> Self {
        Self {
            name: name.into(),
            parent: None,
        }
    }

    /// A child node under `parent`.
    pub fn child(name: impl Into<CategoryName>, parent: impl Into<CategoryName>) -> Self {
        Self {
            name: name.into(),
            parent: Some(parent.into()),
        }
    }
}

/// A validated taxonomy forest with precomputed descendant closures.
///
/// A forest is one consistent snapshot: the evaluation engine operates
/// against it without further synchronization, and concurrent taxonomy
/// edits must produce a new forest rather than mutate this one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxonomyForest {
    parents: BTreeMap<CategoryName, Option<CategoryName>>,
    /// Inclusive closure: every node maps to itself plus all transitive
    /// descendants.
    descendants: BTreeMap<CategoryName, BTreeSet<CategoryName>>,
}

impl TaxonomyForest {
    /// Build a forest from nodes, validating structure and precomputing
    /// the inclusive descendant closure of every node.
    ///
    /// Fails with `DuplicateNode`, `UnknownParent`, or `CycleDetected` when
    /// the node list is not a forest.
    pub fn from_nodes(
        nodes: impl IntoIterator<Item = TaxonomyNode>,
    ) -> Result<Self, PrivityError> {
        let mut parents: BTreeMap<CategoryName, Option<CategoryName>> = BTreeMap::new();
        for node in nodes {
            if parents.insert(node.name.clone(), node.parent).is_some() {
                return Err(PrivityError::DuplicateNode { name: node.name });
            }
        }

        for (child, parent) in &parents {
            if let Some(parent) = parent {
                if !parents.contains_key(parent) {
                    return Err(PrivityError::UnknownParent {
                        child: child.clone(),
                        parent: parent.clone(),
                    });
                }
            }
        }

        // Every node starts as its own (inclusive) descendant; each node is
        // then added to the closure of every ancestor on its parent chain.
        let mut descendants: BTreeMap<CategoryName, BTreeSet<CategoryName>> = parents
            .keys()
            .map(|name| (name.clone(), BTreeSet::from([name.clone()])))
            .collect();

        for name in parents.keys() {
            let mut seen = BTreeSet::from([name.clone()]);
            let mut cursor = parents[name].clone();
            while let Some(ancestor) = cursor {
                if !seen.insert(ancestor.clone()) {
                    return Err(PrivityError::CycleDetected { name: ancestor });
                }
                if let Some(set) = descendants.get_mut(&ancestor) {
                    set.insert(name.clone());
                }
                cursor = parents[&ancestor].clone();
            }
        }

        Ok(Self {
            parents,
            descendants,
        })
    }

    /// Whether `name` exists in this forest.
    pub fn contains(&self, name: &CategoryName) -> bool {
        self.parents.contains_key(name)
    }

    /// The parent of `name`, or `None` for roots and unknown names.
    pub fn parent_of(&self, name: &CategoryName) -> Option<&CategoryName> {
        self.parents.get(name).and_then(|p| p.as_ref())
    }

    /// `name` plus all of its transitive descendants, or `None` when the
    /// name is not part of this forest.
    pub fn descendants_of_inclusive(&self, name: &CategoryName) -> Option<&BTreeSet<CategoryName>> {
        self.descendants.get(name)
    }

    /// Number of nodes in the forest.
    pub fn len(&self) -> usize {
        self.parents.len()
    }

    /// Whether the forest has no nodes.
    pub fn is_empty(&self) -> bool {
        self.parents.is_empty()
    }
}
