//! Reference data: gates, species, fishing methods and rivers.
//!
//! Loaded once from the database at startup and shared read-only with
//! upload handlers and entity validators.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::DbId;

/// A named row from one of the reference tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceItem {
    pub id: DbId,
    pub name: String,
}

impl ReferenceItem {
    pub fn new(id: DbId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ReferenceData {
    gates: BTreeMap<DbId, ReferenceItem>,
    species: BTreeMap<DbId, ReferenceItem>,
    methods: BTreeMap<DbId, ReferenceItem>,
    rivers: BTreeMap<DbId, ReferenceItem>,
}

fn index(items: Vec<ReferenceItem>) -> BTreeMap<DbId, ReferenceItem> {
    items.into_iter().map(|item| (item.id, item)).collect()
}

impl ReferenceData {
    pub fn new(
        gates: Vec<ReferenceItem>,
        species: Vec<ReferenceItem>,
        methods: Vec<ReferenceItem>,
        rivers: Vec<ReferenceItem>,
    ) -> Self {
        Self {
            gates: index(gates),
            species: index(species),
            methods: index(methods),
            rivers: index(rivers),
        }
    }

    pub fn gate(&self, id: DbId) -> Option<&ReferenceItem> {
        self.gates.get(&id)
    }

    /// All gates ordered by id.
    pub fn gates(&self) -> impl Iterator<Item = &ReferenceItem> {
        self.gates.values()
    }

    pub fn has_species(&self, id: DbId) -> bool {
        self.species.contains_key(&id)
    }

    pub fn has_method(&self, id: DbId) -> bool {
        self.methods.contains_key(&id)
    }

    pub fn has_river(&self, id: DbId) -> bool {
        self.rivers.contains_key(&id)
    }
}
