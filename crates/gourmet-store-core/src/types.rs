use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One menu entry: a single item-name to price mapping.
///
/// Serializes to `{"Big Mac": "85"}`. Prices are kept as strings, exactly as
/// stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MenuItem(pub BTreeMap<String, String>);

impl MenuItem {
    /// Build a single-entry menu item.
    pub fn new(item: impl Into<String>, price: impl Into<String>) -> Self {
        let mut entry = BTreeMap::new();
        entry.insert(item.into(), price.into());
        Self(entry)
    }
}

/// One registered place.
///
/// Field order matters: the persisted JSON carries fields in declaration
/// order (`id, name, type, specialty, menu`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Place {
    /// Unique id, assigned by the store on creation and immutable after.
    pub id: u64,
    /// Unique name, the natural key for lookup, update, and deletion.
    pub name: String,
    /// Open-ended category label used for filtering (e.g. "food", "drink").
    #[serde(rename = "type")]
    pub kind: String,
    /// Free-form description of what the place is known for.
    pub specialty: String,
    /// Ordered menu, or `None` when no menu was registered.
    #[serde(default)]
    pub menu: Option<Vec<MenuItem>>,
}

/// Input for registering a place. The id is assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPlace {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub specialty: String,
    #[serde(default)]
    pub menu: Option<Vec<MenuItem>>,
}

impl NewPlace {
    /// Materialize the record with its assigned id.
    pub fn into_place(self, id: u64) -> Place {
        Place {
            id,
            name: self.name,
            kind: self.kind,
            specialty: self.specialty,
            menu: self.menu,
        }
    }
}
