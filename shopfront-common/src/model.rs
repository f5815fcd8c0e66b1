//! Catalog data model
//!
//! The unit of persistence is the [`Snapshot`]: the full catalog state
//! (items, categories, and the category assignment) at a point in time.
//! Serialized field names (`menuItems`, `categorizedMenu`) are kept for
//! compatibility with the on-disk document shape.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::atomic::{AtomicU64, Ordering};

/// Featured merchandising tag displayed on item cards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeaturedTag {
    Hot,
    New,
}

/// A single catalog item
///
/// Identity is `id`, immutable after creation. All other fields are
/// editable through the admin surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Opaque unique identifier
    pub id: String,
    /// Display name, non-empty
    pub name: String,
    /// Unit price, must be > 0
    pub price: f64,
    /// Reference to the item image (path or URL)
    pub image: String,
    /// Optional featured tag (absent/null = not featured)
    #[serde(default)]
    pub featured: Option<FeaturedTag>,
}

/// Mapping from category name to the items assigned to it
///
/// A `BTreeMap` keeps serialization deterministic; display order of the
/// categories themselves lives in [`Snapshot::categories`].
pub type Assignment = BTreeMap<String, Vec<Item>>;

/// Full persisted catalog state
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// All known items
    #[serde(rename = "menuItems", default)]
    pub items: Vec<Item>,
    /// Category names, unique, in display order
    #[serde(default)]
    pub categories: Vec<String>,
    /// Category assignment (may be empty before first reconciliation)
    #[serde(rename = "categorizedMenu", default)]
    pub assignment: Assignment,
}

impl Snapshot {
    /// Returns the category an item is currently assigned to, if any
    pub fn category_of(&self, item_id: &str) -> Option<&str> {
        self.assignment.iter().find_map(|(category, items)| {
            items
                .iter()
                .any(|item| item.id == item_id)
                .then_some(category.as_str())
        })
    }

    /// Look up an item by id
    pub fn item(&self, item_id: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.id == item_id)
    }

    /// True when no assignment has been computed or persisted yet
    pub fn assignment_is_empty(&self) -> bool {
        self.assignment.is_empty()
    }

    /// Validate the structural invariants of a snapshot
    ///
    /// Checks item fields (non-empty id/name/image, positive finite price),
    /// category uniqueness, and assignment consistency: every assigned item
    /// id exists in `items`, every assignment key exists in `categories`,
    /// and the per-category item-id sets are pairwise disjoint.
    pub fn validate(&self) -> Result<()> {
        let mut item_ids = BTreeSet::new();
        for item in &self.items {
            if item.id.trim().is_empty() {
                return Err(Error::Validation("item id must not be empty".into()));
            }
            if item.name.trim().is_empty() {
                return Err(Error::Validation(format!(
                    "item {} has an empty name",
                    item.id
                )));
            }
            if item.image.trim().is_empty() {
                return Err(Error::Validation(format!(
                    "item {} has an empty image reference",
                    item.id
                )));
            }
            if !(item.price.is_finite() && item.price > 0.0) {
                return Err(Error::Validation(format!(
                    "item {} has a non-positive price",
                    item.id
                )));
            }
            if !item_ids.insert(item.id.as_str()) {
                return Err(Error::Validation(format!("duplicate item id {}", item.id)));
            }
        }

        let mut categories = BTreeSet::new();
        for category in &self.categories {
            if category.trim().is_empty() {
                return Err(Error::Validation("category name must not be empty".into()));
            }
            if !categories.insert(category.as_str()) {
                return Err(Error::Validation(format!(
                    "duplicate category name {category}"
                )));
            }
        }

        let mut assigned_ids = BTreeSet::new();
        for (category, items) in &self.assignment {
            if !categories.contains(category.as_str()) {
                return Err(Error::Validation(format!(
                    "assignment references unknown category {category}"
                )));
            }
            for item in items {
                if !item_ids.contains(item.id.as_str()) {
                    return Err(Error::Validation(format!(
                        "assignment references unknown item {}",
                        item.id
                    )));
                }
                if !assigned_ids.insert(item.id.as_str()) {
                    return Err(Error::Validation(format!(
                        "item {} is assigned to more than one category",
                        item.id
                    )));
                }
            }
        }

        Ok(())
    }
}

/// Generator for fresh item ids
///
/// Ids combine the creation timestamp (unix milliseconds) with a
/// per-process counter, so they are unique even when several items are
/// created within the same millisecond.
#[derive(Debug, Default)]
pub struct ItemIdGenerator {
    counter: AtomicU64,
}

impl ItemIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue the next id, e.g. `item-1756100000000-3`
    pub fn next_id(&self) -> String {
        let seq = self.counter.fetch_add(1, Ordering::Relaxed);
        format!("item-{}-{}", chrono::Utc::now().timestamp_millis(), seq)
    }
}
