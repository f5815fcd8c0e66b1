//! CatalogStore: pure mutation operations over the catalog snapshot
//!
//! Every operation takes the current [`Snapshot`] by reference and either
//! returns a new consistent snapshot or fails without producing one. No
//! operation touches storage; persistence is triggered by the caller
//! (the service layer) after the transform succeeds.

use shopfront_common::model::{Item, ItemIdGenerator, Snapshot};
use shopfront_common::{Error, Result};

/// Descriptor for a new item (id is generated on add)
#[derive(Debug, Clone)]
pub struct NewItem {
    pub name: String,
    pub price: f64,
    pub image: String,
    pub featured: Option<shopfront_common::model::FeaturedTag>,
}

/// Full-field update for an existing item (id is immutable)
#[derive(Debug, Clone)]
pub struct ItemUpdate {
    pub name: String,
    pub price: f64,
    pub image: String,
    pub featured: Option<shopfront_common::model::FeaturedTag>,
}

fn validate_fields(name: &str, price: f64, image: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::Validation("item name must not be empty".into()));
    }
    if !(price.is_finite() && price > 0.0) {
        return Err(Error::Validation("item price must be greater than zero".into()));
    }
    if image.trim().is_empty() {
        return Err(Error::Validation("item image must not be empty".into()));
    }
    Ok(())
}

/// Add a new item, assigning it to `category`
///
/// The category is created when it does not exist yet. Returns the new
/// snapshot along with the created item (including its generated id).
pub fn add_item(
    snapshot: &Snapshot,
    ids: &ItemIdGenerator,
    new: NewItem,
    category: &str,
) -> Result<(Snapshot, Item)> {
    validate_fields(&new.name, new.price, &new.image)?;
    if category.trim().is_empty() {
        return Err(Error::Validation("category name must not be empty".into()));
    }

    let item = Item {
        id: ids.next_id(),
        name: new.name,
        price: new.price,
        image: new.image,
        featured: new.featured,
    };

    let mut next = snapshot.clone();
    next.items.push(item.clone());
    if !next.categories.iter().any(|c| c == category) {
        next.categories.push(category.to_string());
    }
    next.assignment
        .entry(category.to_string())
        .or_default()
        .push(item.clone());

    Ok((next, item))
}

/// Update an existing item, optionally moving it to another category
///
/// When `new_category` is given and differs from the current assignment,
/// the item is moved atomically: removed from the old category's list and
/// appended to the new one. An emptied category is kept, not deleted;
/// categories persist until explicitly deleted.
pub fn update_item(
    snapshot: &Snapshot,
    id: &str,
    update: ItemUpdate,
    new_category: Option<&str>,
) -> Result<Snapshot> {
    validate_fields(&update.name, update.price, &update.image)?;

    let mut next = snapshot.clone();
    let Some(stored) = next.items.iter_mut().find(|item| item.id == id) else {
        return Err(Error::NotFound(format!("item {id}")));
    };
    stored.name = update.name;
    stored.price = update.price;
    stored.image = update.image;
    stored.featured = update.featured;
    let updated = stored.clone();

    let current_category = next.category_of(id).map(str::to_string);
    let moving = match (new_category, &current_category) {
        (Some(target), Some(current)) => target != current,
        (Some(_), None) => true,
        (None, _) => false,
    };

    if moving {
        let target = new_category.unwrap_or_default();
        if target.trim().is_empty() {
            return Err(Error::Validation("category name must not be empty".into()));
        }
        if let Some(current) = &current_category {
            if let Some(list) = next.assignment.get_mut(current) {
                list.retain(|item| item.id != id);
            }
        }
        if !next.categories.iter().any(|c| c == target) {
            next.categories.push(target.to_string());
        }
        next.assignment
            .entry(target.to_string())
            .or_default()
            .push(updated);
    } else if let Some(current) = &current_category {
        // Refresh the stored copy inside the assignment list
        if let Some(list) = next.assignment.get_mut(current) {
            if let Some(slot) = list.iter_mut().find(|item| item.id == id) {
                *slot = updated;
            }
        }
    }

    Ok(next)
}

/// Delete an item from the catalog and from its category list
pub fn delete_item(snapshot: &Snapshot, id: &str) -> Result<Snapshot> {
    if snapshot.item(id).is_none() {
        return Err(Error::NotFound(format!("item {id}")));
    }

    let mut next = snapshot.clone();
    next.items.retain(|item| item.id != id);
    for list in next.assignment.values_mut() {
        list.retain(|item| item.id != id);
    }
    Ok(next)
}

/// Add an empty category
///
/// Adding a category that already exists is a no-op, not an error.
pub fn add_category(snapshot: &Snapshot, name: &str) -> Result<Snapshot> {
    if name.trim().is_empty() {
        return Err(Error::Validation("category name must not be empty".into()));
    }

    let mut next = snapshot.clone();
    if !next.categories.iter().any(|c| c == name) {
        next.categories.push(name.to_string());
        next.assignment.entry(name.to_string()).or_default();
    }
    Ok(next)
}

/// Rename a category, carrying its item list to the new name
///
/// Renaming onto an existing category overwrites that category's prior
/// list (last-write-wins); the displaced items stay in the catalog but
/// lose their assignment. This lossy behavior is deliberate and covered
/// by tests.
pub fn rename_category(snapshot: &Snapshot, old_name: &str, new_name: &str) -> Result<Snapshot> {
    if old_name == new_name {
        return Ok(snapshot.clone());
    }
    if new_name.trim().is_empty() {
        return Err(Error::Validation("category name must not be empty".into()));
    }
    if !snapshot.categories.iter().any(|c| c == old_name) {
        return Err(Error::NotFound(format!("category {old_name}")));
    }

    let mut next = snapshot.clone();
    next.categories.retain(|c| c != new_name);
    for category in next.categories.iter_mut() {
        if category == old_name {
            *category = new_name.to_string();
        }
    }
    if let Some(list) = next.assignment.remove(old_name) {
        next.assignment.insert(new_name.to_string(), list);
    }
    Ok(next)
}

/// Delete a category and every item assigned to it
///
/// Cascading delete: removing a category removes its items from the
/// catalog entirely, not just the assignment. Confirmation flows in the
/// admin UI must make this prominent.
pub fn delete_category(snapshot: &Snapshot, name: &str) -> Result<Snapshot> {
    if !snapshot.categories.iter().any(|c| c == name) {
        return Err(Error::NotFound(format!("category {name}")));
    }

    let mut next = snapshot.clone();
    let removed_ids: Vec<String> = next
        .assignment
        .remove(name)
        .unwrap_or_default()
        .into_iter()
        .map(|item| item.id)
        .collect();
    next.items.retain(|item| !removed_ids.contains(&item.id));
    next.categories.retain(|c| c != name);
    Ok(next)
}
