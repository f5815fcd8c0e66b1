//! CatalogStore operation tests
//!
//! Exercises the pure snapshot transforms: invariants (assignment
//! disjointness), cascade deletes, idempotent category adds, and the
//! documented lossy rename-overwrite behavior.

use shopfront_catalog::store::{self, ItemUpdate, NewItem};
use shopfront_common::model::{Assignment, Item, ItemIdGenerator, Snapshot};
use shopfront_common::Error;
use std::collections::BTreeSet;

fn new_item(name: &str) -> NewItem {
    NewItem {
        name: name.to_string(),
        price: 25.0,
        image: "/images/test.jpg".to_string(),
        featured: None,
    }
}

fn update_of(name: &str) -> ItemUpdate {
    ItemUpdate {
        name: name.to_string(),
        price: 30.0,
        image: "/images/test.jpg".to_string(),
        featured: None,
    }
}

fn seeded(ids: &ItemIdGenerator) -> Snapshot {
    let snapshot = Snapshot::default();
    let (snapshot, _) = store::add_item(&snapshot, ids, new_item("Blue Jeans"), "Apparel").unwrap();
    let (snapshot, _) = store::add_item(&snapshot, ids, new_item("Linen Shirt"), "Apparel").unwrap();
    let (snapshot, _) =
        store::add_item(&snapshot, ids, new_item("Iced Coffee"), "Beverages").unwrap();
    snapshot
}

fn assert_disjoint(snapshot: &Snapshot) {
    let mut seen = BTreeSet::new();
    for (category, items) in &snapshot.assignment {
        for item in items {
            assert!(
                seen.insert(item.id.clone()),
                "item {} appears in more than one category (second: {category})",
                item.id
            );
        }
    }
}

#[test]
fn add_item_creates_category_and_assigns() {
    let ids = ItemIdGenerator::new();
    let snapshot = Snapshot::default();
    let (snapshot, item) =
        store::add_item(&snapshot, &ids, new_item("Blue Jeans"), "Apparel").unwrap();

    assert_eq!(snapshot.items.len(), 1);
    assert_eq!(snapshot.categories, vec!["Apparel".to_string()]);
    assert_eq!(snapshot.category_of(&item.id), Some("Apparel"));
    snapshot.validate().unwrap();
}

#[test]
fn add_item_rejects_bad_input() {
    let ids = ItemIdGenerator::new();
    let snapshot = Snapshot::default();

    let empty_name = store::add_item(&snapshot, &ids, new_item("   "), "Apparel");
    assert!(matches!(empty_name, Err(Error::Validation(_))));

    let mut free = new_item("Blue Jeans");
    free.price = 0.0;
    let zero_price = store::add_item(&snapshot, &ids, free, "Apparel");
    assert!(matches!(zero_price, Err(Error::Validation(_))));
}

#[test]
fn assignment_stays_disjoint_across_operation_sequence() {
    let ids = ItemIdGenerator::new();
    let mut snapshot = seeded(&ids);

    let moved_id = snapshot.items[0].id.clone();
    snapshot =
        store::update_item(&snapshot, &moved_id, update_of("Blue Jeans"), Some("Beverages"))
            .unwrap();
    assert_disjoint(&snapshot);

    snapshot = store::add_category(&snapshot, "Desserts").unwrap();
    let (next, _) = store::add_item(&snapshot, &ids, new_item("Lava Cake"), "Desserts").unwrap();
    snapshot = next;
    assert_disjoint(&snapshot);

    snapshot = store::rename_category(&snapshot, "Beverages", "Drinks").unwrap();
    assert_disjoint(&snapshot);
    snapshot.validate().unwrap();
}

#[test]
fn update_item_moves_between_categories_and_keeps_empty_category() {
    let ids = ItemIdGenerator::new();
    let snapshot = seeded(&ids);
    let coffee_id = snapshot.assignment["Beverages"][0].id.clone();

    let snapshot =
        store::update_item(&snapshot, &coffee_id, update_of("Iced Coffee"), Some("Apparel"))
            .unwrap();

    assert_eq!(snapshot.category_of(&coffee_id), Some("Apparel"));
    // The emptied category is kept, not auto-deleted
    assert!(snapshot.categories.contains(&"Beverages".to_string()));
    assert!(snapshot.assignment["Beverages"].is_empty());
}

#[test]
fn update_item_without_category_keeps_membership() {
    let ids = ItemIdGenerator::new();
    let snapshot = seeded(&ids);
    let coffee_id = snapshot.assignment["Beverages"][0].id.clone();

    let snapshot =
        store::update_item(&snapshot, &coffee_id, update_of("Cold Brew"), None).unwrap();

    assert_eq!(snapshot.category_of(&coffee_id), Some("Beverages"));
    assert_eq!(snapshot.assignment["Beverages"][0].name, "Cold Brew");
    // The catalog item list reflects the edit too
    assert_eq!(snapshot.item(&coffee_id).unwrap().name, "Cold Brew");
}

#[test]
fn update_unknown_item_is_not_found() {
    let ids = ItemIdGenerator::new();
    let snapshot = seeded(&ids);
    let result = store::update_item(&snapshot, "missing", update_of("X"), None);
    assert!(matches!(result, Err(Error::NotFound(_))));
}

#[test]
fn delete_item_removes_from_items_and_assignment() {
    let ids = ItemIdGenerator::new();
    let snapshot = seeded(&ids);
    let id = snapshot.items[0].id.clone();

    let snapshot = store::delete_item(&snapshot, &id).unwrap();
    assert!(snapshot.item(&id).is_none());
    assert!(snapshot.category_of(&id).is_none());

    let result = store::delete_item(&snapshot, &id);
    assert!(matches!(result, Err(Error::NotFound(_))));
}

#[test]
fn add_category_is_idempotent() {
    let ids = ItemIdGenerator::new();
    let snapshot = seeded(&ids);

    let snapshot = store::add_category(&snapshot, "Desserts").unwrap();
    let snapshot = store::add_category(&snapshot, "Desserts").unwrap();

    let count = snapshot.categories.iter().filter(|c| *c == "Desserts").count();
    assert_eq!(count, 1);
    assert!(snapshot.assignment["Desserts"].is_empty());
}

#[test]
fn rename_category_carries_items() {
    let ids = ItemIdGenerator::new();
    let snapshot = seeded(&ids);

    let snapshot = store::rename_category(&snapshot, "Apparel", "Clothing").unwrap();
    assert!(!snapshot.categories.contains(&"Apparel".to_string()));
    assert!(snapshot.categories.contains(&"Clothing".to_string()));
    assert_eq!(snapshot.assignment["Clothing"].len(), 2);
    assert!(!snapshot.assignment.contains_key("Apparel"));
}

#[test]
fn rename_onto_existing_category_overwrites_its_list() {
    let ids = ItemIdGenerator::new();
    let snapshot = seeded(&ids);
    let apparel_before: Vec<String> = snapshot.assignment["Apparel"]
        .iter()
        .map(|item| item.id.clone())
        .collect();

    // "Beverages" already exists and is non-empty; its prior list is lost
    let snapshot = store::rename_category(&snapshot, "Apparel", "Beverages").unwrap();

    let beverages_after: Vec<String> = snapshot.assignment["Beverages"]
        .iter()
        .map(|item| item.id.clone())
        .collect();
    assert_eq!(beverages_after, apparel_before);
    let count = snapshot
        .categories
        .iter()
        .filter(|c| *c == "Beverages")
        .count();
    assert_eq!(count, 1);
}

#[test]
fn rename_missing_category_is_not_found() {
    let ids = ItemIdGenerator::new();
    let snapshot = seeded(&ids);
    let result = store::rename_category(&snapshot, "Ghost", "Phantom");
    assert!(matches!(result, Err(Error::NotFound(_))));
}

#[test]
fn rename_to_same_name_is_a_no_op() {
    let ids = ItemIdGenerator::new();
    let snapshot = seeded(&ids);
    let renamed = store::rename_category(&snapshot, "Apparel", "Apparel").unwrap();
    assert_eq!(renamed, snapshot);
}

#[test]
fn delete_category_cascades_to_its_items_exactly() {
    let ids = ItemIdGenerator::new();
    let snapshot = seeded(&ids);
    let before = snapshot.items.len();
    let in_apparel = snapshot.assignment["Apparel"].len();
    let survivor = snapshot.assignment["Beverages"][0].id.clone();

    let snapshot = store::delete_category(&snapshot, "Apparel").unwrap();

    assert_eq!(snapshot.items.len(), before - in_apparel);
    assert!(snapshot.item(&survivor).is_some());
    assert!(!snapshot.categories.contains(&"Apparel".to_string()));
    assert!(!snapshot.assignment.contains_key("Apparel"));
}

#[test]
fn delete_missing_category_is_not_found() {
    let ids = ItemIdGenerator::new();
    let snapshot = seeded(&ids);
    let result = store::delete_category(&snapshot, "Ghost");
    assert!(matches!(result, Err(Error::NotFound(_))));
}

#[test]
fn operations_do_not_mutate_their_input() {
    let ids = ItemIdGenerator::new();
    let snapshot = seeded(&ids);
    let frozen = snapshot.clone();

    let _ = store::delete_category(&snapshot, "Apparel").unwrap();
    let _ = store::add_category(&snapshot, "Desserts").unwrap();
    let _ = store::delete_item(&snapshot, &snapshot.items[0].id).unwrap();

    assert_eq!(snapshot, frozen);
}

#[test]
fn generated_ids_do_not_collide() {
    let ids = ItemIdGenerator::new();
    let snapshot = Snapshot::default();
    let mut seen = BTreeSet::new();
    let mut current = snapshot;
    for n in 0..20 {
        let (next, item) =
            store::add_item(&current, &ids, new_item(&format!("Item {n}")), "Other").unwrap();
        assert!(seen.insert(item.id.clone()), "duplicate id {}", item.id);
        current = next;
    }
}

#[test]
fn snapshot_with_manual_duplicate_fails_validation() {
    let item = Item {
        id: "dup".to_string(),
        name: "Twice".to_string(),
        price: 5.0,
        image: "/images/twice.jpg".to_string(),
        featured: None,
    };
    let mut assignment = Assignment::new();
    assignment.insert("A".to_string(), vec![item.clone()]);
    assignment.insert("B".to_string(), vec![item.clone()]);
    let snapshot = Snapshot {
        items: vec![item],
        categories: vec!["A".to_string(), "B".to_string()],
        assignment,
    };
    assert!(snapshot.validate().is_err());
}
