//! Reconciliation engine tests
//!
//! Covers the sticky-assignment guarantee (classifier never re-invoked
//! once a non-empty assignment exists), the fallback path on classifier
//! failure, and name resolution of classifier output.

use async_trait::async_trait;
use shopfront_catalog::classifier::{
    ClassifiedNames, Classifier, ClassifierError, ClassifyItem,
};
use shopfront_catalog::reconcile::{ReconcileEngine, ReconcileState};
use shopfront_common::events::{AssignmentSource, EventBus};
use shopfront_common::model::{Assignment, Item, Snapshot};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn item(id: &str, name: &str) -> Item {
    Item {
        id: id.to_string(),
        name: name.to_string(),
        price: 10.0,
        image: "/images/test.jpg".to_string(),
        featured: None,
    }
}

fn unassigned_snapshot() -> Snapshot {
    Snapshot {
        items: vec![item("1", "Blue Jeans"), item("2", "Iced Coffee")],
        categories: vec!["Apparel".to_string(), "Beverages".to_string()],
        assignment: Assignment::new(),
    }
}

/// Spy classifier counting invocations and returning a canned response
struct SpyClassifier {
    calls: Arc<AtomicUsize>,
    response: Result<ClassifiedNames, ()>,
}

#[async_trait]
impl Classifier for SpyClassifier {
    fn source_id(&self) -> &'static str {
        "spy"
    }

    async fn classify(&self, _items: &[ClassifyItem]) -> Result<ClassifiedNames, ClassifierError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.response {
            Ok(names) => Ok(names.clone()),
            Err(()) => Err(ClassifierError::Network("connection timed out".into())),
        }
    }
}

fn spy(response: Result<ClassifiedNames, ()>) -> (Arc<SpyClassifier>, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let classifier = Arc::new(SpyClassifier {
        calls: calls.clone(),
        response,
    });
    (classifier, calls)
}

#[tokio::test]
async fn non_empty_assignment_is_sticky_and_skips_classifier() {
    let (classifier, calls) = spy(Err(()));
    let engine = ReconcileEngine::new(classifier, EventBus::new(16));

    let mut snapshot = unassigned_snapshot();
    snapshot
        .assignment
        .insert("Apparel".to_string(), vec![item("1", "Blue Jeans")]);

    assert_eq!(ReconcileEngine::state_of(&snapshot), ReconcileState::Assigned);
    let (result, source) = engine.ensure_assigned(&snapshot).await;

    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert!(source.is_none());
    assert_eq!(result, snapshot);
}

#[tokio::test]
async fn classifier_timeout_falls_back_without_error() {
    let (classifier, calls) = spy(Err(()));
    let engine = ReconcileEngine::new(classifier, EventBus::new(16));

    let snapshot = unassigned_snapshot();
    assert_eq!(
        ReconcileEngine::state_of(&snapshot),
        ReconcileState::Unassigned
    );

    let (result, source) = engine.ensure_assigned(&snapshot).await;

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(source, Some(AssignmentSource::Fallback));
    // Keyword rules: jeans -> Apparel, iced coffee -> Beverages
    assert_eq!(result.assignment["Apparel"][0].id, "1");
    assert_eq!(result.assignment["Beverages"][0].id, "2");
    result.validate().unwrap();
}

#[tokio::test]
async fn fallback_assignment_is_repeatable() {
    let (classifier, _) = spy(Err(()));
    let engine = ReconcileEngine::new(classifier, EventBus::new(16));
    let snapshot = unassigned_snapshot();

    let (first, _) = engine.ensure_assigned(&snapshot).await;
    let (second, _) = engine.ensure_assigned(&snapshot).await;
    assert_eq!(first.assignment, second.assignment);
}

#[tokio::test]
async fn classifier_names_are_resolved_to_known_items() {
    let mut names: ClassifiedNames = BTreeMap::new();
    names.insert(
        "Denim".to_string(),
        vec!["Blue Jeans".to_string(), "Phantom Item".to_string()],
    );
    let (classifier, calls) = spy(Ok(names));
    let engine = ReconcileEngine::new(classifier, EventBus::new(16));

    let snapshot = unassigned_snapshot();
    let (result, source) = engine.ensure_assigned(&snapshot).await;

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(source, Some(AssignmentSource::Classifier));

    // "Phantom Item" matches nothing and is dropped, never fabricated
    let denim_ids: Vec<&str> = result.assignment["Denim"]
        .iter()
        .map(|item| item.id.as_str())
        .collect();
    assert_eq!(denim_ids, vec!["1"]);

    // The novel classifier label is absorbed into the category list
    assert!(result.categories.contains(&"Denim".to_string()));

    // The unmentioned item is still assigned: the keyword rules route it
    assert_eq!(result.category_of("2"), Some("Beverages"));
    result.validate().unwrap();
}

#[tokio::test]
async fn every_item_is_assigned_after_reconciliation() {
    let mut names: ClassifiedNames = BTreeMap::new();
    names.insert("Apparel".to_string(), vec!["Blue Jeans".to_string()]);
    let (classifier, _) = spy(Ok(names));
    let engine = ReconcileEngine::new(classifier, EventBus::new(16));

    let mut snapshot = unassigned_snapshot();
    snapshot.items.push(item("3", "Mystery Box"));

    let (result, _) = engine.ensure_assigned(&snapshot).await;
    for item in &result.items {
        assert!(
            result.category_of(&item.id).is_some(),
            "item {} left unassigned",
            item.id
        );
    }
    // No keyword match lands in the catch-all
    assert_eq!(result.category_of("3"), Some("Other"));
    assert!(result.categories.contains(&"Other".to_string()));
}

#[tokio::test]
async fn duplicate_classifier_mentions_keep_assignment_disjoint() {
    let mut names: ClassifiedNames = BTreeMap::new();
    names.insert("Apparel".to_string(), vec!["Blue Jeans".to_string()]);
    names.insert("Denim".to_string(), vec!["Blue Jeans".to_string()]);
    let (classifier, _) = spy(Ok(names));
    let engine = ReconcileEngine::new(classifier, EventBus::new(16));

    let snapshot = unassigned_snapshot();
    let (result, _) = engine.ensure_assigned(&snapshot).await;

    let mentions = result
        .assignment
        .values()
        .flatten()
        .filter(|item| item.id == "1")
        .count();
    assert_eq!(mentions, 1);
    result.validate().unwrap();
}
