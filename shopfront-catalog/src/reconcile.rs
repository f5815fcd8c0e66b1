//! Reconciliation engine
//!
//! Ensures every item has a category assignment. A persisted non-empty
//! assignment is sticky: it is treated as valid and the classifier is
//! never re-invoked for it, even across restarts. Re-categorization only
//! happens through explicit catalog mutations, which update the
//! assignment incrementally.
//!
//! When the assignment is empty the engine tries the external classifier
//! first and falls back to the deterministic keyword rules on any
//! failure, so a reconciliation pass always succeeds.

use crate::classifier::{fallback, ClassifiedNames, Classifier, ClassifyItem};
use chrono::Utc;
use shopfront_common::events::{AssignmentSource, CatalogEvent, EventBus};
use shopfront_common::model::{Assignment, Snapshot};
use std::collections::BTreeSet;
use std::sync::Arc;

/// Reconciliation state of a snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileState {
    /// No persisted assignment, or the assignment map is empty
    Unassigned,
    /// Classification in flight (transient)
    Reconciling,
    /// Assignment present and non-empty; not recomputed
    Assigned,
}

/// Orchestrates classification and merges results into the snapshot
pub struct ReconcileEngine {
    classifier: Arc<dyn Classifier>,
    events: EventBus,
}

impl ReconcileEngine {
    pub fn new(classifier: Arc<dyn Classifier>, events: EventBus) -> Self {
        Self { classifier, events }
    }

    /// Reconciliation state of the given snapshot
    pub fn state_of(snapshot: &Snapshot) -> ReconcileState {
        if snapshot.assignment_is_empty() {
            ReconcileState::Unassigned
        } else {
            ReconcileState::Assigned
        }
    }

    /// Ensure the snapshot carries a complete assignment
    ///
    /// Returns the (possibly new) snapshot and the source of the
    /// assignment when one was computed. `None` means the persisted
    /// assignment was already present and was left untouched.
    ///
    /// This never fails: classifier errors are absorbed by the keyword
    /// fallback, which is a pure local computation.
    pub async fn ensure_assigned(&self, snapshot: &Snapshot) -> (Snapshot, Option<AssignmentSource>) {
        if Self::state_of(snapshot) == ReconcileState::Assigned {
            tracing::debug!("Assignment present, skipping classification");
            return (snapshot.clone(), None);
        }

        self.events.emit(CatalogEvent::ReconcileStarted {
            item_count: snapshot.items.len(),
            timestamp: Utc::now(),
        });

        let descriptors: Vec<ClassifyItem> = snapshot
            .items
            .iter()
            .map(|item| ClassifyItem {
                name: item.name.clone(),
            })
            .collect();

        let mut next = snapshot.clone();
        let source = match self.classifier.classify(&descriptors).await {
            Ok(names) => {
                merge_classified_names(&mut next, &names);
                AssignmentSource::Classifier
            }
            Err(err) => {
                tracing::warn!(
                    classifier = self.classifier.source_id(),
                    error = %err,
                    "Classification failed, using keyword fallback"
                );
                next.assignment = fallback::classify(&next.items, &next.categories);
                absorb_new_categories(&mut next);
                AssignmentSource::Fallback
            }
        };

        tracing::info!(
            source = ?source,
            categories = next.assignment.len(),
            items = next.items.len(),
            "Reconciliation complete"
        );
        self.events.emit(CatalogEvent::ReconcileCompleted {
            source,
            category_count: next.assignment.len(),
            timestamp: Utc::now(),
        });

        (next, Some(source))
    }
}

/// Resolve classifier output (names only) back to full item records
///
/// Names that match no known item are silently dropped; items are never
/// fabricated from classifier output. Items the classifier did not
/// mention are routed through the keyword rules so the assignment ends
/// up total over the catalog.
fn merge_classified_names(snapshot: &mut Snapshot, names: &ClassifiedNames) {
    let mut assignment = Assignment::new();
    for category in &snapshot.categories {
        assignment.entry(category.clone()).or_default();
    }

    let mut assigned: BTreeSet<String> = BTreeSet::new();
    for (category, item_names) in names {
        for name in item_names {
            let resolved = snapshot
                .items
                .iter()
                .find(|item| &item.name == name && !assigned.contains(&item.id));
            match resolved {
                Some(item) => {
                    assigned.insert(item.id.clone());
                    assignment
                        .entry(category.clone())
                        .or_default()
                        .push(item.clone());
                }
                None => {
                    tracing::debug!(name = %name, category = %category, "Dropping unknown classifier result");
                }
            }
        }
    }

    // Leftovers keep the assignment total over the catalog
    let leftovers: Vec<_> = snapshot
        .items
        .iter()
        .filter(|item| !assigned.contains(&item.id))
        .cloned()
        .collect();
    for item in leftovers {
        let category = fallback::match_category(&item.name).unwrap_or(fallback::CATCH_ALL_CATEGORY);
        assignment.entry(category.to_string()).or_default().push(item);
    }

    snapshot.assignment = assignment;
    absorb_new_categories(snapshot);
}

/// Append assignment keys missing from the category list
///
/// The classifier may invent labels and the fallback may create the
/// catch-all; both must end up in `categories` to keep the snapshot
/// consistent.
fn absorb_new_categories(snapshot: &mut Snapshot) {
    let known: BTreeSet<&String> = snapshot.categories.iter().collect();
    let new: Vec<String> = snapshot
        .assignment
        .keys()
        .filter(|key| !known.contains(key))
        .cloned()
        .collect();
    snapshot.categories.extend(new);
}
