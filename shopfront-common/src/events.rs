//! Event types and bus for the Shopfront catalog service
//!
//! The UI layer observes catalog changes through the [`EventBus`] rather
//! than being entangled with storage logic: every committed snapshot
//! change and every reconciliation pass is announced here and relayed to
//! connected clients over SSE.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Where a category assignment came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssignmentSource {
    /// External classifier produced the assignment
    Classifier,
    /// Deterministic keyword rules produced the assignment
    Fallback,
}

/// Catalog events broadcast to subscribers
///
/// Events are serialized for SSE transmission with a `type` tag.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CatalogEvent {
    /// A new snapshot was committed and persisted
    SnapshotUpdated {
        /// Number of items in the committed snapshot
        item_count: usize,
        /// Number of categories in the committed snapshot
        category_count: usize,
        /// When the snapshot was committed
        timestamp: DateTime<Utc>,
    },

    /// A reconciliation pass started (classification in flight)
    ReconcileStarted {
        /// Number of items awaiting assignment
        item_count: usize,
        /// When reconciliation started
        timestamp: DateTime<Utc>,
    },

    /// A reconciliation pass completed
    ReconcileCompleted {
        /// Which engine produced the assignment
        source: AssignmentSource,
        /// Number of categories in the resulting assignment
        category_count: usize,
        /// When reconciliation completed
        timestamp: DateTime<Utc>,
    },

    /// A snapshot save failed after all retries were exhausted
    SaveFailed {
        /// Final error message
        message: String,
        /// When the save gave up
        timestamp: DateTime<Utc>,
    },
}

/// Broadcast bus for [`CatalogEvent`]s
///
/// Cheap to clone; all clones share the same channel.
#[derive(Debug, Clone)]
pub struct EventBus {
    tx: broadcast::Sender<CatalogEvent>,
}

impl EventBus {
    /// Create a new bus buffering up to `capacity` events per subscriber
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Subscribe to all future events
    ///
    /// Events emitted before subscription are not received.
    pub fn subscribe(&self) -> broadcast::Receiver<CatalogEvent> {
        self.tx.subscribe()
    }

    /// Emit an event to all subscribers
    ///
    /// Returns the number of subscribers that received the event. Having
    /// no subscribers is not an error; the event is simply dropped.
    pub fn emit(&self, event: CatalogEvent) -> usize {
        match self.tx.send(event) {
            Ok(count) => count,
            Err(_) => {
                tracing::trace!("catalog event dropped: no subscribers");
                0
            }
        }
    }
}
