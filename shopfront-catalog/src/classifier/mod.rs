//! Classifier abstraction
//!
//! The reconciliation engine talks to a [`Classifier`] without knowing
//! whether it is the remote network classifier or a stub. Results come
//! back keyed by free-form category label, valued by item *name* only;
//! the engine re-resolves names against the known catalog and never
//! trusts the classifier to return item identity.

pub mod fallback;
pub mod remote;

use async_trait::async_trait;
use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

pub use remote::RemoteClassifier;

/// Classifier errors
///
/// Callers treat every variant uniformly as "classifier unavailable";
/// there is no partial-result contract.
#[derive(Debug, Error)]
pub enum ClassifierError {
    /// Network communication error (includes timeouts)
    #[error("Network error: {0}")]
    Network(String),

    /// Classifier endpoint returned an error response
    #[error("Classifier API error {0}: {1}")]
    Api(u16, String),

    /// Failed to parse the classifier response
    #[error("Parse error: {0}")]
    Parse(String),

    /// No classifier endpoint configured
    #[error("No classifier endpoint configured")]
    NotConfigured,
}

/// Item descriptor sent to the classifier
#[derive(Debug, Clone, Serialize)]
pub struct ClassifyItem {
    pub name: String,
}

/// Classifier output: category label to item names
pub type ClassifiedNames = BTreeMap<String, Vec<String>>;

/// External text-classification capability
#[async_trait]
pub trait Classifier: Send + Sync {
    /// Classifier identifier for logging (e.g., "remote", "null")
    fn source_id(&self) -> &'static str;

    /// Categorize the given items
    ///
    /// Either a complete mapping is returned or the call fails as a
    /// whole. Latency may be significant (seconds).
    async fn classify(&self, items: &[ClassifyItem]) -> Result<ClassifiedNames, ClassifierError>;
}

/// Classifier that always fails, forcing fallback-only reconciliation
///
/// Used when no endpoint is configured, and by constrained deployments
/// that never want a network dependency.
pub struct NullClassifier;

#[async_trait]
impl Classifier for NullClassifier {
    fn source_id(&self) -> &'static str {
        "null"
    }

    async fn classify(&self, _items: &[ClassifyItem]) -> Result<ClassifiedNames, ClassifierError> {
        Err(ClassifierError::NotConfigured)
    }
}
