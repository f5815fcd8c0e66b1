//! Configuration resolution for shopfront-catalog
//!
//! Layers environment variables over the TOML config file, the way the
//! data folder itself is resolved. The classifier endpoint is optional;
//! without one the service runs fallback-only.

use crate::classifier::{Classifier, NullClassifier, RemoteClassifier};
use shopfront_common::config::{self, TomlConfig};
use shopfront_common::Result;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Resolved service configuration
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    pub data_dir: PathBuf,
    pub host: String,
    pub port: u16,
    pub classifier: ClassifierSettings,
}

/// Resolved classifier settings
#[derive(Debug, Clone)]
pub struct ClassifierSettings {
    pub endpoint: Option<String>,
    pub api_key: Option<String>,
    pub timeout: Duration,
}

/// Resolve the full service configuration
///
/// `cli_data_dir` is the optional positional command-line argument,
/// which takes priority over `SHOPFRONT_DATA_DIR` and the TOML file.
pub fn resolve(cli_data_dir: Option<&str>) -> Result<CatalogConfig> {
    let toml_config = config::load_toml_config()?;
    let data_dir = config::resolve_data_dir(cli_data_dir, &toml_config);

    Ok(CatalogConfig {
        data_dir,
        host: toml_config.server.host.clone(),
        port: toml_config.server.port,
        classifier: resolve_classifier_settings(&toml_config),
    })
}

/// Resolve classifier endpoint and key with ENV -> TOML priority
fn resolve_classifier_settings(toml_config: &TomlConfig) -> ClassifierSettings {
    let env_endpoint = std::env::var("SHOPFRONT_CLASSIFIER_URL")
        .ok()
        .filter(|v| !v.trim().is_empty());
    let toml_endpoint = toml_config.classifier.endpoint.clone();

    if env_endpoint.is_some() && toml_endpoint.is_some() {
        warn!("Classifier endpoint set in both environment and TOML; using environment");
    }

    let api_key = std::env::var("SHOPFRONT_CLASSIFIER_KEY")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .or_else(|| toml_config.classifier.api_key.clone());

    ClassifierSettings {
        endpoint: env_endpoint.or(toml_endpoint),
        api_key,
        timeout: Duration::from_secs(toml_config.classifier.timeout_secs),
    }
}

/// Build the classifier adapter from resolved settings
///
/// Falls back to the always-failing [`NullClassifier`] when no endpoint
/// is configured or the HTTP client cannot be built, which forces the
/// reconciliation engine onto the keyword rules.
pub fn build_classifier(settings: &ClassifierSettings) -> Arc<dyn Classifier> {
    match &settings.endpoint {
        Some(endpoint) => {
            match RemoteClassifier::new(endpoint.clone(), settings.api_key.clone(), settings.timeout)
            {
                Ok(client) => {
                    info!(endpoint = %endpoint, "Remote classifier configured");
                    Arc::new(client)
                }
                Err(err) => {
                    warn!(error = %err, "Remote classifier unusable, running fallback-only");
                    Arc::new(NullClassifier)
                }
            }
        }
        None => {
            info!("No classifier endpoint configured, running fallback-only");
            Arc::new(NullClassifier)
        }
    }
}
