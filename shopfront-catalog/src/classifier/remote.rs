//! Remote classifier client
//!
//! Posts item names to a configured classification endpoint and parses
//! the returned category-to-names mapping. Transport and auth details
//! beyond a bearer token are the endpoint's concern; any transport,
//! status, or parse failure is reported as one uniform error so the
//! reconciliation engine can fall back.

use super::{ClassifiedNames, Classifier, ClassifierError, ClassifyItem};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::time::Duration;

const USER_AGENT: &str = "shopfront-catalog/0.1.0";

/// One named entry in the classifier response
#[derive(Debug, Deserialize)]
struct NamedItem {
    name: String,
}

/// HTTP client for the external classification endpoint
pub struct RemoteClassifier {
    http_client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
}

impl RemoteClassifier {
    /// Create a new remote classifier client
    pub fn new(
        endpoint: String,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, ClassifierError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| ClassifierError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            endpoint,
            api_key,
        })
    }
}

#[async_trait]
impl Classifier for RemoteClassifier {
    fn source_id(&self) -> &'static str {
        "remote"
    }

    async fn classify(&self, items: &[ClassifyItem]) -> Result<ClassifiedNames, ClassifierError> {
        tracing::debug!(
            endpoint = %self.endpoint,
            item_count = items.len(),
            "Querying remote classifier"
        );

        let mut request = self.http_client.post(&self.endpoint).json(items);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ClassifierError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(ClassifierError::Api(status.as_u16(), error_text));
        }

        let mapping: BTreeMap<String, Vec<NamedItem>> = response
            .json()
            .await
            .map_err(|e| ClassifierError::Parse(e.to_string()))?;

        let result: ClassifiedNames = mapping
            .into_iter()
            .map(|(category, named)| {
                (
                    category,
                    named.into_iter().map(|item| item.name).collect(),
                )
            })
            .collect();

        tracing::info!(
            categories = result.len(),
            "Remote classification successful"
        );

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_creation_succeeds() {
        let client = RemoteClassifier::new(
            "https://classify.example.com/v1/categorize".to_string(),
            None,
            Duration::from_secs(5),
        );
        assert!(client.is_ok());
    }

    #[test]
    fn response_shape_parses() {
        let body = r#"{"Apparel":[{"name":"Blue Jeans"}],"Beverages":[{"name":"Iced Coffee"}]}"#;
        let mapping: BTreeMap<String, Vec<NamedItem>> = serde_json::from_str(body).unwrap();
        assert_eq!(mapping["Apparel"][0].name, "Blue Jeans");
        assert_eq!(mapping["Beverages"].len(), 1);
    }
}
