//! Remote sentiment classification.
//!
//! The hosted model sits behind the [`SentimentClassifier`] trait so that
//! handlers and the mining pipeline can be exercised against a deterministic
//! stub instead of the network.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, AUTHORIZATION};
use reqwest::Client;
use serde_json::Value;
use tokio::time::timeout;

use crate::config::AppConfig;
use crate::error::AppError;

const CLASSIFY_TIMEOUT: Duration = Duration::from_secs(30);

/// Capability interface for the remote sentiment classifier.
#[async_trait]
pub trait SentimentClassifier: Send + Sync + 'static {
    /// Classifies one text, returning the raw ranked label/score payload.
    async fn classify(&self, text: &str) -> Result<Value, AppError>;
}

/// Production classifier backed by a hosted inference API.
pub struct HfClassifier {
    client: Client,
    model_url: String,
    api_key: String,
}

impl HfClassifier {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: Client::new(),
            model_url: config.model_url.clone(),
            api_key: config.hf_api_key.clone(),
        }
    }

    fn build_request(&self, payload: &Value) -> Result<reqwest::RequestBuilder, AppError> {
        let mut headers = HeaderMap::new();
        let auth_value = format!("Bearer {}", self.api_key);
        headers.insert(
            AUTHORIZATION,
            auth_value.parse().map_err(|_| {
                AppError::Config("API token contains invalid header characters".to_string())
            })?,
        );

        Ok(self.client.post(&self.model_url).headers(headers).json(payload))
    }
}

#[async_trait]
impl SentimentClassifier for HfClassifier {
    async fn classify(&self, text: &str) -> Result<Value, AppError> {
        let payload = serde_json::json!({ "inputs": text });
        let request_future = self.build_request(&payload)?.send();

        let res = timeout(CLASSIFY_TIMEOUT, request_future).await??;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(AppError::Classifier(format!(
                "classification request failed with status {}: {}",
                status, body
            )));
        }

        res.json()
            .await
            .map_err(|e| AppError::Classifier(format!("malformed classifier response: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_classifier(model_url: String) -> HfClassifier {
        HfClassifier::new(&AppConfig {
            hf_api_key: "test-token".to_string(),
            model_url,
            port: 0,
        })
    }

    #[tokio::test]
    async fn test_classify_returns_payload_verbatim() {
        // 1. Arrange
        let mock_server = MockServer::start().await;
        let classifier = test_classifier(mock_server.uri());

        let expected_response = json!([[
            { "label": "5 stars", "score": 0.82 },
            { "label": "4 stars", "score": 0.11 },
            { "label": "3 stars", "score": 0.04 }
        ]]);

        Mock::given(method("POST"))
            .and(path("/"))
            .and(header("authorization", "Bearer test-token"))
            .and(body_json(json!({ "inputs": "Great product!" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(expected_response.clone()))
            .mount(&mock_server)
            .await;

        // 2. Act
        let result = classifier.classify("Great product!").await;

        // 3. Assert
        assert!(result.is_ok());
        assert_eq!(result.unwrap(), expected_response);
    }

    #[tokio::test]
    async fn test_classify_surfaces_server_error() {
        // 1. Arrange
        let mock_server = MockServer::start().await;
        let classifier = test_classifier(mock_server.uri());

        Mock::given(method("POST"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(503).set_body_string("model is loading"))
            .mount(&mock_server)
            .await;

        // 2. Act
        let result = classifier.classify("Great product!").await;

        // 3. Assert
        assert!(result.is_err());
        if let Err(AppError::Classifier(details)) = result {
            assert!(details.contains("503"));
            assert!(details.contains("model is loading"));
        } else {
            panic!("Expected AppError::Classifier, got something else.");
        }
    }

    #[tokio::test]
    async fn test_classify_rejects_non_json_body() {
        // 1. Arrange
        let mock_server = MockServer::start().await;
        let classifier = test_classifier(mock_server.uri());

        Mock::given(method("POST"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&mock_server)
            .await;

        // 2. Act
        let result = classifier.classify("Great product!").await;

        // 3. Assert
        assert!(matches!(result, Err(AppError::Classifier(_))));
    }
}
