//! Process configuration.
//!
//! All environment lookups happen here, once, at startup. Handlers receive
//! the resulting `AppConfig` by injection instead of reading ambient state.

use std::env;

use crate::error::AppError;

/// Default inference endpoint: a 1-5 star multilingual review model.
pub const DEFAULT_MODEL_URL: &str =
    "https://api-inference.huggingface.co/models/nlptown/bert-base-multilingual-uncased-sentiment";

const DEFAULT_PORT: u16 = 5000;

/// Startup configuration for the backend.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Bearer token forwarded to the remote classifier.
    pub hf_api_key: String,
    /// Classifier endpoint. Overridable for tests and self-hosted models.
    pub model_url: String,
    /// TCP port the HTTP server listens on.
    pub port: u16,
}

impl AppConfig {
    /// Builds the configuration from the process environment.
    ///
    /// A missing `HF_API_KEY` is a hard startup error: without a token every
    /// remote call would come back as an opaque 401.
    pub fn from_env() -> Result<Self, AppError> {
        let hf_api_key = env::var("HF_API_KEY")
            .map_err(|_| AppError::Config("HF_API_KEY is not set".to_string()))?;

        let model_url = env::var("MODEL_URL").unwrap_or_else(|_| DEFAULT_MODEL_URL.to_string());

        let port = match env::var("PORT") {
            Ok(raw) => raw
                .parse()
                .map_err(|_| AppError::Config(format!("invalid PORT value: {}", raw)))?,
            Err(_) => DEFAULT_PORT,
        };

        Ok(Self {
            hf_api_key,
            model_url,
            port,
        })
    }
}
