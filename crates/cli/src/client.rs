use crate::config::GenConfig;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Sampling options for one generation call.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationOptions {
    pub num_predict: i64,
    pub temperature: f64,
    pub top_p: f64,
    pub top_k: u32,
}

impl GenerationOptions {
    /// No output cap: used for per-flow test generation, where truncated
    /// code fails validation anyway.
    pub fn unbounded() -> Self {
        Self {
            num_predict: -1,
            ..Self::default()
        }
    }

    pub fn bounded(num_predict: i64) -> Self {
        Self {
            num_predict,
            ..Self::default()
        }
    }
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            num_predict: -1,
            temperature: 0.7,
            top_p: 0.9,
            top_k: 40,
        }
    }
}

#[derive(Serialize)]
struct GenerationRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: GenerationOptions,
}

#[derive(Deserialize)]
struct GenerationResponse {
    response: String,
}

/// Client for an Ollama-style `/api/generate` endpoint.
///
/// Errors here are boundary errors only; callers degrade (the unit yields
/// no artifact and the run continues).
pub struct GenerationClient {
    http: reqwest::Client,
    model: String,
    api_url: String,
}

impl GenerationClient {
    pub fn new(config: &GenConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            model: config.model.clone(),
            api_url: config.api_url.clone(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub async fn generate(&self, prompt: &str, options: GenerationOptions) -> Result<String> {
        let request = GenerationRequest {
            model: &self.model,
            prompt,
            stream: false,
            options,
        };

        log::debug!(
            "Sending generation request to {} (model: {}, {} prompt chars)",
            self.api_url,
            self.model,
            prompt.len()
        );

        let response = self
            .http
            .post(&self.api_url)
            .json(&request)
            .send()
            .await
            .with_context(|| format!("Generation request to {} failed", self.api_url))?
            .error_for_status()
            .context("Generation API returned an error status")?;

        let body: GenerationResponse = response
            .json()
            .await
            .context("Invalid generation API response body")?;

        log::debug!("Received {} response chars", body.response.len());
        Ok(body.response)
    }
}
