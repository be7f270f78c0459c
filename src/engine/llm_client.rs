use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::engine::error::EngineError;

pub const DEFAULT_BASE_URL: &str = "http://localhost:11434";

/// The text-generation backend as the engine sees it: one blocking call,
/// prompt in, completion out. Injected into [`crate::engine::agent::EmailAgent`]
/// at construction so tests can substitute a scripted fake.
pub trait TextGenerator {
    fn generate(&self, prompt: &str) -> Result<String, EngineError>;
    fn model_name(&self) -> &str;
    fn temperature(&self) -> f32;
}

impl<G: TextGenerator + ?Sized> TextGenerator for &G {
    fn generate(&self, prompt: &str) -> Result<String, EngineError> {
        (**self).generate(prompt)
    }

    fn model_name(&self) -> &str {
        (**self).model_name()
    }

    fn temperature(&self) -> f32 {
        (**self).temperature()
    }
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Serialize)]
struct GenerateOptions {
    temperature: f32,
}

#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

/// Blocking client for a locally hosted Ollama backend.
pub struct OllamaClient {
    http: reqwest::blocking::Client,
    model: String,
    temperature: f32,
    base_url: String,
}

impl OllamaClient {
    pub fn new(model: impl Into<String>, temperature: f32) -> Self {
        Self {
            http: reqwest::blocking::Client::new(),
            model: model.into(),
            temperature,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl TextGenerator for OllamaClient {
    fn generate(&self, prompt: &str) -> Result<String, EngineError> {
        let url = format!("{}/api/generate", self.base_url);
        info!(model = %self.model, %url, "invoking text-generation backend");
        debug!(prompt_chars = prompt.len());

        let request = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
            options: GenerateOptions {
                temperature: self.temperature,
            },
        };

        let response: GenerateResponse = self
            .http
            .post(&url)
            .json(&request)
            .send()?
            .error_for_status()?
            .json()?;

        debug!(response_chars = response.response.len());
        Ok(response.response)
    }

    fn model_name(&self) -> &str {
        &self.model
    }

    fn temperature(&self) -> f32 {
        self.temperature
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_defaults_to_local_endpoint() {
        let client = OllamaClient::new("llama3", 0.2);
        assert_eq!(client.base_url(), DEFAULT_BASE_URL);
        assert_eq!(client.model_name(), "llama3");
        assert_eq!(client.temperature(), 0.2);
    }

    #[test]
    fn base_url_override_is_kept() {
        let client = OllamaClient::new("llama3", 0.2).with_base_url("http://10.0.0.5:11434");
        assert_eq!(client.base_url(), "http://10.0.0.5:11434");
    }

    #[test]
    fn unreachable_backend_surfaces_as_model_invocation_error() {
        // Port 9 (discard) is not an HTTP server; the connect fails fast.
        let client = OllamaClient::new("llama3", 0.0).with_base_url("http://127.0.0.1:9");
        let err = client.generate("hello").unwrap_err();
        assert!(matches!(err, EngineError::ModelInvocation(_)));
    }
}
