use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};

use diagelec_common::gemini::{
    build_analysis_request, build_chat_request, generate_content_url, GenerateContentRequest,
    GenerateContentResponse,
};
use diagelec_common::prompts::CHAT_FALLBACK_REPLY;
use diagelec_common::{
    parse_analysis_response, AnalysisPayload, ChatTurn, Error, ImagePayload, Result,
};

use super::AiGateway;
use crate::config::Config;

/// Passerelle Gemini (API REST generateContent)
pub struct GeminiGateway {
    client: Client,
    api_key: Option<String>,
    base_url: String,
    model: String,
    temperature: f32,
    timeout: Duration,
}

impl GeminiGateway {
    pub fn new(config: &Config) -> Result<Self> {
        let timeout = Duration::from_secs(config.timeout_seconds.max(1));
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Transport(format!("client HTTP: {}", e)))?;

        Ok(Self {
            client,
            api_key: config.api_key(),
            base_url: config.api_base_url.clone(),
            model: config.model.clone(),
            temperature: config.temperature,
            timeout,
        })
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    async fn generate(&self, request: &GenerateContentRequest) -> Result<GenerateContentResponse> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            Error::Transport("clé API absente (GEMINI_API_KEY ou `diagelec config --set-api-key`)".into())
        })?;

        let start = Instant::now();
        debug!(model = %self.model, "Envoi de la requête Gemini");

        let response = self
            .client
            .post(generate_content_url(&self.base_url, &self.model))
            .header("x-goog-api-key", api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| self.transport_error(e))?;
        let latency_ms = start.elapsed().as_millis() as u64;

        if !status.is_success() {
            warn!(%status, latency_ms, "Gemini a refusé la requête");
            return Err(Error::Transport(format!("HTTP {}: {}", status, truncate(&body, 300))));
        }

        debug!(latency_ms, bytes = body.len(), "Réponse Gemini reçue");
        serde_json::from_str(&body)
            .map_err(|e| Error::Transport(format!("enveloppe de réponse illisible: {}", e)))
    }

    fn transport_error(&self, error: reqwest::Error) -> Error {
        if error.is_timeout() {
            Error::Transport(format!("délai dépassé ({}s)", self.timeout.as_secs()))
        } else {
            Error::Transport(error.without_url().to_string())
        }
    }
}

#[async_trait]
impl AiGateway for GeminiGateway {
    async fn analyze_image(&self, image: &ImagePayload) -> Result<AnalysisPayload> {
        debug!(mime = %image.mime_type, bytes = image.data.len(), "Analyse d'image");
        let request = build_analysis_request(image, self.temperature);
        let response = self.generate(&request).await?;
        let text = response.text().ok_or(Error::EmptyResponse)?;
        parse_analysis_response(&text)
    }

    async fn chat(&self, message: &str, history: &[ChatTurn]) -> Result<String> {
        debug!(history = history.len(), "Question à l'assistant");
        let request = build_chat_request(message, history);
        let response = self.generate(&request).await?;
        Ok(response
            .text()
            .unwrap_or_else(|| CHAT_FALLBACK_REPLY.to_string()))
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let head: String = text.chars().take(max_chars).collect();
        format!("{}…", head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offline_config() -> Config {
        Config {
            api_key: None,
            // port réservé, jamais joignable
            api_base_url: "http://127.0.0.1:9".into(),
            timeout_seconds: 2,
            ..Config::default()
        }
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("abc", 5), "abc");
        assert_eq!(truncate("abcdef", 3), "abc…");
    }

    #[tokio::test]
    async fn test_missing_api_key_is_transport_error_at_call_time() {
        let mut gateway = GeminiGateway::new(&offline_config()).unwrap();
        // l'environnement de test peut définir GEMINI_API_KEY
        gateway.api_key = None;

        let image = ImagePayload::new("image/jpeg", "AA").unwrap();
        let result = gateway.analyze_image(&image).await;
        assert!(matches!(result, Err(Error::Transport(_))));

        let result = gateway.chat("Bonjour", &[]).await;
        assert!(matches!(result, Err(Error::Transport(_))));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_transport_error() {
        let mut gateway = GeminiGateway::new(&offline_config()).unwrap();
        gateway.api_key = Some("test-key".into());

        let result = gateway.chat("Bonjour", &[]).await;
        assert!(matches!(result, Err(Error::Transport(_))));
    }
}
