//! Machine-translation client.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;

use kbforge_shared::{KbForgeError, Result, TranslatorConfig};

/// User-Agent string for translation requests.
const USER_AGENT: &str = concat!("kbforge/", env!("CARGO_PKG_VERSION"));

/// Translates text from the configured source to the target language.
pub trait Translator: Send + Sync {
    fn translate(&self, text: &str) -> impl Future<Output = Result<String>> + Send;
}

// ---------------------------------------------------------------------------
// HttpTranslator
// ---------------------------------------------------------------------------

/// Client for a LibreTranslate-compatible `POST /translate` endpoint.
pub struct HttpTranslator {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
    source_lang: String,
    target_lang: String,
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    #[serde(rename = "translatedText")]
    translated_text: String,
}

impl HttpTranslator {
    /// Build a translator from config. The API key is resolved by the caller
    /// from the configured env var and is optional.
    pub fn new(config: &TranslatorConfig, api_key: Option<String>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| KbForgeError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            api_key,
            source_lang: config.source_lang.clone(),
            target_lang: config.target_lang.clone(),
        })
    }
}

impl Translator for HttpTranslator {
    async fn translate(&self, text: &str) -> Result<String> {
        let mut body = serde_json::json!({
            "q": text,
            "source": self.source_lang,
            "target": self.target_lang,
            "format": "text",
        });
        if let Some(key) = &self.api_key {
            body["api_key"] = serde_json::Value::String(key.clone());
        }

        let response = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| KbForgeError::Network(format!("{}: {e}", self.endpoint)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(KbForgeError::Network(format!(
                "{}: HTTP {status}",
                self.endpoint
            )));
        }

        let parsed: TranslateResponse = response
            .json()
            .await
            .map_err(|e| KbForgeError::Network(format!("{}: {e}", self.endpoint)))?;

        Ok(parsed.translated_text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_for(endpoint: String) -> TranslatorConfig {
        TranslatorConfig {
            endpoint,
            ..TranslatorConfig::default()
        }
    }

    #[tokio::test]
    async fn translate_posts_and_parses_response() {
        let server = wiremock::MockServer::start().await;

        wiremock::Mock::given(wiremock::matchers::method("POST"))
            .and(wiremock::matchers::path("/translate"))
            .and(wiremock::matchers::body_partial_json(serde_json::json!({
                "q": "How are you?",
                "source": "en",
                "target": "pt",
            })))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_json(
                serde_json::json!({"translatedText": "Como você está?"}),
            ))
            .mount(&server)
            .await;

        let config = config_for(format!("{}/translate", server.uri()));
        let translator = HttpTranslator::new(&config, None).unwrap();
        let translated = translator.translate("How are you?").await.unwrap();

        assert_eq!(translated, "Como você está?");
    }

    #[tokio::test]
    async fn server_error_maps_to_network_error() {
        let server = wiremock::MockServer::start().await;

        wiremock::Mock::given(wiremock::matchers::method("POST"))
            .and(wiremock::matchers::path("/translate"))
            .respond_with(wiremock::ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let config = config_for(format!("{}/translate", server.uri()));
        let translator = HttpTranslator::new(&config, None).unwrap();
        let err = translator.translate("How are you?").await.unwrap_err();

        assert!(matches!(err, KbForgeError::Network(_)));
        assert!(err.to_string().contains("HTTP 500"));
    }

    #[tokio::test]
    async fn api_key_is_sent_when_present() {
        let server = wiremock::MockServer::start().await;

        wiremock::Mock::given(wiremock::matchers::method("POST"))
            .and(wiremock::matchers::body_partial_json(serde_json::json!({
                "api_key": "secret-key",
            })))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_json(
                serde_json::json!({"translatedText": "Olá"}),
            ))
            .mount(&server)
            .await;

        let config = config_for(format!("{}/translate", server.uri()));
        let translator = HttpTranslator::new(&config, Some("secret-key".into())).unwrap();
        let translated = translator.translate("Hello").await.unwrap();

        assert_eq!(translated, "Olá");
    }
}
