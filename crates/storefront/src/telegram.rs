//! Telegram Bot API client for order notifications.
//!
//! Checkout hands a finished order summary to a Telegram chat via the
//! `sendMessage` method. The contract is deliberately small: send
//! `{chat_id, text}`, expect `{ok: true}`; anything else is a hard
//! failure that the checkout layer surfaces as retryable.

use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error, instrument};

use crate::config::TelegramConfig;

/// Telegram Bot API base URL.
const TELEGRAM_API_BASE: &str = "https://api.telegram.org";

/// Errors that can occur when calling the Bot API.
#[derive(Debug, Error)]
pub enum TelegramError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API answered with `ok: false`.
    #[error("Telegram API error: {0}")]
    Api(String),

    /// Response body could not be decoded.
    #[error("response parse error: {0}")]
    Response(String),
}

/// Client for delivering order messages to the store's Telegram chat.
#[derive(Clone)]
pub struct TelegramClient {
    client: Client,
    bot_token: SecretString,
    chat_id: String,
}

impl std::fmt::Debug for TelegramClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramClient")
            .field("bot_token", &"[REDACTED]")
            .field("chat_id", &self.chat_id)
            .finish_non_exhaustive()
    }
}

/// `sendMessage` request payload.
#[derive(Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
    disable_web_page_preview: bool,
}

/// `sendMessage` response envelope.
#[derive(Deserialize)]
struct SendMessageResponse {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

impl TelegramClient {
    /// Create a client from the Telegram section of the config.
    #[must_use]
    pub fn new(config: &TelegramConfig) -> Self {
        Self {
            client: Client::new(),
            bot_token: config.bot_token.clone(),
            chat_id: config.chat_id.clone(),
        }
    }

    /// Deliver a plain-text message to the configured chat.
    ///
    /// # Errors
    ///
    /// Returns [`TelegramError`] on transport failure, an undecodable
    /// body, or an `ok: false` API answer.
    #[instrument(skip(self, text))]
    pub async fn send_text(&self, text: &str) -> Result<(), TelegramError> {
        let url = format!(
            "{TELEGRAM_API_BASE}/bot{}/sendMessage",
            self.bot_token.expose_secret()
        );

        let payload = SendMessage {
            chat_id: &self.chat_id,
            text,
            disable_web_page_preview: true,
        };

        let response = self.client.post(&url).json(&payload).send().await?;
        let status = response.status();

        let result: SendMessageResponse = response
            .json()
            .await
            .map_err(|e| TelegramError::Response(e.to_string()))?;

        if !result.ok {
            let description = result
                .description
                .unwrap_or_else(|| format!("HTTP {status}"));
            error!(%description, "Telegram API rejected message");
            return Err(TelegramError::Api(description));
        }

        debug!("order message delivered to Telegram");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> TelegramConfig {
        TelegramConfig {
            bot_token: SecretString::from("123456:super-secret-bot-token"),
            chat_id: "-1002627575551".to_string(),
        }
    }

    #[test]
    fn test_debug_redacts_bot_token() {
        let client = TelegramClient::new(&config());
        let debug_output = format!("{client:?}");
        assert!(debug_output.contains("[REDACTED]"));
        assert!(debug_output.contains("-1002627575551"));
        assert!(!debug_output.contains("super-secret-bot-token"));
    }

    #[test]
    fn test_send_message_payload_shape() {
        let payload = SendMessage {
            chat_id: "-100",
            text: "New order",
            disable_web_page_preview: true,
        };
        let json = serde_json::to_value(&payload).expect("serializes");
        assert_eq!(json["chat_id"], "-100");
        assert_eq!(json["text"], "New order");
        assert_eq!(json["disable_web_page_preview"], true);
    }

    #[test]
    fn test_response_decoding() {
        let ok: SendMessageResponse =
            serde_json::from_str(r#"{"ok":true,"result":{"message_id":5}}"#).expect("decodes");
        assert!(ok.ok);

        let err: SendMessageResponse =
            serde_json::from_str(r#"{"ok":false,"description":"chat not found"}"#)
                .expect("decodes");
        assert!(!err.ok);
        assert_eq!(err.description.as_deref(), Some("chat not found"));
    }
}
