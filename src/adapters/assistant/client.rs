//! Conversational assistant HTTP client
//!
//! Thin client over the assistant backend. The language model itself is
//! an external collaborator; this core only ships messages and receives
//! replies or structured notes.

use crate::config::AssistantConfig;
use crate::domain::{ChatMessage, ClinsightError, Result, Sender};
use reqwest::{Client, ClientBuilder};
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

/// HTTP client for the assistant backend
pub struct AssistantClient {
    base_url: String,
    client: Client,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    reply: String,
}

#[derive(Debug, Deserialize)]
struct NoteResponse {
    note: String,
}

impl AssistantClient {
    /// Create a new assistant client from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the assistant is disabled or the HTTP client
    /// cannot be built.
    pub fn new(config: &AssistantConfig) -> Result<Self> {
        if !config.enabled {
            return Err(ClinsightError::Configuration(
                "Assistant backend is not enabled".to_string(),
            ));
        }

        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| ClinsightError::Assistant(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Send one user message, returning the assistant's reply
    pub async fn chat(&self, message: &str) -> Result<String> {
        let url = format!("{}/chat", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(&json!({ "message": message }))
            .send()
            .await
            .map_err(|e| ClinsightError::Assistant(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(ClinsightError::Assistant(format!(
                "Chat endpoint returned status {status}"
            )));
        }

        let reply = response
            .json::<ChatResponse>()
            .await
            .map_err(|e| ClinsightError::Assistant(e.to_string()))?;

        Ok(reply.reply)
    }

    /// Turn a conversation transcript into a structured doctor note
    pub async fn generate_note(&self, transcript: &[ChatMessage]) -> Result<String> {
        let url = format!("{}/generate-note", self.base_url);
        let chat = render_transcript(transcript);

        let response = self
            .client
            .post(&url)
            .json(&json!({ "chat": chat }))
            .send()
            .await
            .map_err(|e| ClinsightError::Assistant(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(ClinsightError::Assistant(format!(
                "Note endpoint returned status {status}"
            )));
        }

        let note = response
            .json::<NoteResponse>()
            .await
            .map_err(|e| ClinsightError::Assistant(e.to_string()))?;

        Ok(note.note)
    }
}

/// Flatten a transcript into the "sender: text" lines the note endpoint
/// expects, ordered by timestamp
fn render_transcript(transcript: &[ChatMessage]) -> String {
    let mut messages: Vec<&ChatMessage> = transcript.iter().collect();
    messages.sort_by_key(|m| m.timestamp);

    messages
        .iter()
        .map(|m| {
            let sender = match m.sender {
                Sender::User => "user",
                Sender::Assistant => "assistant",
            };
            format!("{sender}: {}", m.text)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AssistantConfig;

    #[test]
    fn test_client_requires_enabled_config() {
        let config = AssistantConfig::default();
        assert!(AssistantClient::new(&config).is_err());
    }

    #[test]
    fn test_render_transcript_orders_by_timestamp() {
        let later = ChatMessage::now(Sender::Assistant, "reply", None);
        let mut earlier = ChatMessage::now(Sender::User, "question", None);
        earlier.timestamp = later.timestamp - chrono::Duration::seconds(5);

        let rendered = render_transcript(&[later, earlier]);
        assert_eq!(rendered, "user: question\nassistant: reply");
    }
}
