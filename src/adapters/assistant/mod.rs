//! Conversational assistant and speech integration
//!
//! Request/response contracts only: the language model and the speech
//! engines are external collaborators.

pub mod client;
pub mod speech;

pub use client::AssistantClient;
pub use speech::{SpeechToText, TextToSpeech};
