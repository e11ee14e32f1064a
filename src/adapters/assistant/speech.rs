//! Speech service contracts
//!
//! Voice I/O is provided by external engines; the console only consumes
//! these two contracts. A transcription produces a single utterance which
//! the chat session submits as if it had been typed.

use crate::domain::Result;
use async_trait::async_trait;

/// Speech-to-text engine contract
#[async_trait]
pub trait SpeechToText: Send + Sync {
    /// Transcribe one utterance from encoded audio
    async fn transcribe(&self, audio: &[u8]) -> Result<String>;
}

/// Text-to-speech engine contract
#[async_trait]
pub trait TextToSpeech: Send + Sync {
    /// Synthesize audio for the given text
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StubEngine;

    #[async_trait]
    impl SpeechToText for StubEngine {
        async fn transcribe(&self, _audio: &[u8]) -> Result<String> {
            Ok("I have had a fever since yesterday".to_string())
        }
    }

    #[async_trait]
    impl TextToSpeech for StubEngine {
        async fn synthesize(&self, text: &str) -> Result<Vec<u8>> {
            Ok(text.as_bytes().to_vec())
        }
    }

    /// Both contracts must stay object-safe: sessions hold them as
    /// trait objects
    #[tokio::test]
    async fn test_contracts_are_object_safe() {
        let stt: Box<dyn SpeechToText> = Box::new(StubEngine);
        let tts: Box<dyn TextToSpeech> = Box::new(StubEngine);

        let utterance = stt.transcribe(&[0u8; 4]).await.unwrap();
        assert!(!utterance.is_empty());

        let audio = tts.synthesize(&utterance).await.unwrap();
        assert!(!audio.is_empty());
    }
}
