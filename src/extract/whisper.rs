//! OpenAI Whisper speech-to-text implementation.

use super::SpeechToText;
use crate::error::{Result, TavleError};
use crate::openai::create_client;
use async_openai::types::{AudioResponseFormat, CreateTranscriptionRequestArgs};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Speech-to-text backed by the OpenAI audio transcription endpoint.
///
/// Sends the whole clip in one request; language is auto-detected by the
/// model (no hint is sent).
pub struct WhisperTranscriber {
    client: async_openai::Client<async_openai::config::OpenAIConfig>,
    model: String,
}

impl WhisperTranscriber {
    pub fn new(model: &str) -> Self {
        Self {
            client: create_client(),
            model: model.to_string(),
        }
    }
}

impl Default for WhisperTranscriber {
    fn default() -> Self {
        Self::new("whisper-1")
    }
}

#[async_trait]
impl SpeechToText for WhisperTranscriber {
    #[instrument(skip(self, audio), fields(filename = %filename))]
    async fn transcribe(&self, filename: &str, audio: &[u8]) -> Result<String> {
        debug!("Transcribing audio with {} ({} bytes)", self.model, audio.len());

        let request = CreateTranscriptionRequestArgs::default()
            .file(async_openai::types::AudioInput::from_vec_u8(
                filename.to_string(),
                audio.to_vec(),
            ))
            .model(&self.model)
            .response_format(AudioResponseFormat::Json)
            .build()
            .map_err(|e| TavleError::Extraction(format!("Failed to build request: {}", e)))?;

        let response = self
            .client
            .audio()
            .transcribe(request)
            .await
            .map_err(|e| TavleError::OpenAI(format!("Whisper API error: {}", e)))?;

        Ok(response.text.trim().to_string())
    }
}
