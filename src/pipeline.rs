//! Batch processing pipeline for Tavle.
//!
//! Coordinates extract -> summarize/classify for each upload, building the
//! in-memory note batch. Files are processed strictly in sequence: one file
//! is extracted and classified to completion before the next begins, with no
//! overlap between the extraction and classification calls.

use crate::classify::{Classifier, Summarizer};
use crate::config::Settings;
use crate::error::Result;
use crate::extract::{Ocr, SpeechToText, TesseractOcr, TextExtractor, UploadedFile, WhisperTranscriber};
use crate::notes::{NoteRecord, NoteStore};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, instrument};

/// The ingestion-and-classification pipeline.
pub struct Pipeline {
    extractor: TextExtractor,
    summarizer: Arc<dyn Summarizer>,
}

impl Pipeline {
    /// Create a pipeline with production backends from settings.
    ///
    /// Service handles (OCR engine, speech client, chat client) are
    /// constructed once here and live as long as the pipeline.
    pub fn new(settings: &Settings) -> Self {
        let ocr = Arc::new(TesseractOcr::new(&settings.ocr.languages));
        let speech = Arc::new(WhisperTranscriber::new(&settings.transcription.model));
        let summarizer = Arc::new(Classifier::new(
            &settings.classifier.model,
            settings.prompts.clone(),
            settings.classifier.cache_entries,
            Duration::from_secs(settings.classifier.cache_ttl_seconds),
        ));
        Self::with_components(ocr, speech, summarizer)
    }

    /// Create a pipeline with custom backends.
    pub fn with_components(
        ocr: Arc<dyn Ocr>,
        speech: Arc<dyn SpeechToText>,
        summarizer: Arc<dyn Summarizer>,
    ) -> Self {
        Self {
            extractor: TextExtractor::new(ocr, speech),
            summarizer,
        }
    }

    /// Process one upload: extract text, then summarize and classify it.
    ///
    /// Any failure propagates; the caller aborts the batch.
    #[instrument(skip(self, file), fields(filename = %file.name))]
    pub async fn process_file(&self, file: &UploadedFile) -> Result<NoteRecord> {
        let source_text = self.extractor.extract(file).await?;
        let classification = self.summarizer.classify(&source_text).await?;

        Ok(NoteRecord {
            filename: file.name.clone(),
            category: classification.category,
            summary: classification.summary,
            source_text,
        })
    }

    /// Process a batch of uploads in order, one at a time.
    ///
    /// The first failure aborts the whole batch; there is no partial-result
    /// persistence, so a failed batch must be resubmitted.
    pub async fn process_batch(&self, files: &[UploadedFile]) -> Result<NoteStore> {
        let mut store = NoteStore::new();

        for file in files {
            let record = self.process_file(file).await?;
            info!("Processed {} -> {}", record.filename, record.category);
            store.push(record);
        }

        Ok(store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::Classification;
    use crate::error::TavleError;
    use crate::notes::Category;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct EchoOcr;

    #[async_trait]
    impl Ocr for EchoOcr {
        async fn recognize(&self, _filename: &str, _image: &[u8]) -> Result<String> {
            Ok("ocr text".to_string())
        }
    }

    struct EchoSpeech;

    #[async_trait]
    impl SpeechToText for EchoSpeech {
        async fn transcribe(&self, _filename: &str, _audio: &[u8]) -> Result<String> {
            Ok("asr text".to_string())
        }
    }

    /// Summarizer that records the texts it was invoked with.
    struct RecordingSummarizer {
        seen: Mutex<Vec<String>>,
        fail_on: Option<String>,
    }

    impl RecordingSummarizer {
        fn new() -> Self {
            Self {
                seen: Mutex::new(Vec::new()),
                fail_on: None,
            }
        }
    }

    #[async_trait]
    impl Summarizer for RecordingSummarizer {
        async fn classify(&self, text: &str) -> Result<Classification> {
            self.seen.lock().unwrap().push(text.to_string());
            if self.fail_on.as_deref() == Some(text) {
                return Err(TavleError::Classification("quota exceeded".to_string()));
            }
            Ok(Classification {
                summary: format!("summary: {}", text),
                category: Category::Learning,
            })
        }
    }

    fn pipeline_with(summarizer: Arc<RecordingSummarizer>) -> Pipeline {
        Pipeline::with_components(Arc::new(EchoOcr), Arc::new(EchoSpeech), summarizer)
    }

    #[tokio::test]
    async fn test_txt_upload_reaches_classifier_verbatim() {
        let summarizer = Arc::new(RecordingSummarizer::new());
        let pipeline = pipeline_with(summarizer.clone());

        let file = UploadedFile::new("hello.txt", b"Hello world".to_vec()).unwrap();
        let note = pipeline.process_file(&file).await.unwrap();

        assert_eq!(note.filename, "hello.txt");
        assert_eq!(note.source_text, "Hello world");
        assert_eq!(note.summary, "summary: Hello world");
        assert_eq!(summarizer.seen.lock().unwrap().as_slice(), ["Hello world"]);
    }

    #[tokio::test]
    async fn test_batch_preserves_order() {
        let summarizer = Arc::new(RecordingSummarizer::new());
        let pipeline = pipeline_with(summarizer);

        let files = vec![
            UploadedFile::new("b.txt", b"second".to_vec()).unwrap(),
            UploadedFile::new("a.txt", b"first".to_vec()).unwrap(),
        ];

        let store = pipeline.process_batch(&files).await.unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.records()[0].filename, "b.txt");
        assert_eq!(store.records()[1].filename, "a.txt");
    }

    #[tokio::test]
    async fn test_classification_failure_aborts_batch() {
        let summarizer = Arc::new(RecordingSummarizer {
            seen: Mutex::new(Vec::new()),
            fail_on: Some("boom".to_string()),
        });
        let pipeline = pipeline_with(summarizer.clone());

        let files = vec![
            UploadedFile::new("ok.txt", b"fine".to_vec()).unwrap(),
            UploadedFile::new("bad.txt", b"boom".to_vec()).unwrap(),
            UploadedFile::new("never.txt", b"unreached".to_vec()).unwrap(),
        ];

        assert!(pipeline.process_batch(&files).await.is_err());
        // The file after the failure is never attempted.
        assert_eq!(summarizer.seen.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_image_and_audio_dispatch() {
        let summarizer = Arc::new(RecordingSummarizer::new());
        let pipeline = pipeline_with(summarizer.clone());

        let image = UploadedFile::new("pic.png", vec![1, 2]).unwrap();
        let audio = UploadedFile::new("clip.wav", vec![3, 4]).unwrap();

        let image_note = pipeline.process_file(&image).await.unwrap();
        let audio_note = pipeline.process_file(&audio).await.unwrap();

        assert_eq!(image_note.source_text, "ocr text");
        assert_eq!(audio_note.source_text, "asr text");
        assert_eq!(
            summarizer.seen.lock().unwrap().as_slice(),
            ["ocr text", "asr text"]
        );
    }
}
