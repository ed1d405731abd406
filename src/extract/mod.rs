//! Text extraction from uploaded files.
//!
//! Converts a raw upload (image, audio, or plain text) into plain text,
//! dispatching by media kind. Image results are memoized by content hash for
//! the lifetime of the process; audio and text are cheap or already cached
//! upstream and are not memoized here.

mod ocr;
mod whisper;

pub use ocr::TesseractOcr;
pub use whisper::WhisperTranscriber;

use crate::error::{Result, TavleError};
use async_trait::async_trait;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::debug;

/// Media classification of an upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Audio,
    Text,
}

impl MediaKind {
    /// Classify a filename by extension.
    ///
    /// Accepted extensions: png, jpg, jpeg, mp3, wav, txt. Anything else is
    /// rejected before processing starts.
    pub fn from_filename(name: &str) -> Result<Self> {
        let ext = Path::new(name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "png" | "jpg" | "jpeg" => Ok(MediaKind::Image),
            "mp3" | "wav" => Ok(MediaKind::Audio),
            "txt" => Ok(MediaKind::Text),
            _ => Err(TavleError::InvalidInput(format!(
                "Unsupported file type: {}. Accepted: png, jpg, jpeg, mp3, wav, txt",
                name
            ))),
        }
    }
}

/// A file submitted for processing: name, media kind, raw bytes.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub name: String,
    pub kind: MediaKind,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    /// Build an upload from a name and bytes, classifying by extension.
    pub fn new(name: &str, bytes: Vec<u8>) -> Result<Self> {
        let kind = MediaKind::from_filename(name)?;
        Ok(Self {
            name: name.to_string(),
            kind,
            bytes,
        })
    }

    /// Read an upload from disk.
    pub async fn from_path(path: &Path) -> Result<Self> {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| TavleError::InvalidInput(format!("Invalid path: {}", path.display())))?
            .to_string();
        let kind = MediaKind::from_filename(&name)?;
        let bytes = tokio::fs::read(path).await?;
        Ok(Self { name, kind, bytes })
    }
}

/// Optical character recognition: image bytes to detected text.
#[async_trait]
pub trait Ocr: Send + Sync {
    async fn recognize(&self, filename: &str, image: &[u8]) -> Result<String>;
}

/// Speech-to-text: audio bytes to transcript, language auto-detected.
#[async_trait]
pub trait SpeechToText: Send + Sync {
    async fn transcribe(&self, filename: &str, audio: &[u8]) -> Result<String>;
}

/// Dispatches an upload to OCR, speech-to-text, or UTF-8 decoding.
///
/// OCR output is memoized by content hash: identical image bytes yield the
/// stored result without a second recognizer invocation. The memo is
/// unbounded and lives for the process; fine for a low-volume, single-session
/// tool, not a generalizable cache.
pub struct TextExtractor {
    ocr: Arc<dyn Ocr>,
    speech: Arc<dyn SpeechToText>,
    image_memo: Mutex<HashMap<String, String>>,
}

impl TextExtractor {
    pub fn new(ocr: Arc<dyn Ocr>, speech: Arc<dyn SpeechToText>) -> Self {
        Self {
            ocr,
            speech,
            image_memo: Mutex::new(HashMap::new()),
        }
    }

    /// Extract plain text from an upload.
    ///
    /// Failures (recognition, transcription, invalid UTF-8) propagate to the
    /// caller, which is expected to abort the batch.
    pub async fn extract(&self, file: &UploadedFile) -> Result<String> {
        match file.kind {
            MediaKind::Image => self.extract_image(file).await,
            MediaKind::Audio => self.speech.transcribe(&file.name, &file.bytes).await,
            MediaKind::Text => String::from_utf8(file.bytes.clone()).map_err(|e| {
                TavleError::Extraction(format!("{} is not valid UTF-8: {}", file.name, e))
            }),
        }
    }

    async fn extract_image(&self, file: &UploadedFile) -> Result<String> {
        let key = content_hash(&file.bytes);

        if let Some(text) = self.image_memo.lock().unwrap().get(&key) {
            debug!("OCR memo hit for {}", file.name);
            return Ok(text.clone());
        }

        let text = self.ocr.recognize(&file.name, &file.bytes).await?;
        self.image_memo.lock().unwrap().insert(key, text.clone());
        Ok(text)
    }
}

/// SHA-256 hex digest of the file content, used as the memo key.
fn content_hash(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingOcr {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl Ocr for CountingOcr {
        async fn recognize(&self, _filename: &str, image: &[u8]) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(format!("recognized {} bytes", image.len()))
        }
    }

    struct FixedSpeech;

    #[async_trait]
    impl SpeechToText for FixedSpeech {
        async fn transcribe(&self, _filename: &str, _audio: &[u8]) -> Result<String> {
            Ok("a transcript".to_string())
        }
    }

    fn extractor_with(ocr: Arc<CountingOcr>) -> TextExtractor {
        TextExtractor::new(ocr, Arc::new(FixedSpeech))
    }

    #[test]
    fn test_media_kind_from_filename() {
        assert_eq!(MediaKind::from_filename("a.PNG").unwrap(), MediaKind::Image);
        assert_eq!(MediaKind::from_filename("b.jpeg").unwrap(), MediaKind::Image);
        assert_eq!(MediaKind::from_filename("c.mp3").unwrap(), MediaKind::Audio);
        assert_eq!(MediaKind::from_filename("d.wav").unwrap(), MediaKind::Audio);
        assert_eq!(MediaKind::from_filename("e.txt").unwrap(), MediaKind::Text);
        assert!(MediaKind::from_filename("f.pdf").is_err());
        assert!(MediaKind::from_filename("noext").is_err());
    }

    #[tokio::test]
    async fn test_text_file_decoded_verbatim() {
        let ocr = Arc::new(CountingOcr { calls: AtomicUsize::new(0) });
        let extractor = extractor_with(ocr);

        let file = UploadedFile::new("hello.txt", b"Hello world".to_vec()).unwrap();
        let text = extractor.extract(&file).await.unwrap();
        assert_eq!(text, "Hello world");
    }

    #[tokio::test]
    async fn test_invalid_utf8_propagates() {
        let ocr = Arc::new(CountingOcr { calls: AtomicUsize::new(0) });
        let extractor = extractor_with(ocr);

        let file = UploadedFile::new("bad.txt", vec![0xff, 0xfe, 0xfd]).unwrap();
        assert!(extractor.extract(&file).await.is_err());
    }

    #[tokio::test]
    async fn test_image_ocr_memoized_by_content() {
        let ocr = Arc::new(CountingOcr { calls: AtomicUsize::new(0) });
        let extractor = extractor_with(ocr.clone());

        let first = UploadedFile::new("one.png", vec![1, 2, 3]).unwrap();
        let same_bytes = UploadedFile::new("two.png", vec![1, 2, 3]).unwrap();

        let a = extractor.extract(&first).await.unwrap();
        let b = extractor.extract(&same_bytes).await.unwrap();

        assert_eq!(a, b);
        assert_eq!(ocr.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_different_images_not_shared() {
        let ocr = Arc::new(CountingOcr { calls: AtomicUsize::new(0) });
        let extractor = extractor_with(ocr.clone());

        let one = UploadedFile::new("one.png", vec![1, 2, 3]).unwrap();
        let other = UploadedFile::new("two.png", vec![4, 5, 6]).unwrap();

        extractor.extract(&one).await.unwrap();
        extractor.extract(&other).await.unwrap();
        assert_eq!(ocr.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_audio_goes_to_speech() {
        let ocr = Arc::new(CountingOcr { calls: AtomicUsize::new(0) });
        let extractor = extractor_with(ocr.clone());

        let file = UploadedFile::new("clip.mp3", vec![0u8; 16]).unwrap();
        let text = extractor.extract(&file).await.unwrap();
        assert_eq!(text, "a transcript");
        assert_eq!(ocr.calls.load(Ordering::SeqCst), 0);
    }
}
