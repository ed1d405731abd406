//! Summarize-and-classify via an OpenAI chat model.
//!
//! Sends extracted text with a fixed prompt template and parses the model's
//! two-line reply (`摘要：` / `主題分類：`) into a summary and a [`Category`].
//! Replies are cached by input text (LRU, capacity- and age-bounded) so
//! resubmitting unchanged text does not cost another model call.

use crate::cache::BoundedCache;
use crate::config::Prompts;
use crate::error::{Result, TavleError};
use crate::notes::Category;
use crate::openai::create_client;
use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestUserMessageArgs,
    CreateChatCompletionRequestArgs,
};
use std::sync::Mutex;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Label prefix for the summary line of the model reply.
const SUMMARY_PREFIX: &str = "摘要：";
/// Label prefix for the category line of the model reply.
const CATEGORY_PREFIX: &str = "主題分類：";
/// Fallback summary length when the reply doesn't follow the contract.
const FALLBACK_SUMMARY_CHARS: usize = 100;

/// A parsed classification result.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub summary: String,
    pub category: Category,
}

/// Trait for summarize-and-classify services.
#[async_trait::async_trait]
pub trait Summarizer: Send + Sync {
    /// Summarize and classify a piece of extracted text.
    async fn classify(&self, text: &str) -> Result<Classification>;
}

/// Parse a raw model reply into a summary and category.
///
/// The reply is split into non-empty trimmed lines. With two or more lines,
/// line 1 minus the `摘要：` prefix is the summary and line 2 minus the
/// `主題分類：` prefix is the category label, validated against the closed
/// category set (unknown labels fall back to `Other`). With fewer than two
/// lines the summary is the first 100 characters of the raw reply and the
/// category is `Other`.
pub fn parse_reply(raw: &str) -> Classification {
    let lines: Vec<&str> = raw
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    if lines.len() >= 2 {
        let summary = lines[0]
            .strip_prefix(SUMMARY_PREFIX)
            .unwrap_or(lines[0])
            .trim()
            .to_string();
        let label = lines[1]
            .strip_prefix(CATEGORY_PREFIX)
            .unwrap_or(lines[1])
            .trim();
        let category = Category::from_label(label).unwrap_or_else(|| {
            warn!("Unknown category label '{}', falling back to other", label);
            Category::Other
        });
        Classification { summary, category }
    } else {
        Classification {
            summary: raw.chars().take(FALLBACK_SUMMARY_CHARS).collect(),
            category: Category::Other,
        }
    }
}

/// Summarizer/classifier backed by an OpenAI chat model.
pub struct Classifier {
    client: async_openai::Client<async_openai::config::OpenAIConfig>,
    model: String,
    prompts: Prompts,
    cache: Mutex<BoundedCache<String, Classification>>,
}

impl Classifier {
    /// Create a classifier with the given model and cache bounds.
    pub fn new(model: &str, prompts: Prompts, cache_entries: usize, cache_ttl: Duration) -> Self {
        Self {
            client: create_client(),
            model: model.to_string(),
            prompts,
            cache: Mutex::new(BoundedCache::new(cache_entries, cache_ttl)),
        }
    }

    async fn request_completion(&self, text: &str) -> Result<String> {
        let user_prompt = self.prompts.render_classify(text);

        let messages: Vec<ChatCompletionRequestMessage> = vec![
            ChatCompletionRequestUserMessageArgs::default()
                .content(user_prompt)
                .build()
                .map_err(|e| TavleError::Classification(e.to_string()))?
                .into(),
        ];

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .build()
            .map_err(|e| TavleError::Classification(e.to_string()))?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| TavleError::OpenAI(format!("Chat completion failed: {}", e)))?;

        response
            .choices
            .first()
            .and_then(|c| c.message.content.clone())
            .ok_or_else(|| TavleError::Classification("Empty response from model".to_string()))
    }
}

#[async_trait::async_trait]
impl Summarizer for Classifier {
    /// Summarize and classify a piece of extracted text.
    ///
    /// Remote failures (network, auth, quota) propagate to the caller; no
    /// local recovery is attempted.
    #[instrument(skip(self, text), fields(chars = text.chars().count()))]
    async fn classify(&self, text: &str) -> Result<Classification> {
        if let Some(cached) = self.cache.lock().unwrap().get(&text.to_string()) {
            debug!("Classifier cache hit");
            return Ok(cached);
        }

        let raw = self.request_completion(text).await?;
        let classification = parse_reply(&raw);
        debug!("Classified as {}", classification.category);

        self.cache
            .lock()
            .unwrap()
            .put(text.to_string(), classification.clone());

        Ok(classification)
    }
}
