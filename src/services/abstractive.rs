use std::sync::Arc;

use async_openai::{
    config::OpenAIConfig,
    types::{
        ChatCompletionRequestMessage, Role, CreateChatCompletionRequest,
        ChatCompletionRequestSystemMessage, ChatCompletionRequestUserMessage,
        ChatCompletionRequestUserMessageContent,
    },
    Client,
};
use async_trait::async_trait;
use once_cell::sync::OnceCell;

use crate::config::Config;
use crate::error::AppError;

const MAX_LENGTH_RATIO: f64 = 0.6;
const MAX_LENGTH_CAP: usize = 130;
const MIN_LENGTH_RATIO: f64 = 0.3;
const MIN_LENGTH_CAP: usize = 40;

/// External capability that writes a new summary for long text.
#[async_trait]
pub trait AbstractiveSummarizer: Send + Sync {
    async fn summarize(
        &self,
        text: &str,
        max_length: usize,
        min_length: usize,
    ) -> Result<String, AppError>;
}

/// Length bounds `(max_length, min_length)` in words for an input of
/// `word_count` words.
pub fn length_bounds(word_count: usize) -> (usize, usize) {
    let scaled = |ratio: f64, cap: usize| ((word_count as f64 * ratio).round() as usize).min(cap);
    (
        scaled(MAX_LENGTH_RATIO, MAX_LENGTH_CAP),
        scaled(MIN_LENGTH_RATIO, MIN_LENGTH_CAP),
    )
}

pub struct OpenAiSummarizer {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAiSummarizer {
    pub fn new(api_key: &str, model: &str) -> Self {
        let config = OpenAIConfig::new().with_api_key(api_key);

        Self {
            client: Client::with_config(config),
            model: model.to_string(),
        }
    }

    fn system_prompt(&self, max_length: usize, min_length: usize) -> String {
        format!(
            "You are a summarization engine. Rewrite the user's text as a concise, \
             faithful summary between {} and {} words. Do not add facts, opinions or \
             commentary. Reply with the summary text only.",
            min_length, max_length
        )
    }
}

#[async_trait]
impl AbstractiveSummarizer for OpenAiSummarizer {
    async fn summarize(
        &self,
        text: &str,
        max_length: usize,
        min_length: usize,
    ) -> Result<String, AppError> {
        let messages = vec![
            ChatCompletionRequestMessage::System(
                ChatCompletionRequestSystemMessage {
                    content: self.system_prompt(max_length, min_length),
                    name: None,
                    role: Role::System,
                }
            ),
            ChatCompletionRequestMessage::User(
                ChatCompletionRequestUserMessage {
                    content: ChatCompletionRequestUserMessageContent::Text(text.to_string()),
                    name: None,
                    role: Role::User,
                }
            ),
        ];

        let request = CreateChatCompletionRequest {
            model: self.model.clone(),
            messages,
            temperature: Some(0.0),
            ..Default::default()
        };

        let response = self.client
            .chat()
            .create(request)
            .await
            .map_err(|e| AppError::ModelError(e.to_string()))?;

        let content = response.choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .ok_or_else(|| AppError::ModelError("Empty completion returned".to_string()))?;

        Ok(content.trim().to_string())
    }
}

type SummarizerFactory =
    Box<dyn Fn() -> Result<Arc<dyn AbstractiveSummarizer>, AppError> + Send + Sync>;

/// Process-wide handle to the abstractive summarizer.
///
/// The factory runs on first use only. Concurrent first callers block on the
/// same initialization; later callers reuse the stored handle. A failed
/// initialization is not cached, so the next request retries construction.
pub struct LazySummarizer {
    cell: OnceCell<Arc<dyn AbstractiveSummarizer>>,
    factory: SummarizerFactory,
}

impl LazySummarizer {
    pub fn new<F>(factory: F) -> Self
    where
        F: Fn() -> Result<Arc<dyn AbstractiveSummarizer>, AppError> + Send + Sync + 'static,
    {
        Self {
            cell: OnceCell::new(),
            factory: Box::new(factory),
        }
    }

    /// Builds the OpenAI-backed gateway from configuration on first use.
    pub fn from_config(config: &Config) -> Self {
        let api_key = config.openai_key.clone();
        let model = config.summarizer_model.clone();

        Self::new(move || {
            let api_key = api_key.as_deref().ok_or_else(|| {
                AppError::ModelError("OPENAI_API_KEY is not configured".to_string())
            })?;
            tracing::info!("Initializing abstractive summarizer with model {}", model);
            Ok(Arc::new(OpenAiSummarizer::new(api_key, &model)) as Arc<dyn AbstractiveSummarizer>)
        })
    }

    /// Wraps an already-built gateway, skipping lazy construction.
    pub fn ready(summarizer: Arc<dyn AbstractiveSummarizer>) -> Self {
        let lazy = Self::new(|| {
            Err(AppError::Internal("summarizer factory invoked after initialization".to_string()))
        });
        let _ = lazy.cell.set(summarizer);
        lazy
    }

    pub fn get(&self) -> Result<Arc<dyn AbstractiveSummarizer>, AppError> {
        self.cell
            .get_or_try_init(|| (self.factory)())
            .map(Arc::clone)
    }
}
