use std::sync::Arc;

use log::{debug, warn};
use thiserror::Error;

use crate::llm::{Completion, GenerationConfig};

/// Why an answer could not be produced. The display strings are what the
/// user sees in both front ends.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnswerError {
    #[error("API key not configured. Please set GEMINI_API_KEY environment variable.")]
    MissingCredential,
    #[error("Error communicating with LLM API: {0}")]
    Llm(String),
}

pub type AnswerResult = Result<String, AnswerError>;

/// Turns a raw question into a model answer.
#[derive(Clone)]
pub struct AnswerService {
    backend: Arc<dyn Completion>,
    generation: GenerationConfig,
}

impl AnswerService {
    pub fn new(backend: Arc<dyn Completion>) -> Self {
        AnswerService {
            backend,
            generation: GenerationConfig::default(),
        }
    }

    /// Asks the backend about `question` exactly as the user typed it.
    ///
    /// Never fails loudly: a missing credential or any backend failure comes
    /// back as an [`AnswerError`].
    pub async fn get_answer(&self, question: &str, credential: Option<&str>) -> AnswerResult {
        // only an absent or empty key counts as not configured
        let credential = match credential {
            Some(key) if !key.is_empty() => key,
            _ => return Err(AnswerError::MissingCredential),
        };

        let prompt = build_prompt(question);
        debug!("requesting answer for a {} char question", question.len());

        match self
            .backend
            .complete(&prompt, credential, &self.generation)
            .await
        {
            Ok(text) => Ok(text.trim().to_string()),
            Err(e) => {
                warn!("LLM call failed: {:#}", e);
                Err(AnswerError::Llm(format!("{:#}", e)))
            }
        }
    }
}

pub fn build_prompt(question: &str) -> String {
    format!(
        "You are a helpful AI assistant that provides clear, accurate, and concise answers to questions.\n\n\
         Question: {}\n\n\
         Answer:",
        question
    )
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use anyhow::{anyhow, Result};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// In-memory backend that records what it was asked.
    pub struct FakeCompletion {
        reply: Result<String, String>,
        pub calls: AtomicUsize,
        pub last_prompt: Mutex<Option<String>>,
        pub last_credential: Mutex<Option<String>>,
        pub last_generation: Mutex<Option<GenerationConfig>>,
    }

    impl FakeCompletion {
        pub fn answering(reply: &str) -> Arc<Self> {
            Arc::new(Self::with_reply(Ok(reply.to_string())))
        }

        pub fn failing(message: &str) -> Arc<Self> {
            Arc::new(Self::with_reply(Err(message.to_string())))
        }

        fn with_reply(reply: Result<String, String>) -> Self {
            FakeCompletion {
                reply,
                calls: AtomicUsize::new(0),
                last_prompt: Mutex::new(None),
                last_credential: Mutex::new(None),
                last_generation: Mutex::new(None),
            }
        }

        pub fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Completion for FakeCompletion {
        async fn complete(
            &self,
            prompt: &str,
            credential: &str,
            generation: &GenerationConfig,
        ) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_prompt.lock().unwrap() = Some(prompt.to_string());
            *self.last_credential.lock().unwrap() = Some(credential.to_string());
            *self.last_generation.lock().unwrap() = Some(*generation);
            match &self.reply {
                Ok(text) => Ok(text.clone()),
                Err(message) => Err(anyhow!(message.clone())),
            }
        }
    }
}
