mod api_client;

pub use api_client::APIClient;

use anyhow::Result;
use async_trait::async_trait;

pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 1024;

/// Sampling settings sent with every completion request.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GenerationConfig {
    pub temperature: f32,
    pub max_output_tokens: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        GenerationConfig {
            temperature: DEFAULT_TEMPERATURE,
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
        }
    }
}

/// A text completion backend.
///
/// The credential is passed per call since the web front end may receive a
/// different key with every request.
#[async_trait]
pub trait Completion: Send + Sync {
    async fn complete(
        &self,
        prompt: &str,
        credential: &str,
        generation: &GenerationConfig,
    ) -> Result<String>;
}
