use async_trait::async_trait;

use crate::error::Result;

/// A text-completion backend.
///
/// Implementations return the model's raw text. An empty string is a legitimate
/// return value; the pipeline decides whether that counts as a failure.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn complete(&self, prompt: &str, model_id: &str) -> Result<String>;
}

#[async_trait]
impl<T: CompletionProvider + ?Sized> CompletionProvider for &T {
    async fn complete(&self, prompt: &str, model_id: &str) -> Result<String> {
        (**self).complete(prompt, model_id).await
    }
}
