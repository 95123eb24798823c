use std::future::Future;

use crate::error::Result;
use crate::schema::{ImagePayload, SamplingParams};

/// A text-generation backend: one prompt in, one completion out.
///
/// Implementations may be shared across concurrent callers. No ordering is
/// promised between independent calls, and failures should surface as
/// [`StudyAssistantError::GenerationFailed`](crate::StudyAssistantError::GenerationFailed)
/// carrying the upstream message.
pub trait GenerativeClient: Send + Sync {
    fn generate(
        &self,
        prompt: &str,
        image: Option<&ImagePayload>,
        params: &SamplingParams,
    ) -> impl Future<Output = Result<String>> + Send;
}

impl<C: GenerativeClient> GenerativeClient for std::sync::Arc<C> {
    fn generate(
        &self,
        prompt: &str,
        image: Option<&ImagePayload>,
        params: &SamplingParams,
    ) -> impl Future<Output = Result<String>> + Send {
        (**self).generate(prompt, image, params)
    }
}
