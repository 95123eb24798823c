use std::path::Path;
use std::sync::Arc;

use crate::builder::PromptBuilder;
use crate::classifier::{classify, Classification};
use crate::error::{Result, StudyAssistantError};
use crate::extraction::{load_upload, DocumentTextExtractor, UploadContent};
use crate::llm::client::GenerativeClient;
use crate::parser::{parse_with_observer, NoopObserver, ParseObserver};
use crate::schema::{
    ComposedPrompt, GeneratedQuestions, PromptRequest, RawCompletion, SamplingParams,
};

/// One operation per task. Each call builds a prompt, makes exactly one backend
/// call, and hands back the completion (parsed, for question generation).
pub struct StudyAssistant<C> {
    client: C,
    sampling: SamplingParams,
    observer: Arc<dyn ParseObserver>,
}

impl<C: GenerativeClient> StudyAssistant<C> {
    pub fn new(client: C) -> Self {
        Self {
            client,
            sampling: SamplingParams::default(),
            observer: Arc::new(NoopObserver),
        }
    }

    pub fn with_sampling(mut self, sampling: SamplingParams) -> Self {
        self.sampling = sampling;
        self
    }

    /// Attach a diagnostics hook for question parsing, e.g. [`crate::parser::LogObserver`].
    pub fn with_observer(mut self, observer: Arc<dyn ParseObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Summarize `text`, or the topic `title` from general knowledge when `text` is empty.
    pub async fn summarize_chapter(&self, text: &str, title: &str) -> Result<String> {
        let request = PromptRequest::summarize(title, text);
        self.complete(&request).await.map(|raw| raw.text)
    }

    pub async fn answer_question(&self, question: &str) -> Result<String> {
        let request = PromptRequest::answer(question);
        self.complete(&request).await.map(|raw| raw.text)
    }

    /// Generate `count` questions. `difficulty` and `question_type` are the caller's
    /// strings ("easy", "mcq", ...) and are rejected before any backend call if unknown.
    ///
    /// Fewer than `count` records is a normal outcome, as are records with an empty
    /// answer or explanation.
    pub async fn generate_test_questions(
        &self,
        topic: &str,
        count: u32,
        difficulty: &str,
        question_type: &str,
    ) -> Result<GeneratedQuestions> {
        let request = PromptRequest::generate_questions(
            topic,
            count,
            difficulty.parse()?,
            question_type.parse()?,
        );
        self.generate_questions_for(&request).await
    }

    /// Same as [`Self::generate_test_questions`] for a prepared request, which may
    /// carry source text as context.
    pub async fn generate_questions_for(
        &self,
        request: &PromptRequest,
    ) -> Result<GeneratedQuestions> {
        let raw = self.complete(request).await?;

        Ok(match classify(&raw) {
            Classification::Refusal(refusal) => GeneratedQuestions::Refusal(refusal),
            Classification::ContinueParsing => GeneratedQuestions::Questions {
                questions: parse_with_observer(
                    &raw,
                    request.question_count as usize,
                    request.question_type,
                    self.observer.as_ref(),
                ),
            },
        })
    }

    /// Describe an uploaded file. Images go to the backend as a direct multimodal
    /// call; document text is wrapped in the upload instruction.
    pub async fn describe_upload(&self, upload: &UploadContent) -> Result<String> {
        let request = match upload {
            UploadContent::Image(image) => PromptRequest::describe_upload("", Some(image.clone())),
            UploadContent::Text(text) => PromptRequest::describe_upload(text.as_str(), None),
        };
        self.complete(&request).await.map(|raw| raw.text)
    }

    /// Load `path` (image bytes, or document text via `extractor`) and describe it.
    pub async fn describe_file(
        &self,
        path: &Path,
        extractor: &dyn DocumentTextExtractor,
    ) -> Result<String> {
        let upload = load_upload(path, extractor).await?;
        self.describe_upload(&upload).await
    }

    async fn complete(&self, request: &PromptRequest) -> Result<RawCompletion> {
        let prompt = PromptBuilder::build(request)?;
        self.send(prompt).await
    }

    async fn send(&self, prompt: ComposedPrompt) -> Result<RawCompletion> {
        let text = self
            .client
            .generate(&prompt.render(), prompt.image.as_ref(), &self.sampling)
            .await
            .map_err(|e| match e {
                StudyAssistantError::GenerationFailed(_) => e,
                other => StudyAssistantError::GenerationFailed(other.to_string()),
            })?;

        Ok(RawCompletion::from(text))
    }
}
