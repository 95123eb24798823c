use crate::error::{Result, StudyAssistantError};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Task {
    #[schemars(description = "Summarize a chapter from its text, or a topic from general knowledge")]
    Summarize,

    #[schemars(description = "Answer a single study question directly")]
    Answer,

    #[schemars(description = "Generate a fixed number of exam questions in the question-block grammar")]
    GenerateQuestions,

    #[schemars(description = "Describe the educational content of an uploaded document or image")]
    DescribeUpload,
}

impl Task {
    pub const ALL: [Task; 4] = [
        Task::Summarize,
        Task::Answer,
        Task::GenerateQuestions,
        Task::DescribeUpload,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Task::Summarize => "summarize",
            Task::Answer => "answer",
            Task::GenerateQuestions => "generate_questions",
            Task::DescribeUpload => "describe_upload",
        }
    }
}

#[derive(
    Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

#[derive(
    Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum QuestionType {
    #[default]
    #[schemars(description = "Multiple choice: four labelled options A) to D), one correct letter")]
    Mcq,

    #[schemars(description = "Open answer: no options, the answer holds the expected key points")]
    Subjective,
}

impl QuestionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionType::Mcq => "mcq",
            QuestionType::Subjective => "subjective",
        }
    }
}

macro_rules! impl_wire_name {
    ($ty:ty, $what:literal, [$($variant:expr),+ $(,)?]) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = StudyAssistantError;

            fn from_str(s: &str) -> Result<Self> {
                let wanted = s.trim();
                [$($variant),+]
                    .into_iter()
                    .find(|v: &$ty| v.as_str().eq_ignore_ascii_case(wanted))
                    .ok_or_else(|| {
                        StudyAssistantError::InvalidRequest(format!(
                            "Unknown {} '{}'",
                            $what, s
                        ))
                    })
            }
        }
    };
}

impl_wire_name!(
    Task,
    "task",
    [
        Task::Summarize,
        Task::Answer,
        Task::GenerateQuestions,
        Task::DescribeUpload
    ]
);
impl_wire_name!(
    Difficulty,
    "difficulty",
    [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard]
);
impl_wire_name!(
    QuestionType,
    "question type",
    [QuestionType::Mcq, QuestionType::Subjective]
);

/// Raw image bytes attached to a multimodal request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ImagePayload {
    /// e.g. "image/png"
    pub mime_type: String,
    pub data: Vec<u8>,
}

impl ImagePayload {
    pub fn new(mime_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data,
        }
    }
}

/// Everything the prompt builder needs for one caller request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PromptRequest {
    pub task: Task,
    /// Chapter title, topic, or the question itself for [`Task::Answer`].
    pub topic_or_title: String,
    /// Source text. Empty means no document was supplied.
    #[serde(default)]
    pub body_text: String,
    #[serde(default)]
    pub difficulty: Difficulty,
    pub question_count: u32,
    #[serde(default)]
    pub question_type: QuestionType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<ImagePayload>,
}

impl PromptRequest {
    pub const DEFAULT_QUESTION_COUNT: u32 = 5;

    fn base(task: Task, topic_or_title: String, body_text: String) -> Self {
        Self {
            task,
            topic_or_title,
            body_text,
            difficulty: Difficulty::default(),
            question_count: Self::DEFAULT_QUESTION_COUNT,
            question_type: QuestionType::default(),
            image: None,
        }
    }

    pub fn summarize(title: impl Into<String>, body_text: impl Into<String>) -> Self {
        Self::base(Task::Summarize, title.into(), body_text.into())
    }

    pub fn answer(question: impl Into<String>) -> Self {
        Self::base(Task::Answer, question.into(), String::new())
    }

    pub fn generate_questions(
        topic: impl Into<String>,
        question_count: u32,
        difficulty: Difficulty,
        question_type: QuestionType,
    ) -> Self {
        Self {
            difficulty,
            question_count,
            question_type,
            ..Self::base(Task::GenerateQuestions, topic.into(), String::new())
        }
    }

    pub fn describe_upload(extracted_text: impl Into<String>, image: Option<ImagePayload>) -> Self {
        Self {
            image,
            ..Self::base(Task::DescribeUpload, String::new(), extracted_text.into())
        }
    }

    #[must_use]
    pub fn with_body_text(mut self, body_text: impl Into<String>) -> Self {
        self.body_text = body_text.into();
        self
    }
}

/// Final payload handed to the generative backend. Consumed once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ComposedPrompt {
    /// System instruction text. Empty for the direct multimodal image call.
    pub instruction: String,
    pub user_request: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<ImagePayload>,
}

impl ComposedPrompt {
    pub const USER_REQUEST_HEADER: &'static str = "USER REQUEST:";
    pub const REFUSAL_REMINDER: &'static str =
        "REMEMBER: If this is not study-related, reply exactly as instructed in the SYSTEM prompt above.";

    pub fn has_instruction(&self) -> bool {
        !self.instruction.is_empty()
    }

    /// The exact text sent to the backend.
    pub fn render(&self) -> String {
        if !self.has_instruction() {
            return self.user_request.clone();
        }
        format!(
            "{}\n\n{} {}\n\n{}",
            self.instruction,
            Self::USER_REQUEST_HEADER,
            self.user_request,
            Self::REFUSAL_REMINDER
        )
    }
}

/// Untouched text returned by the backend for one prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RawCompletion {
    pub text: String,
}

impl RawCompletion {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl From<String> for RawCompletion {
    fn from(text: String) -> Self {
        Self { text }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct QuestionRecord {
    pub question: String,
    /// Full option lines including their label, e.g. "A) A force". Empty for subjective.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    #[serde(default)]
    pub answer: String,
    #[serde(default)]
    pub explanation: String,
}

impl QuestionRecord {
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            ..Default::default()
        }
    }

    /// Whether every field the grammar asks for was found.
    pub fn is_complete(&self, question_type: QuestionType) -> bool {
        let options_ok = match question_type {
            QuestionType::Mcq => !self.options.is_empty(),
            QuestionType::Subjective => true,
        };
        options_ok && !self.answer.is_empty() && !self.explanation.is_empty()
    }
}

/// The model declined the request. Carries the whole completion for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RefusalResult {
    pub text: String,
    /// Which known sentinel matched.
    pub sentinel: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum GeneratedQuestions {
    Questions { questions: Vec<QuestionRecord> },
    Refusal(RefusalResult),
}

impl GeneratedQuestions {
    pub fn is_refusal(&self) -> bool {
        matches!(self, GeneratedQuestions::Refusal(_))
    }

    /// Parsed records; empty for a refusal.
    pub fn questions(&self) -> &[QuestionRecord] {
        match self {
            GeneratedQuestions::Questions { questions } => questions,
            GeneratedQuestions::Refusal(_) => &[],
        }
    }

    pub fn refusal(&self) -> Option<&RefusalResult> {
        match self {
            GeneratedQuestions::Refusal(refusal) => Some(refusal),
            GeneratedQuestions::Questions { .. } => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SamplingParams {
    pub temperature: f32,
    pub top_p: f32,
    pub top_k: u32,
}

impl Default for SamplingParams {
    fn default() -> Self {
        Self {
            temperature: 0.2,
            top_p: 0.8,
            top_k: 40,
        }
    }
}
