//! # Study Assistant
//!
//! Turns free-form LLM completions into study artifacts: chapter summaries, answers,
//! and multiple-choice or subjective exam questions.
//!
//! ## Core Concepts
//!
//! - **PromptBuilder**: composes the instruction payload for a task from the caller's
//!   topic, text, difficulty and question settings
//! - **System Instructions**: one fixed instruction per task, each naming the exact
//!   refusal sentence the model must echo for off-topic input
//! - **Classifier**: spots those refusal sentences before anything is parsed
//! - **QuestionParser**: a two-state line machine that reads `Question n:` blocks and
//!   keeps partial records instead of failing
//! - **StudyAssistant**: one async operation per task over any [`GenerativeClient`]
//!
//! The Gemini REST backend lives behind the `gemini` feature.
//!
//! ## Example
//!
//! ```rust,ignore
//! use study_assistant::*;
//!
//! let assistant = StudyAssistant::new(GeminiClient::from_env()?);
//!
//! match assistant
//!     .generate_test_questions("Photosynthesis", 3, "medium", "mcq")
//!     .await?
//! {
//!     GeneratedQuestions::Questions { questions } => {
//!         for (i, q) in questions.iter().enumerate() {
//!             println!("Question {}: {}", i + 1, q.question);
//!             for option in &q.options {
//!                 println!("  {}", option);
//!             }
//!             println!("Answer: {}", q.answer);
//!         }
//!     }
//!     GeneratedQuestions::Refusal(refusal) => println!("{}", refusal.text),
//! }
//! ```

pub mod builder;
pub mod classifier;
pub mod error;
pub mod extraction;
pub mod llm;
pub mod parser;
pub mod schema;

pub use builder::PromptBuilder;
pub use classifier::{classify, Classification, REFUSAL_SENTINELS};
pub use error::{Result, StudyAssistantError};
pub use extraction::{load_upload, DocumentTextExtractor, FileKind, UploadContent};
pub use llm::*;
pub use parser::{parse, parse_with_observer, LogObserver, NoopObserver, ParseObserver};
pub use schema::*;
