use crate::error::{Result, StudyAssistantError};
use crate::llm::prompts::{
    system_instruction, DEFAULT_UPLOAD_TITLE, IMAGE_DESCRIPTION_REQUEST, TEXT_DESCRIPTION_REQUEST,
};
use crate::schema::{ComposedPrompt, PromptRequest, QuestionType, Task};

pub struct PromptBuilder;

impl PromptBuilder {
    /// Builds the payload for one request. Pure: no I/O, no shared state.
    pub fn build(request: &PromptRequest) -> Result<ComposedPrompt> {
        validate_request(request)?;

        if request.task == Task::DescribeUpload {
            if let Some(image) = &request.image {
                return Ok(ComposedPrompt {
                    instruction: String::new(),
                    user_request: IMAGE_DESCRIPTION_REQUEST.to_string(),
                    image: Some(image.clone()),
                });
            }
        }

        let user_request = match request.task {
            Task::Summarize => summarize_request(request),
            Task::Answer => format!("Question: {}", request.topic_or_title.trim()),
            Task::GenerateQuestions => question_request(request),
            Task::DescribeUpload => {
                format!("{} {}", TEXT_DESCRIPTION_REQUEST, request.body_text.trim())
            }
        };

        Ok(ComposedPrompt {
            instruction: system_instruction(request.task).trim().to_string(),
            user_request,
            image: None,
        })
    }
}

fn validate_request(request: &PromptRequest) -> Result<()> {
    let has_title = !request.topic_or_title.trim().is_empty();
    let has_body = !request.body_text.trim().is_empty();

    match request.task {
        Task::Summarize if !has_title && !has_body => Err(invalid(
            "a chapter title, topic or text is required to summarize",
        )),
        Task::Answer if !has_title => Err(invalid("question text is empty")),
        Task::GenerateQuestions if request.question_count == 0 => {
            Err(invalid("question count must be positive"))
        }
        Task::GenerateQuestions if !has_title && !has_body => {
            Err(invalid("a topic or source text is required to generate questions"))
        }
        Task::DescribeUpload if request.image.is_none() && !has_body => {
            Err(invalid("upload has neither extracted text nor an image"))
        }
        _ => Ok(()),
    }
}

fn invalid(reason: &str) -> StudyAssistantError {
    StudyAssistantError::InvalidRequest(reason.to_string())
}

fn summarize_request(request: &PromptRequest) -> String {
    let title = request.topic_or_title.trim();
    let body = request.body_text.trim();

    if body.is_empty() {
        return format!(
            "Topic: {}\nNo document was supplied. Summarize this topic from general academic knowledge.",
            title
        );
    }

    let title = if title.is_empty() {
        DEFAULT_UPLOAD_TITLE
    } else {
        title
    };
    format!("Title: {}\nContent: {}", title, body)
}

fn question_request(request: &PromptRequest) -> String {
    let count = request.question_count;
    let difficulty = request.difficulty;
    let topic = request.topic_or_title.trim();
    let body = request.body_text.trim();

    let subject = if topic.is_empty() {
        "the content provided below".to_string()
    } else {
        topic.to_string()
    };

    let (kind, layout) = match request.question_type {
        QuestionType::Mcq => (
            "multiple choice",
            "Question 1: [Question text here]\n\
             A) [Option A]\n\
             B) [Option B]\n\
             C) [Option C]\n\
             D) [Option D]\n\
             Answer: [Correct letter]\n\
             Explanation: [Brief explanation]",
        ),
        QuestionType::Subjective => (
            "subjective",
            "Question 1: [Question text here]\n\
             Answer: [Expected answer/key points]\n\
             Explanation: [Brief explanation]",
        ),
    };

    let mut text = format!(
        "Generate exactly {count} {difficulty} difficulty {kind} questions about: {subject}\n\n\
         Format EXACTLY as shown:\n\n\
         {layout}\n\n\
         Generate exactly {count} questions following this format."
    );

    if !body.is_empty() {
        text.push_str("\n\nContext: ");
        text.push_str(body);
    }

    text
}
