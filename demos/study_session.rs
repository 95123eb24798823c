use dotenv::dotenv;
use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;
use study_assistant::{
    FileKind, GeminiClient, GeneratedQuestions, LogObserver, Result, StudyAssistant,
    StudyAssistantError,
};

fn print_questions(result: &GeneratedQuestions) {
    match result {
        GeneratedQuestions::Refusal(refusal) => println!("\n{}\n", refusal.text),
        GeneratedQuestions::Questions { questions } if questions.is_empty() => {
            println!("\nThe model did not return any readable questions. Try again.\n")
        }
        GeneratedQuestions::Questions { questions } => {
            for (i, q) in questions.iter().enumerate() {
                println!("\nQuestion {}: {}", i + 1, q.question);
                for option in &q.options {
                    println!("  {}", option);
                }
                println!("Answer: {}", if q.answer.is_empty() { "N/A" } else { q.answer.as_str() });
                if !q.explanation.is_empty() {
                    println!("Explanation: {}", q.explanation);
                }
            }
            println!();
        }
    }
}

fn no_document_support(_: &Path, kind: FileKind) -> Result<String> {
    Err(StudyAssistantError::ExtractionFailed(format!(
        "This demo has no {} text extractor; upload an image instead",
        kind.extension()
    )))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::init();

    println!("📚 Starting Study Session...\n");

    let client = GeminiClient::from_env()?;
    println!("✅ Using model {}.\n", client.model());
    let assistant = StudyAssistant::new(client).with_observer(Arc::new(LogObserver));

    println!("Commands:");
    println!("  summarize <topic>          summary from general knowledge");
    println!("  ask <question>             answer a study question");
    println!("  quiz <n> <easy|medium|hard> <mcq|subjective> <topic>");
    println!("  describe <image path>      describe an uploaded image");
    println!("  quit");
    println!("------------------------------------------------------------------");

    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            break;
        }
        let line = input.trim();

        if line.eq_ignore_ascii_case("quit") || line.eq_ignore_ascii_case("exit") {
            break;
        }

        if line.is_empty() {
            continue;
        }

        let (command, rest) = line.split_once(' ').unwrap_or((line, ""));
        println!("\nThinking...");

        let outcome = match command {
            "summarize" => assistant
                .summarize_chapter("", rest)
                .await
                .map(|text| println!("\n{}\n", text)),
            "ask" => assistant
                .answer_question(rest)
                .await
                .map(|text| println!("\n{}\n", text)),
            "quiz" => {
                let mut parts = rest.splitn(4, ' ');
                let count = parts.next().and_then(|n| n.parse().ok()).unwrap_or(5);
                let difficulty = parts.next().unwrap_or("medium");
                let question_type = parts.next().unwrap_or("mcq");
                let topic = parts.next().unwrap_or("");
                assistant
                    .generate_test_questions(topic, count, difficulty, question_type)
                    .await
                    .map(|result| print_questions(&result))
            }
            "describe" => assistant
                .describe_file(Path::new(rest), &no_document_support)
                .await
                .map(|text| println!("\n{}\n", text)),
            other => {
                println!("Unknown command '{}'", other);
                Ok(())
            }
        };

        if let Err(e) = outcome {
            eprintln!("❌ Error: {}", e);
        }
        println!("------------------------------------------------------------------");
    }

    Ok(())
}
