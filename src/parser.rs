//! Line-oriented parser for the question-block grammar:
//!
//! ```text
//! Question <n>: <text>
//! A) <text>
//! B) <text>
//! C) <text>
//! D) <text>
//! Answer: <letter>
//! Explanation: <text>
//! ```
//!
//! Subjective completions use the same blocks without option lines. Lines that match
//! none of the prefixes are skipped, and a block missing its answer or explanation is
//! still emitted as long as its question text is non-empty.

use crate::schema::{QuestionRecord, QuestionType, RawCompletion};
use log::{debug, info, warn};

const QUESTION_PREFIX: &str = "Question ";
const ANSWER_PREFIX: &str = "Answer:";
const EXPLANATION_PREFIX: &str = "Explanation:";
pub const OPTION_LABELS: [&str; 5] = ["A)", "B)", "C)", "D)", "E)"];

/// Receives parser events. Attach one to trace how a completion was read;
/// parsing itself never produces output.
pub trait ParseObserver: Send + Sync {
    fn on_question(&self, _question: &str) {}
    fn on_option(&self, _option: &str) {}
    fn on_answer(&self, _answer: &str) {}
    fn on_explanation(&self, _explanation: &str) {}
    fn on_finished(&self, _found: usize, _kept: usize, _raw: &RawCompletion) {}
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl ParseObserver for NoopObserver {}

/// Forwards parser events to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl ParseObserver for LogObserver {
    fn on_question(&self, question: &str) {
        debug!("Found question: {}", question);
    }

    fn on_option(&self, option: &str) {
        debug!("Added option: {}", option);
    }

    fn on_answer(&self, answer: &str) {
        debug!("Found answer: {}", answer);
    }

    fn on_explanation(&self, explanation: &str) {
        debug!("Found explanation: {}", explanation);
    }

    fn on_finished(&self, found: usize, kept: usize, raw: &RawCompletion) {
        if found == 0 {
            warn!("Parser found no questions. Raw completion: {}", raw.text);
        } else {
            info!("Parser found {} questions, keeping {}", found, kept);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParserState {
    NoCurrentQuestion,
    BuildingQuestion(QuestionRecord),
}

/// Two-state machine over trimmed lines. Feed lines, then call [`QuestionParser::finish`].
pub struct QuestionParser<'a> {
    question_type: QuestionType,
    state: ParserState,
    emitted: Vec<QuestionRecord>,
    observer: &'a dyn ParseObserver,
}

impl<'a> QuestionParser<'a> {
    pub fn new(question_type: QuestionType, observer: &'a dyn ParseObserver) -> Self {
        Self {
            question_type,
            state: ParserState::NoCurrentQuestion,
            emitted: Vec::new(),
            observer,
        }
    }

    pub fn state(&self) -> &ParserState {
        &self.state
    }

    pub fn emitted(&self) -> &[QuestionRecord] {
        &self.emitted
    }

    pub fn feed_line(&mut self, line: &str) {
        let line = line.trim();

        if let Some(question) = question_text(line) {
            self.flush();
            self.observer.on_question(question);
            self.state = ParserState::BuildingQuestion(QuestionRecord::new(question));
            return;
        }

        let ParserState::BuildingQuestion(current) = &mut self.state else {
            return;
        };

        if self.question_type == QuestionType::Mcq && is_option_line(line) {
            self.observer.on_option(line);
            current.options.push(line.to_string());
        } else if let Some(answer) = line.strip_prefix(ANSWER_PREFIX) {
            current.answer = answer.trim().to_string();
            self.observer.on_answer(&current.answer);
        } else if let Some(explanation) = line.strip_prefix(EXPLANATION_PREFIX) {
            current.explanation = explanation.trim().to_string();
            self.observer.on_explanation(&current.explanation);
        }
    }

    /// Emits the in-progress record, if any, and returns at most `expected_count` records.
    pub fn finish(mut self, expected_count: usize, raw: &RawCompletion) -> Vec<QuestionRecord> {
        self.flush();
        let found = self.emitted.len();
        self.emitted.truncate(expected_count);
        self.observer.on_finished(found, self.emitted.len(), raw);
        self.emitted
    }

    fn flush(&mut self) {
        let state = std::mem::replace(&mut self.state, ParserState::NoCurrentQuestion);
        if let ParserState::BuildingQuestion(record) = state {
            if !record.question.is_empty() {
                self.emitted.push(record);
            }
        }
    }
}

fn question_text(line: &str) -> Option<&str> {
    if !line.starts_with(QUESTION_PREFIX) {
        return None;
    }
    line.split_once(':').map(|(_, rest)| rest.trim())
}

fn is_option_line(line: &str) -> bool {
    OPTION_LABELS.iter().any(|label| line.starts_with(label))
}

pub fn parse(
    raw: &RawCompletion,
    expected_count: usize,
    question_type: QuestionType,
) -> Vec<QuestionRecord> {
    parse_with_observer(raw, expected_count, question_type, &NoopObserver)
}

pub fn parse_with_observer(
    raw: &RawCompletion,
    expected_count: usize,
    question_type: QuestionType,
    observer: &dyn ParseObserver,
) -> Vec<QuestionRecord> {
    let mut parser = QuestionParser::new(question_type, observer);
    for line in raw.text.lines() {
        parser.feed_line(line);
    }
    parser.finish(expected_count, raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    const GRAVITY: &str = "Question 1: What is gravity?\nA) A force\nB) A color\nC) A sound\nD) A smell\nAnswer: A\nExplanation: It attracts masses.";

    fn three_blocks() -> RawCompletion {
        RawCompletion::new(
            "Question 1: First?\nA) one\nB) two\nC) three\nD) four\nAnswer: A\nExplanation: e1\n\
             \n\
             Question 2: Second?\nA) one\nB) two\nC) three\nD) four\nAnswer: B\nExplanation: e2\n\
             \n\
             Question 3: Third?\nA) one\nB) two\nC) three\nD) four\nAnswer: C\nExplanation: e3",
        )
    }

    #[test]
    fn test_single_well_formed_block() {
        let records = parse(&RawCompletion::new(GRAVITY), 5, QuestionType::Mcq);

        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.question, "What is gravity?");
        assert_eq!(
            record.options,
            vec!["A) A force", "B) A color", "C) A sound", "D) A smell"]
        );
        assert_eq!(record.answer, "A");
        assert_eq!(record.explanation, "It attracts masses.");
    }

    #[test]
    fn test_truncates_to_expected_count_in_source_order() {
        let records = parse(&three_blocks(), 2, QuestionType::Mcq);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].question, "First?");
        assert_eq!(records[1].question, "Second?");
    }

    #[test]
    fn test_never_exceeds_expected_count() {
        let raw = three_blocks();
        for n in 0..6 {
            let records = parse(&raw, n, QuestionType::Mcq);
            assert_eq!(records.len(), n.min(3));
        }
    }

    #[test]
    fn test_fewer_than_requested_is_not_padded() {
        let records = parse(&RawCompletion::new(GRAVITY), 10, QuestionType::Mcq);
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_missing_answer_still_emits_record() {
        let raw = RawCompletion::new(
            "Question 1: What is inertia?\nA) Resistance to change\nB) A color\nExplanation: Newton's first law.",
        );
        let records = parse(&raw, 5, QuestionType::Mcq);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].question, "What is inertia?");
        assert_eq!(records[0].answer, "");
        assert_eq!(records[0].explanation, "Newton's first law.");
    }

    #[test]
    fn test_empty_question_text_is_dropped() {
        let raw = RawCompletion::new(
            "Question 1:\nA) orphan\nAnswer: A\nQuestion 2: Kept?\nAnswer: B",
        );
        let records = parse(&raw, 5, QuestionType::Mcq);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].question, "Kept?");
        assert!(records[0].options.is_empty());
    }

    #[test]
    fn test_interleaved_prose_is_ignored() {
        let raw = RawCompletion::new(
            "Here are your questions!\n\n\
             Question 1: What is a cell?\n\
             Think about biology.\n\
             A) Basic unit of life\n\
             B) A battery\n\
             Good luck!\n\
             Answer: A\n\
             Explanation: Cells are the building blocks of organisms.\n\
             Hope this helps.",
        );
        let records = parse(&raw, 5, QuestionType::Mcq);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].options, vec!["A) Basic unit of life", "B) A battery"]);
        assert_eq!(records[0].answer, "A");
    }

    #[test]
    fn test_lines_before_first_question_do_not_start_a_record() {
        let raw = RawCompletion::new("A) stray\nAnswer: B\nExplanation: stray");
        assert!(parse(&raw, 5, QuestionType::Mcq).is_empty());
    }

    #[test]
    fn test_options_keep_source_order_and_duplicates() {
        let raw = RawCompletion::new(
            "Question 1: Pick one\nD) last\nA) first\nA) first\nE) extra\nAnswer: D",
        );
        let records = parse(&raw, 1, QuestionType::Mcq);

        assert_eq!(
            records[0].options,
            vec!["D) last", "A) first", "A) first", "E) extra"]
        );
    }

    #[test]
    fn test_whitespace_and_crlf_are_trimmed() {
        let raw = RawCompletion::new(
            "  Question 1:   What is heat?  \r\n   A) Energy\r\n\tAnswer:   A  \r\nExplanation:  Thermal energy.\r\n",
        );
        let records = parse(&raw, 5, QuestionType::Mcq);

        assert_eq!(records[0].question, "What is heat?");
        assert_eq!(records[0].options, vec!["A) Energy"]);
        assert_eq!(records[0].answer, "A");
        assert_eq!(records[0].explanation, "Thermal energy.");
    }

    #[test]
    fn test_question_text_after_first_colon_only() {
        let raw = RawCompletion::new("Question 1: Ratio 1:2 means what?\nAnswer: Half");
        let records = parse(&raw, 5, QuestionType::Subjective);
        assert_eq!(records[0].question, "Ratio 1:2 means what?");
    }

    #[test]
    fn test_question_prefix_without_colon_is_ignored() {
        let raw = RawCompletion::new("Question 1 What is missing\nAnswer: x");
        assert!(parse(&raw, 5, QuestionType::Subjective).is_empty());
    }

    #[test]
    fn test_subjective_mode_ignores_option_lines() {
        let raw = RawCompletion::new(
            "Question 1: Explain evaporation.\nA) not an option here\nAnswer: Liquid turns to vapour.\nExplanation: Driven by heat.\n\
             Question 2: Explain condensation.\nAnswer: Vapour turns to liquid.",
        );
        let records = parse(&raw, 5, QuestionType::Subjective);

        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.options.is_empty()));
        assert_eq!(records[0].answer, "Liquid turns to vapour.");
        assert_eq!(records[1].explanation, "");
    }

    #[test]
    fn test_parse_is_deterministic() {
        let raw = three_blocks();
        assert_eq!(
            parse(&raw, 3, QuestionType::Mcq),
            parse(&raw, 3, QuestionType::Mcq)
        );
    }

    #[test]
    fn test_state_machine_transitions() {
        let mut parser = QuestionParser::new(QuestionType::Mcq, &NoopObserver);
        assert_eq!(parser.state(), &ParserState::NoCurrentQuestion);

        parser.feed_line("Answer: ignored");
        assert_eq!(parser.state(), &ParserState::NoCurrentQuestion);

        parser.feed_line("Question 1: First?");
        assert!(matches!(parser.state(), ParserState::BuildingQuestion(r) if r.question == "First?"));
        assert!(parser.emitted().is_empty());

        parser.feed_line("Question 2: Second?");
        assert_eq!(parser.emitted().len(), 1);

        let raw = RawCompletion::new("");
        let records = parser.finish(5, &raw);
        assert_eq!(records.len(), 2);
    }

    #[derive(Default)]
    struct Recording {
        events: Mutex<Vec<String>>,
    }

    impl ParseObserver for Recording {
        fn on_question(&self, question: &str) {
            self.events.lock().unwrap().push(format!("q:{}", question));
        }

        fn on_option(&self, option: &str) {
            self.events.lock().unwrap().push(format!("o:{}", option));
        }

        fn on_finished(&self, found: usize, kept: usize, _raw: &RawCompletion) {
            self.events
                .lock()
                .unwrap()
                .push(format!("done:{}/{}", kept, found));
        }
    }

    #[test]
    fn test_observer_sees_events_without_changing_output() {
        let observer = Recording::default();
        let raw = three_blocks();

        let observed = parse_with_observer(&raw, 1, QuestionType::Mcq, &observer);
        assert_eq!(observed, parse(&raw, 1, QuestionType::Mcq));

        let events = observer.events.lock().unwrap();
        assert_eq!(events[0], "q:First?");
        assert_eq!(events[1], "o:A) one");
        assert_eq!(events.last().unwrap(), "done:1/3");
    }
}
