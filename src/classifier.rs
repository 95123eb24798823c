use crate::schema::{RawCompletion, RefusalResult};

/// Refusal sentences the system instructions ask the model to echo verbatim.
/// Checked in order by substring containment; the first match wins.
pub const REFUSAL_SENTINELS: [&str; 3] = [
    "I can only help with study-related questions.",
    "I cannot reply with that. Please provide study-related topic",
    "I can help with study-related questions. Please enter a topic or academic text.",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    Refusal(RefusalResult),
    ContinueParsing,
}

impl Classification {
    pub fn is_refusal(&self) -> bool {
        matches!(self, Classification::Refusal(_))
    }
}

pub fn classify(raw: &RawCompletion) -> Classification {
    REFUSAL_SENTINELS
        .iter()
        .find(|sentinel| raw.text.contains(*sentinel))
        .map(|sentinel| {
            Classification::Refusal(RefusalResult {
                text: raw.text.clone(),
                sentinel: (*sentinel).to_string(),
            })
        })
        .unwrap_or(Classification::ContinueParsing)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_sentinel_is_refusal() {
        let raw = RawCompletion::new("I can only help with study-related questions.");
        match classify(&raw) {
            Classification::Refusal(refusal) => {
                assert_eq!(refusal.text, "I can only help with study-related questions.");
                assert_eq!(refusal.sentinel, REFUSAL_SENTINELS[0]);
            }
            other => panic!("expected refusal, got {:?}", other),
        }
    }

    #[test]
    fn test_refusal_keeps_full_text() {
        let raw = RawCompletion::new(
            "Sorry!\nI cannot reply with that. Please provide study-related topic\nThanks.",
        );
        let Classification::Refusal(refusal) = classify(&raw) else {
            panic!("expected refusal");
        };
        assert_eq!(refusal.text, raw.text);
        assert_eq!(refusal.sentinel, REFUSAL_SENTINELS[1]);
    }

    #[test]
    fn test_refusal_inside_question_blocks_still_wins() {
        let raw = RawCompletion::new(
            "Question 1: What is gravity?\nA) A force\nB) A color\nAnswer: A\n\
             I can help with study-related questions. Please enter a topic or academic text.\n\
             Question 2: What is mass?\nAnswer: Matter",
        );
        assert!(classify(&raw).is_refusal());
    }

    #[test]
    fn test_first_sentinel_in_list_order_wins() {
        let raw = RawCompletion::new(format!(
            "{} {}",
            REFUSAL_SENTINELS[2], REFUSAL_SENTINELS[0]
        ));
        let Classification::Refusal(refusal) = classify(&raw) else {
            panic!("expected refusal");
        };
        assert_eq!(refusal.sentinel, REFUSAL_SENTINELS[0]);
    }

    #[test]
    fn test_ordinary_text_continues() {
        let raw = RawCompletion::new("Question 1: What is gravity?\nAnswer: A");
        assert_eq!(classify(&raw), Classification::ContinueParsing);
        assert_eq!(
            classify(&RawCompletion::new("")),
            Classification::ContinueParsing
        );
    }
}
