//! Defines the quiz record and its write-side counterpart.
//!
//! - `Quiz`: a stored question/answer pair with a store-assigned id.
//! - `NewQuiz`: the text a user entered for `add` or `edit`, validated before it reaches a store.

use chrono::{DateTime, Utc};

use crate::error::{AppError, Result};

/// A question/answer pair as held by a `QuizStore`.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Quiz {
    pub id: i64,
    pub question: String,
    pub answer: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Quiz {
    /// Judges a user's reply against the stored answer.
    ///
    /// Both sides are trimmed and compared case-insensitively, so `" Paris "` matches `"paris"`.
    pub fn is_correct(&self, reply: &str) -> bool {
        self.answer.trim().to_lowercase() == reply.trim().to_lowercase()
    }
}

/// Question and answer text for creating a quiz or replacing an existing one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQuiz {
    pub question: String,
    pub answer: String,
}

impl NewQuiz {
    /// Builds a candidate from raw user input, trimming both fields.
    pub fn new(question: impl AsRef<str>, answer: impl AsRef<str>) -> Self {
        Self {
            question: question.as_ref().trim().to_string(),
            answer: answer.as_ref().trim().to_string(),
        }
    }

    /// Checks every field and collects one message per violation.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` listing each empty field.
    pub fn validate(&self) -> Result<()> {
        let mut violations = Vec::new();
        if self.question.trim().is_empty() {
            violations.push("question must not be empty".to_string());
        }
        if self.answer.trim().is_empty() {
            violations.push("answer must not be empty".to_string());
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(violations))
        }
    }
}

/// Questions inserted into an empty store on first start.
pub const STARTER_QUIZZES: [(&str, &str); 4] = [
    ("Capital of Italy", "Rome"),
    ("Capital of France", "Paris"),
    ("Capital of Spain", "Madrid"),
    ("Capital of Portugal", "Lisbon"),
];

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn quiz(answer: &str) -> Quiz {
        Quiz {
            id: 1,
            question: "Capital of France".to_string(),
            answer: answer.to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[rstest]
    #[case("paris", " Paris ", true)]
    #[case("Paris", "PARIS", true)]
    #[case("  Rome", "rome\t", true)]
    #[case("paris", "Lyon", false)]
    #[case("paris", "", false)]
    fn test_is_correct_ignores_case_and_whitespace(
        #[case] stored: &str,
        #[case] reply: &str,
        #[case] expected: bool,
    ) {
        assert_eq!(quiz(stored).is_correct(reply), expected);
    }

    #[test]
    fn test_new_quiz_trims_input() {
        let q = NewQuiz::new("  Capital of Spain ", " Madrid\n");
        assert_eq!(q.question, "Capital of Spain");
        assert_eq!(q.answer, "Madrid");
        assert!(q.validate().is_ok());
    }

    #[test]
    fn test_validate_reports_each_empty_field() {
        match NewQuiz::new("   ", "").validate() {
            Err(AppError::Validation(msgs)) => {
                assert_eq!(msgs.len(), 2);
                assert!(msgs[0].contains("question"));
                assert!(msgs[1].contains("answer"));
            },
            other => panic!("Expected Validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_reports_single_field() {
        match NewQuiz::new("Capital of Italy", " ").validate() {
            Err(AppError::Validation(msgs)) => assert_eq!(msgs, vec!["answer must not be empty"]),
            other => panic!("Expected Validation error, got {:?}", other),
        }
    }
}
