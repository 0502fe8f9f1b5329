//! Question records as authored by the user.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{QuestionError, QuestionResult};

/// One multiple-choice question with its grading data.
///
/// Integers are signed so that malformed input survives parsing and is
/// rejected by [`QuestionRecord::validate`] instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionRecord {
    /// Question text shown to the respondent.
    pub text: String,
    /// Choices in authoring order.
    pub options: Vec<String>,
    /// Zero-based index of the correct choice.
    pub correct_index: i64,
    /// Points awarded for a correct answer.
    pub points: i64,
}

impl QuestionRecord {
    /// Creates a question record.
    #[must_use]
    pub fn new<I, S>(text: impl Into<String>, options: I, correct_index: i64, points: i64) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            text: text.into(),
            options: options.into_iter().map(Into::into).collect(),
            correct_index,
            points,
        }
    }

    /// Checks the record's shape.
    ///
    /// # Errors
    ///
    /// Returns the first rule the record breaks.
    pub fn validate(&self) -> QuestionResult<()> {
        if self.text.trim().is_empty() {
            return Err(QuestionError::BlankText);
        }

        if self.options.len() < 2 {
            return Err(QuestionError::TooFewOptions {
                count: self.options.len(),
            });
        }

        let mut seen = HashSet::with_capacity(self.options.len());
        for (index, option) in self.options.iter().enumerate() {
            if option.trim().is_empty() {
                return Err(QuestionError::BlankOption { index });
            }
            if !seen.insert(option.as_str()) {
                return Err(QuestionError::DuplicateOption {
                    value: option.clone(),
                });
            }
        }

        if self.correct_answer().is_none() {
            return Err(QuestionError::CorrectIndexOutOfRange {
                index: self.correct_index,
                len: self.options.len(),
            });
        }

        if self.points <= 0 {
            return Err(QuestionError::NonPositivePoints {
                points: self.points,
            });
        }
        if self.points > i64::from(i32::MAX) {
            return Err(QuestionError::PointsOutOfRange {
                points: self.points,
            });
        }

        Ok(())
    }

    /// The value of the correct option, if the index is in range.
    #[must_use]
    pub fn correct_answer(&self) -> Option<&str> {
        usize::try_from(self.correct_index)
            .ok()
            .and_then(|index| self.options.get(index))
            .map(String::as_str)
    }
}

/// Built-in general knowledge quiz.
#[must_use]
pub fn sample_questions() -> Vec<QuestionRecord> {
    vec![
        QuestionRecord::new(
            "What is the capital of France?",
            ["Rome", "Paris", "Berlin", "Madrid"],
            1,
            10,
        ),
        QuestionRecord::new(
            "Which planet is known as the Red Planet?",
            ["Earth", "Mars", "Jupiter", "Venus"],
            1,
            15,
        ),
        QuestionRecord::new("What is 2 + 2?", ["3", "4", "5", "6"], 1, 5),
        QuestionRecord::new(
            "Who wrote 'Hamlet'?",
            [
                "Charles Dickens",
                "William Shakespeare",
                "Leo Tolstoy",
                "Mark Twain",
            ],
            1,
            20,
        ),
    ]
}
