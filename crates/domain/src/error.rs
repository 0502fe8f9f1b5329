//! Domain error types

use thiserror::Error;

/// Reasons a question record is rejected before submission.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QuestionError {
    /// The question text is empty or whitespace.
    #[error("question text is blank")]
    BlankText,

    /// Fewer than two options were given.
    #[error("expected at least 2 options, got {count}")]
    TooFewOptions {
        /// Number of options present.
        count: usize,
    },

    /// An option is empty or whitespace.
    #[error("option {index} is blank")]
    BlankOption {
        /// Position of the blank option.
        index: usize,
    },

    /// Two options share the same value.
    #[error("option '{value}' appears more than once")]
    DuplicateOption {
        /// The repeated value.
        value: String,
    },

    /// The correct answer index does not point into the options.
    #[error("correct index {index} is outside 0..{len}")]
    CorrectIndexOutOfRange {
        /// The index given.
        index: i64,
        /// Number of options.
        len: usize,
    },

    /// The point value is zero or negative.
    #[error("point value must be positive, got {points}")]
    NonPositivePoints {
        /// The value given.
        points: i64,
    },

    /// The point value does not fit the API's 32-bit field.
    #[error("point value {points} exceeds the maximum of {max}", max = i32::MAX)]
    PointsOutOfRange {
        /// The value given.
        points: i64,
    },
}

/// Result type alias for question validation.
pub type QuestionResult<T> = Result<T, QuestionError>;
