//! Turning question records into a positional `createItem` batch.

use crate::error::QuestionError;
use crate::question::QuestionRecord;

use super::request::{
    BatchUpdateRequest, ChoiceOption, ChoiceQuestion, ChoiceType, CorrectAnswer, CorrectAnswers,
    CreateItemRequest, Grading, Item, Location, Question, QuestionItem, Request,
};

/// A record excluded from the batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedQuestion {
    /// Position in the input list.
    pub position: usize,
    /// The question text, for reporting.
    pub text: String,
    /// Why it was excluded.
    pub reason: QuestionError,
}

/// Validated questions ready for submission.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QuestionBatch {
    requests: Vec<Request>,
    rejected: Vec<RejectedQuestion>,
}

impl QuestionBatch {
    /// Validates `questions` and builds one insertion request per valid record.
    ///
    /// Insertion indices count only accepted records, so they run
    /// `0..n` in input order whatever was rejected in between.
    #[must_use]
    pub fn build(questions: &[QuestionRecord]) -> Self {
        let mut batch = Self::default();

        for (position, record) in questions.iter().enumerate() {
            match record.validate() {
                Ok(()) => {
                    let index = batch.requests.len();
                    batch.requests.push(create_item(record, index));
                }
                Err(reason) => batch.rejected.push(RejectedQuestion {
                    position,
                    text: record.text.clone(),
                    reason,
                }),
            }
        }

        batch
    }

    /// Number of accepted questions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.requests.len()
    }

    /// Returns true if no question survived validation.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    /// The excluded records.
    #[must_use]
    pub fn rejected(&self) -> &[RejectedQuestion] {
        &self.rejected
    }

    /// The insertion requests.
    #[must_use]
    pub fn requests(&self) -> &[Request] {
        &self.requests
    }

    /// Splits into the request body and the rejections.
    #[must_use]
    pub fn into_parts(self) -> (BatchUpdateRequest, Vec<RejectedQuestion>) {
        (
            BatchUpdateRequest {
                requests: self.requests,
            },
            self.rejected,
        )
    }
}

/// Builds the `createItem` request for a record that passed validation.
fn create_item(record: &QuestionRecord, index: usize) -> Request {
    let answer = record.correct_answer().unwrap_or_default().to_string();

    Request::CreateItem(CreateItemRequest {
        item: Item {
            title: record.text.clone(),
            question_item: QuestionItem {
                question: Question {
                    required: true,
                    choice_question: ChoiceQuestion {
                        kind: ChoiceType::Radio,
                        options: record
                            .options
                            .iter()
                            .map(|value| ChoiceOption {
                                value: value.clone(),
                            })
                            .collect(),
                        shuffle: true,
                    },
                    grading: Grading {
                        point_value: record.points,
                        correct_answers: CorrectAnswers {
                            answers: vec![CorrectAnswer { value: answer }],
                        },
                    },
                },
            },
        },
        location: Location { index },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn indices(batch: &QuestionBatch) -> Vec<usize> {
        batch
            .requests()
            .iter()
            .filter_map(|r| match r {
                Request::CreateItem(c) => Some(c.location.index),
                Request::UpdateSettings(_) => None,
            })
            .collect()
    }

    #[test]
    fn test_indices_follow_input_order_across_rejections() {
        let questions = vec![
            QuestionRecord::new("first", ["a", "b"], 0, 1),
            QuestionRecord::new("broken", ["a", "b"], 7, 1),
            QuestionRecord::new("second", ["a", "b"], 1, 2),
            QuestionRecord::new("third", ["a", "b", "c"], 2, 3),
        ];

        let batch = QuestionBatch::build(&questions);

        assert_eq!(batch.len(), 3);
        assert_eq!(indices(&batch), vec![0, 1, 2]);
        assert_eq!(batch.rejected().len(), 1);
        assert_eq!(batch.rejected()[0].position, 1);
        assert_eq!(
            batch.rejected()[0].reason,
            QuestionError::CorrectIndexOutOfRange { index: 7, len: 2 }
        );
    }

    #[test]
    fn test_all_invalid_gives_empty_batch() {
        let questions = vec![QuestionRecord::new(
            "Capital of France?",
            ["Rome", "Paris", "Berlin", "Madrid"],
            5,
            10,
        )];

        let batch = QuestionBatch::build(&questions);
        assert!(batch.is_empty());
        assert_eq!(batch.rejected().len(), 1);
    }

    #[test]
    fn test_create_item_wire_format() {
        let questions = vec![QuestionRecord::new(
            "Capital of France?",
            ["Rome", "Paris", "Berlin", "Madrid"],
            1,
            10,
        )];

        let (body, rejected) = QuestionBatch::build(&questions).into_parts();
        assert!(rejected.is_empty());

        let value = serde_json::to_value(&body).unwrap_or_default();
        assert_eq!(
            value,
            json!({
                "requests": [{
                    "createItem": {
                        "item": {
                            "title": "Capital of France?",
                            "questionItem": {
                                "question": {
                                    "required": true,
                                    "choiceQuestion": {
                                        "type": "RADIO",
                                        "options": [
                                            {"value": "Rome"},
                                            {"value": "Paris"},
                                            {"value": "Berlin"},
                                            {"value": "Madrid"}
                                        ],
                                        "shuffle": true
                                    },
                                    "grading": {
                                        "pointValue": 10,
                                        "correctAnswers": {"answers": [{"value": "Paris"}]}
                                    }
                                }
                            }
                        },
                        "location": {"index": 0}
                    }
                }]
            })
        );
    }
}
