//! Google Forms v1 request and response bodies.
//!
//! Field names follow the REST API's camelCase JSON.

use serde::{Deserialize, Serialize};

/// Update mask covering the quiz settings.
pub const QUIZ_SETTINGS_MASK: &str = "quizSettings";

/// Body of `forms.create`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewForm {
    /// Title and document title.
    pub info: FormInfo,
}

impl NewForm {
    /// Creates a form body with the given titles.
    #[must_use]
    pub fn new(title: impl Into<String>, document_title: impl Into<String>) -> Self {
        Self {
            info: FormInfo {
                title: title.into(),
                document_title: document_title.into(),
            },
        }
    }
}

/// Form titles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormInfo {
    /// Title shown to respondents.
    pub title: String,
    /// Title of the document in Drive.
    #[serde(default)]
    pub document_title: String,
}

/// Response of `forms.create`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedForm {
    /// Identifier of the new form.
    pub form_id: String,
    /// Link respondents use to fill in the form.
    #[serde(default)]
    pub responder_uri: Option<String>,
    /// Revision the form was created at.
    #[serde(default)]
    pub revision_id: Option<String>,
}

/// Body of `forms.batchUpdate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchUpdateRequest {
    /// Requests applied atomically, in order.
    pub requests: Vec<Request>,
}

impl BatchUpdateRequest {
    /// A batch that turns the form into a quiz.
    #[must_use]
    pub fn enable_quiz() -> Self {
        Self {
            requests: vec![Request::UpdateSettings(UpdateSettingsRequest {
                settings: FormSettings {
                    quiz_settings: QuizSettings { is_quiz: true },
                },
                update_mask: QUIZ_SETTINGS_MASK.to_string(),
            })],
        }
    }

    /// Number of requests in the batch.
    #[must_use]
    pub fn len(&self) -> usize {
        self.requests.len()
    }

    /// Returns true if the batch holds no requests.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }
}

/// A single batch update operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Request {
    /// Insert an item at a position.
    CreateItem(CreateItemRequest),
    /// Change form settings.
    UpdateSettings(UpdateSettingsRequest),
}

/// `updateSettings` payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSettingsRequest {
    /// New settings.
    pub settings: FormSettings,
    /// Which settings fields to overwrite.
    pub update_mask: String,
}

/// Form-wide settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSettings {
    /// Quiz settings.
    pub quiz_settings: QuizSettings,
}

/// Quiz settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizSettings {
    /// Whether grading is enabled.
    pub is_quiz: bool,
}

/// `createItem` payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateItemRequest {
    /// The item to insert.
    pub item: Item,
    /// Where to insert it.
    pub location: Location,
}

/// Insertion point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Location {
    /// Zero-based position among the form's items.
    pub index: usize,
}

/// A form item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Item title (the question text).
    pub title: String,
    /// The question this item poses.
    pub question_item: QuestionItem,
}

/// Wrapper around a single question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionItem {
    /// The question.
    pub question: Question,
}

/// A graded choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    /// Whether an answer is mandatory.
    pub required: bool,
    /// The choices.
    pub choice_question: ChoiceQuestion,
    /// Points and answer key.
    pub grading: Grading,
}

/// Choice list configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChoiceQuestion {
    /// Presentation style.
    #[serde(rename = "type")]
    pub kind: ChoiceType,
    /// Choices in authoring order.
    pub options: Vec<ChoiceOption>,
    /// Whether the service shuffles choices per respondent.
    pub shuffle: bool,
}

/// Presentation style of a choice question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChoiceType {
    /// Radio buttons, one answer.
    #[default]
    Radio,
    /// Checkboxes, several answers.
    Checkbox,
    /// Drop-down menu.
    DropDown,
}

/// One choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChoiceOption {
    /// Choice text.
    pub value: String,
}

/// Grading data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Grading {
    /// Points for a correct answer.
    pub point_value: i64,
    /// Accepted answers.
    pub correct_answers: CorrectAnswers,
}

/// Answer key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CorrectAnswers {
    /// Accepted answers, matched by value.
    pub answers: Vec<CorrectAnswer>,
}

/// An accepted answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CorrectAnswer {
    /// The option value that is correct.
    pub value: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_new_form_body() {
        let body = serde_json::to_value(NewForm::new("Geography Quiz", "Geo")).unwrap_or_default();
        assert_eq!(
            body,
            json!({"info": {"title": "Geography Quiz", "documentTitle": "Geo"}})
        );
    }

    #[test]
    fn test_enable_quiz_body() {
        let body = serde_json::to_value(BatchUpdateRequest::enable_quiz()).unwrap_or_default();
        assert_eq!(
            body,
            json!({
                "requests": [{
                    "updateSettings": {
                        "settings": {"quizSettings": {"isQuiz": true}},
                        "updateMask": "quizSettings"
                    }
                }]
            })
        );
    }

    #[test]
    fn test_created_form_response() {
        let created: CreatedForm = serde_json::from_value(json!({
            "formId": "abc",
            "responderUri": "https://docs.google.com/forms/d/e/abc/viewform",
            "info": {"title": "T", "documentTitle": "T"}
        }))
        .unwrap_or_else(|e| unreachable!("response should parse: {e}"));

        assert_eq!(created.form_id, "abc");
        assert!(created.responder_uri.is_some());
        assert_eq!(created.revision_id, None);
    }
}
