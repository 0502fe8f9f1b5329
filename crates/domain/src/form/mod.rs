//! Form assembly types: wire bodies, question batches, outcomes.

mod batch;
mod request;
mod result;

pub use batch::{QuestionBatch, RejectedQuestion};
pub use request::{
    BatchUpdateRequest, ChoiceOption, ChoiceQuestion, ChoiceType, CorrectAnswer, CorrectAnswers,
    CreateItemRequest, CreatedForm, FormInfo, FormSettings, Grading, Item, Location, NewForm,
    QUIZ_SETTINGS_MASK, Question, QuestionItem, QuizSettings, Request, UpdateSettingsRequest,
};
pub use result::{AssemblyError, FormResult, FormStep};
