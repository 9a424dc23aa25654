mod batch;
mod ids;
mod nickname;
mod question;
mod report;
mod tier;

pub use batch::{BatchError, BatchKind, QuestionBatch};
pub use ids::{AttemptId, OptionId, QuestionId};
pub use nickname::Nickname;
pub use question::{
    BinaryQuestion, ChoiceQuestion, PassageQuestion, Question, QuestionError, QuestionOption,
    Selection,
};
pub use report::{AssessmentReport, ReportError};
pub use tier::Tier;
