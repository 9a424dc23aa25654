#![forbid(unsafe_code)]

pub mod http;
pub mod repository;

pub use http::{ApiConfig, HttpApi};
pub use repository::{QuestionSource, RecordingSink, RemoteError, ResultSink, StaticQuestionSource};
