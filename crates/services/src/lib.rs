#![forbid(unsafe_code)]

pub mod assessment;
pub mod error;

pub use assess_core::Clock;

pub use error::AssessmentError;

pub use assessment::{
    Advance, AssessmentFlow, AssessmentLoopService, AssessmentOutcome, AssessmentRun, BackAction,
    BatchRunner, FlowEvent, FlowProgress, Stage,
};
