mod flow;
mod outcome;
mod progress;
mod runner;
mod workflow;

// Public API of the assessment subsystem.
pub use crate::error::AssessmentError;
pub use flow::{AssessmentFlow, BackAction, FlowEvent, Stage};
pub use outcome::AssessmentOutcome;
pub use progress::FlowProgress;
pub use runner::{Advance, BatchRunner};
pub use workflow::{AssessmentLoopService, AssessmentRun};
