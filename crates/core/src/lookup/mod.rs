pub mod orchestrator;
pub mod state;

pub use orchestrator::{FetchOrchestrator, Session, SubmitOutcome};
pub use state::{Failure, RequestState, Stage};
