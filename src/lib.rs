pub mod engine;
pub mod loader;
pub mod model;
pub mod store;

pub use engine::agent::EmailAgent;
pub use engine::error::EngineError;
pub use engine::llm_client::{OllamaClient, TextGenerator};
pub use model::email::{EmailMessage, EmailThread};
pub use model::grading::{EvaluationAndReply, GradingResult, ModelInfo, RubricScoreResult};
pub use model::grading_record::GradingRecord;
pub use model::rubric::{global_rubric, RubricDefinition, RubricItem};
pub use model::scenario::{CohortProfile, Scenario};
