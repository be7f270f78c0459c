use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Score awarded for one rubric dimension. The engine trusts the model to
/// stay inside `0..=max_score`; only integrality is enforced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RubricScoreResult {
    pub name: String,
    pub score: i64,
    pub max_score: i64,
}

/// Which backend binding produced a grading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelInfo {
    pub model_name: String,
    pub temperature: f32,
}

/// Fully parsed grading for one student email.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradingResult {
    pub scenario_name: String,
    pub scores: Vec<RubricScoreResult>,
    pub total_score: i64,
    pub max_total_score: i64,
    pub overall_comment: String,
    pub revision_example: String,
    pub model_info: ModelInfo,
    /// Original parsed model output, kept for audit and storage.
    pub raw_json: Value,
}

/// Result of one evaluate-and-respond cycle. Transient; the host decides
/// what to keep.
#[derive(Debug, Clone)]
pub struct EvaluationAndReply {
    pub grading: GradingResult,
    pub counterpart_reply: String,
}
