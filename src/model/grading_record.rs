use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::grading::{GradingResult, ModelInfo, RubricScoreResult};

pub const GRADING_RECORD_VERSION: u32 = 1;

fn empty_object() -> Value {
    Value::Object(serde_json::Map::new())
}

/// Versioned storage payload for one grading. This is the shape handed to
/// external storage; older payloads may omit the totals and the raw model
/// output, so those reconstruct with defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradingRecord {
    pub version: u32,
    pub scenario_name: String,
    pub rubric_scores: Vec<RubricScoreResult>,
    #[serde(default)]
    pub total_score: Option<i64>,
    #[serde(default)]
    pub max_total_score: Option<i64>,
    #[serde(default)]
    pub overall_comment: String,
    #[serde(default)]
    pub revision_example: String,
    #[serde(default)]
    pub model_info: Option<ModelInfo>,
    #[serde(default = "empty_object")]
    pub raw_llm_output: Value,
}

impl GradingRecord {
    pub fn from_result(grading: &GradingResult) -> Self {
        Self {
            version: GRADING_RECORD_VERSION,
            scenario_name: grading.scenario_name.clone(),
            rubric_scores: grading.scores.clone(),
            total_score: Some(grading.total_score),
            max_total_score: Some(grading.max_total_score),
            overall_comment: grading.overall_comment.clone(),
            revision_example: grading.revision_example.clone(),
            model_info: Some(grading.model_info.clone()),
            raw_llm_output: grading.raw_json.clone(),
        }
    }

    /// Rebuild a [`GradingResult`] from a stored payload. Missing totals
    /// are recomputed by summation over the stored scores.
    pub fn into_result(self) -> GradingResult {
        let total_score = self
            .total_score
            .unwrap_or_else(|| self.rubric_scores.iter().map(|s| s.score).sum());
        let max_total_score = self
            .max_total_score
            .unwrap_or_else(|| self.rubric_scores.iter().map(|s| s.max_score).sum());

        GradingResult {
            scenario_name: self.scenario_name,
            scores: self.rubric_scores,
            total_score,
            max_total_score,
            overall_comment: self.overall_comment.trim().to_string(),
            revision_example: self.revision_example.trim().to_string(),
            model_info: self.model_info.unwrap_or(ModelInfo {
                model_name: "unknown".to_string(),
                temperature: 0.0,
            }),
            raw_json: self.raw_llm_output,
        }
    }
}
