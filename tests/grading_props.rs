use proptest::prelude::*;
use serde_json::json;

use mailcoach::engine::grading_parser::parse_grading;
use mailcoach::model::grading::{GradingResult, ModelInfo, RubricScoreResult};
use mailcoach::model::grading_record::GradingRecord;

fn model_info() -> ModelInfo {
    ModelInfo {
        model_name: "llama3".to_string(),
        temperature: 0.2,
    }
}

proptest! {
    // Whatever mix of scores the model hands back, the totals must be the
    // plain sums over the entries.
    #[test]
    fn parsed_totals_match_entry_sums(
        entries in prop::collection::vec(
            ("[A-Za-z][A-Za-z ]{0,11}", 0i64..=5, 1i64..=5),
            1..=10,
        )
    ) {
        let scores: Vec<_> = entries
            .iter()
            .map(|(name, score, max_score)| {
                json!({"name": name, "score": score, "max_score": max_score})
            })
            .collect();
        let raw = json!({"scores": scores}).to_string();

        let result = parse_grading(&raw, "prop", model_info()).unwrap();

        let expected_total: i64 = entries.iter().map(|(_, s, _)| *s).sum();
        let expected_max: i64 = entries.iter().map(|(_, _, m)| *m).sum();
        prop_assert_eq!(result.total_score, expected_total);
        prop_assert_eq!(result.max_total_score, expected_max);
        prop_assert_eq!(result.scores.len(), entries.len());
    }

    // Storing a grading and reading it back must not lose anything.
    #[test]
    fn storage_round_trip_is_identity(
        scenario_name in "[a-z_]{1,16}",
        entries in prop::collection::vec(
            ("[A-Za-z][A-Za-z ]{0,11}", 0i64..=5, 1i64..=5),
            1..=10,
        ),
        overall_comment in "[A-Za-z][A-Za-z .,]{0,30}[A-Za-z.]",
        revision_example in "[A-Za-z][A-Za-z .,]{0,30}[A-Za-z.]",
    ) {
        let scores: Vec<_> = entries
            .into_iter()
            .map(|(name, score, max_score)| RubricScoreResult { name, score, max_score })
            .collect();
        let grading = GradingResult {
            scenario_name,
            total_score: scores.iter().map(|s| s.score).sum(),
            max_total_score: scores.iter().map(|s| s.max_score).sum(),
            scores,
            overall_comment,
            revision_example,
            model_info: model_info(),
            raw_json: json!({"note": "raw output"}),
        };

        let record = GradingRecord::from_result(&grading);
        let encoded = serde_json::to_string(&record).unwrap();
        let decoded: GradingRecord = serde_json::from_str(&encoded).unwrap();
        prop_assert_eq!(decoded.into_result(), grading);
    }
}
