use serde_json::Value;

use crate::engine::error::EngineError;
use crate::model::grading::{GradingResult, ModelInfo, RubricScoreResult};

const DEFAULT_MAX_SCORE: i64 = 5;

/// Decode the raw grading completion into a [`GradingResult`].
///
/// The trimmed text must be a single JSON object. Each `scores` entry needs
/// a `name` and an integer-coercible `score`; `max_score` defaults to 5.
/// Anything else is a [`EngineError::GradingFormat`]; a bad grading must
/// surface, never turn into an empty zero-score result.
pub fn parse_grading(
    raw: &str,
    scenario_name: &str,
    model_info: ModelInfo,
) -> Result<GradingResult, EngineError> {
    let trimmed = raw.trim();
    let data: Value = serde_json::from_str(trimmed)
        .map_err(|e| EngineError::GradingFormat(format!("invalid JSON: {}", e)))?;

    if !data.is_object() {
        return Err(EngineError::GradingFormat(
            "top-level value is not a JSON object".to_string(),
        ));
    }

    let mut scores = Vec::new();
    let mut total_score = 0;
    let mut max_total_score = 0;

    if let Some(entries) = data.get("scores") {
        let entries = entries.as_array().ok_or_else(|| {
            EngineError::GradingFormat("'scores' is not an array".to_string())
        })?;

        for (idx, entry) in entries.iter().enumerate() {
            let name = entry
                .get("name")
                .and_then(Value::as_str)
                .ok_or_else(|| {
                    EngineError::GradingFormat(format!("scores[{}] is missing 'name'", idx))
                })?;
            let score = coerce_int(entry.get("score")).ok_or_else(|| {
                EngineError::GradingFormat(format!(
                    "scores[{}] has no integer-coercible 'score'",
                    idx
                ))
            })?;
            let max_score = match entry.get("max_score") {
                None | Some(Value::Null) => DEFAULT_MAX_SCORE,
                some => coerce_int(some).ok_or_else(|| {
                    EngineError::GradingFormat(format!(
                        "scores[{}] has no integer-coercible 'max_score'",
                        idx
                    ))
                })?,
            };

            total_score += score;
            max_total_score += max_score;
            scores.push(RubricScoreResult {
                name: name.to_string(),
                score,
                max_score,
            });
        }
    }

    // All-zero max_score fallback; a no-op while the default stays at 5.
    if max_total_score == 0 && !scores.is_empty() {
        max_total_score = scores.iter().map(|s| s.max_score).sum();
    }

    Ok(GradingResult {
        scenario_name: scenario_name.to_string(),
        scores,
        total_score,
        max_total_score,
        overall_comment: trimmed_string_field(&data, "overall_comment"),
        revision_example: trimmed_string_field(&data, "revision_example"),
        model_info,
        raw_json: data,
    })
}

/// Accepts JSON integers, fractionless floats, and numeric strings.
fn coerce_int(value: Option<&Value>) -> Option<i64> {
    match value? {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

fn trimmed_string_field(data: &Value, key: &str) -> String {
    data.get(key)
        .and_then(Value::as_str)
        .unwrap_or("")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info() -> ModelInfo {
        ModelInfo {
            model_name: "llama3".to_string(),
            temperature: 0.2,
        }
    }

    #[test]
    fn parses_single_score_with_totals() {
        let raw = r#"{"scores":[{"name":"Tone","score":4,"max_score":5}],"overall_comment":"Good","revision_example":"..."}"#;
        let result = parse_grading(raw, "missed_standup", info()).unwrap();

        assert_eq!(result.total_score, 4);
        assert_eq!(result.max_total_score, 5);
        assert_eq!(
            result.scores,
            vec![RubricScoreResult {
                name: "Tone".to_string(),
                score: 4,
                max_score: 5,
            }]
        );
        assert_eq!(result.overall_comment, "Good");
        assert_eq!(result.revision_example, "...");
        assert_eq!(result.scenario_name, "missed_standup");
    }

    #[test]
    fn surrounding_whitespace_is_tolerated() {
        let raw = "\n  {\"scores\":[{\"name\":\"Tone\",\"score\":3}]}  \n";
        let result = parse_grading(raw, "s", info()).unwrap();
        assert_eq!(result.total_score, 3);
        assert_eq!(result.scores[0].max_score, 5);
    }

    #[test]
    fn not_json_is_a_format_error() {
        let err = parse_grading("not json", "s", info()).unwrap_err();
        assert!(matches!(err, EngineError::GradingFormat(_)));
    }

    #[test]
    fn non_object_json_is_a_format_error() {
        let err = parse_grading("[1, 2, 3]", "s", info()).unwrap_err();
        assert!(matches!(err, EngineError::GradingFormat(_)));
    }

    #[test]
    fn entry_without_name_is_a_format_error() {
        let raw = r#"{"scores":[{"score":4}]}"#;
        let err = parse_grading(raw, "s", info()).unwrap_err();
        match err {
            EngineError::GradingFormat(reason) => assert!(reason.contains("missing 'name'")),
            other => panic!("expected GradingFormat, got {other:?}"),
        }
    }

    #[test]
    fn non_coercible_score_is_a_format_error() {
        let raw = r#"{"scores":[{"name":"Tone","score":"four"}]}"#;
        let err = parse_grading(raw, "s", info()).unwrap_err();
        assert!(matches!(err, EngineError::GradingFormat(_)));
    }

    #[test]
    fn scores_accept_numeric_strings_and_whole_floats() {
        let raw = r#"{"scores":[
            {"name":"Tone","score":"4"},
            {"name":"Clarity","score":3.0,"max_score":"5"}
        ]}"#;
        let result = parse_grading(raw, "s", info()).unwrap();
        assert_eq!(result.total_score, 7);
        assert_eq!(result.max_total_score, 10);
    }

    #[test]
    fn fractional_score_is_rejected() {
        let raw = r#"{"scores":[{"name":"Tone","score":3.5}]}"#;
        assert!(parse_grading(raw, "s", info()).is_err());
    }

    #[test]
    fn missing_comment_fields_default_to_empty() {
        let raw = r#"{"scores":[{"name":"Tone","score":4}]}"#;
        let result = parse_grading(raw, "s", info()).unwrap();
        assert_eq!(result.overall_comment, "");
        assert_eq!(result.revision_example, "");
    }

    #[test]
    fn comment_fields_are_trimmed() {
        let raw = r#"{"scores":[],"overall_comment":"  nice  ","revision_example":" x "}"#;
        let result = parse_grading(raw, "s", info()).unwrap();
        assert_eq!(result.overall_comment, "nice");
        assert_eq!(result.revision_example, "x");
    }

    #[test]
    fn explicit_zero_max_scores_fall_back_to_entry_sum() {
        let raw = r#"{"scores":[{"name":"Tone","score":2,"max_score":0}]}"#;
        let result = parse_grading(raw, "s", info()).unwrap();
        // Both the running sum and the fallback see the same entries, so the
        // recomputation keeps the zero.
        assert_eq!(result.max_total_score, 0);
        assert_eq!(result.total_score, 2);
    }

    #[test]
    fn raw_json_retains_the_parsed_object() {
        let raw = r#"{"scores":[{"name":"Tone","score":4}],"extra":"kept"}"#;
        let result = parse_grading(raw, "s", info()).unwrap();
        assert_eq!(result.raw_json["extra"], "kept");
    }
}
