//! 分块结果合并
//!
//! 各维度按分块权重加权平均；总分取合并后五个维度的平均值，
//! 不对各分块的总分再做加权

use serde_json::{json, Map};

use crate::models::rubric::round1;
use crate::models::{Dimension, RubricResult, ScoreSource};

/// 合并多个分块的评分结果
///
/// - 空列表：固定默认值（全部 5.0）
/// - 单个结果：原样返回
/// - 多个结果：按 `chunk_weight`（未设置时为 1）加权平均，保留一位小数
pub fn combine_chunk_results(mut results: Vec<RubricResult>) -> RubricResult {
    match results.len() {
        0 => return RubricResult::neutral_default(),
        1 => return results.remove(0),
        _ => {}
    }

    let mut total_weight: f64 = results.iter().map(RubricResult::weight).sum();
    let uniform = !(total_weight.is_finite() && total_weight > 0.0);
    if uniform {
        total_weight = results.len() as f64;
    }
    let weight_of = |r: &RubricResult| if uniform { 1.0 } else { r.weight() };

    let mut combined = RubricResult {
        feedback: combined_feedback(&results),
        detailed_scores: combined_details(),
        source: ScoreSource::Combined,
        ..RubricResult::neutral_default()
    };

    let mut raw_sum = 0.0;
    for dimension in Dimension::ALL {
        let weighted: f64 = results
            .iter()
            .map(|r| r.score(dimension) * weight_of(r))
            .sum::<f64>()
            / total_weight;
        raw_sum += weighted;
        combined.set_score(dimension, round1(weighted));
    }
    combined.overall_score = round1(raw_sum / Dimension::ALL.len() as f64);

    combined
}

fn combined_feedback(results: &[RubricResult]) -> String {
    let entries: Vec<String> = results
        .iter()
        .filter(|r| !r.feedback.is_empty())
        .map(|r| {
            let id = r
                .chunk_id
                .map(|id| id.to_string())
                .unwrap_or_else(|| "?".to_string());
            format!("Chunk {}: {}", id, r.feedback)
        })
        .collect();

    format!(
        "Multi-chunk evaluation completed ({} chunks analyzed):\n\n{}",
        results.len(),
        entries.join("\n\n")
    )
}

fn combined_details() -> Map<String, serde_json::Value> {
    let mut details = Map::new();
    details.insert("note".to_string(), json!("Combined from multiple chunks"));
    details
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk_result(chunk_id: usize, weight: f64, score: f64, feedback: &str) -> RubricResult {
        let mut result = RubricResult {
            feedback: feedback.to_string(),
            chunk_id: Some(chunk_id),
            chunk_weight: Some(weight),
            source: ScoreSource::Oracle,
            ..RubricResult::neutral_default()
        };
        for dimension in Dimension::ALL {
            result.set_score(dimension, score);
        }
        result.overall_score = score;
        result
    }

    #[test]
    fn test_empty_list_returns_default() {
        let combined = combine_chunk_results(Vec::new());
        assert_eq!(combined, RubricResult::neutral_default());
        assert_eq!(combined.feedback, "No evaluation results to combine.");
    }

    #[test]
    fn test_singleton_is_returned_unchanged() {
        let mut only = chunk_result(1, 1234.0, 7.3, "fine");
        only.detailed_scores.insert("x".to_string(), json!(1));
        let combined = combine_chunk_results(vec![only.clone()]);
        assert_eq!(combined, only);
    }

    #[test]
    fn test_weighted_mean_by_chunk_size() {
        let mut first = chunk_result(1, 3000.0, 5.0, "first");
        first.technical_complexity_score = 6.0;
        let mut second = chunk_result(2, 1000.0, 5.0, "second");
        second.technical_complexity_score = 8.0;

        let combined = combine_chunk_results(vec![first, second]);
        assert_eq!(combined.technical_complexity_score, 6.5);
        assert_eq!(combined.relevance_score, 5.0);
        assert_eq!(combined.source, ScoreSource::Combined);
    }

    #[test]
    fn test_overall_is_mean_of_combined_dimensions() {
        let mut a = chunk_result(1, 1.0, 4.0, "a");
        a.overall_score = 9.9;
        let mut b = chunk_result(2, 1.0, 6.0, "b");
        b.overall_score = 0.1;
        b.creativity_score = 10.0;

        let combined = combine_chunk_results(vec![a, b]);
        // relevance 5, technical 5, creativity 7, documentation 5, productivity 5
        assert_eq!(combined.creativity_score, 7.0);
        assert_eq!(combined.overall_score, 5.4);
    }

    #[test]
    fn test_missing_weights_count_as_one() {
        let mut a = chunk_result(1, 0.0, 2.0, "a");
        a.chunk_weight = None;
        let mut b = chunk_result(2, 0.0, 8.0, "b");
        b.chunk_weight = None;

        let combined = combine_chunk_results(vec![a, b]);
        assert_eq!(combined.relevance_score, 5.0);
    }

    #[test]
    fn test_zero_total_weight_falls_back_to_equal_weights() {
        let combined = combine_chunk_results(vec![
            chunk_result(1, 0.0, 3.0, "a"),
            chunk_result(2, 0.0, 9.0, "b"),
        ]);
        assert_eq!(combined.productivity_score, 6.0);
        assert!(combined.validate().is_ok());
    }

    #[test]
    fn test_feedback_and_details() {
        let mut anonymous = chunk_result(3, 1.0, 5.0, "no id");
        anonymous.chunk_id = None;
        let combined = combine_chunk_results(vec![
            chunk_result(1, 1.0, 5.0, "alpha"),
            chunk_result(2, 1.0, 5.0, ""),
            anonymous,
        ]);

        assert_eq!(
            combined.feedback,
            "Multi-chunk evaluation completed (3 chunks analyzed):\n\nChunk 1: alpha\n\nChunk ?: no id"
        );
        assert_eq!(combined.detailed_scores["note"], "Combined from multiple chunks");
        assert_eq!(combined.detailed_scores.len(), 1);
        assert!(combined.chunk_id.is_none());
    }
}
