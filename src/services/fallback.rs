//! 兜底评分
//!
//! oracle 调用或解析失败时生成估计分数。每个维度在固定区间内随机取值，
//! 随机源由调用方注入，测试可以固定种子

use std::ops::Range;

use rand::Rng;
use serde_json::{json, Map, Value as JsonValue};

use crate::models::rubric::round1;
use crate::models::{Dimension, RubricResult, ScoreSource};

/// 兜底反馈，明确告知使用了估计分数
pub const FALLBACK_FEEDBACK: &str = "Automatic evaluation completed due to technical issue. \
Scores are estimated based on basic analysis. \
Manual review strongly recommended for accurate assessment.";

/// 各维度的兜底取值区间
pub fn fallback_band(dimension: Dimension) -> Range<f64> {
    match dimension {
        Dimension::Relevance => 4.0..6.5,
        Dimension::TechnicalComplexity => 3.5..6.0,
        Dimension::Creativity => 3.0..5.5,
        Dimension::Documentation => 2.5..5.0,
        Dimension::Productivity => 3.5..6.0,
    }
}

/// 生成兜底分数，不会失败
pub fn fallback_scores<R: Rng + ?Sized>(rng: &mut R) -> RubricResult {
    let mut result = RubricResult {
        feedback: FALLBACK_FEEDBACK.to_string(),
        detailed_scores: fallback_details(),
        source: ScoreSource::Fallback,
        ..RubricResult::neutral_default()
    };

    for dimension in Dimension::ALL {
        result.set_score(dimension, round1(rng.gen_range(fallback_band(dimension))));
    }
    result.overall_score = round1(result.dimension_mean());

    result
}

fn fallback_details() -> Map<String, JsonValue> {
    let mut details = Map::new();
    details.insert(
        "note".to_string(),
        json!("Fallback scores - technical evaluation failed"),
    );
    details.insert(
        "recommendation".to_string(),
        json!("Manual review required for accurate scoring"),
    );
    details
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_fallback_scores_stay_in_bands() {
        for seed in 0..200 {
            let mut rng = StdRng::seed_from_u64(seed);
            let result = fallback_scores(&mut rng);

            for dimension in Dimension::ALL {
                let band = fallback_band(dimension);
                let score = result.score(dimension);
                assert!(
                    score >= band.start && score <= band.end,
                    "{:?} = {} 超出区间 {:?}",
                    dimension,
                    score,
                    band
                );
            }
            assert!((result.overall_score - result.dimension_mean()).abs() <= 0.05 + 1e-9);
            assert!(result.validate().is_ok());
        }
    }

    #[test]
    fn test_fallback_discloses_estimation() {
        let mut rng = StdRng::seed_from_u64(7);
        let result = fallback_scores(&mut rng);
        assert_eq!(result.source, ScoreSource::Fallback);
        assert!(result.feedback.contains("Manual review"));
        assert!(result.detailed_scores.contains_key("note"));
    }

    #[test]
    fn test_fallback_is_reproducible_with_pinned_seed() {
        let a = fallback_scores(&mut StdRng::seed_from_u64(99));
        let b = fallback_scores(&mut StdRng::seed_from_u64(99));
        assert_eq!(a, b);
    }
}
