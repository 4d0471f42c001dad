use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

use crate::error::EvaluationError;

/// 分数上限
pub const MAX_SCORE: f64 = 10.0;
/// 分数下限
pub const MIN_SCORE: f64 = 0.0;
/// 缺失或无法解析时的默认分数
pub const DEFAULT_SCORE: f64 = 5.0;

/// 评分维度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    Relevance,
    TechnicalComplexity,
    Creativity,
    Documentation,
    Productivity,
}

impl Dimension {
    /// 全部五个维度，顺序固定
    pub const ALL: [Dimension; 5] = [
        Dimension::Relevance,
        Dimension::TechnicalComplexity,
        Dimension::Creativity,
        Dimension::Documentation,
        Dimension::Productivity,
    ];

    /// 评审响应 JSON 中的字段名
    pub fn field_name(self) -> &'static str {
        match self {
            Dimension::Relevance => "relevance_score",
            Dimension::TechnicalComplexity => "technical_complexity_score",
            Dimension::Creativity => "creativity_score",
            Dimension::Documentation => "documentation_score",
            Dimension::Productivity => "productivity_score",
        }
    }
}

/// 评分来源
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreSource {
    /// 由 oracle 评审得出
    Oracle,
    /// oracle 失败后生成的估计分数
    Fallback,
    /// 由多个分块结果合并
    Combined,
    /// 没有可合并结果时的固定默认值
    Default,
}

/// 评分结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RubricResult {
    pub relevance_score: f64,
    pub technical_complexity_score: f64,
    pub creativity_score: f64,
    pub documentation_score: f64,
    pub productivity_score: f64,
    pub overall_score: f64,
    pub feedback: String,
    #[serde(default)]
    pub detailed_scores: Map<String, JsonValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chunk_id: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chunk_weight: Option<f64>,
    pub source: ScoreSource,
}

impl RubricResult {
    /// 没有任何结果可合并时返回的固定默认值
    pub fn neutral_default() -> Self {
        Self {
            relevance_score: DEFAULT_SCORE,
            technical_complexity_score: DEFAULT_SCORE,
            creativity_score: DEFAULT_SCORE,
            documentation_score: DEFAULT_SCORE,
            productivity_score: DEFAULT_SCORE,
            overall_score: DEFAULT_SCORE,
            feedback: "No evaluation results to combine.".to_string(),
            detailed_scores: Map::new(),
            chunk_id: None,
            chunk_weight: None,
            source: ScoreSource::Default,
        }
    }

    pub fn score(&self, dimension: Dimension) -> f64 {
        match dimension {
            Dimension::Relevance => self.relevance_score,
            Dimension::TechnicalComplexity => self.technical_complexity_score,
            Dimension::Creativity => self.creativity_score,
            Dimension::Documentation => self.documentation_score,
            Dimension::Productivity => self.productivity_score,
        }
    }

    pub fn set_score(&mut self, dimension: Dimension, value: f64) {
        let slot = match dimension {
            Dimension::Relevance => &mut self.relevance_score,
            Dimension::TechnicalComplexity => &mut self.technical_complexity_score,
            Dimension::Creativity => &mut self.creativity_score,
            Dimension::Documentation => &mut self.documentation_score,
            Dimension::Productivity => &mut self.productivity_score,
        };
        *slot = value;
    }

    /// 五个维度分数的算术平均值
    pub fn dimension_mean(&self) -> f64 {
        Dimension::ALL.iter().map(|d| self.score(*d)).sum::<f64>() / Dimension::ALL.len() as f64
    }

    /// 合并时使用的权重，未设置时为 1
    pub fn weight(&self) -> f64 {
        self.chunk_weight.unwrap_or(1.0)
    }

    /// 检查所有分数都是 [0, 10] 内的有限值
    pub fn validate(&self) -> Result<(), EvaluationError> {
        let scores = Dimension::ALL
            .iter()
            .map(|d| (d.field_name(), self.score(*d)))
            .chain(std::iter::once(("overall_score", self.overall_score)));

        for (field, value) in scores {
            if !value.is_finite() || !(MIN_SCORE..=MAX_SCORE).contains(&value) {
                return Err(EvaluationError::InvalidResult {
                    reason: format!("{} = {} 不在 [0, 10] 范围内", field, value),
                });
            }
        }
        Ok(())
    }
}

/// 四舍五入到一位小数
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neutral_default_is_all_fives() {
        let result = RubricResult::neutral_default();
        for dimension in Dimension::ALL {
            assert_eq!(result.score(dimension), 5.0);
        }
        assert_eq!(result.overall_score, 5.0);
        assert_eq!(result.source, ScoreSource::Default);
        assert!(result.validate().is_ok());
    }

    #[test]
    fn test_set_score_and_mean() {
        let mut result = RubricResult::neutral_default();
        result.set_score(Dimension::TechnicalComplexity, 10.0);
        result.set_score(Dimension::Documentation, 0.0);
        assert_eq!(result.technical_complexity_score, 10.0);
        assert_eq!(result.documentation_score, 0.0);
        assert_eq!(result.dimension_mean(), 5.0);
    }

    #[test]
    fn test_validate_rejects_out_of_range_and_nan() {
        let mut result = RubricResult::neutral_default();
        result.creativity_score = 10.5;
        assert!(result.validate().is_err());

        let mut result = RubricResult::neutral_default();
        result.overall_score = f64::NAN;
        assert!(result.validate().is_err());
    }

    #[test]
    fn test_weight_defaults_to_one() {
        let mut result = RubricResult::neutral_default();
        assert_eq!(result.weight(), 1.0);
        result.chunk_weight = Some(3000.0);
        assert_eq!(result.weight(), 3000.0);
    }

    #[test]
    fn test_round1() {
        assert_eq!(round1(6.54), 6.5);
        assert_eq!(round1(6.56), 6.6);
        assert_eq!(round1(4.0), 4.0);
    }
}
