//! 评审响应解析
//!
//! 把 oracle 的原始文本转换为 `RubricResult`，所有分数都会被归一化到 [0, 10]

use std::sync::OnceLock;

use regex::Regex;
use serde_json::{Map, Value as JsonValue};

use crate::error::ParseError;
use crate::models::rubric::{DEFAULT_SCORE, MAX_SCORE, MIN_SCORE};
use crate::models::{Dimension, RubricResult, ScoreSource};
use crate::utils::truncate_text;

const DEFAULT_FEEDBACK: &str = "Evaluation completed.";

fn fenced_json_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)```json\s*(.*?)\s*```").expect("fenced json pattern is valid"))
}

fn bare_object_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)\{.*\}").expect("object pattern is valid"))
}

/// 从响应中提取 JSON 文本
///
/// 依次尝试：```json 代码块 → 第一个 `{` 到最后一个 `}` → 整个响应
pub fn extract_payload(response: &str) -> &str {
    if let Some(block) = fenced_json_re().captures(response).and_then(|c| c.get(1)) {
        return block.as_str();
    }
    if let Some(object) = bare_object_re().find(response) {
        return object.as_str();
    }
    response
}

/// 归一化单个分数
///
/// 数字或数字字符串解析为 f64；缺失、null、布尔、非数字或非有限值取 5.0；
/// 最后截断到 [0, 10]
pub fn normalize_score(value: Option<&JsonValue>) -> f64 {
    let parsed = match value {
        Some(JsonValue::Number(n)) => n.as_f64(),
        Some(JsonValue::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed
        .filter(|v| v.is_finite())
        .unwrap_or(DEFAULT_SCORE)
        .clamp(MIN_SCORE, MAX_SCORE)
}

/// 解析评审响应
pub fn parse_response(response: &str) -> Result<RubricResult, ParseError> {
    let payload = extract_payload(response);

    let value: JsonValue = serde_json::from_str(payload).map_err(|source| ParseError::InvalidJson {
        snippet: truncate_text(payload, 80),
        source,
    })?;

    let fields = match value {
        JsonValue::Object(map) => map,
        other => {
            return Err(ParseError::NotAnObject {
                kind: json_kind(&other),
            })
        }
    };

    let mut result = RubricResult {
        relevance_score: DEFAULT_SCORE,
        technical_complexity_score: DEFAULT_SCORE,
        creativity_score: DEFAULT_SCORE,
        documentation_score: DEFAULT_SCORE,
        productivity_score: DEFAULT_SCORE,
        overall_score: normalize_score(fields.get("overall_score")),
        feedback: feedback_text(fields.get("feedback")),
        detailed_scores: detailed_scores(fields.get("detailed_scores")),
        chunk_id: None,
        chunk_weight: None,
        source: ScoreSource::Oracle,
    };
    for dimension in Dimension::ALL {
        result.set_score(dimension, normalize_score(fields.get(dimension.field_name())));
    }

    Ok(result)
}

fn feedback_text(value: Option<&JsonValue>) -> String {
    match value {
        Some(JsonValue::String(s)) if !s.trim().is_empty() => s.clone(),
        Some(JsonValue::Null) | None => DEFAULT_FEEDBACK.to_string(),
        Some(JsonValue::String(_)) => DEFAULT_FEEDBACK.to_string(),
        Some(other) => other.to_string(),
    }
}

fn detailed_scores(value: Option<&JsonValue>) -> Map<String, JsonValue> {
    match value {
        Some(JsonValue::Object(map)) => map.clone(),
        Some(JsonValue::Null) | None => Map::new(),
        Some(other) => {
            let mut map = Map::new();
            map.insert("raw".to_string(), other.clone());
            map
        }
    }
}

fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}
