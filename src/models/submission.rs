use serde::{Deserialize, Serialize};

/// 参赛作品
///
/// 代码和文档内容由上游的文件提取流程生成
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Submission {
    pub team_name: String,
    #[serde(default)]
    pub participant_email: String,
    pub project_name: String,
    #[serde(default)]
    pub project_description: String,
    #[serde(default)]
    pub code_content: String,
    #[serde(default)]
    pub documentation_content: String,
}

impl Submission {
    /// 代码 + 文档的总字符数，用于决定是否分块
    pub fn total_content_length(&self) -> usize {
        self.code_content.chars().count() + self.documentation_content.chars().count()
    }
}

/// 评分标准
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Criterion {
    pub name: String,
    pub weight: f64,
    #[serde(default)]
    pub description: String,
}

impl Criterion {
    fn equal(name: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            weight: 0.20,
            description: description.to_string(),
        }
    }
}

/// 黑客马拉松
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Hackathon {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// 主办方填写的评审说明
    #[serde(default)]
    pub evaluation_prompt: String,
    #[serde(default)]
    pub criteria: Vec<Criterion>,
}

impl Hackathon {
    /// 实际使用的评分标准，未配置时为五项等权重默认标准
    pub fn effective_criteria(&self) -> Vec<Criterion> {
        if self.criteria.is_empty() {
            default_criteria()
        } else {
            self.criteria.clone()
        }
    }
}

/// 默认评分标准
pub fn default_criteria() -> Vec<Criterion> {
    vec![
        Criterion::equal("Relevance", "How directly the project addresses the hackathon theme"),
        Criterion::equal("Technical Complexity", "Depth and sophistication of the implementation"),
        Criterion::equal("Creativity", "Originality of the idea and approach"),
        Criterion::equal("Documentation", "README, comments and setup instructions"),
        Criterion::equal("Productivity", "Code organization, error handling and maintainability"),
    ]
}

/// 一次评估请求：作品 + 所属黑客马拉松
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationRequest {
    pub hackathon: Hackathon,
    pub submission: Submission,
    /// 来源文件路径
    #[serde(skip_serializing, skip_deserializing)]
    pub file_path: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_criteria_defaults_to_five_equal_weights() {
        let hackathon = Hackathon::default();
        let criteria = hackathon.effective_criteria();
        assert_eq!(criteria.len(), 5);
        assert!(criteria.iter().all(|c| c.weight == 0.20));
        assert_eq!(criteria[1].name, "Technical Complexity");
    }

    #[test]
    fn test_effective_criteria_keeps_configured_list() {
        let hackathon = Hackathon {
            criteria: vec![Criterion {
                name: "Impact".to_string(),
                weight: 1.0,
                description: String::new(),
            }],
            ..Default::default()
        };
        assert_eq!(hackathon.effective_criteria().len(), 1);
    }

    #[test]
    fn test_total_content_length_counts_chars() {
        let submission = Submission {
            code_content: "é".repeat(10),
            documentation_content: "abc".to_string(),
            ..Default::default()
        };
        assert_eq!(submission.total_content_length(), 13);
    }
}
