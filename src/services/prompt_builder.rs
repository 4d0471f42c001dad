//! 评审提示词构建
//!
//! 同样的输入总是生成同样的提示词

use crate::models::{Hackathon, SubmissionView};
use crate::utils::truncate_with_marker;

/// 截断标记
pub const TRUNCATION_MARKER: &str = "\n... [content truncated]";

/// 内容为空时的占位文本
const EMPTY_CONTENT: &str = "No content provided";

/// 系统指令
pub const SYSTEM_INSTRUCTIONS: &str = "You are a STRICT technical evaluator and hackathon judge. \
Use the full 0-10 scoring range and give differentiated scores. \
Do not inflate grades: most projects belong in the 4-7 range. Be harsh but fair.";

/// 评分区间说明，逐字发送给 oracle，保证不同调用的分数可比
pub const SCORING_BANDS: &str = "\
**0-2: Failing** - non-functional, irrelevant, or broken; no usable documentation
**3-4: Below average** - basic functionality with significant flaws or incomplete work
**5-6: Average** - works as intended with minor issues; standard implementation
**7-8: Good** - well implemented, clear effort, good structure and documentation
**9-10: Excellent** - exceptional, innovative, production-ready with thorough documentation";

/// 要求 oracle 返回的 JSON 结构
const RESPONSE_FORMAT: &str = r#"```json
{
  "relevance_score": <score 0-10 with 1 decimal>,
  "technical_complexity_score": <score 0-10 with 1 decimal>,
  "creativity_score": <score 0-10 with 1 decimal>,
  "documentation_score": <score 0-10 with 1 decimal>,
  "productivity_score": <score 0-10 with 1 decimal>,
  "overall_score": <average of the five scores with 1 decimal>,
  "feedback": "<honest, specific feedback naming concrete flaws and improvements>",
  "detailed_scores": {
    "relevance_justification": "<reasons>",
    "technical_justification": "<reasons>",
    "creativity_justification": "<reasons>",
    "documentation_justification": "<reasons>",
    "productivity_justification": "<reasons>",
    "out_of_box_thinking": "<1-2 sentences>",
    "problem_solving_skills": "<1-2 sentences>",
    "research_capabilities": "<1-2 sentences>",
    "business_understanding": "<1-2 sentences>",
    "non_famous_tools_usage": "<1-2 sentences>"
  }
}
```"#;

/// 截断内容用于提示词
///
/// 超过 `max_chars` 时截断并追加标记；空内容替换为占位文本
pub fn truncate_content(content: &str, max_chars: usize) -> String {
    if content.trim().is_empty() {
        return EMPTY_CONTENT.to_string();
    }
    truncate_with_marker(content, max_chars, TRUNCATION_MARKER)
}

/// 构建用户提示词
///
/// # 参数
/// - `view`: 待评审的作品视图
/// - `hackathon`: 黑客马拉松信息与评分标准
/// - `code_limit`: 代码内容截断长度
/// - `doc_limit`: 文档内容截断长度
pub fn build_user_prompt(
    view: &SubmissionView<'_>,
    hackathon: &Hackathon,
    code_limit: usize,
    doc_limit: usize,
) -> String {
    let criteria_text = hackathon
        .effective_criteria()
        .iter()
        .map(|c| {
            if c.description.is_empty() {
                format!("- {} (weight: {:.2})", c.name, c.weight)
            } else {
                format!("- {} (weight: {:.2}): {}", c.name, c.weight, c.description)
            }
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"# STRICT Hackathon Evaluation - NO GRADE INFLATION

## Hackathon Information
**Name**: {hackathon_name}
**Theme/Description**: {hackathon_description}

## Organizer Instructions
{instructions}

## Weighted Criteria
{criteria}

## Submission to Evaluate
**Team**: {team}
**Project Name**: {project}
**Description**: {description}

### Code Content
```
{code}
```

### Documentation
```
{docs}
```

## Scoring Bands
{bands}

## Dimensions
1. **Relevance (0-10)**: does it actually solve the stated problem and fit the theme?
2. **Technical Complexity (0-10)**: real technical depth, not lines of code.
3. **Creativity (0-10)**: a unique approach, or a tutorial reproduction?
4. **Documentation (0-10)**: README, comments, setup instructions.
5. **Productivity (0-10)**: organization, error handling, maintainability.

## Key-Point Analysis (1-2 sentences each, in `detailed_scores`)
- `out_of_box_thinking`: how original is the approach?
- `problem_solving_skills`: how well does the code break down and solve the problem?
- `research_capabilities`: evidence of learning, comparisons, benchmarks or exploration
- `business_understanding`: does it fit real user or business needs and constraints?
- `non_famous_tools_usage`: lesser-known tools or frameworks used on purpose

## Requirements
- Avoid score inflation; only exceptional work deserves 8-10.
- Use one decimal of precision (e.g. 3.2, 6.7).
- Name concrete weaknesses.

## Response Format (STRICT JSON)
{format}
"#,
        hackathon_name = hackathon.name,
        hackathon_description = hackathon.description,
        instructions = hackathon.evaluation_prompt,
        criteria = criteria_text,
        team = view.team_name,
        project = view.project_name,
        description = view.project_description,
        code = truncate_content(view.code_content, code_limit),
        docs = truncate_content(view.documentation_content, doc_limit),
        bands = SCORING_BANDS,
        format = RESPONSE_FORMAT,
    )
}
