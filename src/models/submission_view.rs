//! 评审视图
//!
//! 评审服务只看得到这里的字段。整份作品、单个分块、截断内容
//! 都通过同一个视图类型送去评审

use std::borrow::Cow;

use crate::models::{Chunk, Submission};
use crate::utils::take_chars;

/// 一次评审调用所需的作品字段
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionView<'a> {
    pub project_name: Cow<'a, str>,
    pub project_description: &'a str,
    pub team_name: &'a str,
    pub code_content: &'a str,
    pub documentation_content: &'a str,
}

impl<'a> SubmissionView<'a> {
    /// 整份作品
    pub fn full(submission: &'a Submission) -> Self {
        Self {
            project_name: Cow::Borrowed(&submission.project_name),
            project_description: &submission.project_description,
            team_name: &submission.team_name,
            code_content: &submission.code_content,
            documentation_content: &submission.documentation_content,
        }
    }

    /// 单个分块：代码替换为分块内容，文档保持完整，项目名追加分块编号
    pub fn for_chunk(submission: &'a Submission, chunk: &'a Chunk) -> Self {
        Self {
            project_name: Cow::Owned(format!(
                "{} (Chunk {})",
                submission.project_name, chunk.chunk_id
            )),
            code_content: &chunk.content,
            ..Self::full(submission)
        }
    }

    /// 截断后的作品，用于分块评估失败后的兜底
    pub fn truncated(submission: &'a Submission, code_limit: usize, doc_limit: usize) -> Self {
        Self {
            code_content: take_chars(&submission.code_content, code_limit),
            documentation_content: take_chars(&submission.documentation_content, doc_limit),
            ..Self::full(submission)
        }
    }
}
