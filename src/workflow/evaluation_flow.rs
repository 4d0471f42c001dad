//! 作品评估流程 - 流程层
//!
//! 核心职责：定义"一份作品"的完整评估流程
//!
//! ```text
//! Start → {SinglePass | Chunking} → [PerChunkJudging]* → Combine → Done
//!                                 ↘ Fallback（任意评审失败）↗
//! ```
//!
//! 分块评估本身出错时，退回到截断内容的单次评估

use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::error::EvaluationError;
use crate::models::{Hackathon, RubricResult, Submission, SubmissionView};
use crate::services::{chunk_code_content, chunk_summary, combine_chunk_results, JudgeService};

/// 评估路径
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvaluationPath {
    /// 单次评审（内容在评审服务内截断）
    SinglePass,
    /// 只对代码分块，逐块评审后合并
    Chunked,
}

/// 根据代码 + 文档总长度选择评估路径
pub fn decide_path(submission: &Submission, threshold: usize) -> EvaluationPath {
    if submission.total_content_length() > threshold {
        EvaluationPath::Chunked
    } else {
        EvaluationPath::SinglePass
    }
}

/// 作品评估流程
///
/// - 持有评审服务（显式注入，不使用全局单例）
/// - 决定单次评审还是分块评审
/// - 分块按顺序逐个评审，同一时刻只有一个 oracle 请求
pub struct EvaluationFlow {
    judge: JudgeService,
    chunking_threshold: usize,
    chunk_size: usize,
    chunk_overlap: usize,
    truncated_code_limit: usize,
    truncated_doc_limit: usize,
}

impl EvaluationFlow {
    /// 创建新的评估流程
    pub fn new(judge: JudgeService, config: &Config) -> Self {
        Self {
            judge,
            chunking_threshold: config.chunking_threshold,
            chunk_size: config.chunk_size,
            chunk_overlap: config.chunk_overlap,
            truncated_code_limit: config.truncated_code_limit,
            truncated_doc_limit: config.truncated_doc_limit,
        }
    }

    pub fn judge(&self) -> &JudgeService {
        &self.judge
    }

    /// 评估一份作品
    ///
    /// 评审失败不会返回错误（使用兜底分数）；只有分块评估和截断评估都失败时
    /// 才返回 `EvaluationError::EvaluationFailed`
    pub async fn evaluate(
        &self,
        submission: &Submission,
        hackathon: &Hackathon,
    ) -> Result<RubricResult, EvaluationError> {
        let total_length = submission.total_content_length();

        match decide_path(submission, self.chunking_threshold) {
            EvaluationPath::SinglePass => {
                info!(
                    "[项目 {}] 📊 标准评估 (内容 {} 字符)",
                    submission.project_name, total_length
                );
                Ok(self.judge.judge(&SubmissionView::full(submission), hackathon).await)
            }
            EvaluationPath::Chunked => {
                info!(
                    "[项目 {}] 📊 内容较大 ({} 字符)，使用分块评估",
                    submission.project_name, total_length
                );
                match self.evaluate_chunked(submission, hackathon).await {
                    Ok(result) => Ok(result),
                    Err(e) => {
                        error!(
                            "[项目 {}] ❌ 分块评估失败: {}，改用截断内容评估",
                            submission.project_name, e
                        );
                        self.evaluate_truncated(submission, hackathon).await
                    }
                }
            }
        }
    }

    /// 分块评估：只对代码分块，每个分块附带完整文档
    async fn evaluate_chunked(
        &self,
        submission: &Submission,
        hackathon: &Hackathon,
    ) -> Result<RubricResult, EvaluationError> {
        let chunks = chunk_code_content(&submission.code_content, self.chunk_size, self.chunk_overlap);

        let total_chunks = chunks.len();
        if chunks.is_empty() {
            warn!(
                "[项目 {}] ⚠️ 代码内容分块后为空，使用默认分数",
                submission.project_name
            );
        } else {
            info!(
                "[项目 {}] 📦 生成 {} 个分块",
                submission.project_name, total_chunks
            );
            info!("{}", chunk_summary(&chunks));
        }

        let mut chunk_results = Vec::with_capacity(total_chunks);
        for chunk in &chunks {
            info!(
                "[项目 {}] 🔍 评审分块 {}/{} ({} 字符)...",
                submission.project_name, chunk.chunk_id, total_chunks, chunk.size
            );

            let view = SubmissionView::for_chunk(submission, chunk);
            let mut result = self.judge.judge(&view, hackathon).await;
            result.chunk_id = Some(chunk.chunk_id);
            result.chunk_weight = Some(chunk.weight());

            debug!(
                "[项目 {}] 分块 {} 得分: {:.1}/10",
                submission.project_name, chunk.chunk_id, result.overall_score
            );
            chunk_results.push(result);
        }

        info!("[项目 {}] 🔄 合并所有分块的评分...", submission.project_name);
        let combined = combine_chunk_results(chunk_results);
        combined.validate()?;

        info!(
            "[项目 {}] 🎯 合并后总分: {:.1}/10",
            submission.project_name, combined.overall_score
        );
        Ok(combined)
    }

    /// 截断评估：只取代码前 4000 字符、文档前 2000 字符（默认配置）
    async fn evaluate_truncated(
        &self,
        submission: &Submission,
        hackathon: &Hackathon,
    ) -> Result<RubricResult, EvaluationError> {
        warn!("[项目 {}] ⚠️ 使用截断内容进行评估", submission.project_name);

        let view = SubmissionView::truncated(
            submission,
            self.truncated_code_limit,
            self.truncated_doc_limit,
        );
        let result = self.judge.judge(&view, hackathon).await;

        result
            .validate()
            .map_err(|e| EvaluationError::EvaluationFailed {
                project_name: submission.project_name.clone(),
                reason: e.to_string(),
            })?;

        Ok(result)
    }
}
