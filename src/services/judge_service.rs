//! 评审服务 - 业务能力层
//!
//! 只负责"对一份内容给出评分"能力，不关心是否分块
//!
//! 流程：构建提示词 → 调用 oracle → 解析响应；任何一步失败都返回兜底分数

use std::sync::{Arc, Mutex};

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::AppResult;
use crate::infrastructure::Oracle;
use crate::models::{Hackathon, RubricResult, SubmissionView};
use crate::services::fallback::fallback_scores;
use crate::services::prompt_builder::{build_user_prompt, SYSTEM_INSTRUCTIONS};
use crate::services::response_parser::parse_response;
use crate::utils::truncate_text;

/// 评审服务
///
/// 职责：
/// - 把单个作品视图交给 oracle 评审
/// - 解析并归一化评分
/// - 失败时生成兜底分数，永远返回结果
pub struct JudgeService {
    oracle: Arc<dyn Oracle>,
    rng: Mutex<Box<dyn RngCore + Send>>,
    code_limit: usize,
    doc_limit: usize,
    verbose_logging: bool,
}

impl JudgeService {
    /// 创建评审服务，兜底分数使用系统熵作为随机源
    pub fn new(oracle: Arc<dyn Oracle>, config: &Config) -> Self {
        Self::with_rng(oracle, config, Box::new(StdRng::from_entropy()))
    }

    /// 使用指定随机源创建评审服务
    pub fn with_rng(oracle: Arc<dyn Oracle>, config: &Config, rng: Box<dyn RngCore + Send>) -> Self {
        Self {
            oracle,
            rng: Mutex::new(rng),
            code_limit: config.prompt_code_limit,
            doc_limit: config.prompt_doc_limit,
            verbose_logging: config.verbose_logging,
        }
    }

    pub fn model_name(&self) -> &str {
        self.oracle.model_name()
    }

    /// 评审一个作品视图
    ///
    /// oracle 调用失败、响应无法解析时返回兜底分数，不会返回错误
    pub async fn judge(&self, view: &SubmissionView<'_>, hackathon: &Hackathon) -> RubricResult {
        match self.try_judge(view, hackathon).await {
            Ok(result) => {
                info!(
                    "[项目 {}] ✓ 评审完成: {:.1}/10",
                    view.project_name, result.overall_score
                );
                result
            }
            Err(e) => {
                warn!("[项目 {}] ⚠️ 评审失败，使用兜底分数: {}", view.project_name, e);
                self.fallback()
            }
        }
    }

    async fn try_judge(&self, view: &SubmissionView<'_>, hackathon: &Hackathon) -> AppResult<RubricResult> {
        let prompt = build_user_prompt(view, hackathon, self.code_limit, self.doc_limit);

        debug!(
            "[项目 {}] 提示词长度: {} 字符",
            view.project_name,
            prompt.chars().count()
        );
        if self.verbose_logging {
            debug!("提示词预览: {}", truncate_text(&prompt, 500));
        }

        let response = self.oracle.judge(SYSTEM_INSTRUCTIONS, &prompt).await?;

        if self.verbose_logging {
            debug!("oracle 响应: {}", truncate_text(&response, 500));
        }

        Ok(parse_response(&response)?)
    }

    /// 生成兜底分数
    pub fn fallback(&self) -> RubricResult {
        let mut rng = self
            .rng
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        fallback_scores(&mut **rng)
    }
}
