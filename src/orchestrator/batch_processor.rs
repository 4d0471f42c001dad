//! 批量评估处理器 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个应用的入口，负责批量作品的评估和结果落盘。
//!
//! ## 核心功能
//!
//! 1. **应用初始化**：创建 oracle 客户端、评审服务和评估流程
//! 2. **批量加载**：扫描并加载所有待评估的请求（`Vec<EvaluationRequest>`）
//! 3. **顺序评估**：逐个作品调用 `EvaluationFlow`，同一时刻只有一个 oracle 请求
//! 4. **结果落盘**：把所有评估记录写入 JSON 文件
//! 5. **全局统计**：汇总成功、失败和兜底的数量

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::config::Config;
use crate::infrastructure::{OpenAiOracle, Oracle};
use crate::models::{load_all_requests, EvaluationRequest, RubricResult, ScoreSource};
use crate::services::JudgeService;
use crate::utils::logging::{log_startup, print_final_stats};
use crate::workflow::EvaluationFlow;

/// 单个作品的评估记录
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationRecord {
    /// 请求文件路径
    pub source_file: Option<String>,
    pub team_name: String,
    pub project_name: String,
    pub evaluated_at: DateTime<Utc>,
    pub result: RubricResult,
}

/// 批量评估统计
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchStats {
    pub success: usize,
    pub failed: usize,
    /// 成功记录中使用兜底分数的数量
    pub fallback: usize,
}

/// 应用主结构
pub struct App {
    config: Config,
    flow: EvaluationFlow,
}

impl App {
    /// 初始化应用
    ///
    /// 缺少 API Key 时直接失败
    pub async fn initialize(config: Config) -> Result<Self> {
        let oracle = OpenAiOracle::new(&config).context("创建 LLM 客户端失败")?;
        Ok(Self::with_oracle(config, Arc::new(oracle)))
    }

    /// 使用指定 oracle 创建应用
    pub fn with_oracle(config: Config, oracle: Arc<dyn Oracle>) -> Self {
        let judge = JudgeService::new(oracle, &config);
        let flow = EvaluationFlow::new(judge, &config);
        Self { config, flow }
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> Result<BatchStats> {
        info!("\n📁 正在扫描待评估的作品...");
        let requests = load_all_requests(&self.config.submissions_folder).await?;

        if requests.is_empty() {
            warn!("⚠️ 没有找到待评估的TOML文件，程序结束");
            return Ok(BatchStats::default());
        }

        log_startup(self.flow.judge().model_name(), requests.len());

        let (records, stats) = self.evaluate_all(&requests).await;

        save_records(&records, &self.config.results_file).await?;

        print_final_stats(
            stats.success,
            stats.failed,
            stats.fallback,
            &self.config.results_file,
        );

        Ok(stats)
    }

    /// 顺序评估所有请求
    pub async fn evaluate_all(
        &self,
        requests: &[EvaluationRequest],
    ) -> (Vec<EvaluationRecord>, BatchStats) {
        let total = requests.len();
        let mut records = Vec::with_capacity(total);
        let mut stats = BatchStats::default();

        for (idx, request) in requests.iter().enumerate() {
            let submission = &request.submission;
            info!("\n{}", "─".repeat(60));
            info!(
                "[{}/{}] 📝 评估作品: {} (团队: {})",
                idx + 1,
                total,
                submission.project_name,
                submission.team_name
            );

            match self.flow.evaluate(submission, &request.hackathon).await {
                Ok(result) => {
                    if result.source == ScoreSource::Fallback {
                        stats.fallback += 1;
                    }
                    stats.success += 1;
                    records.push(EvaluationRecord {
                        source_file: request.file_path.clone(),
                        team_name: submission.team_name.clone(),
                        project_name: submission.project_name.clone(),
                        evaluated_at: Utc::now(),
                        result,
                    });
                }
                Err(e) => {
                    error!("[项目 {}] ❌ 评估失败: {}", submission.project_name, e);
                    stats.failed += 1;
                }
            }
        }

        (records, stats)
    }
}

/// 把评估记录写入 JSON 文件
pub async fn save_records(records: &[EvaluationRecord], path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(records).context("序列化评估结果失败")?;

    tokio::fs::write(path, json)
        .await
        .with_context(|| format!("写入评估结果失败: {}", path.display()))?;

    info!("💾 已保存 {} 条评估记录到 {}", records.len(), path.display());
    Ok(())
}
