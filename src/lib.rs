//! # Hackathon Judge
//!
//! 一个用 LLM 为黑客马拉松作品打分的 Rust 应用程序
//!
//! ## 架构设计
//!
//! 本系统采用四层架构：
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有 LLM 客户端，只暴露能力
//! - `Oracle` - 评审 oracle 抽象，`OpenAiOracle` 是基于 async-openai 的实现
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，只处理单份内容
//! - `chunker` - 内容分块能力
//! - `JudgeService` - 评审能力（提示词 → oracle → 解析 / 兜底）
//! - `combiner` - 分块结果合并能力
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一份作品"的完整评估流程
//! - `EvaluationFlow` - 流程编排（单次评审 / 分块评审 → 合并 → 截断兜底）
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/batch_processor` - 批量评估处理器，加载请求并写出结果
//!
//! ## 模块结构

pub mod config;
pub mod error;
pub mod infrastructure;

pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult, EvaluationError};
pub use infrastructure::{OpenAiOracle, Oracle};
pub use models::{Chunk, Criterion, EvaluationRequest, Hackathon, RubricResult, ScoreSource, Submission};
pub use orchestrator::{App, EvaluationRecord};
pub use services::JudgeService;
pub use workflow::{EvaluationFlow, EvaluationPath};
