//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责批量评估和结果汇总，是整个系统的"指挥中心"。
//!
//! ### `batch_processor` - 批量评估处理器
//! - 管理应用生命周期（初始化、运行）
//! - 批量加载评估请求（Vec<EvaluationRequest>）
//! - 逐个作品调用评估流程
//! - 写出评估结果并输出全局统计信息
//!
//! ## 层次关系
//!
//! ```text
//! batch_processor (处理 Vec<EvaluationRequest>)
//!     ↓
//! workflow::EvaluationFlow (处理单个作品)
//!     ↓
//! services (能力层：chunker / judge / combiner)
//!     ↓
//! infrastructure (基础设施：Oracle)
//! ```

pub mod batch_processor;

// 重新导出主要类型
pub use batch_processor::{save_records, App, BatchStats, EvaluationRecord};
