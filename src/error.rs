use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
    /// LLM 服务错误
    #[error("LLM错误: {0}")]
    Llm(#[from] LlmError),
    /// 评审响应解析错误
    #[error("解析错误: {0}")]
    Parse(#[from] ParseError),
    /// 编排层错误
    #[error("评估错误: {0}")]
    Evaluation(#[from] EvaluationError),
}

/// 配置错误
///
/// 缺少凭证属于致命错误，在构造 oracle 时立即返回
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 缺少 API 凭证
    #[error("缺少 LLM API 凭证，请设置环境变量 {var_name}")]
    MissingCredential { var_name: String },
    /// 环境变量解析失败
    #[error("环境变量 {var_name} 解析失败: 值 '{value}' 无法转换为 {expected_type}")]
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: String,
    },
}

/// LLM 服务错误
#[derive(Debug, Error)]
pub enum LlmError {
    /// 构建请求失败
    #[error("构建 LLM 请求失败 (模型: {model}): {source}")]
    RequestBuildFailed {
        model: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// API 调用失败
    #[error("LLM API调用失败 (模型: {model}): {source}")]
    ApiCallFailed {
        model: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 返回内容为空
    #[error("LLM返回内容为空 (模型: {model})")]
    EmptyContent { model: String },
}

/// 评审响应解析错误
#[derive(Debug, Error)]
pub enum ParseError {
    /// JSON 解析失败
    #[error("无法解析评审响应中的 JSON (片段: {snippet}): {source}")]
    InvalidJson {
        snippet: String,
        #[source]
        source: serde_json::Error,
    },
    /// JSON 顶层不是对象
    #[error("评审响应不是 JSON 对象，而是 {kind}")]
    NotAnObject { kind: &'static str },
}

/// 编排层错误
///
/// 区分"评分很低"和"无法评估"
#[derive(Debug, Error)]
pub enum EvaluationError {
    /// 评分结果不满足不变量
    #[error("评分结果无效: {reason}")]
    InvalidResult { reason: String },
    /// 分块评估和截断评估都失败
    #[error("项目 {project_name} 无法完成评估: {reason}")]
    EvaluationFailed {
        project_name: String,
        reason: String,
    },
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
