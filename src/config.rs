use std::str::FromStr;

use crate::error::ConfigError;

/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    // --- LLM 配置 ---
    /// API 密钥，没有默认值
    pub llm_api_key: Option<String>,
    pub llm_api_base_url: String,
    pub llm_model_name: String,
    pub llm_temperature: f32,
    pub llm_max_tokens: u32,
    // --- 分块评估配置 ---
    /// 代码 + 文档总长度超过该值时启用分块评估
    pub chunking_threshold: usize,
    /// 每个分块的最大字符数
    pub chunk_size: usize,
    /// 相邻分块的重叠字符数
    pub chunk_overlap: usize,
    /// 单次评审中代码内容的截断长度
    pub prompt_code_limit: usize,
    /// 单次评审中文档内容的截断长度
    pub prompt_doc_limit: usize,
    /// 分块失败后截断评估使用的代码长度
    pub truncated_code_limit: usize,
    /// 分块失败后截断评估使用的文档长度
    pub truncated_doc_limit: usize,
    // --- 批量运行配置 ---
    /// 待评估的 TOML 文件目录
    pub submissions_folder: String,
    /// 评估结果输出文件
    pub results_file: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            llm_api_key: None,
            llm_api_base_url: "https://api.openai.com/v1".to_string(),
            llm_model_name: "gpt-4o".to_string(),
            llm_temperature: 0.1,
            llm_max_tokens: 2000,
            chunking_threshold: 3000,
            chunk_size: 4000,
            chunk_overlap: 300,
            prompt_code_limit: 3000,
            prompt_doc_limit: 2000,
            truncated_code_limit: 4000,
            truncated_doc_limit: 2000,
            submissions_folder: "submissions".to_string(),
            results_file: "evaluations.json".to_string(),
            verbose_logging: false,
        }
    }
}

impl Config {
    /// 从环境变量加载配置，未设置的项使用默认值
    pub fn from_env() -> Result<Self, ConfigError> {
        let default = Self::default();
        let llm_api_key = std::env::var("LLM_API_KEY")
            .or_else(|_| std::env::var("OPENAI_API_KEY"))
            .ok()
            .filter(|key| !key.trim().is_empty());

        Ok(Self {
            llm_api_key,
            llm_api_base_url: std::env::var("LLM_API_BASE_URL").unwrap_or(default.llm_api_base_url),
            llm_model_name: std::env::var("LLM_MODEL_NAME").unwrap_or(default.llm_model_name),
            llm_temperature: env_or("LLM_TEMPERATURE", default.llm_temperature)?,
            llm_max_tokens: env_or("LLM_MAX_TOKENS", default.llm_max_tokens)?,
            chunking_threshold: env_or("CHUNKING_THRESHOLD", default.chunking_threshold)?,
            chunk_size: env_or("CHUNK_SIZE", default.chunk_size)?,
            chunk_overlap: env_or("CHUNK_OVERLAP", default.chunk_overlap)?,
            prompt_code_limit: env_or("PROMPT_CODE_LIMIT", default.prompt_code_limit)?,
            prompt_doc_limit: env_or("PROMPT_DOC_LIMIT", default.prompt_doc_limit)?,
            truncated_code_limit: env_or("TRUNCATED_CODE_LIMIT", default.truncated_code_limit)?,
            truncated_doc_limit: env_or("TRUNCATED_DOC_LIMIT", default.truncated_doc_limit)?,
            submissions_folder: std::env::var("SUBMISSIONS_FOLDER").unwrap_or(default.submissions_folder),
            results_file: std::env::var("RESULTS_FILE").unwrap_or(default.results_file),
            verbose_logging: env_or("VERBOSE_LOGGING", default.verbose_logging)?,
        })
    }
}

/// 读取并解析环境变量，未设置时返回默认值
fn env_or<T: FromStr>(var_name: &str, default: T) -> Result<T, ConfigError> {
    match std::env::var(var_name) {
        Ok(value) => value.trim().parse().map_err(|_| ConfigError::EnvVarParseFailed {
            var_name: var_name.to_string(),
            value,
            expected_type: std::any::type_name::<T>().to_string(),
        }),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_evaluation_constants() {
        let config = Config::default();
        assert!(config.llm_api_key.is_none());
        assert_eq!(config.chunking_threshold, 3000);
        assert_eq!(config.chunk_size, 4000);
        assert_eq!(config.prompt_code_limit, 3000);
        assert_eq!(config.prompt_doc_limit, 2000);
        assert!(config.chunk_overlap < config.chunk_size);
    }

    #[test]
    fn test_env_or_rejects_unparsable_value() {
        std::env::set_var("HACKATHON_JUDGE_TEST_BAD_USIZE", "four thousand");
        let result: Result<usize, _> = env_or("HACKATHON_JUDGE_TEST_BAD_USIZE", 4000);
        std::env::remove_var("HACKATHON_JUDGE_TEST_BAD_USIZE");

        match result {
            Err(ConfigError::EnvVarParseFailed { var_name, value, .. }) => {
                assert_eq!(var_name, "HACKATHON_JUDGE_TEST_BAD_USIZE");
                assert_eq!(value, "four thousand");
            }
            other => panic!("期望解析错误，实际: {:?}", other),
        }
    }

    #[test]
    fn test_env_or_uses_default_when_unset() {
        let value: usize = env_or("HACKATHON_JUDGE_TEST_UNSET_VAR", 42).unwrap();
        assert_eq!(value, 42);
    }
}
