use crate::models::submission::EvaluationRequest;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs;

/// 从 TOML 文件加载一次评估请求
///
/// 文件包含 `[hackathon]` 和 `[submission]` 两张表
pub async fn load_request(toml_file_path: &Path) -> Result<EvaluationRequest> {
    let content = fs::read_to_string(toml_file_path)
        .await
        .with_context(|| format!("无法读取TOML文件: {}", toml_file_path.display()))?;

    let mut request: EvaluationRequest = toml::from_str(&content)
        .with_context(|| format!("无法解析TOML文件: {}", toml_file_path.display()))?;

    request.file_path = Some(toml_file_path.to_string_lossy().to_string());

    Ok(request)
}

/// 加载文件夹中的所有评估请求
///
/// 解析失败的文件只记录警告，不中断加载；结果按文件名排序
pub async fn load_all_requests(folder_path: &str) -> Result<Vec<EvaluationRequest>> {
    let folder = PathBuf::from(folder_path);

    if !folder.exists() {
        anyhow::bail!("文件夹不存在: {}", folder_path);
    }

    let mut toml_files = Vec::new();
    let mut entries = fs::read_dir(&folder)
        .await
        .with_context(|| format!("无法读取文件夹: {}", folder_path))?;

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.extension().and_then(|s| s.to_str()) == Some("toml") {
            toml_files.push(path);
        }
    }
    toml_files.sort();

    let mut requests = Vec::new();
    for path in toml_files {
        tracing::info!(
            "正在加载: {}",
            path.file_name().unwrap_or_default().to_string_lossy()
        );

        match load_request(&path).await {
            Ok(request) => {
                tracing::info!(
                    "成功加载作品 {} (团队: {})",
                    request.submission.project_name,
                    request.submission.team_name
                );
                requests.push(request);
            }
            Err(e) => {
                tracing::warn!("加载文件失败 {}: {:#}", path.display(), e);
            }
        }
    }

    Ok(requests)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r##"
[hackathon]
name = "Green Code 2025"
description = "Tools that reduce energy use"
evaluation_prompt = "Favor measurable impact."

[[hackathon.criteria]]
name = "Impact"
weight = 0.6
description = "Measured savings"

[[hackathon.criteria]]
name = "Craft"
weight = 0.4

[submission]
team_name = "Watts Up"
participant_email = "team@example.com"
project_name = "PowerLens"
project_description = "Profiles power draw per request"
code_content = "fn main() {}"
documentation_content = "# PowerLens"
"##;

    #[tokio::test]
    async fn test_load_request_parses_both_tables() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("powerlens.toml");
        std::fs::write(&path, SAMPLE).unwrap();

        let request = load_request(&path).await.unwrap();
        assert_eq!(request.hackathon.name, "Green Code 2025");
        assert_eq!(request.hackathon.criteria.len(), 2);
        assert_eq!(request.hackathon.criteria[1].description, "");
        assert_eq!(request.submission.project_name, "PowerLens");
        assert_eq!(request.submission.code_content, "fn main() {}");
        assert_eq!(request.submission.documentation_content, "# PowerLens");
        assert_eq!(request.file_path.as_deref(), Some(path.to_string_lossy().as_ref()));
    }

    #[tokio::test]
    async fn test_load_all_requests_skips_broken_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.toml"), SAMPLE).unwrap();
        std::fs::write(dir.path().join("b.toml"), "[submission]\nteam_name = 3").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let requests = load_all_requests(dir.path().to_str().unwrap()).await.unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].submission.team_name, "Watts Up");
    }

    #[tokio::test]
    async fn test_load_all_requests_missing_folder() {
        let result = load_all_requests("/definitely/not/a/real/folder").await;
        assert!(result.unwrap_err().to_string().contains("文件夹不存在"));
    }
}
