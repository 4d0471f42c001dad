/// 日志工具模块
///
/// 提供日志初始化和输出的辅助函数
use tracing::info;
use tracing_subscriber::EnvFilter;

/// 初始化日志
///
/// `RUST_LOG` 优先；否则默认 `info`，详细模式下为 `debug`
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// 记录程序启动信息
///
/// # 参数
/// - `model_name`: 评审模型
/// - `total`: 待评估作品数量
pub fn log_startup(model_name: &str, total: usize) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 黑客马拉松作品评审");
    info!(
        "开始时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("🤖 评审模型: {}", model_name);
    info!("📊 待评估作品: {} 个 (逐个顺序评估)", total);
    info!("{}", "=".repeat(60));
}

/// 打印最终统计信息
///
/// # 参数
/// - `success`: 成功数量
/// - `failed`: 失败数量
/// - `fallback`: 使用估计分数的数量
/// - `results_file`: 结果文件路径
pub fn print_final_stats(success: usize, failed: usize, fallback: usize, results_file: &str) {
    info!("\n{}", "=".repeat(60));
    info!("📊 全部评估完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 成功: {}/{}", success, success + failed);
    info!("⚠️ 其中估计分数: {}", fallback);
    info!("❌ 失败: {}", failed);
    info!("{}", "=".repeat(60));
    info!("\n结果已保存至: {}", results_file);
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
