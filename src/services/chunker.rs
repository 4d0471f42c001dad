//! 内容分块服务 - 业务能力层
//!
//! 只负责"把长文本切成有界的分块"能力，不关心评审
//!
//! ## 规则
//! 1. 先按文件分隔符做结构预切分（`===` / `---` 开头的行，或包含 `File:` 的行）
//! 2. 不超过上限的段落直接成为一个分块
//! 3. 超长段落按行边界切分，相邻分块重叠 `overlap` 个字符
//! 4. 分块编号跨段落连续，全部完成后统一写入 `total_chunks`

use tracing::{debug, warn};

use crate::models::Chunk;

/// 向回查找换行符的最大距离
const LINE_LOOKBACK: usize = 100;

/// 将文本切分为有重叠的分块
///
/// 长度按字符计算。每个分块会去掉首尾空白，空分块被丢弃。
///
/// # 参数
/// - `text`: 原始文本
/// - `max_chunk_size`: 每个分块的最大字符数
/// - `overlap`: 相邻分块的重叠字符数
pub fn chunk_text(text: &str, max_chunk_size: usize, overlap: usize) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    let len = chars.len();

    if len <= max_chunk_size {
        return vec![text.to_string()];
    }

    let max_chunk_size = max_chunk_size.max(1);
    let lookback = LINE_LOOKBACK.min(max_chunk_size / 10);

    let mut chunks = Vec::new();
    let mut start = 0;

    while start < len {
        let mut end = start + max_chunk_size;

        if end < len {
            // 从 end 向回找换行符，分块包含该换行符
            if let Some(i) = (0..lookback).find(|&i| chars[end - i] == '\n') {
                end = end - i + 1;
            }
        }
        let end = end.min(len);

        let piece: String = chars[start..end].iter().collect();
        let trimmed = piece.trim();
        if !trimmed.is_empty() {
            chunks.push(trimmed.to_string());
        }

        if end >= len {
            break;
        }

        // start 必须严格递增；重叠过大时本步放弃重叠
        let next = end.saturating_sub(overlap);
        start = if next > start {
            next
        } else {
            warn!(
                "重叠 {} 字符会导致分块无法前进 (start={}, end={})，本次不重叠",
                overlap, start, end
            );
            end
        };
    }

    chunks
}

/// 按文件分隔符把内容预切分为段落
///
/// 没有找到分隔符（或只得到一个段落）时返回原始内容
pub fn split_sections(content: &str) -> Vec<String> {
    let mut sections = Vec::new();
    let mut current = String::new();

    for line in content.split('\n') {
        if is_section_marker(line) {
            if !current.trim().is_empty() {
                sections.push(current.trim().to_string());
            }
            current.clear();
        }
        current.push_str(line);
        current.push('\n');
    }

    if !current.trim().is_empty() {
        sections.push(current.trim().to_string());
    }

    if sections.len() <= 1 {
        return vec![content.to_string()];
    }

    sections
}

fn is_section_marker(line: &str) -> bool {
    line.starts_with("===") || line.starts_with("---") || line.contains("File:")
}

/// 对代码内容分块，尽量保持文件边界
///
/// # 返回
/// 按文档顺序排列的分块，编号从 1 开始，每个分块都带有最终的 `total_chunks`
pub fn chunk_code_content(code_content: &str, max_chunk_size: usize, overlap: usize) -> Vec<Chunk> {
    if code_content.chars().count() <= max_chunk_size {
        let mut chunk = Chunk::new(1, code_content.to_string());
        chunk.total_chunks = 1;
        return vec![chunk];
    }

    let sections = split_sections(code_content);
    debug!("结构预切分得到 {} 个段落", sections.len());

    let mut chunks: Vec<Chunk> = Vec::new();
    for section in sections {
        if section.chars().count() <= max_chunk_size {
            chunks.push(Chunk::new(chunks.len() + 1, section));
        } else {
            for piece in chunk_text(&section, max_chunk_size, overlap) {
                chunks.push(Chunk::new(chunks.len() + 1, piece));
            }
        }
    }

    let total_chunks = chunks.len();
    for chunk in &mut chunks {
        chunk.total_chunks = total_chunks;
    }

    chunks
}

/// 生成分块概要，用于日志
pub fn chunk_summary(chunks: &[Chunk]) -> String {
    let total_size: usize = chunks.iter().map(|c| c.size).sum();
    let average = if chunks.is_empty() { 0 } else { total_size / chunks.len() };

    let mut summary = format!(
        "Code Analysis Summary:\n- Total chunks: {}\n- Total content size: {} characters\n- Average chunk size: {} characters\n\nChunk breakdown:\n",
        chunks.len(),
        total_size,
        average
    );

    for chunk in chunks {
        let preview: String = chunk
            .content
            .chars()
            .take(100)
            .map(|c| if c == '\n' { ' ' } else { c })
            .collect();
        summary.push_str(&format!(
            "  Chunk {}: {} chars - {}...\n",
            chunk.chunk_id, chunk.size, preview
        ));
    }

    summary
}
