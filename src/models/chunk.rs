use serde::{Deserialize, Serialize};

/// 代码分块
///
/// `chunk_id` 从 1 开始连续编号，同一次分块的所有分块共享 `total_chunks`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    pub chunk_id: usize,
    pub total_chunks: usize,
    /// 内容长度（字符数）
    pub size: usize,
    pub content: String,
}

impl Chunk {
    pub fn new(chunk_id: usize, content: String) -> Self {
        Self {
            chunk_id,
            total_chunks: 0,
            size: content.chars().count(),
            content,
        }
    }

    /// 合并评分时的权重，等于分块大小
    pub fn weight(&self) -> f64 {
        self.size as f64
    }
}
