//! 按字符（而非字节）截取文本

/// 返回前 `max_chars` 个字符组成的切片
pub fn take_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

/// 超过 `max_chars` 时截断并追加 `marker`
pub fn truncate_with_marker(text: &str, max_chars: usize, marker: &str) -> String {
    let head = take_chars(text, max_chars);
    if head.len() < text.len() {
        format!("{}{}", head, marker)
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_chars_respects_char_boundaries() {
        assert_eq!(take_chars("héllo", 2), "hé");
        assert_eq!(take_chars("abc", 10), "abc");
        assert_eq!(take_chars("abc", 0), "");
    }

    #[test]
    fn test_truncate_with_marker() {
        assert_eq!(truncate_with_marker("abcdef", 3, "..."), "abc...");
        assert_eq!(truncate_with_marker("abc", 3, "..."), "abc");
    }
}
