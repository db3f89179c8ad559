//! 日志工具模块

/// 截断长文本用于日志显示
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_unchanged() {
        assert_eq!(truncate_text("短文本", 10), "短文本");
    }

    #[test]
    fn long_text_truncated_with_ellipsis() {
        assert_eq!(truncate_text("abcdefgh", 5), "abcde...");
    }
}
