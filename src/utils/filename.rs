//! 文件名清洗
//!
//! 将任意论文标题映射为合法、有界长度的本地文件名。
//! 纯函数，任何输入都有输出。

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// Windows 和常见文件系统不允许的字符
static ILLEGAL_CHARS: Lazy<Regex> = Lazy::new(|| Regex::new(r#"[<>:"/\\|?*]"#).expect("valid regex"));
static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));

/// 大多数文件系统的文件名长度上限
const MAX_FILENAME_LENGTH: usize = 255;

/// 清洗文件名，保证结果合法且非空
///
/// 步骤：
/// 1. NFKD 分解后丢弃非 ASCII 字符（带变音符的字母退化为基础字母）
/// 2. 移除文件系统不允许的字符
/// 3. 空白字符串替换为下划线
/// 4. 去掉开头的 `.`（避免隐藏文件）
/// 5. 截断到 255 个字符
/// 6. 结果为空时使用默认名称
pub fn sanitize_filename(raw: &str) -> String {
    let ascii: String = raw.nfkd().filter(char::is_ascii).collect();

    let without_illegal = ILLEGAL_CHARS.replace_all(&ascii, "");
    let underscored = WHITESPACE_RUN.replace_all(&without_illegal, "_");
    let visible = underscored.trim_start_matches('.');

    let truncated: String = visible.chars().take(MAX_FILENAME_LENGTH).collect();

    if truncated.is_empty() {
        "unnamed_file".to_string()
    } else {
        truncated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_valid(result: &str) {
        assert!(!result.is_empty());
        assert!(result.chars().count() <= MAX_FILENAME_LENGTH);
        assert!(!result.starts_with('.'));
        for c in ['<', '>', ':', '"', '/', '\\', '|', '?', '*'] {
            assert!(!result.contains(c), "illegal char {:?} in {:?}", c, result);
        }
    }

    #[test]
    fn collapses_whitespace_to_underscore() {
        assert_eq!(
            sanitize_filename("Attention Is  All\tYou Need"),
            "Attention_Is_All_You_Need"
        );
    }

    #[test]
    fn removes_illegal_characters() {
        let result = sanitize_filename(r#"Graphs: A <Survey> of "Methods" a/b\c|d?e*f"#);
        assert_valid(&result);
        assert_eq!(result, "Graphs_A_Survey_of_Methods_abcdef");
    }

    #[test]
    fn decomposes_accents_and_drops_non_ascii() {
        // é 分解为 e + 重音符号，重音符号被丢弃；汉字整体丢弃
        assert_eq!(sanitize_filename("Résumé 量子"), "Resume_");
    }

    #[test]
    fn strips_leading_dots() {
        let result = sanitize_filename("...hidden paper");
        assert_valid(&result);
        assert_eq!(result, "hidden_paper");
    }

    #[test]
    fn truncates_to_max_length() {
        let long = "a".repeat(1000);
        let result = sanitize_filename(&long);
        assert_valid(&result);
        assert_eq!(result.len(), MAX_FILENAME_LENGTH);
    }

    #[test]
    fn empty_and_all_illegal_fall_back_to_default() {
        assert_eq!(sanitize_filename(""), "unnamed_file");
        assert_eq!(sanitize_filename("<>:?*"), "unnamed_file");
        assert_eq!(sanitize_filename("量子计算"), "unnamed_file");
    }
}
