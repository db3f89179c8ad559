//! 摘要转 Markdown - 业务能力层
//!
//! 只负责"把摘要列表拼成一篇 Markdown 文档"能力，纯字符串操作。

use crate::models::paper::SummaryRecord;

/// Markdown 组装器
///
/// `title_level` 是论文标题使用的标题级别（`##` 为 2），
/// 各小节在此基础上加一级。
pub struct MarkdownConverter {
    title_level: usize,
}

impl MarkdownConverter {
    pub fn new(title_level: usize) -> Self {
        Self { title_level }
    }

    /// 渲染一个带编号列表的小节
    fn indexed_items(&self, title: &str, items: &[String]) -> String {
        let mut content = format!("{} {}\n", "#".repeat(self.title_level + 1), title);

        for (i, item) in items.iter().enumerate() {
            content.push_str(&format!("{}. {}\n", i + 1, item));
        }
        content
    }

    /// 把所有摘要拼成一篇 Markdown 文档
    pub fn from_summaries(&self, summaries: &[SummaryRecord]) -> String {
        let mut md_content = String::new();

        for summary in summaries {
            md_content.push_str(&format!(
                "{} {}\n",
                "#".repeat(self.title_level),
                summary.title
            ));
            md_content.push_str(&summary.translated_title);
            md_content.push('\n');
            md_content.push_str("论文：\n");
            if let Some(repo) = summary.repo_url.as_deref().filter(|r| !r.trim().is_empty()) {
                md_content.push_str(&format!("代码：{}\n", repo));
            }
            md_content.push_str(&format!("{} 文章解析\n", "#".repeat(self.title_level + 1)));
            md_content.push_str(&summary.core_idea_summary);
            md_content.push('\n');
            md_content.push_str(&self.indexed_items("创新点", &summary.innovations));
            md_content.push_str(&self.indexed_items("研究方法", &summary.methodology));
            md_content.push_str(&self.indexed_items("研究结论", &summary.conclusions));
        }

        md_content
    }
}
