//! 论文处理管线中流转的数据结构
//!
//! 所有结构在入口边界一次性构造，之后不再修改。

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// arXiv 检索到的一篇论文的元数据
///
/// 由 `ArxivSearch` 在入口边界校验后构造；缺少标题或 PDF 链接的
/// 条目在构造时即被丢弃。
#[derive(Debug, Clone)]
pub struct PaperRef {
    pub title: String,
    pub authors: Vec<String>,
    pub abstract_text: String,
    pub pdf_url: String,
    pub published: Option<DateTime<Utc>>,
}

/// 下载成功后的本地 PDF 文件
///
/// 文件在运行结束后保留，不做清理。
#[derive(Debug, Clone)]
pub struct LocalArtifact {
    pub title: String,
    pub pdf_path: PathBuf,
    pub byte_size: u64,
}

/// 从 PDF 前 N 页提取出的文本（临时数据，提取后立即送入摘要）
#[derive(Debug, Clone)]
pub struct ExtractedText {
    pub source_path: PathBuf,
    pub text: String,
    pub pages_consumed: u32,
}

/// LLM 生成的论文摘要，最终持久化的输出单元
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRecord {
    pub title: String,
    pub translated_title: String,
    pub core_idea_summary: String,
    pub innovations: Vec<String>,
    pub methodology: Vec<String>,
    pub conclusions: Vec<String>,
    #[serde(default)]
    pub repo_url: Option<String>,
}

/// 一篇论文完整走完管线后的结果
///
/// 摘要配合 PDF 路径，供后续选择渲染对象使用。
/// 不变式：每篇成功的论文恰好产生一个结果；失败的论文不产生
/// 任何占位记录。
#[derive(Debug, Clone)]
pub struct ProcessingResult {
    pub summary: SummaryRecord,
    pub pdf_path: PathBuf,
}

impl ProcessingResult {
    /// 摘要是否带有非空的代码仓库链接
    pub fn has_repo_url(&self) -> bool {
        self.summary
            .repo_url
            .as_deref()
            .is_some_and(|url| !url.trim().is_empty())
    }
}
