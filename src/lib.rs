//! # arXiv Summarizer
//!
//! 一个用于批量下载并摘要 arXiv 论文的 Rust 应用程序
//!
//! ## 架构设计
//!
//! 本系统采用严格的三层架构：
//!
//! ### ① 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，只处理单篇论文
//! - `ArxivSearch` - arXiv 元数据检索能力
//! - `PdfFetcher` - PDF 下载能力（重试 + 大小校验）
//! - `PdfExtractor` - PDF 文本提取能力（前 N 页，逐页提取）
//! - `Summarizer` - LLM 摘要能力
//! - `ReportWriter` - JSON / Markdown 报告写入能力
//! - `PdfRenderer` - PDF 转图像能力
//!
//! ### ② 编排层（Orchestration）
//! - `orchestrator/batch_processor` - 批量论文处理器，管理并发和汇总
//! - `orchestrator/paper_processor` - 单篇论文处理器（下载 → 提取 → 摘要）
//!
//! ### ③ 数据层（Models）
//! - `models/` - PaperRef / LocalArtifact / SummaryRecord 等固定结构
//! - `models/loaders` - id 列表文件加载
//!
//! ## 失败隔离
//!
//! 每篇论文是一个独立的处理单元：任何阶段失败只影响该单元，
//! 最终结果按输入顺序收集所有成功的单元。

pub mod config;
pub mod error;
pub mod logger;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;

// 重新导出常用类型
pub use config::Config;
pub use error::{ExtractError, FetchError, RenderError, ReportError};
pub use models::paper::{LocalArtifact, PaperRef, ProcessingResult, SummaryRecord};
pub use orchestrator::App;
