//! 单篇论文处理器 - 编排层
//!
//! ## 职责
//!
//! 本模块负责单篇论文的完整流水线，是论文级别的编排器。
//!
//! ## 核心流程
//!
//! 1. **下载 PDF**：委托 PdfFetcher（内部重试 + 大小校验）
//! 2. **提取文本**：委托 PdfExtractor（前 N 页，放在 spawn_blocking）
//! 3. **生成摘要**：委托 Summarizer
//!
//! ## 失败隔离
//!
//! 任何阶段失败都记录日志并返回 `Ok(None)`，该篇论文被丢弃，
//! 不向批次传播。只有任务本身的异常（如 JoinError）才向上返回 `Err`。

use anyhow::Result;
use tracing::{error, info};

use crate::config::Config;
use crate::models::paper::{PaperRef, ProcessingResult};
use crate::services::{PdfExtractor, PdfFetcher, Summarizer};
use crate::utils::logging::truncate_text;

/// 处理单篇论文
///
/// # 参数
/// - `paper`: 论文元数据
/// - `paper_index`: 论文索引（用于日志，从 1 开始）
/// - `keyword`: 本次运行的关键词（决定输出目录）
/// - `config`: 配置
/// - `client`: 共享的 HTTP 客户端
///
/// # 返回
/// 成功返回 `Ok(Some(结果))`，该篇失败返回 `Ok(None)`。
pub async fn process_paper(
    paper: PaperRef,
    paper_index: usize,
    keyword: &str,
    config: &Config,
    client: reqwest::Client,
) -> Result<Option<ProcessingResult>> {
    log_paper_start(paper_index, &paper);

    // ========== 下载 PDF ==========
    let fetcher = PdfFetcher::new(client);
    let artifact = match fetcher.download(&paper, &config.pdf_dir(keyword)).await {
        Ok(artifact) => artifact,
        Err(e) => {
            error!("[论文 {}] ❌ PDF 下载失败: {}", paper_index, e);
            return Ok(None);
        }
    };

    // ========== 提取文本 ==========
    // lopdf 的解析是同步的 CPU 密集操作，放到阻塞线程池执行
    let pdf_path = artifact.pdf_path.clone();
    let pages_to_extract = config.pages_to_extract;
    let extracted = tokio::task::spawn_blocking(move || {
        PdfExtractor::new().extract_first_n_pages(&pdf_path, pages_to_extract)
    })
    .await?;

    let extracted = match extracted {
        Ok(extracted) => extracted,
        Err(e) => {
            error!("[论文 {}] ❌ PDF 文本提取失败: {}", paper_index, e);
            return Ok(None);
        }
    };

    if extracted.text.is_empty() {
        info!(
            "[论文 {}] ⚠️ PDF 前 {} 页没有可用文本，跳过摘要",
            paper_index, pages_to_extract
        );
        return Ok(None);
    }

    // ========== 生成摘要 ==========
    let summarizer = Summarizer::new(config);
    let summary = match summarizer.summarize(&extracted.text).await {
        Ok(summary) => summary,
        Err(e) => {
            error!("[论文 {}] ❌ LLM 摘要失败: {}", paper_index, e);
            return Ok(None);
        }
    };

    info!("[论文 {}] ✅ 处理完成: {}", paper_index, summary.title);

    Ok(Some(ProcessingResult {
        summary,
        pdf_path: artifact.pdf_path,
    }))
}

// ========== 日志辅助函数 ==========

fn log_paper_start(paper_index: usize, paper: &PaperRef) {
    info!("\n[论文 {}] {}", paper_index, "─".repeat(30));
    info!(
        "[论文 {}] 开始处理: {}",
        paper_index,
        truncate_text(&paper.title, 60)
    );
    info!("[论文 {}] 作者数: {}", paper_index, paper.authors.len());
    if let Some(published) = &paper.published {
        info!(
            "[论文 {}] 发表时间: {}",
            paper_index,
            published.format("%Y-%m-%d")
        );
    }
}
