//! 批量论文处理器 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个应用的入口，负责批量论文的处理和资源管理。
//!
//! ## 核心功能
//!
//! 1. **应用初始化**：创建输出目录、打印启动信息
//! 2. **论文检索**：优先使用 id 列表，否则按关键词搜索
//! 3. **并发控制**：使用 Semaphore 限制并发数量
//! 4. **顺序收集**：按检索顺序等待各任务，丢弃失败的论文
//! 5. **报告持久化**：JSON 和 Markdown 各自独立写入
//! 6. **页面渲染**：每次运行最多渲染一篇论文的页面图像
//!
//! ## 设计特点
//!
//! - **顶层编排**：不处理单篇论文的细节
//! - **失败隔离**：单篇失败不影响批次，检索失败才终止运行
//! - **向下委托**：委托 paper_processor 处理单篇论文

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::sync::Semaphore;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::models::loaders::load_id_list;
use crate::models::paper::{PaperRef, ProcessingResult};
use crate::orchestrator::paper_processor;
use crate::services::{ArxivSearch, PdfRenderer, ReportWriter};

/// 应用主结构
pub struct App {
    config: Config,
    keyword: String,
    max_results: usize,
    client: reqwest::Client,
}

impl App {
    /// 初始化应用
    ///
    /// 输出目录创建失败属于无法开始运行的错误，直接向上返回。
    pub fn initialize(config: Config, keyword: String, max_results: usize) -> Result<Self> {
        let report_dir = config.report_dir(&keyword);
        std::fs::create_dir_all(&report_dir)
            .with_context(|| format!("无法创建输出目录: {}", report_dir.display()))?;

        log_startup(&config, &keyword, max_results);

        Ok(Self {
            config,
            keyword,
            max_results,
            client: reqwest::Client::new(),
        })
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> Result<()> {
        // 检索论文（id 列表优先）
        let papers = self.fetch_papers().await?;

        if papers.is_empty() {
            warn!("⚠️ 没有检索到任何论文，程序结束");
            return Ok(());
        }

        let total_papers = papers.len();
        log_papers_loaded(total_papers, self.config.max_concurrent_papers);

        // 并发处理所有论文，按检索顺序收集成功结果
        let results = self.process_all_papers(papers).await;

        print_final_stats(results.len(), total_papers);

        if results.is_empty() {
            warn!("⚠️ 没有论文处理成功，报告将为空");
        }

        // 持久化报告（两种格式独立写入），没有成功的论文时写出空报告
        self.persist_reports(&results).await;

        // 渲染一篇论文的页面图像
        if self.config.render_images {
            self.render_selected_pdf(&results).await;
        }

        Ok(())
    }

    /// 检索论文
    ///
    /// `<data_root>/<keyword>/id.txt` 存在且非空时按 id 列表检索，
    /// 否则按关键词搜索。
    async fn fetch_papers(&self) -> Result<Vec<PaperRef>> {
        let search = ArxivSearch::new(
            self.client.clone(),
            self.config.arxiv_api_base_url.clone(),
            self.max_results,
            self.config.sort_by,
        );

        let id_list = load_id_list(&self.config.id_list_path(&self.keyword)).await;
        if !id_list.is_empty() {
            info!("📋 检测到 id 列表，使用 id 列表检索");
            return search.search_by_id_list(&id_list).await;
        }

        search.search(&self.keyword).await
    }

    /// 并发处理所有论文
    ///
    /// 每篇论文一个任务，Semaphore 限制同时运行的数量。
    /// 按创建顺序等待任务，保证结果顺序与检索顺序一致。
    async fn process_all_papers(&self, papers: Vec<PaperRef>) -> Vec<ProcessingResult> {
        let semaphore = Arc::new(Semaphore::new(self.config.max_concurrent_papers));
        let mut handles = Vec::new();

        for (idx, paper) in papers.into_iter().enumerate() {
            let paper_index = idx + 1;
            let semaphore = semaphore.clone();
            let keyword = self.keyword.clone();
            let config = self.config.clone();
            let client = self.client.clone();

            let handle = tokio::spawn(async move {
                let _permit = match semaphore.acquire_owned().await {
                    Ok(permit) => permit,
                    Err(_) => return None,
                };

                match paper_processor::process_paper(paper, paper_index, &keyword, &config, client)
                    .await
                {
                    Ok(result) => result,
                    Err(e) => {
                        error!("[论文 {}] ❌ 任务执行失败: {}", paper_index, e);
                        None
                    }
                }
            });
            handles.push((paper_index, handle));
        }

        // 按创建顺序等待，收集成功结果
        let mut results = Vec::new();
        for (paper_index, handle) in handles {
            match handle.await {
                Ok(Some(result)) => results.push(result),
                Ok(None) => {}
                Err(e) => {
                    error!("[论文 {}] ❌ 任务异常退出: {}", paper_index, e);
                }
            }
        }

        results
    }

    /// 持久化 JSON 和 Markdown 报告
    ///
    /// 两种格式独立写入，一种失败只记录日志，不影响另一种。
    async fn persist_reports(&self, results: &[ProcessingResult]) {
        let summaries: Vec<_> = results.iter().map(|r| r.summary.clone()).collect();
        let writer = ReportWriter::new(self.config.data_root.clone());

        match writer.save_json(&summaries, &self.keyword).await {
            Ok(path) => info!("✅ JSON 报告: {}", path.display()),
            Err(e) => error!("❌ JSON 报告写入失败: {}", e),
        }

        match writer.save_markdown(&summaries, &self.keyword).await {
            Ok(path) => info!("✅ Markdown 报告: {}", path.display()),
            Err(e) => error!("❌ Markdown 报告写入失败: {}", e),
        }
    }

    /// 选出一篇论文并渲染其页面图像
    ///
    /// 渲染失败只记录日志，不影响运行结果。
    async fn render_selected_pdf(&self, results: &[ProcessingResult]) {
        let Some(target) = select_render_target(results) else {
            return;
        };

        info!("🖼️ 选中渲染对象: {}", target.summary.title);

        let pdf_path = target.pdf_path.clone();
        let zoom = self.config.render_zoom;

        let render_result =
            tokio::task::spawn_blocking(move || PdfRenderer::new(zoom).render_to_images(&pdf_path))
                .await;

        match render_result {
            Ok(Ok(output_dir)) => info!("✅ 页面图像: {}", output_dir.display()),
            Ok(Err(e)) => error!("❌ 页面渲染失败: {}", e),
            Err(e) => error!("❌ 渲染任务异常退出: {}", e),
        }
    }
}

/// 选择渲染对象：优先带代码仓库链接的论文，否则取第一篇
fn select_render_target(results: &[ProcessingResult]) -> Option<&ProcessingResult> {
    results
        .iter()
        .find(|r| r.has_repo_url())
        .or_else(|| results.first())
}

// ========== 日志辅助函数 ==========

fn log_startup(config: &Config, keyword: &str, max_results: usize) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - arXiv 论文摘要模式");
    info!("🔍 关键词: {}", keyword);
    info!("📄 最多检索: {} 篇", max_results);
    info!("📊 最大并发数: {}", config.max_concurrent_papers);
    info!("📖 每篇提取: {} 页", config.pages_to_extract);
    info!("{}", "=".repeat(60));
}

fn log_papers_loaded(total: usize, max_concurrent: usize) {
    info!("✓ 检索到 {} 篇待处理的论文", total);
    info!("📋 并发上限 {} 篇\n", max_concurrent);
}

fn print_final_stats(success: usize, total: usize) {
    info!("\n{}", "=".repeat(60));
    info!("📊 全部处理完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 成功: {}/{}", success, total);
    info!("❌ 失败: {}", total - success);
    info!("{}", "=".repeat(60));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::paper::SummaryRecord;
    use std::time::Duration;

    fn result(title: &str, repo_url: Option<&str>) -> ProcessingResult {
        ProcessingResult {
            summary: SummaryRecord {
                title: title.to_string(),
                translated_title: String::new(),
                core_idea_summary: String::new(),
                innovations: vec![],
                methodology: vec![],
                conclusions: vec![],
                repo_url: repo_url.map(String::from),
            },
            pdf_path: std::path::PathBuf::from(format!("{}.pdf", title)),
        }
    }

    #[test]
    fn render_target_prefers_paper_with_repo() {
        let results = vec![
            result("A", None),
            result("B", Some("https://github.com/x/b")),
            result("C", Some("https://github.com/x/c")),
        ];
        let target = select_render_target(&results).unwrap();
        assert_eq!(target.summary.title, "B");
    }

    #[test]
    fn render_target_falls_back_to_first() {
        let results = vec![result("A", Some("  ")), result("B", None)];
        let target = select_render_target(&results).unwrap();
        assert_eq!(target.summary.title, "A");
    }

    #[test]
    fn render_target_is_none_for_empty_batch() {
        assert!(select_render_target(&[]).is_none());
    }

    /// 结果顺序由等待顺序决定，与任务完成先后无关
    #[tokio::test]
    async fn results_keep_spawn_order_and_drop_failures() {
        let delays = [(1usize, 30u64, true), (2, 1, false), (3, 10, true)];
        let mut handles = Vec::new();

        for (index, delay_ms, succeeds) in delays {
            handles.push(tokio::spawn(async move {
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                succeeds.then(|| result(&format!("paper-{}", index), None))
            }));
        }

        let mut results = Vec::new();
        for handle in handles {
            if let Ok(Some(r)) = handle.await {
                results.push(r);
            }
        }

        let titles: Vec<_> = results.iter().map(|r| r.summary.title.as_str()).collect();
        assert_eq!(titles, vec!["paper-1", "paper-3"]);
    }
}
