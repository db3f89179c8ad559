//! arXiv 检索服务 - 业务能力层
//!
//! 只负责"从 arXiv 取元数据"能力，不关心流程
//!
//! ## 技术栈
//! - `reqwest` 请求 arXiv 的 Atom API
//! - `feed-rs` 解析 Atom feed
//!
//! 动态的 feed 条目在这里收敛为固定结构的 [`PaperRef`]：
//! 缺少标题或 PDF 链接的条目直接跳过并记录警告。

use anyhow::{Context, Result};
use feed_rs::model::{Entry, Feed};
use feed_rs::parser;
use tracing::{debug, info, warn};

use crate::models::paper::PaperRef;

/// 搜索结果排序方式，对应 arXiv API 的 `sortBy` 参数
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortCriterion {
    Relevance,
    SubmittedDate,
    LastUpdatedDate,
}

impl SortCriterion {
    pub fn as_query(&self) -> &'static str {
        match self {
            SortCriterion::Relevance => "relevance",
            SortCriterion::SubmittedDate => "submittedDate",
            SortCriterion::LastUpdatedDate => "lastUpdatedDate",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "relevance" => Some(SortCriterion::Relevance),
            "submitteddate" | "submitted_date" => Some(SortCriterion::SubmittedDate),
            "lastupdateddate" | "last_updated_date" => Some(SortCriterion::LastUpdatedDate),
            _ => None,
        }
    }
}

/// arXiv 检索服务
pub struct ArxivSearch {
    client: reqwest::Client,
    api_base_url: String,
    max_results: usize,
    sort_by: SortCriterion,
}

impl ArxivSearch {
    pub fn new(
        client: reqwest::Client,
        api_base_url: impl Into<String>,
        max_results: usize,
        sort_by: SortCriterion,
    ) -> Self {
        Self {
            client,
            api_base_url: api_base_url.into(),
            max_results,
            sort_by,
        }
    }

    /// 按关键词搜索论文
    pub async fn search(&self, keyword: &str) -> Result<Vec<PaperRef>> {
        info!("🔍 正在搜索 arXiv，关键词: {}", keyword);

        let feed = self
            .query(&[
                ("search_query", format!("all:{}", keyword)),
                ("start", "0".to_string()),
                ("max_results", self.max_results.to_string()),
                ("sortBy", self.sort_by.as_query().to_string()),
                ("sortOrder", "descending".to_string()),
            ])
            .await?;

        let papers = refs_from_feed(feed);
        info!("✓ 检索到 {} 篇论文", papers.len());
        Ok(papers)
    }

    /// 按 id 列表检索论文
    ///
    /// 空列表直接返回空结果，不发起网络请求。
    pub async fn search_by_id_list(&self, id_list: &[String]) -> Result<Vec<PaperRef>> {
        if id_list.is_empty() {
            return Ok(Vec::new());
        }

        info!("🔍 按 id 列表检索 arXiv，共 {} 个 id", id_list.len());

        let feed = self
            .query(&[
                ("id_list", id_list.join(",")),
                ("sortBy", self.sort_by.as_query().to_string()),
                ("sortOrder", "descending".to_string()),
            ])
            .await?;

        let papers = refs_from_feed(feed);
        info!("✓ 检索到 {} 篇论文", papers.len());
        Ok(papers)
    }

    async fn query(&self, params: &[(&str, String)]) -> Result<Feed> {
        let response = self
            .client
            .get(&self.api_base_url)
            .query(params)
            .send()
            .await
            .context("arXiv API 请求失败")?
            .error_for_status()
            .context("arXiv API 返回错误状态码")?;

        let body = response.bytes().await.context("读取 arXiv API 响应失败")?;

        parser::parse(body.as_ref()).context("解析 arXiv Atom feed 失败")
    }
}

/// 将 feed 条目转换为固定结构的 PaperRef，跳过不完整的条目
fn refs_from_feed(feed: Feed) -> Vec<PaperRef> {
    feed.entries
        .into_iter()
        .filter_map(|entry| {
            let id = entry.id.clone();
            match paper_from_entry(entry) {
                Some(paper) => {
                    debug!("找到论文: {}", paper.title);
                    Some(paper)
                }
                None => {
                    warn!("⚠️ 跳过不完整的 feed 条目: {}", id);
                    None
                }
            }
        })
        .collect()
}

fn paper_from_entry(entry: Entry) -> Option<PaperRef> {
    let title = entry
        .title
        .as_ref()
        .map(|t| normalize_whitespace(&t.content))
        .filter(|t| !t.is_empty())?;

    let pdf_url = pdf_link(&entry)?;

    let authors = entry
        .authors
        .into_iter()
        .map(|person| person.name)
        .collect();

    let abstract_text = entry
        .summary
        .map(|s| s.content.trim().to_string())
        .unwrap_or_default();

    Some(PaperRef {
        title,
        authors,
        abstract_text,
        pdf_url,
        published: entry.published,
    })
}

/// 选择条目的 PDF 链接
///
/// arXiv 的条目带一个 `type="application/pdf"`（且 `title="pdf"`）的
/// link；都没有时从摘要页 id 推导。
fn pdf_link(entry: &Entry) -> Option<String> {
    entry
        .links
        .iter()
        .find(|link| {
            link.media_type.as_deref() == Some("application/pdf")
                || link.title.as_deref() == Some("pdf")
        })
        .map(|link| link.href.clone())
        .or_else(|| {
            entry
                .id
                .contains("/abs/")
                .then(|| entry.id.replace("/abs/", "/pdf/"))
        })
}

/// arXiv 标题常含换行和缩进，统一压成单个空格
fn normalize_whitespace(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <title>ArXiv Query Results</title>
  <id>http://arxiv.org/api/example</id>
  <updated>2024-10-05T00:00:00Z</updated>
  <entry>
    <id>http://arxiv.org/abs/2410.03537v1</id>
    <title>Quantum Error
      Correction Revisited</title>
    <summary>  We revisit quantum error correction.  </summary>
    <published>2024-10-04T17:59:59Z</published>
    <author><name>Alice Zhang</name></author>
    <author><name>Bob Li</name></author>
    <link href="http://arxiv.org/abs/2410.03537v1" rel="alternate" type="text/html"/>
    <link title="pdf" href="http://arxiv.org/pdf/2410.03537v1" rel="related" type="application/pdf"/>
  </entry>
  <entry>
    <id>http://arxiv.org/abs/2410.09999v1</id>
    <title></title>
    <summary>Entry without a usable title.</summary>
  </entry>
  <entry>
    <id>http://arxiv.org/abs/2410.11111v2</id>
    <title>No Explicit PDF Link</title>
    <summary>PDF link derived from the abstract id.</summary>
    <link href="http://arxiv.org/abs/2410.11111v2" rel="alternate" type="text/html"/>
  </entry>
</feed>"#;

    #[test]
    fn parses_entries_and_skips_incomplete_ones() {
        let feed = parser::parse(FEED.as_bytes()).unwrap();
        let papers = refs_from_feed(feed);

        assert_eq!(papers.len(), 2);

        let first = &papers[0];
        assert_eq!(first.title, "Quantum Error Correction Revisited");
        assert_eq!(first.authors, vec!["Alice Zhang", "Bob Li"]);
        assert_eq!(first.abstract_text, "We revisit quantum error correction.");
        assert_eq!(first.pdf_url, "http://arxiv.org/pdf/2410.03537v1");
        assert!(first.published.is_some());
    }

    #[test]
    fn derives_pdf_link_from_abstract_id() {
        let feed = parser::parse(FEED.as_bytes()).unwrap();
        let papers = refs_from_feed(feed);

        assert_eq!(papers[1].title, "No Explicit PDF Link");
        assert_eq!(papers[1].pdf_url, "http://arxiv.org/pdf/2410.11111v2");
    }

    #[test]
    fn sort_criterion_round_trips() {
        assert_eq!(SortCriterion::parse("submittedDate"), Some(SortCriterion::SubmittedDate));
        assert_eq!(SortCriterion::parse("relevance"), Some(SortCriterion::Relevance));
        assert_eq!(SortCriterion::parse("unknown"), None);
        assert_eq!(SortCriterion::SubmittedDate.as_query(), "submittedDate");
    }
}
