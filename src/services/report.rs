//! 报告持久化服务 - 业务能力层
//!
//! 只负责"把摘要批次写成 JSON / Markdown 报告"能力，不关心流程
//!
//! 两种格式各自独立写入，一种失败不影响另一种。

use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::ReportError;
use crate::models::paper::SummaryRecord;
use crate::services::markdown::MarkdownConverter;

/// 报告写入服务
///
/// 报告统一落在 `<data_root>/<keyword>/` 下：
/// - `<keyword>.json` 结构化数据
/// - `<keyword>.md` 阅读版
pub struct ReportWriter {
    data_root: PathBuf,
}

impl ReportWriter {
    pub fn new(data_root: PathBuf) -> Self {
        Self { data_root }
    }

    fn report_path(&self, keyword: &str, extension: &str) -> PathBuf {
        self.data_root
            .join(keyword)
            .join(format!("{}.{}", keyword, extension))
    }

    async fn ensure_parent(path: &Path) -> Result<(), ReportError> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| ReportError::Write {
                    path: parent.to_path_buf(),
                    source,
                })?;
        }
        Ok(())
    }

    /// 把摘要批次写为 JSON 报告，返回写入的路径
    pub async fn save_json(
        &self,
        summaries: &[SummaryRecord],
        keyword: &str,
    ) -> Result<PathBuf, ReportError> {
        let path = self.report_path(keyword, "json");
        Self::ensure_parent(&path).await?;

        let json = serde_json::to_string_pretty(summaries).map_err(ReportError::Serialize)?;

        tokio::fs::write(&path, json)
            .await
            .map_err(|source| ReportError::Write {
                path: path.clone(),
                source,
            })?;

        info!("💾 JSON 报告已保存: {}", path.display());
        Ok(path)
    }

    /// 把摘要批次写为 Markdown 报告，返回写入的路径
    pub async fn save_markdown(
        &self,
        summaries: &[SummaryRecord],
        keyword: &str,
    ) -> Result<PathBuf, ReportError> {
        let path = self.report_path(keyword, "md");
        Self::ensure_parent(&path).await?;

        let markdown = MarkdownConverter::new(2).from_summaries(summaries);

        tokio::fs::write(&path, markdown)
            .await
            .map_err(|source| ReportError::Write {
                path: path.clone(),
                source,
            })?;

        info!("💾 Markdown 报告已保存: {}", path.display());
        Ok(path)
    }
}
