//! PDF 下载服务 - 业务能力层
//!
//! 只负责"下载一个 PDF"能力，不关心流程
//!
//! ## 下载约定
//! - 最多尝试 3 次，每次失败后等待一小段时间再重试
//! - 写入后检查文件大小，小于 10 KiB 视为损坏或不完整
//! - 每次重试覆盖同一个目标文件

use std::path::Path;
use std::time::Duration;

use tracing::{info, warn};

use crate::error::FetchError;
use crate::models::paper::{LocalArtifact, PaperRef};
use crate::utils::filename::sanitize_filename;

/// 下载尝试次数上限
pub const MAX_DOWNLOAD_ATTEMPTS: u32 = 3;

/// 有效 PDF 的最小字节数，低于此值按损坏处理
pub const MIN_PDF_SIZE: u64 = 10 * 1024;

/// 文件名使用清洗后标题的前缀长度
const FILENAME_PREFIX_LENGTH: usize = 50;

/// 重试间隔
const RETRY_DELAY: Duration = Duration::from_millis(500);

/// PDF 下载服务
pub struct PdfFetcher {
    client: reqwest::Client,
}

impl PdfFetcher {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// 下载一篇论文的 PDF 到指定目录
    ///
    /// 目录不存在时自动创建。文件名取清洗后标题的前 50 个字符。
    pub async fn download(
        &self,
        paper: &PaperRef,
        output_dir: &Path,
    ) -> Result<LocalArtifact, FetchError> {
        tokio::fs::create_dir_all(output_dir)
            .await
            .map_err(|source| FetchError::Io {
                path: output_dir.to_path_buf(),
                source,
            })?;

        let stem: String = sanitize_filename(&paper.title)
            .chars()
            .take(FILENAME_PREFIX_LENGTH)
            .collect();
        let filepath = output_dir.join(format!("{}.pdf", stem));

        info!("⬇️ 开始下载 PDF: {}", filepath.display());

        let mut last_error = None;

        for attempt in 1..=MAX_DOWNLOAD_ATTEMPTS {
            match self.try_download(&paper.pdf_url, &filepath).await {
                Ok(byte_size) => {
                    info!("✓ PDF 下载完成 ({} 字节): {}", byte_size, filepath.display());
                    return Ok(LocalArtifact {
                        title: paper.title.clone(),
                        pdf_path: filepath,
                        byte_size,
                    });
                }
                Err(e) => {
                    warn!(
                        "⚠️ 第 {}/{} 次下载失败: {}",
                        attempt, MAX_DOWNLOAD_ATTEMPTS, e
                    );
                    last_error = Some(e);
                    if attempt < MAX_DOWNLOAD_ATTEMPTS {
                        tokio::time::sleep(RETRY_DELAY).await;
                    }
                }
            }
        }

        // 循环至少执行一次，last_error 必然已赋值
        Err(last_error.unwrap_or_else(|| FetchError::HttpStatus {
            status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
            url: paper.pdf_url.clone(),
        }))
    }

    /// 单次下载尝试：请求、写盘、校验大小
    async fn try_download(&self, url: &str, filepath: &Path) -> Result<u64, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(FetchError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus {
                status,
                url: url.to_string(),
            });
        }

        let body = response.bytes().await.map_err(FetchError::Transport)?;

        tokio::fs::write(filepath, &body)
            .await
            .map_err(|source| FetchError::Io {
                path: filepath.to_path_buf(),
                source,
            })?;

        let byte_size = tokio::fs::metadata(filepath)
            .await
            .map_err(|source| FetchError::Io {
                path: filepath.to_path_buf(),
                source,
            })?
            .len();

        if byte_size < MIN_PDF_SIZE {
            return Err(FetchError::InvalidArtifact {
                size: byte_size,
                path: filepath.to_path_buf(),
            });
        }

        Ok(byte_size)
    }
}
