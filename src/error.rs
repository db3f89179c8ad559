//! 错误类型定义
//!
//! 服务边界使用显式的错误枚举，编排层统一用 `anyhow::Result` 吸收。
//! 每篇论文的失败只在单元边界记录日志，不向批次传播。

use std::path::PathBuf;

use thiserror::Error;

/// PDF 下载错误
#[derive(Debug, Error)]
pub enum FetchError {
    /// 网络传输失败（超时、连接重置、TLS 等）
    #[error("网络请求失败: {0}")]
    Transport(#[source] reqwest::Error),

    /// 服务端返回非成功状态码
    #[error("下载失败，状态码 {status}: {url}")]
    HttpStatus {
        status: reqwest::StatusCode,
        url: String,
    },

    /// 下载内容过小，视为损坏或不完整的 PDF
    #[error("下载的 PDF 过小 ({size} 字节): {}", .path.display())]
    InvalidArtifact { size: u64, path: PathBuf },

    /// 本地文件操作失败
    #[error("写入文件失败 ({}): {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// PDF 文本提取错误
///
/// 只有文档本身无法打开才算错误；某一页提取不到文本属于正常的
/// 提前终止，不走这里。
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("无法打开 PDF 文件 ({}): {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: lopdf::Error,
    },
}

/// 报告写入错误
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("序列化摘要失败: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("写入报告失败 ({}): {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// PDF 渲染错误
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("pdfium 渲染失败: {0}")]
    Pdfium(String),

    #[error("保存页面图像失败 ({}): {source}", .path.display())]
    SaveImage {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("创建图像输出目录失败 ({}): {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
