//! id 列表文件加载
//!
//! `<data_root>/<keyword>/id.txt`，每行一个 arXiv id。
//! 文件不存在不是错误：返回空列表，批次退化为关键词搜索。

use std::io::ErrorKind;
use std::path::Path;

use tracing::warn;

/// 读取 id 列表文件，每行一个 id，去除首尾空白，跳过空行
pub async fn load_id_list(path: &Path) -> Vec<String> {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            warn!("⚠️ 未找到 id 列表文件 {}，将使用关键词搜索", path.display());
            return Vec::new();
        }
        Err(e) => {
            warn!("⚠️ 读取 id 列表文件失败 ({}): {}", path.display(), e);
            return Vec::new();
        }
    };

    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}
