use std::path::PathBuf;

use crate::services::arxiv_search::SortCriterion;

/// 程序配置文件
#[derive(Clone, Debug)]
pub struct Config {
    /// 数据输出根目录
    pub data_root: PathBuf,
    /// 摘要时提取的 PDF 页数
    pub pages_to_extract: u32,
    /// 同时处理的论文数量
    pub max_concurrent_papers: usize,
    /// arXiv API 地址
    pub arxiv_api_base_url: String,
    /// 搜索结果排序方式
    pub sort_by: SortCriterion,
    // --- LLM 配置 ---
    pub llm_api_key: String,
    pub llm_api_base_url: String,
    pub llm_model_name: String,
    // --- PDF 渲染配置 ---
    pub render_images: bool,
    pub render_zoom: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_root: PathBuf::from("data"),
            pages_to_extract: 2,
            max_concurrent_papers: 100,
            arxiv_api_base_url: "https://export.arxiv.org/api/query".to_string(),
            sort_by: SortCriterion::SubmittedDate,
            llm_api_key: String::new(),
            llm_api_base_url: "https://api.openai.com/v1".to_string(),
            llm_model_name: "gpt-4o-mini".to_string(),
            render_images: true,
            render_zoom: 2.0,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            data_root: std::env::var("DATA_ROOT")
                .map(PathBuf::from)
                .unwrap_or(default.data_root),
            pages_to_extract: std::env::var("PAGES_TO_EXTRACT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.pages_to_extract),
            max_concurrent_papers: std::env::var("MAX_CONCURRENT_PAPERS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.max_concurrent_papers),
            arxiv_api_base_url: std::env::var("ARXIV_API_BASE_URL")
                .unwrap_or(default.arxiv_api_base_url),
            sort_by: std::env::var("ARXIV_SORT_BY")
                .ok()
                .and_then(|v| SortCriterion::parse(&v))
                .unwrap_or(default.sort_by),
            llm_api_key: std::env::var("LLM_API_KEY").unwrap_or(default.llm_api_key),
            llm_api_base_url: std::env::var("LLM_API_BASE_URL")
                .unwrap_or(default.llm_api_base_url),
            llm_model_name: std::env::var("LLM_MODEL_NAME").unwrap_or(default.llm_model_name),
            render_images: std::env::var("RENDER_IMAGES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.render_images),
            render_zoom: std::env::var("RENDER_ZOOM")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.render_zoom),
        }
    }

    /// 某个关键词的报告目录：`<data_root>/<keyword>`
    pub fn report_dir(&self, keyword: &str) -> PathBuf {
        self.data_root.join(keyword)
    }

    /// 某个关键词的 PDF 存放目录：`<data_root>/<keyword>/pdfs`
    pub fn pdf_dir(&self, keyword: &str) -> PathBuf {
        self.report_dir(keyword).join("pdfs")
    }

    /// 某个关键词的 id 列表文件：`<data_root>/<keyword>/id.txt`
    pub fn id_list_path(&self, keyword: &str) -> PathBuf {
        self.report_dir(keyword).join("id.txt")
    }
}
