use anyhow::Result;
use clap::Parser;

use arxiv_summarizer::config::Config;
use arxiv_summarizer::logger;
use arxiv_summarizer::orchestrator::App;

/// 批量下载并摘要 arXiv 论文
#[derive(Parser, Debug)]
#[command(name = "arxiv_summarizer", version, about = "Summarize arXiv papers")]
struct Cli {
    /// 搜索关键词（同时作为输出目录名）
    keyword: String,

    /// 最多处理的论文数量
    #[arg(long, default_value_t = 10)]
    max_results: usize,
}

#[tokio::main]
async fn main() -> Result<()> {
    // 初始化日志
    logger::init();

    let cli = Cli::parse();

    // 加载配置
    let config = Config::from_env();

    // 初始化并运行应用
    App::initialize(config, cli.keyword, cli.max_results)?
        .run()
        .await?;

    Ok(())
}
