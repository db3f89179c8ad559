//! 日志初始化
//!
//! 使用 `tracing-subscriber` 输出到标准输出，
//! 日志级别可通过 `RUST_LOG` 环境变量覆盖（默认 info）。

use tracing_subscriber::EnvFilter;

pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
