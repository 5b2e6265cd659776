//! Voicecast - 文本到角色配音流水线
//!
//! 用法: voicecast <text-file>
//!
//! 读取文本文件，执行角色识别 → 对白归属 → 音色推荐，结果以 JSON 输出到 stdout

use anyhow::Context;
use tokio_util::sync::CancellationToken;

use voicecast::config::{load_config, print_config};
use voicecast::infrastructure::Services;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    // 初始化日志（输出到 stderr，stdout 留给报告）
    let log_filter = format!("{},voicecast={}", config.log.level, config.log.level);
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter)),
        )
        .init();

    print_config(&config);

    let path = std::env::args()
        .nth(1)
        .context("usage: voicecast <text-file>")?;
    let text = tokio::fs::read_to_string(&path)
        .await
        .with_context(|| format!("Failed to read {}", path))?;

    let services = Services::from_config(&config)?;
    services.check_providers().await;

    let token = CancellationToken::new();
    let canceller = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Received shutdown signal");
            canceller.cancel();
        }
    });

    let report = services.orchestrator.run_cancellable(&text, &token).await?;

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
