use anyhow::Result;
use gitspan::{Config, Harvester};
use tracing_subscriber::EnvFilter;

/// 额外采集的仓库列表，可以是裸仓库名或 "<owner>/<name>" 全名
static EXTRA_REPOS: &[&str] = &[];

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut config = Config::from_env()?;
    config.extra_repos = EXTRA_REPOS.iter().map(|s| s.to_string()).collect();

    Harvester::new(config).run().await
}
