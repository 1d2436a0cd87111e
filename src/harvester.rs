use crate::{
    analyzer::RepoAnalyzer,
    client::GithubClient,
    config::Config,
    lister::{OrgRepoLister, RepoLister, UserRepoLister},
    record::canonical_name,
    snapshot::{is_processed, SnapshotStore},
};
use anyhow::Result;
use tokio::time;
use tracing::info;

/// 采集驱动器
///
/// 每次运行按 枚举 -> 归一化 -> 过滤 -> 逐仓库分析 的顺序推进，
/// 每成功一个仓库立即落盘，中途崩溃最多丢失一个仓库的工作量
pub struct Harvester {
    config: Config,
    client: GithubClient,
}

impl Harvester {
    pub fn new(config: Config) -> Self {
        let client = GithubClient::new(&config);
        Self { config, client }
    }

    pub async fn run(&self) -> Result<()> {
        let now = time::Instant::now();

        self.harvest_user_repos().await?;
        if let Some(org) = self.config.org.clone() {
            self.harvest_org_repos(&org).await?;
        }

        info!(
            "all repos have been harvested, elapsed: {}",
            humantime::format_duration(now.elapsed())
        );
        Ok(())
    }

    /// 采集用户名下仓库以及额外指定的仓库，写入用户快照
    async fn harvest_user_repos(&self) -> Result<()> {
        info!("start to fetch repos for user '{}'", self.config.user);
        let lister = UserRepoLister {
            page_size: self.config.list_page_size,
        };

        let mut targets = lister.repositories(&self.client).await?;
        targets.extend(self.config.extra_repos.iter().cloned());
        info!("[user]: fetch total {} repos", targets.len());

        self.process(&targets, &self.config.output, &self.config.user)
            .await
    }

    /// 采集组织名下仓库，写入独立的组织快照
    async fn harvest_org_repos(&self, org: &str) -> Result<()> {
        info!("start to fetch repos for org '{}'", org);
        let lister = OrgRepoLister {
            org: org.to_string(),
            page_size: self.config.list_page_size,
        };

        let targets = lister.repositories(&self.client).await?;
        info!("[org]: fetch total {} repos", targets.len());

        self.process(&targets, &self.config.org_output, org).await
    }

    async fn process(&self, targets: &[String], output: &str, owner: &str) -> Result<()> {
        let store = SnapshotStore::new(output);
        let mut snapshot = store.load();
        let analyzer = RepoAnalyzer::new(&self.client, &self.config);

        let total = targets.len();
        for (i, raw) in targets.iter().enumerate() {
            let name = canonical_name(owner, raw);
            if is_processed(&snapshot, &name) {
                info!("[{}/{}] skip '{}', already in snapshot", i + 1, total, name);
                continue;
            }

            if let Some(record) = analyzer.analyze(&name).await {
                snapshot.insert(name.clone(), record);
                store.save(&snapshot)?;
                info!("[{}/{}] saved record for '{}'", i + 1, total, name);
            }
        }

        info!("snapshot '{}' now holds {} repos", output, snapshot.len());
        Ok(())
    }
}
