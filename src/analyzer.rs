use crate::{
    client::GithubClient,
    config::Config,
    errors::HarvestError,
    fetcher::{
        get_commit_dates, get_repo_metadata, get_top_contributors, get_total_commits,
        get_total_pull_requests, list_branches,
    },
    record::RepoRecord,
};
use tracing::{info, warn};

/// 单仓库分析器，也是采集失败的唯一收敛点
///
/// 任何一个 fetcher 出错都会使该仓库整体分析失败，记录一条日志后
/// 返回 None，批次内的其他仓库不受影响
pub struct RepoAnalyzer<'a> {
    client: &'a GithubClient,
    top_n: u32,
    count_page_size: u32,
}

impl<'a> RepoAnalyzer<'a> {
    pub fn new(client: &'a GithubClient, config: &Config) -> Self {
        Self {
            client,
            top_n: config.top_n,
            count_page_size: config.count_page_size,
        }
    }

    /// 分析单个仓库，失败时返回 None 且不产生部分记录
    pub async fn analyze(&self, full_name: &str) -> Option<RepoRecord> {
        match self.try_analyze(full_name).await {
            Ok(record) => Some(record),
            Err(e) => {
                warn!("skip repo '{}', analyze error: {}", full_name, e);
                None
            }
        }
    }

    async fn try_analyze(&self, full_name: &str) -> Result<RepoRecord, HarvestError> {
        info!("analyzing repo '{}'", full_name);

        // 默认分支来自元信息，必须最先获取；其余 fetcher 之间互不依赖
        let meta = get_repo_metadata(self.client, full_name).await?;
        let branches = list_branches(self.client, full_name).await?;
        let (first_commit, last_commit) =
            get_commit_dates(self.client, full_name, &meta.default_branch).await?;
        let total_commits = get_total_commits(
            self.client,
            full_name,
            &meta.default_branch,
            self.count_page_size,
        )
        .await?;
        let pull_requests = get_total_pull_requests(self.client, full_name).await?;
        let top_contributors = get_top_contributors(self.client, full_name, self.top_n).await?;

        info!(
            "repo '{}': commits {} ({} ~ {}), prs {}, stars {}, forks {}, issues {}",
            full_name,
            total_commits,
            first_commit,
            last_commit,
            pull_requests,
            meta.stars,
            meta.forks,
            meta.open_issues,
        );

        Ok(RepoRecord {
            branches,
            first_commit,
            last_commit,
            total_commits,
            pull_requests,
            stars: meta.stars,
            forks: meta.forks,
            open_issues: meta.open_issues,
            top_contributors,
        })
    }
}
