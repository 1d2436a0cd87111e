use crate::{client::GithubClient, errors::HarvestError, record::Contributor};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct BranchResponse {
    name: String,
}

#[derive(Debug, Deserialize)]
struct MetadataResponse {
    stargazers_count: u64,
    forks_count: u64,
    open_issues_count: u64,
    default_branch: String,
}

#[derive(Debug, Deserialize)]
struct CommitResponse {
    commit: CommitDetail,
}

#[derive(Debug, Deserialize)]
struct CommitDetail {
    committer: CommitSignature,
}

#[derive(Debug, Deserialize)]
struct CommitSignature {
    date: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    total_count: u64,
}

#[derive(Debug, Deserialize)]
struct ContributorResponse {
    login: String,
    contributions: u64,
}

/// 仓库元信息
#[derive(Debug, Clone)]
pub struct RepoMetadata {
    pub stars: u64,
    pub forks: u64,
    pub open_issues: u64,
    pub default_branch: String,
}

/// 列出仓库全部分支名
pub async fn list_branches(
    client: &GithubClient,
    repo: &str,
) -> Result<Vec<String>, HarvestError> {
    let path = format!("/repos/{}/branches", repo);
    let branches: Vec<BranchResponse> = client.get_json(&path, &[]).await?;
    Ok(branches.into_iter().map(|b| b.name).collect())
}

/// 拉取仓库元信息，包含 star/fork/issue 数以及默认分支
pub async fn get_repo_metadata(
    client: &GithubClient,
    repo: &str,
) -> Result<RepoMetadata, HarvestError> {
    let path = format!("/repos/{}", repo);
    let meta: MetadataResponse = client.get_json(&path, &[]).await?;
    Ok(RepoMetadata {
        stars: meta.stargazers_count,
        forks: meta.forks_count,
        open_issues: meta.open_issues_count,
        default_branch: meta.default_branch,
    })
}

/// 获取指定分支最早与最近一次提交时间，返回 (first, last)
///
/// 提交接口按时间倒序分页，per_page=1 时第一页首条即最近提交，
/// 最后一页（页码取自 rel="last"）首条即最早提交
pub async fn get_commit_dates(
    client: &GithubClient,
    repo: &str,
    branch: &str,
) -> Result<(String, String), HarvestError> {
    let path = format!("/repos/{}/commits", repo);
    let query = [("sha", branch), ("per_page", "1")];
    let (commits, last_page) = client
        .get_with_last_page::<CommitResponse>(&path, &query)
        .await?;
    let newest = match commits.into_iter().next() {
        Some(c) => c.commit.committer.date,
        None => {
            return Err(HarvestError::EmptyHistory {
                repo: repo.to_string(),
            })
        }
    };

    let page = last_page.to_string();
    let query = [("sha", branch), ("per_page", "1"), ("page", page.as_str())];
    let (commits, _) = client
        .get_with_last_page::<CommitResponse>(&path, &query)
        .await?;
    let oldest = commits
        .into_iter()
        .next()
        .map(|c| c.commit.committer.date)
        .ok_or_else(|| HarvestError::MalformedResponse {
            context: format!("commit page {} of '{}' is empty", page, repo),
        })?;

    Ok((oldest, newest))
}

/// 统计指定分支提交总数
///
/// 由分页的 rel="last" 页码推算：总数 = 最后一页页码 × 每页条数，
/// 只有 page_size 为 1 时才是精确值；响应没有分页元数据时回退为单页
pub async fn get_total_commits(
    client: &GithubClient,
    repo: &str,
    branch: &str,
    page_size: u32,
) -> Result<u64, HarvestError> {
    let path = format!("/repos/{}/commits", repo);
    let per_page = page_size.to_string();
    let query = [("sha", branch), ("per_page", per_page.as_str())];
    let (_, last_page) = client
        .get_with_last_page::<serde_json::Value>(&path, &query)
        .await?;
    Ok(last_page.saturating_mul(page_size as u64))
}

/// 统计仓库 PR 总数（开启 + 关闭 + 合并）
///
/// 取搜索接口的 total_count，该值由服务端计算，受搜索索引上限影响，
/// 是一个已知的近似值
pub async fn get_total_pull_requests(
    client: &GithubClient,
    repo: &str,
) -> Result<u64, HarvestError> {
    let q = format!("repo:{} type:pr", repo);
    let result: SearchResponse = client
        .get_json("/search/issues", &[("q", q.as_str())])
        .await?;
    Ok(result.total_count)
}

/// 拉取贡献排行前 top_n 的贡献者，保留服务端返回的排名顺序
pub async fn get_top_contributors(
    client: &GithubClient,
    repo: &str,
    top_n: u32,
) -> Result<Vec<Contributor>, HarvestError> {
    let path = format!("/repos/{}/contributors", repo);
    let per_page = top_n.to_string();
    let contributors: Vec<ContributorResponse> = client
        .get_json(&path, &[("per_page", per_page.as_str())])
        .await?;

    let mut contributors: Vec<Contributor> = contributors
        .into_iter()
        .map(|c| Contributor {
            login: c.login,
            contributions: c.contributions,
        })
        .collect();
    contributors.truncate(top_n as usize);
    Ok(contributors)
}
