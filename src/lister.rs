use crate::{client::GithubClient, errors::HarvestError};
use async_trait::async_trait;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct ListedRepo {
    full_name: String,
}

/// 仓库枚举接口，返回 "<owner>/<name>" 形式的仓库全名列表
///
/// 枚举失败没有收敛点，错误直接向上传播并中止本次运行
#[async_trait]
pub trait RepoLister {
    async fn repositories(&self, client: &GithubClient) -> Result<Vec<String>, HarvestError>;
}

/// 枚举当前认证用户名下的仓库
pub struct UserRepoLister {
    pub page_size: u32,
}

#[async_trait]
impl RepoLister for UserRepoLister {
    async fn repositories(&self, client: &GithubClient) -> Result<Vec<String>, HarvestError> {
        let repos: Vec<ListedRepo> = client
            .get_paginated("/user/repos", &[("affiliation", "owner")], self.page_size)
            .await?;
        Ok(repos.into_iter().map(|r| r.full_name).collect())
    }
}

/// 枚举指定组织名下的仓库
pub struct OrgRepoLister {
    pub org: String,
    pub page_size: u32,
}

#[async_trait]
impl RepoLister for OrgRepoLister {
    async fn repositories(&self, client: &GithubClient) -> Result<Vec<String>, HarvestError> {
        let path = format!("/orgs/{}/repos", self.org);
        let repos: Vec<ListedRepo> = client
            .get_paginated(&path, &[("type", "all")], self.page_size)
            .await?;
        Ok(repos.into_iter().map(|r| r.full_name).collect())
    }
}
