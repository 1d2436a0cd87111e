use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 快照：规范仓库名 -> 采集记录
pub type Snapshot = BTreeMap<String, RepoRecord>;

/// 贡献者及其提交数，顺序即服务端返回的排名
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Contributor {
    pub login: String,
    pub contributions: u64,
}

/// 单个仓库的采集记录，要么完整写入快照要么整条缺失
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RepoRecord {
    /// 分支名列表，顺序为服务端返回顺序
    pub branches: Vec<String>,
    /// 默认分支最早一次提交时间，ISO-8601
    pub first_commit: String,
    /// 默认分支最近一次提交时间，ISO-8601
    pub last_commit: String,
    /// 提交总数，由分页页码推算的下界
    pub total_commits: u64,
    /// PR 总数（开启 + 关闭 + 合并），搜索接口返回的近似值
    pub pull_requests: u64,
    pub stars: u64,
    pub forks: u64,
    pub open_issues: u64,
    /// 贡献者排行，截断至 top_n
    pub top_contributors: Vec<Contributor>,
}

/// 将仓库名归一化为 "<owner>/<name>" 形式
///
/// 已带 owner 前缀的名称原样返回，快照键与跳过判断都使用归一化结果
pub fn canonical_name(owner: &str, raw: &str) -> String {
    if raw.contains('/') {
        raw.to_string()
    } else {
        format!("{}/{}", owner, raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_name() {
        assert_eq!("owner/repo", canonical_name("owner", "repo"));
        assert_eq!("owner/repo", canonical_name("owner", "owner/repo"));
        assert_eq!("other/repo", canonical_name("owner", "other/repo"));
        assert_eq!(
            canonical_name("owner", "repo"),
            canonical_name("owner", "owner/repo"),
        );
    }
}
