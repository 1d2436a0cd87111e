use reqwest::StatusCode;
use thiserror::Error;

/// 采集过程中的错误类型
///
/// 错误统一在 RepoAnalyzer 处收敛：单个仓库采集失败只跳过该仓库，
/// 枚举仓库列表失败则直接中止本次运行
#[derive(Error, Debug)]
pub enum HarvestError {
    /// 远端接口返回非成功状态码
    #[error("request '{url}' failed with status {status}")]
    Transport { status: StatusCode, url: String },

    /// 仓库没有任何提交记录
    #[error("repo '{repo}' has no commit history")]
    EmptyHistory { repo: String },

    /// 响应内容缺失期望字段
    #[error("malformed response: {context}")]
    MalformedResponse { context: String },

    /// 传输层或反序列化错误
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}
