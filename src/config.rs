use anyhow::{Context, Result};
use std::env;

/// Github API 地址
pub static GITHUB_API: &str = "https://api.github.com";

static ENV_GITHUB_USER: &str = "GITHUB_USER";
static ENV_GITHUB_TOKEN: &str = "GITHUB_TOKEN";
static ENV_GITHUB_ORG: &str = "GITHUB_ORG";

/// 采集运行配置
///
/// 环境变量只在 `from_env` 读取一次，后续组件均显式接收 Config，
/// 不再各自读取全局状态
#[derive(Debug, Clone)]
pub struct Config {
    /// Github 用户名，用于枚举账号下的仓库以及补全裸仓库名
    pub user: String,
    /// Github access token
    pub token: String,
    /// 组织名称，设置后额外采集组织仓库
    pub org: Option<String>,
    /// API 地址，测试时可指向 mock server
    pub api_base: String,
    /// 额外指定采集的仓库列表
    pub extra_repos: Vec<String>,
    /// 用户仓库快照文件路径
    pub output: String,
    /// 组织仓库快照文件路径
    pub org_output: String,
    /// 贡献者排行保留数量
    pub top_n: u32,
    /// 枚举仓库列表时的分页大小
    pub list_page_size: u32,
    /// 统计提交总数时的分页大小，只有为 1 时统计值才是精确的
    pub count_page_size: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            user: String::new(),
            token: String::new(),
            org: None,
            api_base: GITHUB_API.to_string(),
            extra_repos: vec![],
            output: "github_repos.json".to_string(),
            org_output: "github_org_repos.json".to_string(),
            top_n: 3,
            list_page_size: 100,
            count_page_size: 1,
        }
    }
}

impl Config {
    /// 从环境变量加载配置，GITHUB_USER / GITHUB_TOKEN 必须设置
    pub fn from_env() -> Result<Config> {
        let user = env::var(ENV_GITHUB_USER)
            .with_context(|| format!("environment variable {} is not set", ENV_GITHUB_USER))?;
        let token = env::var(ENV_GITHUB_TOKEN)
            .with_context(|| format!("environment variable {} is not set", ENV_GITHUB_TOKEN))?;
        let org = env::var(ENV_GITHUB_ORG).ok().filter(|s| !s.is_empty());

        Ok(Config {
            user,
            token,
            org,
            ..Default::default()
        })
    }
}
