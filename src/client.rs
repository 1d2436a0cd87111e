use crate::{config::Config, errors::HarvestError};
use lazy_static::lazy_static;
use reqwest::header;
use serde::de::DeserializeOwned;

lazy_static! {
    static ref LINK_NEXT_REGEXP: regex::Regex =
        regex::Regex::new(r#"<([^>]+)>;\s*rel="next""#).unwrap();
    static ref LINK_LAST_REGEXP: regex::Regex =
        regex::Regex::new(r#"[?&]page=(\d+)[^>]*>;\s*rel="last""#).unwrap();
}

/// 从 Link header 中提取 rel="next" 的下一页地址
pub fn parse_next_url(link: &str) -> Option<String> {
    LINK_NEXT_REGEXP
        .captures(link)
        .map(|caps| caps[1].to_string())
}

/// 从 Link header 中提取 rel="last" 的最后一页页码
pub fn parse_last_page(link: &str) -> Option<u64> {
    LINK_LAST_REGEXP
        .captures(link)
        .and_then(|caps| caps[1].parse().ok())
}

/// Github API 客户端
///
/// 持有认证信息并统一设置请求头，所有 fetcher 显式接收该对象，
/// 分页元数据的解析被封装在这里，调用方不接触原始 header
pub struct GithubClient {
    http: reqwest::Client,
    token: String,
    api_base: String,
}

impl GithubClient {
    pub fn new(config: &Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            token: config.token.clone(),
            api_base: config.api_base.trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.api_base, path)
    }

    fn get(&self, url: &str) -> reqwest::RequestBuilder {
        self.http
            .get(url)
            .bearer_auth(&self.token)
            .header("User-Agent", "rust/reqwest")
            .header("Accept", "application/vnd.github.v3+json")
    }

    /// 发起单次 GET 请求并反序列化响应体
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, HarvestError> {
        let response = self.get(&self.endpoint(path)).query(query).send().await?;
        let url = response.url().to_string();
        let status = response.status();
        if !status.is_success() {
            return Err(HarvestError::Transport { status, url });
        }
        Ok(response.json().await?)
    }

    /// 发起单次 GET 请求，额外返回 rel="last" 的最后一页页码
    ///
    /// 响应缺失 Link header 或其中没有 last 关系时视为只有一页
    pub async fn get_with_last_page<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<(Vec<T>, u64), HarvestError> {
        let response = self.get(&self.endpoint(path)).query(query).send().await?;
        let url = response.url().to_string();
        let status = response.status();
        if !status.is_success() {
            return Err(HarvestError::Transport { status, url });
        }

        let last_page = response
            .headers()
            .get(header::LINK)
            .and_then(|value| value.to_str().ok())
            .and_then(parse_last_page)
            .unwrap_or(1);
        let items = response.json().await?;
        Ok((items, last_page))
    }

    /// 沿 rel="next" 关系逐页拉取集合，返回按页序拼接的全部条目
    ///
    /// 任意一页失败则整个集合拉取失败，不返回部分结果，也不重试
    pub async fn get_paginated<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
        page_size: u32,
    ) -> Result<Vec<T>, HarvestError> {
        let page_size = page_size.to_string();
        let mut query = query.to_vec();
        query.push(("per_page", page_size.as_str()));

        let mut items = vec![];
        let mut request = self.get(&self.endpoint(path)).query(&query);
        loop {
            let response = request.send().await?;
            let url = response.url().to_string();
            let status = response.status();
            if !status.is_success() {
                return Err(HarvestError::Transport { status, url });
            }

            let next = response
                .headers()
                .get(header::LINK)
                .and_then(|value| value.to_str().ok())
                .and_then(parse_next_url);
            let mut page: Vec<T> = response.json().await?;
            items.append(&mut page);

            match next {
                Some(next) => request = self.get(&next),
                None => return Ok(items),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_next_url() {
        let link = r#"<https://api.github.com/user/repos?per_page=100&page=2>; rel="next", <https://api.github.com/user/repos?per_page=100&page=4>; rel="last""#;
        assert_eq!(
            Some("https://api.github.com/user/repos?per_page=100&page=2".to_string()),
            parse_next_url(link),
        );
        assert_eq!(None, parse_next_url(r#"<https://x>; rel="prev""#));
        assert_eq!(None, parse_next_url(""));
    }

    #[test]
    fn test_parse_last_page() {
        let link = r#"<https://api.github.com/repos/a/b/commits?per_page=1&page=2>; rel="next", <https://api.github.com/repos/a/b/commits?per_page=1&page=128>; rel="last""#;
        assert_eq!(Some(128), parse_last_page(link));

        // page 不是最后一个参数
        let link = r#"<https://api.github.com/repos/a/b/commits?page=5&per_page=1>; rel="last""#;
        assert_eq!(Some(5), parse_last_page(link));

        // 只有 next 关系
        let link = r#"<https://api.github.com/repos/a/b/commits?per_page=1&page=2>; rel="next""#;
        assert_eq!(None, parse_last_page(link));
        assert_eq!(None, parse_last_page(""));
    }
}
