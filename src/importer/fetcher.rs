// ==========================================
// 赛事管理系统 - 远程名单拉取器
// ==========================================
// 职责: 把 "从 URL 拉取字节" 收拢到一个可注入的接口后面,
//       测试用桩实现替代网络
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use async_trait::async_trait;

const USER_AGENT: &str = concat!("pilot-csv-importer/", env!("CARGO_PKG_VERSION"));

// ==========================================
// RosterFetcher Trait
// ==========================================
// 用途: 远程名单字节拉取接口
// 实现者: HttpRosterFetcher;测试中的桩实现
#[async_trait]
pub trait RosterFetcher: Send + Sync {
    /// 拉取 URL 的全部字节
    ///
    /// # 返回
    /// - Ok(Vec<u8>): 响应体字节
    /// - Err(ImportError::FetchFailure): 网络错误或非 2xx 状态（不重试）
    async fn fetch_bytes(&self, url: &str) -> ImportResult<Vec<u8>>;
}

// ==========================================
// HttpRosterFetcher - reqwest 实现
// ==========================================
pub struct HttpRosterFetcher {
    client: reqwest::Client,
}

impl HttpRosterFetcher {
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .unwrap_or_default();
        Self { client }
    }
}

impl Default for HttpRosterFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RosterFetcher for HttpRosterFetcher {
    async fn fetch_bytes(&self, url: &str) -> ImportResult<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ImportError::FetchFailure {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        let response = response
            .error_for_status()
            .map_err(|e| ImportError::FetchFailure {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ImportError::FetchFailure {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        Ok(bytes.to_vec())
    }
}
