// ==========================================
// 赛事管理系统 - 名单来源解析器
// ==========================================
// 职责: 把配置的来源模式解析为一个可读的本地文件路径
// 远程模式: 先删除既有暂存文件,再拉取并覆盖写入固定暂存路径
// ==========================================

use crate::domain::types::SourceMode;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::fetcher::RosterFetcher;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// 赛事站点名单 URL 模板（{event_id} 占位符由赛事编号替换）
pub const EVENT_ROSTER_URL_TEMPLATE: &str =
    "https://league.fpvevents.org/api/events/{event_id}/pilots.csv";

/// 远程名单的固定暂存路径（相对应用根目录）
pub const STAGING_RELATIVE_PATH: &str = "static/user/downloaded_pilots.csv";

// ==========================================
// SourceResolver - 来源解析器
// ==========================================
pub struct SourceResolver {
    app_root: PathBuf,
    event_url_template: String,
    fetcher: Box<dyn RosterFetcher>,
}

impl SourceResolver {
    /// 创建新的来源解析器
    ///
    /// # 参数
    /// - app_root: 应用根目录（本地路径与暂存路径均以此为基准）
    /// - fetcher: 远程字节拉取器
    pub fn new<P: AsRef<Path>>(app_root: P, fetcher: Box<dyn RosterFetcher>) -> Self {
        Self {
            app_root: app_root.as_ref().to_path_buf(),
            event_url_template: EVENT_ROSTER_URL_TEMPLATE.to_string(),
            fetcher,
        }
    }

    /// 覆盖赛事站点 URL 模板（宿主可指向自己的赛事服务）
    pub fn with_event_url_template(mut self, template: &str) -> Self {
        self.event_url_template = template.to_string();
        self
    }

    /// 把来源模式解析为一个存在的本地文件路径
    ///
    /// # 返回
    /// - Ok(PathBuf): 可读取的本地 CSV 路径
    /// - Err(ImportError::SourceNotFound): 解析后的路径不存在
    /// - Err(ImportError::FetchFailure): 远程拉取失败（不重试,本次运行终止）
    pub async fn resolve(&self, mode: &SourceMode) -> ImportResult<PathBuf> {
        let path = match mode {
            SourceMode::FromFile(location) => {
                // 本地模式: 位置按应用根目录相对路径解释,不访问网络
                self.app_root.join(location.trim_start_matches('/'))
            }
            SourceMode::FromEventId(event_id) => {
                let url = self.event_url_template.replace("{event_id}", event_id);
                debug!(event_id = %event_id, url = %url, "赛事编号已展开为 URL");
                self.stage_remote(&url).await?
            }
            SourceMode::FromUrl(url) => self.stage_remote(url).await?,
        };

        if !path.is_file() {
            return Err(ImportError::SourceNotFound(path.display().to_string()));
        }
        Ok(path)
    }

    /// 拉取远程名单并写入固定暂存路径（覆盖既有文件）
    async fn stage_remote(&self, url: &str) -> ImportResult<PathBuf> {
        let staging = self.app_root.join(STAGING_RELATIVE_PATH);

        // 先清除上一次的暂存文件,避免拉取失败后误读旧名单
        if staging.exists() {
            fs::remove_file(&staging)?;
            debug!(path = %staging.display(), "已删除旧的暂存名单");
        }

        let bytes = self.fetcher.fetch_bytes(url).await?;

        if let Some(parent) = staging.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&staging, &bytes)?;
        info!(url = %url, bytes = bytes.len(), path = %staging.display(), "远程名单已暂存");

        Ok(staging)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use tempfile::TempDir;

    /// 桩拉取器: 记录请求的 URL,返回固定字节
    struct StubFetcher {
        body: Vec<u8>,
        requested: Mutex<Vec<String>>,
    }

    impl StubFetcher {
        fn new(body: &[u8]) -> Self {
            Self {
                body: body.to_vec(),
                requested: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl RosterFetcher for StubFetcher {
        async fn fetch_bytes(&self, url: &str) -> ImportResult<Vec<u8>> {
            self.requested.lock().unwrap().push(url.to_string());
            Ok(self.body.clone())
        }
    }

    /// 桩拉取器: 总是失败
    struct FailingFetcher;

    #[async_trait]
    impl RosterFetcher for FailingFetcher {
        async fn fetch_bytes(&self, url: &str) -> ImportResult<Vec<u8>> {
            Err(ImportError::FetchFailure {
                url: url.to_string(),
                message: "connection refused".to_string(),
            })
        }
    }

    #[tokio::test]
    async fn test_from_file_resolves_under_app_root() {
        let root = TempDir::new().unwrap();
        std::fs::create_dir_all(root.path().join("static/user")).unwrap();
        std::fs::write(root.path().join("static/user/pilots.csv"), "name,callsign,heat\n")
            .unwrap();

        let resolver = SourceResolver::new(root.path(), Box::new(FailingFetcher));
        let mode = SourceMode::FromFile("/static/user/pilots.csv".to_string());

        let path = resolver.resolve(&mode).await.unwrap();
        assert_eq!(path, root.path().join("static/user/pilots.csv"));
    }

    #[tokio::test]
    async fn test_from_file_missing_is_source_not_found() {
        let root = TempDir::new().unwrap();
        let resolver = SourceResolver::new(root.path(), Box::new(FailingFetcher));
        let mode = SourceMode::FromFile("/static/user/absent.csv".to_string());

        let result = resolver.resolve(&mode).await;
        assert!(matches!(result, Err(ImportError::SourceNotFound(_))));
    }

    #[tokio::test]
    async fn test_from_url_stages_and_overwrites() {
        let root = TempDir::new().unwrap();
        let staging = root.path().join(STAGING_RELATIVE_PATH);
        std::fs::create_dir_all(staging.parent().unwrap()).unwrap();
        std::fs::write(&staging, "stale contents").unwrap();

        let resolver = SourceResolver::new(
            root.path(),
            Box::new(StubFetcher::new(b"name,callsign,heat\nAlice,AL1,1\n")),
        );
        let mode = SourceMode::FromUrl("https://example.org/roster.csv".to_string());

        let path = resolver.resolve(&mode).await.unwrap();
        assert_eq!(path, staging);
        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("name,callsign,heat"));
    }

    #[tokio::test]
    async fn test_from_event_id_expands_template() {
        let root = TempDir::new().unwrap();
        let fetcher = Box::new(StubFetcher::new(b"name,callsign,heat\n"));
        let resolver = SourceResolver::new(root.path(), fetcher)
            .with_event_url_template("https://events.test/api/{event_id}/pilots.csv");
        let mode = SourceMode::FromEventId("12345".to_string());

        let path = resolver.resolve(&mode).await.unwrap();
        assert!(path.is_file());
        // 暂存文件写在固定位置
        assert_eq!(path, root.path().join(STAGING_RELATIVE_PATH));
    }

    #[tokio::test]
    async fn test_fetch_failure_propagates_and_clears_stale_staging() {
        let root = TempDir::new().unwrap();
        let staging = root.path().join(STAGING_RELATIVE_PATH);
        std::fs::create_dir_all(staging.parent().unwrap()).unwrap();
        std::fs::write(&staging, "stale contents").unwrap();

        let resolver = SourceResolver::new(root.path(), Box::new(FailingFetcher));
        let mode = SourceMode::FromUrl("https://example.org/roster.csv".to_string());

        let result = resolver.resolve(&mode).await;
        assert!(matches!(result, Err(ImportError::FetchFailure { .. })));
        // 旧暂存文件已被清除,不会被误读
        assert!(!staging.exists());
    }
}
