// ==========================================
// 赛事管理系统 - 名单导入API
// ==========================================
// 职责: 装配仓储/配置/导入组件,供宿主的"导入"按钮回调调用
// ==========================================

use crate::api::error::ApiError;
use crate::config::ConfigManager;
use crate::config::ImporterConfigReader;
use crate::domain::roster::{ImportSummary, SlotOverflow};
use crate::host::{LogMessenger, UiMessenger};
use crate::importer::{
    CsvRosterParser, HttpRosterFetcher, RosterFetcher, RosterImporter, RosterImporterImpl,
    SourceResolver,
};
use crate::repository::{SqlitePilotRepository, SqliteRaceRepository};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// 导入API响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportApiResponse {
    /// 本次运行标识
    pub run_id: String,
    /// CSV 数据行数
    pub total_rows: usize,
    /// 新建飞手数
    pub pilots_created: usize,
    /// 命中已有飞手数
    pub pilots_existing: usize,
    /// 创建的赛组数
    pub heats_created: usize,
    /// 成功分配的槽位数
    pub slots_assigned: usize,
    /// 槽位溢出明细
    pub overflows: Vec<SlotOverflow>,
    /// 导入耗时（毫秒）
    pub elapsed_ms: i64,
}

impl From<ImportSummary> for ImportApiResponse {
    fn from(summary: ImportSummary) -> Self {
        Self {
            run_id: summary.run_id,
            total_rows: summary.total_rows,
            pilots_created: summary.pilots_created,
            pilots_existing: summary.pilots_existing,
            heats_created: summary.heats_created,
            slots_assigned: summary.slots_assigned,
            overflows: summary.overflows,
            elapsed_ms: summary.elapsed_ms,
        }
    }
}

/// 导入API
pub struct ImportApi {
    db_path: String,
    app_root: PathBuf,
}

impl ImportApi {
    /// 创建新的ImportApi实例
    ///
    /// # 参数
    /// - db_path: 注册表数据库文件路径
    /// - app_root: 应用根目录（本地名单与下载暂存的基准目录）
    pub fn new<P: AsRef<Path>>(db_path: String, app_root: P) -> Self {
        Self {
            db_path,
            app_root: app_root.as_ref().to_path_buf(),
        }
    }

    /// 执行一次名单导入（HTTP 拉取器 + 日志通知器）
    pub async fn import_roster(&self) -> Result<ImportApiResponse, ApiError> {
        self.import_roster_with(Box::new(HttpRosterFetcher::new()), Box::new(LogMessenger))
            .await
    }

    /// 执行一次名单导入（注入拉取器与宿主通知器）
    ///
    /// # 参数
    /// - fetcher: 远程名单拉取器
    /// - messenger: 宿主 UI 通知接口
    pub async fn import_roster_with(
        &self,
        fetcher: Box<dyn RosterFetcher>,
        messenger: Box<dyn UiMessenger>,
    ) -> Result<ImportApiResponse, ApiError> {
        // 配置读取器（槽位数用于赛组预建）
        let config =
            ConfigManager::new(&self.db_path).map_err(|e| ApiError::ConfigError(e.to_string()))?;
        let slots_per_heat = config
            .get_slots_per_heat()
            .await
            .map_err(|e| ApiError::ConfigError(e.to_string()))?;

        // 注册表仓储
        let pilot_registry = SqlitePilotRepository::new(&self.db_path)?;
        let race_registry = SqliteRaceRepository::new(&self.db_path, slots_per_heat)?;

        // 导入组件
        let resolver = SourceResolver::new(&self.app_root, fetcher);
        let importer = RosterImporterImpl::new(
            pilot_registry,
            race_registry,
            config,
            resolver,
            Box::new(CsvRosterParser),
            messenger,
        );

        let summary = importer.import().await?;
        Ok(ImportApiResponse::from(summary))
    }
}
