// ==========================================
// 赛事管理系统 - 飞手名单导入核心库
// ==========================================
// 技术栈: Rust + SQLite
// 系统定位: 宿主赛事管理应用的名单导入核心
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "zh-CN");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 飞手/赛级注册表访问
pub mod repository;

// 导入层 - 名单解析与赛组生成
pub mod importer;

// 配置层 - 宿主选项读取
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一）
pub mod db;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// 宿主集成层 - UI 通知与广播
pub mod host;

// API 层 - 宿主调用入口
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::SourceMode;

// 领域实体
pub use domain::{
    GenerateReport, Heat, HeatSlot, ImportSummary, Pilot, PilotId, RaceClass, RosterRow,
    SlotOverflow,
};

// 导入组件
pub use importer::{
    CsvRosterParser, HeatPlan, HttpRosterFetcher, PilotReconciler, RaceStructureGenerator,
    RosterImporterImpl, SourceResolver,
};

// Trait 接口
pub use importer::{RosterFetcher, RosterImporter, RosterParser};
pub use repository::{PilotRegistry, RaceRegistry};

// 宿主接口
pub use host::{LogMessenger, UiMessenger};

// API
pub use api::ImportApi;

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "飞手名单导入器";

// ==========================================
// 预编译检查
// ==========================================

// 确保编译时所有模块可见
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
