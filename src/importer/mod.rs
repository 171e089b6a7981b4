// ==========================================
// 赛事管理系统 - 导入层
// ==========================================
// 职责: 名单来源解析、CSV 解析、飞手对账、赛组归组与结构生成
// 输入: 固定三列 (name, callsign, heat) 的 UTF-8 CSV
// ==========================================

// 模块声明
pub mod error;
pub mod fetcher;
pub mod generator;
pub mod heat_grouping;
pub mod reconciler;
pub mod roster_importer;
pub mod roster_importer_trait;
pub mod roster_parser;
pub mod source_resolver;

// 重导出核心类型
pub use error::{ImportError, ImportResult};
pub use fetcher::HttpRosterFetcher;
pub use generator::RaceStructureGenerator;
pub use heat_grouping::HeatPlan;
pub use reconciler::{PilotReconciler, Reconciled};
pub use roster_importer::RosterImporterImpl;
pub use source_resolver::{SourceResolver, EVENT_ROSTER_URL_TEMPLATE, STAGING_RELATIVE_PATH};

// 重导出 Trait 接口
pub use fetcher::RosterFetcher;
pub use roster_importer_trait::RosterImporter;
pub use roster_parser::{CsvRosterParser, RosterParser};
