// ==========================================
// 赛事管理系统 - 配置层
// ==========================================
// 职责: 宿主管理的键值选项读取
// 存储: config_kv 表
// ==========================================

pub mod config_manager;
pub mod import_config_trait;

// 重导出核心配置管理器
pub use config_manager::{option_keys, ConfigManager};
pub use import_config_trait::ImporterConfigReader;
