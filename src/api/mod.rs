// ==========================================
// 赛事管理系统 - API 层
// ==========================================
// 职责: 供宿主 UI 动作调用的装配入口
// ==========================================

pub mod error;
pub mod import_api;

pub use error::ApiError;
pub use import_api::{ImportApi, ImportApiResponse};
