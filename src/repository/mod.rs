// ==========================================
// 赛事管理系统 - 数据仓储层
// ==========================================
// 红线: Repository 不含导入流程逻辑
// ==========================================
// 职责: 提供飞手/赛级注册表的访问接口,屏蔽数据库细节
// 约束: 所有查询使用参数化,防止 SQL 注入
// ==========================================

pub mod error;
pub mod pilot_repo;
pub mod race_repo;

// 重导出核心仓储
pub use error::{RepositoryError, RepositoryResult};
pub use pilot_repo::{PilotRegistry, SqlitePilotRepository};
pub use race_repo::{RaceRegistry, SqliteRaceRepository};
