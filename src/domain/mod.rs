// ==========================================
// 赛事管理系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型
// 红线: 不含数据访问逻辑,不含导入流程逻辑
// ==========================================

pub mod pilot;
pub mod race;
pub mod roster;
pub mod types;

// 重导出核心类型
pub use pilot::{Pilot, PilotId};
pub use race::{Heat, HeatSlot, RaceClass};
pub use roster::{GenerateReport, ImportSummary, RosterRow, SlotOverflow};
pub use types::SourceMode;
