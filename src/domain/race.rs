// ==========================================
// 赛事管理系统 - 赛级/赛组领域模型
// ==========================================
// 对齐: race_class / heat / heat_slot 表
// ==========================================

use crate::domain::pilot::PilotId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// RaceClass - 赛级
// ==========================================
// 每次导入最多创建一个,按名称全局唯一
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RaceClass {
    pub id: i64,                   // 注册表分配的标识
    pub name: String,              // 赛级名称（全局唯一）
    pub created_at: DateTime<Utc>, // 记录创建时间
}

// ==========================================
// Heat - 赛组
// ==========================================
// 每个去重后的 heat 标签对应一个,创建后立即绑定到赛级
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Heat {
    pub id: i64,                    // 注册表分配的标识
    pub name: String,               // 赛组名称（本地化前缀 + 原始标签）
    pub race_class_id: Option<i64>, // 所属赛级（创建时为空,绑定后填充）
}

// ==========================================
// HeatSlot - 赛组槽位
// ==========================================
// 宿主在创建赛组时按固定数量预建,导入核心只按序填充,从不增删
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeatSlot {
    pub id: i64,                  // 注册表分配的标识
    pub heat_id: i64,             // 所属赛组
    pub slot_index: i64,          // 槽位序号（0 起,决定填充顺序）
    pub pilot_id: Option<PilotId>, // 已分配的飞手（至多一名）
}
