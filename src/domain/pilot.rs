// ==========================================
// 赛事管理系统 - 飞手领域模型
// ==========================================
// 用途: 导入层写入,赛组生成层只读
// 对齐: pilot 表
// ==========================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 飞手标识
///
/// 由注册表（数据库）在创建时分配，导入核心从不自行编造或复用
pub type PilotId = i64;

// ==========================================
// Pilot - 已注册飞手
// ==========================================
// 身份键: (name, callsign) 的精确组合,不做大小写/空白归一化
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pilot {
    pub id: PilotId,                // 注册表分配的标识
    pub name: String,               // 姓名
    pub callsign: String,           // 呼号
    pub created_at: DateTime<Utc>,  // 记录创建时间
}

impl Pilot {
    /// 是否与给定 (name, callsign) 身份键精确匹配
    pub fn matches_identity(&self, name: &str, callsign: &str) -> bool {
        self.name == name && self.callsign == callsign
    }
}
