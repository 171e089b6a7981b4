// ==========================================
// 赛事管理系统 - 名单导入领域模型
// ==========================================
// 对齐: CSV 输入行 / 导入结果汇总
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// RosterRow - 名单行
// ==========================================
// CSV 一行解析后的中间结构;缺失列以空字符串填充,不在解析期失败
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterRow {
    pub name: String,     // 姓名
    pub callsign: String, // 呼号
    pub heat: String,     // 原始赛组标签（不校验、不归一化）
}

// ==========================================
// SlotOverflow - 槽位溢出记录
// ==========================================
// 某赛组的飞手数超过宿主预建槽位数时记录;
// 仅中止该赛组剩余分配,不影响其他赛组
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotOverflow {
    pub heat_name: String,  // 溢出的赛组名称
    pub slot_count: usize,  // 可用槽位数
    pub pilot_count: usize, // 该组飞手数
}

impl SlotOverflow {
    /// 未能分配的飞手数
    pub fn unassigned(&self) -> usize {
        self.pilot_count.saturating_sub(self.slot_count)
    }
}

// ==========================================
// GenerateReport - 赛组生成结果
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateReport {
    pub race_class_id: i64,           // 新建赛级标识
    pub heats_created: usize,         // 创建的赛组数
    pub slots_assigned: usize,        // 成功分配的槽位数
    pub overflows: Vec<SlotOverflow>, // 槽位溢出明细
}

// ==========================================
// ImportSummary - 导入运行汇总
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportSummary {
    pub run_id: String,               // 本次运行标识（UUID）
    pub total_rows: usize,            // CSV 数据行数
    pub pilots_created: usize,        // 新建飞手数
    pub pilots_existing: usize,       // 命中已有飞手数
    pub heats_created: usize,         // 创建的赛组数
    pub slots_assigned: usize,        // 成功分配的槽位数
    pub overflows: Vec<SlotOverflow>, // 槽位溢出明细
    pub elapsed_ms: i64,              // 导入耗时（毫秒）
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overflow_unassigned() {
        let overflow = SlotOverflow {
            heat_name: "Heat1".to_string(),
            slot_count: 4,
            pilot_count: 6,
        };
        assert_eq!(overflow.unassigned(), 2);
    }
}
