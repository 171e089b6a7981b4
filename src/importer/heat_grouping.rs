// ==========================================
// 赛事管理系统 - 赛组归组
// ==========================================
// 职责: 按 CSV 原始 heat 标签累积飞手标识
// 约束: 标签不做校验/归一化（"1" 与 "01" 是两个组,空串也是合法标签）;
//       组间按标签首次出现顺序,组内按行出现顺序
// ==========================================

use crate::domain::pilot::PilotId;
use std::collections::HashMap;

// ==========================================
// HeatPlan - 插入序保持的 标签 → 飞手序列 映射
// ==========================================
#[derive(Debug, Default)]
pub struct HeatPlan {
    groups: Vec<(String, Vec<PilotId>)>,
    index: HashMap<String, usize>,
}

impl HeatPlan {
    pub fn new() -> Self {
        Self::default()
    }

    /// 把飞手追加到其所在标签的组尾
    pub fn push(&mut self, label: &str, pilot_id: PilotId) {
        match self.index.get(label) {
            Some(&pos) => self.groups[pos].1.push(pilot_id),
            None => {
                self.index.insert(label.to_string(), self.groups.len());
                self.groups.push((label.to_string(), vec![pilot_id]));
            }
        }
    }

    /// 去重后的标签数（即将生成的赛组数）
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// 按标签首次出现顺序遍历 (标签, 组内飞手)
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[PilotId])> {
        self.groups
            .iter()
            .map(|(label, ids)| (label.as_str(), ids.as_slice()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insertion_order_across_groups() {
        let mut plan = HeatPlan::new();
        plan.push("2", 10);
        plan.push("1", 11);
        plan.push("3", 12);

        let labels: Vec<&str> = plan.iter().map(|(label, _)| label).collect();
        assert_eq!(labels, vec!["2", "1", "3"]);
    }

    #[test]
    fn test_row_order_within_group_with_interleaving() {
        let mut plan = HeatPlan::new();
        plan.push("1", 10);
        plan.push("2", 20);
        plan.push("1", 11);
        plan.push("2", 21);
        plan.push("1", 12);

        let groups: Vec<(&str, &[PilotId])> = plan.iter().collect();
        assert_eq!(groups[0], ("1", &[10, 11, 12][..]));
        assert_eq!(groups[1], ("2", &[20, 21][..]));
    }

    #[test]
    fn test_visually_different_labels_are_distinct() {
        let mut plan = HeatPlan::new();
        plan.push("1", 10);
        plan.push("01", 11);

        assert_eq!(plan.group_count(), 2);
    }

    #[test]
    fn test_empty_label_is_its_own_group() {
        let mut plan = HeatPlan::new();
        plan.push("", 10);
        plan.push("1", 11);
        plan.push("", 12);

        let groups: Vec<(&str, &[PilotId])> = plan.iter().collect();
        assert_eq!(groups[0], ("", &[10, 12][..]));
    }
}
