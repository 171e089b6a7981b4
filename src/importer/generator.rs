// ==========================================
// 赛事管理系统 - 赛级/赛组结构生成器
// ==========================================
// 职责: 创建一个赛级,按归组结果逐组创建赛组并按序填充槽位
// 约束: 赛级名称全局唯一,重名直接中止（已创建的飞手不回滚）;
//       槽位溢出只中止该组剩余分配,其余组继续,溢出计入报告
// ==========================================

use crate::domain::roster::{GenerateReport, SlotOverflow};
use crate::i18n::t;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::heat_grouping::HeatPlan;
use crate::repository::RaceRegistry;
use tracing::{debug, info, warn};

// ==========================================
// RaceStructureGenerator - 结构生成器
// ==========================================
// 跨运行无状态;同名赛级的重复导入在第 1 步即被拒绝
pub struct RaceStructureGenerator<'a> {
    registry: &'a dyn RaceRegistry,
}

impl<'a> RaceStructureGenerator<'a> {
    pub fn new(registry: &'a dyn RaceRegistry) -> Self {
        Self { registry }
    }

    /// 生成赛级与赛组并分配槽位
    ///
    /// # 参数
    /// - plan: 归组结果（标签首次出现顺序）
    /// - class_name: 目标赛级名称
    ///
    /// # 返回
    /// - Ok(GenerateReport): 创建与分配统计（含溢出明细）
    /// - Err(ImportError::DuplicateClassName): 赛级重名,未创建任何赛组
    pub fn generate(&self, plan: &HeatPlan, class_name: &str) -> ImportResult<GenerateReport> {
        // 步骤 1: 赛级重名检查（精确字符串匹配）
        if self.registry.find_race_class(class_name)?.is_some() {
            warn!(class_name = %class_name, "赛级名称已存在,中止生成");
            return Err(ImportError::DuplicateClassName(class_name.to_string()));
        }

        // 步骤 2: 创建赛级
        let race_class = self.registry.create_race_class(class_name)?;
        info!(class_name = %class_name, class_id = race_class.id, "赛级已创建");

        // 步骤 3: 逐组创建赛组、绑定、按序填槽
        let heat_prefix = t("race.heat_prefix");
        let mut heats_created = 0usize;
        let mut slots_assigned = 0usize;
        let mut overflows = Vec::new();

        for (label, pilot_ids) in plan.iter() {
            let heat_name = format!("{}{}", heat_prefix, label);
            let heat = self.registry.create_heat(&heat_name)?;
            self.registry.bind_heat_to_class(heat.id, race_class.id)?;
            heats_created += 1;

            let slots = self.registry.list_slots(heat.id)?;
            debug!(
                heat = %heat_name,
                slots = slots.len(),
                pilots = pilot_ids.len(),
                "开始分配槽位"
            );

            for (index, pilot_id) in pilot_ids.iter().enumerate() {
                let Some(slot) = slots.get(index) else {
                    // 槽位溢出: 记录后跳过该组剩余飞手,继续处理其他组
                    warn!(
                        heat = %heat_name,
                        slots = slots.len(),
                        pilots = pilot_ids.len(),
                        "赛组飞手数超过可用槽位,多余飞手未分配"
                    );
                    overflows.push(SlotOverflow {
                        heat_name: heat_name.clone(),
                        slot_count: slots.len(),
                        pilot_count: pilot_ids.len(),
                    });
                    break;
                };
                self.registry.assign_slot(slot.id, *pilot_id)?;
                slots_assigned += 1;
            }
        }

        info!(
            class_id = race_class.id,
            heats = heats_created,
            assigned = slots_assigned,
            overflows = overflows.len(),
            "赛级与赛组生成完成"
        );

        Ok(GenerateReport {
            race_class_id: race_class.id,
            heats_created,
            slots_assigned,
            overflows,
        })
    }
}
