// ==========================================
// 赛事管理系统 - 飞手对账器
// ==========================================
// 职责: 对每一名单行,在注册表中按 (name, callsign) 精确查找既有飞手;
//       不存在则创建;两种情况都落到一个稳定的飞手标识
// 约束: 创建同步可见,同一运行内后续查找必须立即命中
// ==========================================

use crate::domain::pilot::PilotId;
use crate::domain::roster::RosterRow;
use crate::importer::error::ImportResult;
use crate::repository::PilotRegistry;
use tracing::info;

/// 单行对账结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reconciled {
    pub pilot_id: PilotId,
    /// 本次运行中是否新建了该飞手
    pub created: bool,
}

// ==========================================
// PilotReconciler - 飞手对账器
// ==========================================
pub struct PilotReconciler<'a> {
    registry: &'a dyn PilotRegistry,
}

impl<'a> PilotReconciler<'a> {
    pub fn new(registry: &'a dyn PilotRegistry) -> Self {
        Self { registry }
    }

    /// 对一条名单行做查找或创建
    ///
    /// # 返回
    /// - Reconciled: 稳定的飞手标识 + 是否新建
    ///
    /// 空的 name/callsign 也是合法身份键（缺失列的产物）,
    /// 会创建/命中一个空名飞手而不是报错
    pub fn reconcile(&self, row: &RosterRow) -> ImportResult<Reconciled> {
        if let Some(existing) = self.registry.find_pilot(&row.name, &row.callsign)? {
            info!(
                name = %row.name,
                callsign = %row.callsign,
                pilot_id = existing.id,
                "飞手已存在"
            );
            return Ok(Reconciled {
                pilot_id: existing.id,
                created: false,
            });
        }

        let pilot = self.registry.create_pilot(&row.name, &row.callsign)?;
        info!(
            name = %row.name,
            callsign = %row.callsign,
            pilot_id = pilot.id,
            "飞手已登记"
        );
        Ok(Reconciled {
            pilot_id: pilot.id,
            created: true,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::SqlitePilotRepository;
    use tempfile::NamedTempFile;

    fn row(name: &str, callsign: &str, heat: &str) -> RosterRow {
        RosterRow {
            name: name.to_string(),
            callsign: callsign.to_string(),
            heat: heat.to_string(),
        }
    }

    fn create_registry() -> (NamedTempFile, SqlitePilotRepository) {
        let temp_file = NamedTempFile::new().unwrap();
        let repo = SqlitePilotRepository::new(temp_file.path().to_str().unwrap()).unwrap();
        (temp_file, repo)
    }

    #[test]
    fn test_creates_new_pilot_once() {
        let (_f, registry) = create_registry();
        let reconciler = PilotReconciler::new(&registry);

        let first = reconciler.reconcile(&row("Alice", "AL1", "1")).unwrap();
        assert!(first.created);

        // 同一运行内第二次出现: 命中同一标识,不再创建
        let second = reconciler.reconcile(&row("Alice", "AL1", "2")).unwrap();
        assert!(!second.created);
        assert_eq!(second.pilot_id, first.pilot_id);

        assert_eq!(registry.list_pilots().unwrap().len(), 1);
    }

    #[test]
    fn test_identity_pair_is_exact() {
        let (_f, registry) = create_registry();
        let reconciler = PilotReconciler::new(&registry);

        let a = reconciler.reconcile(&row("Alice", "AL1", "1")).unwrap();
        // 呼号不同 → 另一名飞手
        let b = reconciler.reconcile(&row("Alice", "AL9", "1")).unwrap();
        assert_ne!(a.pilot_id, b.pilot_id);
        assert!(b.created);
    }

    #[test]
    fn test_empty_identity_is_valid() {
        let (_f, registry) = create_registry();
        let reconciler = PilotReconciler::new(&registry);

        let first = reconciler.reconcile(&row("", "", "")).unwrap();
        assert!(first.created);
        let second = reconciler.reconcile(&row("", "", "")).unwrap();
        assert_eq!(second.pilot_id, first.pilot_id);
    }
}
