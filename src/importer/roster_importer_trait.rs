// ==========================================
// 赛事管理系统 - 名单导入 Trait
// ==========================================
// 职责: 定义名单导入主接口（不包含实现）
// ==========================================

use crate::domain::roster::ImportSummary;
use crate::importer::error::ImportResult;
use async_trait::async_trait;

// ==========================================
// RosterImporter Trait
// ==========================================
// 用途: 名单导入主接口,由宿主的单个 UI 动作触发
// 实现者: RosterImporterImpl
#[async_trait]
pub trait RosterImporter: Send + Sync {
    /// 执行一次完整的名单导入
    ///
    /// # 返回
    /// - Ok(ImportSummary): 导入汇总（飞手/赛组/槽位统计,含溢出明细）
    /// - Err: 来源不存在、拉取失败、赛级重名等（用户可见错误会同时产生 UI 告警）
    ///
    /// # 导入流程（5个阶段）
    /// 1. 来源解析（本地路径 / 赛事编号 / URL → 本地文件）
    /// 2. CSV 解析
    /// 3. 飞手对账（查找或创建）+ 按 heat 标签归组
    /// 4. 赛级/赛组生成与槽位分配
    /// 5. 广播与通知
    ///
    /// # 一致性说明
    /// - 无事务包裹: 中途失败会留下已创建的飞手/赛级/赛组（不回滚）
    /// - 设计假定同一时刻只有一次导入在运行;并发触发是未防护的
    ///   共享注册表竞争（已知风险,由宿主的单按钮触发方式兜底）
    async fn import(&self) -> ImportResult<ImportSummary>;
}
