// ==========================================
// 赛事管理系统 - 宿主 UI 通知接口
// ==========================================
// 用途: 导入核心产生的用户可见消息与列表变更广播,
//       全部经由注入的 UiMessenger 送达宿主（不做全局单例）
// ==========================================

// ==========================================
// UiMessenger Trait
// ==========================================
// 用途: 宿主 UI 通知/告警/广播接口
// 实现者: 宿主应用;库内提供 LogMessenger 作为默认实现
pub trait UiMessenger: Send + Sync {
    /// 成功类通知（非阻塞提示）
    fn notify(&self, message: &str);

    /// 告警（用户必须注意的失败）
    fn alert(&self, message: &str);

    /// 广播飞手列表已变更（每次导入运行至多一次,不逐飞手广播）
    fn broadcast_pilots(&self);

    /// 广播赛级列表已变更
    fn broadcast_raceclasses(&self);

    /// 广播赛组列表已变更
    fn broadcast_heats(&self);
}

// ==========================================
// LogMessenger - 日志实现
// ==========================================
// 无宿主 UI 时的默认实现: 全部转发到 tracing
pub struct LogMessenger;

impl UiMessenger for LogMessenger {
    fn notify(&self, message: &str) {
        tracing::info!(target: "ui", "{}", message);
    }

    fn alert(&self, message: &str) {
        tracing::warn!(target: "ui", "{}", message);
    }

    fn broadcast_pilots(&self) {
        tracing::debug!(target: "ui", "broadcast: pilots");
    }

    fn broadcast_raceclasses(&self) {
        tracing::debug!(target: "ui", "broadcast: raceclasses");
    }

    fn broadcast_heats(&self) {
        tracing::debug!(target: "ui", "broadcast: heats");
    }
}
