// ==========================================
// 赛事管理系统 - 宿主集成层
// ==========================================
// 职责: 定义宿主 UI 通知/广播接口（具体界面由宿主实现）
// ==========================================

pub mod messenger;

pub use messenger::{LogMessenger, UiMessenger};
