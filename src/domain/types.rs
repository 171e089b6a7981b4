// ==========================================
// 赛事管理系统 - 领域类型定义
// ==========================================
// 名单来源模式: 本地文件 / 远程 URL / 第三方赛事编号
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 名单来源模式 (Source Mode)
// ==========================================
// 由宿主选项 (import_mode, source_location) 两个字符串解析而来;
// 解析为带数据的枚举，后续全部 match 分派，不再做字符串比较
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "location", rename_all = "snake_case")]
pub enum SourceMode {
    /// 应用根目录下的本地文件路径
    FromFile(String),
    /// 第三方赛事站点的赛事编号（拼入固定 URL 模板后按 URL 处理）
    FromEventId(String),
    /// 任意远程 URL
    FromUrl(String),
}

impl SourceMode {
    /// 由宿主选项值解析来源模式
    ///
    /// # 参数
    /// - mode: 模式选择器（"from_file" | "from_event_id" | "from_url"）
    /// - location: 路径 / 赛事编号 / URL（含义随模式而定）
    ///
    /// # 返回
    /// - Some(SourceMode): 选择器合法
    /// - None: 未知选择器
    pub fn parse(mode: &str, location: &str) -> Option<Self> {
        match mode {
            "from_file" => Some(SourceMode::FromFile(location.to_string())),
            "from_event_id" => Some(SourceMode::FromEventId(location.to_string())),
            "from_url" => Some(SourceMode::FromUrl(location.to_string())),
            _ => None,
        }
    }

    /// 是否需要网络访问
    pub fn is_remote(&self) -> bool {
        !matches!(self, SourceMode::FromFile(_))
    }
}

impl fmt::Display for SourceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceMode::FromFile(p) => write!(f, "from_file({})", p),
            SourceMode::FromEventId(id) => write!(f, "from_event_id({})", id),
            SourceMode::FromUrl(u) => write!(f, "from_url({})", u),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_modes() {
        assert_eq!(
            SourceMode::parse("from_file", "/static/user/pilots.csv"),
            Some(SourceMode::FromFile("/static/user/pilots.csv".to_string()))
        );
        assert_eq!(
            SourceMode::parse("from_event_id", "12345"),
            Some(SourceMode::FromEventId("12345".to_string()))
        );
        assert_eq!(
            SourceMode::parse("from_url", "https://example.com/pilots.csv"),
            Some(SourceMode::FromUrl("https://example.com/pilots.csv".to_string()))
        );
    }

    #[test]
    fn test_parse_unknown_mode() {
        assert_eq!(SourceMode::parse("from_clipboard", "x"), None);
    }

    #[test]
    fn test_is_remote() {
        assert!(!SourceMode::FromFile("a.csv".to_string()).is_remote());
        assert!(SourceMode::FromEventId("1".to_string()).is_remote());
        assert!(SourceMode::FromUrl("http://x".to_string()).is_remote());
    }
}
