// ==========================================
// 赛事管理系统 - 导入配置读取 Trait
// ==========================================
// 职责: 定义导入模块所需的配置读取接口（不包含实现）
// 红线: 不包含配置写入、不包含导入流程逻辑
// ==========================================

use async_trait::async_trait;
use std::error::Error;

// ==========================================
// ImporterConfigReader Trait
// ==========================================
// 用途: 导入模块所需的配置读取接口
// 实现者: ConfigManager（从 config_kv 表读取）
#[async_trait]
pub trait ImporterConfigReader: Send + Sync {
    /// 获取目标赛级名称
    ///
    /// # 默认值
    /// - "Imported Class"
    async fn get_class_name(&self) -> Result<String, Box<dyn Error>>;

    /// 获取来源模式选择器
    ///
    /// # 返回
    /// - "from_file" | "from_event_id" | "from_url"
    ///
    /// # 默认值
    /// - "from_file"
    async fn get_import_mode(&self) -> Result<String, Box<dyn Error>>;

    /// 获取来源位置（路径 / 赛事编号 / URL,含义随模式而定）
    ///
    /// # 默认值
    /// - "/static/user/pilots.csv"
    async fn get_source_location(&self) -> Result<String, Box<dyn Error>>;

    /// 获取每个赛组预建的槽位数（宿主赛组容量）
    ///
    /// # 默认值
    /// - 4
    async fn get_slots_per_heat(&self) -> Result<usize, Box<dyn Error>>;
}
