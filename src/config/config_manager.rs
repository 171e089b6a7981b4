// ==========================================
// 赛事管理系统 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、写入
// 存储: config_kv 表 (key-value + scope)
// ==========================================

use crate::config::import_config_trait::ImporterConfigReader;
use crate::db::open_sqlite_connection;
use async_trait::async_trait;
use rusqlite::{params, Connection};
use std::error::Error;
use std::sync::{Arc, Mutex};

// ==========================================
// 配置键常量
// ==========================================
pub mod option_keys {
    /// 目标赛级名称
    pub const CLASS_NAME: &str = "importer/class_name";
    /// 来源模式选择器
    pub const IMPORT_MODE: &str = "importer/import_mode";
    /// 来源位置（路径 / 赛事编号 / URL）
    pub const SOURCE_LOCATION: &str = "importer/source_location";
    /// 每个赛组预建的槽位数
    pub const SLOTS_PER_HEAT: &str = "importer/slots_per_heat";
}

/// 默认赛级名称
pub const DEFAULT_CLASS_NAME: &str = "Imported Class";
/// 默认来源模式
pub const DEFAULT_IMPORT_MODE: &str = "from_file";
/// 默认来源位置（应用根目录相对路径）
pub const DEFAULT_SOURCE_LOCATION: &str = "/static/user/pilots.csv";
/// 默认槽位数
pub const DEFAULT_SLOTS_PER_HEAT: usize = 4;

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// 创建新的 ConfigManager 实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> Result<Self, Box<dyn Error>> {
        let conn = open_sqlite_connection(db_path)?;
        let manager = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        manager.ensure_table()?;
        Ok(manager)
    }

    /// 从已有连接创建 ConfigManager
    ///
    /// 说明：为保证连接行为一致，会对传入连接再次应用统一 PRAGMA（幂等）。
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Result<Self, Box<dyn Error>> {
        {
            let conn_guard = conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;
            crate::db::configure_sqlite_connection(&conn_guard)?;
        }

        let manager = Self { conn };
        manager.ensure_table()?;
        Ok(manager)
    }

    /// 确保 config_kv 表存在
    fn ensure_table(&self) -> Result<(), Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS config_kv (
              scope_id TEXT NOT NULL,
              key TEXT NOT NULL,
              value TEXT NOT NULL,
              updated_at TEXT NOT NULL DEFAULT (datetime('now')),
              PRIMARY KEY (scope_id, key)
            );
            "#,
        )?;
        Ok(())
    }

    /// 从 config_kv 表读取配置值（scope_id='global'）
    ///
    /// # 返回
    /// - Some(String): 配置值
    /// - None: 配置不存在
    fn get_config_value(&self, key: &str) -> Result<Option<String>, Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

        let result = conn.query_row(
            "SELECT value FROM config_kv WHERE scope_id = 'global' AND key = ?1",
            params![key],
            |row| row.get::<_, String>(0),
        );

        match result {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(Box::new(e)),
        }
    }

    /// 从 config_kv 表读取配置值，带默认值
    fn get_config_or_default(&self, key: &str, default: &str) -> Result<String, Box<dyn Error>> {
        Ok(self
            .get_config_value(key)?
            .unwrap_or_else(|| default.to_string()))
    }

    /// 写入 global scope 的配置值（Upsert）
    ///
    /// 宿主的选项界面与测试通过此方法预置选项
    pub fn set_global_config_value(&self, key: &str, value: &str) -> Result<(), Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;
        conn.execute(
            r#"
            INSERT INTO config_kv (scope_id, key, value, updated_at)
            VALUES ('global', ?1, ?2, datetime('now'))
            ON CONFLICT(scope_id, key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
            params![key, value],
        )?;
        Ok(())
    }
}

#[async_trait]
impl ImporterConfigReader for ConfigManager {
    async fn get_class_name(&self) -> Result<String, Box<dyn Error>> {
        self.get_config_or_default(option_keys::CLASS_NAME, DEFAULT_CLASS_NAME)
    }

    async fn get_import_mode(&self) -> Result<String, Box<dyn Error>> {
        self.get_config_or_default(option_keys::IMPORT_MODE, DEFAULT_IMPORT_MODE)
    }

    async fn get_source_location(&self) -> Result<String, Box<dyn Error>> {
        self.get_config_or_default(option_keys::SOURCE_LOCATION, DEFAULT_SOURCE_LOCATION)
    }

    async fn get_slots_per_heat(&self) -> Result<usize, Box<dyn Error>> {
        let raw = self.get_config_or_default(
            option_keys::SLOTS_PER_HEAT,
            &DEFAULT_SLOTS_PER_HEAT.to_string(),
        )?;
        let parsed = raw
            .parse::<usize>()
            .map_err(|e| format!("配置值格式错误 (key: {}): {}", option_keys::SLOTS_PER_HEAT, e))?;
        Ok(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn create_manager() -> (NamedTempFile, ConfigManager) {
        let temp_file = NamedTempFile::new().unwrap();
        let manager = ConfigManager::new(temp_file.path().to_str().unwrap()).unwrap();
        (temp_file, manager)
    }

    #[tokio::test]
    async fn test_defaults_when_unset() {
        let (_f, manager) = create_manager();

        assert_eq!(manager.get_class_name().await.unwrap(), DEFAULT_CLASS_NAME);
        assert_eq!(manager.get_import_mode().await.unwrap(), DEFAULT_IMPORT_MODE);
        assert_eq!(
            manager.get_source_location().await.unwrap(),
            DEFAULT_SOURCE_LOCATION
        );
        assert_eq!(
            manager.get_slots_per_heat().await.unwrap(),
            DEFAULT_SLOTS_PER_HEAT
        );
    }

    #[tokio::test]
    async fn test_set_and_read_back() {
        let (_f, manager) = create_manager();

        manager
            .set_global_config_value(option_keys::CLASS_NAME, "2026 赛季资格赛")
            .unwrap();
        manager
            .set_global_config_value(option_keys::SLOTS_PER_HEAT, "8")
            .unwrap();

        assert_eq!(manager.get_class_name().await.unwrap(), "2026 赛季资格赛");
        assert_eq!(manager.get_slots_per_heat().await.unwrap(), 8);
    }

    #[tokio::test]
    async fn test_upsert_overwrites() {
        let (_f, manager) = create_manager();

        manager
            .set_global_config_value(option_keys::IMPORT_MODE, "from_url")
            .unwrap();
        manager
            .set_global_config_value(option_keys::IMPORT_MODE, "from_event_id")
            .unwrap();

        assert_eq!(manager.get_import_mode().await.unwrap(), "from_event_id");
    }

    #[tokio::test]
    async fn test_invalid_slots_per_heat_is_error() {
        let (_f, manager) = create_manager();
        manager
            .set_global_config_value(option_keys::SLOTS_PER_HEAT, "many")
            .unwrap();

        assert!(manager.get_slots_per_heat().await.is_err());
    }
}
