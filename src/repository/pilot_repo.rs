// ==========================================
// 赛事管理系统 - 飞手注册表仓储
// ==========================================
// 职责: 管理 pilot 表（飞手注册表）
// 说明: 飞手标识由本仓储在创建时分配,调用方从不自行编造
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::pilot::{Pilot, PilotId};
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use std::sync::{Arc, Mutex};

// ==========================================
// PilotRegistry Trait
// ==========================================
// 用途: 导入核心消费的飞手注册表接口（注入使用,不做全局单例）
// 实现者: SqlitePilotRepository
pub trait PilotRegistry: Send + Sync {
    /// 列出全部已注册飞手
    fn list_pilots(&self) -> RepositoryResult<Vec<Pilot>>;

    /// 按身份键 (name, callsign) 精确查找飞手
    ///
    /// # 返回
    /// - Some(Pilot): 存在精确匹配
    /// - None: 不存在
    fn find_pilot(&self, name: &str, callsign: &str) -> RepositoryResult<Option<Pilot>>;

    /// 创建新飞手并返回注册表分配的完整记录
    ///
    /// 创建是同步的: 返回后对同一运行内的后续查找立即可见
    fn create_pilot(&self, name: &str, callsign: &str) -> RepositoryResult<Pilot>;
}

// ==========================================
// SqlitePilotRepository - SQLite 实现
// ==========================================
pub struct SqlitePilotRepository {
    conn: Arc<Mutex<Connection>>,
}

impl SqlitePilotRepository {
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)
            .map_err(|e| RepositoryError::DatabaseConnectionError(e.to_string()))?;
        let repo = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        repo.ensure_table()?;
        Ok(repo)
    }

    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> RepositoryResult<Self> {
        let repo = Self { conn };
        repo.ensure_table()?;
        Ok(repo)
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 确保表存在（如果不存在则创建）
    fn ensure_table(&self) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS pilot (
              id INTEGER PRIMARY KEY AUTOINCREMENT,
              name TEXT NOT NULL,
              callsign TEXT NOT NULL,
              created_at TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_pilot_identity
              ON pilot(name, callsign);
            "#,
        )?;
        Ok(())
    }

    fn row_to_pilot(row: &rusqlite::Row<'_>) -> rusqlite::Result<Pilot> {
        Ok(Pilot {
            id: row.get(0)?,
            name: row.get(1)?,
            callsign: row.get(2)?,
            created_at: row.get::<_, DateTime<Utc>>(3)?,
        })
    }
}

impl PilotRegistry for SqlitePilotRepository {
    fn list_pilots(&self) -> RepositoryResult<Vec<Pilot>> {
        let conn = self.get_conn()?;
        let mut stmt =
            conn.prepare("SELECT id, name, callsign, created_at FROM pilot ORDER BY id")?;
        let pilots = stmt
            .query_map([], Self::row_to_pilot)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(pilots)
    }

    fn find_pilot(&self, name: &str, callsign: &str) -> RepositoryResult<Option<Pilot>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT id, name, callsign, created_at
            FROM pilot
            WHERE name = ?1 AND callsign = ?2
            ORDER BY id
            LIMIT 1
            "#,
        )?;

        let result = stmt.query_row(params![name, callsign], Self::row_to_pilot);
        match result {
            Ok(pilot) => Ok(Some(pilot)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn create_pilot(&self, name: &str, callsign: &str) -> RepositoryResult<Pilot> {
        let now = Utc::now();
        let id: PilotId = {
            let conn = self.get_conn()?;
            conn.execute(
                "INSERT INTO pilot (name, callsign, created_at) VALUES (?1, ?2, ?3)",
                params![name, callsign, now],
            )?;
            conn.last_insert_rowid()
        };

        Ok(Pilot {
            id,
            name: name.to_string(),
            callsign: callsign.to_string(),
            created_at: now,
        })
    }
}
