// ==========================================
// 赛事管理系统 - 赛级/赛组注册表仓储
// ==========================================
// 职责: 管理 race_class / heat / heat_slot 表
// 说明: 槽位由本仓储在创建赛组时按固定数量预建（宿主行为）,
//       导入核心只按序填充,从不增删槽位
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::pilot::PilotId;
use crate::domain::race::{Heat, HeatSlot, RaceClass};
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use std::sync::{Arc, Mutex};

// ==========================================
// RaceRegistry Trait
// ==========================================
// 用途: 导入核心消费的赛级/赛组注册表接口（注入使用,不做全局单例）
// 实现者: SqliteRaceRepository
pub trait RaceRegistry: Send + Sync {
    /// 按名称精确查找赛级
    fn find_race_class(&self, name: &str) -> RepositoryResult<Option<RaceClass>>;

    /// 创建赛级
    fn create_race_class(&self, name: &str) -> RepositoryResult<RaceClass>;

    /// 创建赛组（同时按固定数量预建该组槽位）
    fn create_heat(&self, name: &str) -> RepositoryResult<Heat>;

    /// 将赛组绑定到赛级
    fn bind_heat_to_class(&self, heat_id: i64, class_id: i64) -> RepositoryResult<()>;

    /// 列出某赛组的全部槽位（按槽位序号升序）
    fn list_slots(&self, heat_id: i64) -> RepositoryResult<Vec<HeatSlot>>;

    /// 将飞手分配到指定槽位
    fn assign_slot(&self, slot_id: i64, pilot_id: PilotId) -> RepositoryResult<()>;

    /// 列出某赛级下的全部赛组
    fn list_heats_by_class(&self, class_id: i64) -> RepositoryResult<Vec<Heat>>;
}

// ==========================================
// SqliteRaceRepository - SQLite 实现
// ==========================================
pub struct SqliteRaceRepository {
    conn: Arc<Mutex<Connection>>,
    slots_per_heat: usize,
}

impl SqliteRaceRepository {
    pub fn new(db_path: &str, slots_per_heat: usize) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)
            .map_err(|e| RepositoryError::DatabaseConnectionError(e.to_string()))?;
        let repo = Self {
            conn: Arc::new(Mutex::new(conn)),
            slots_per_heat,
        };
        repo.ensure_table()?;
        Ok(repo)
    }

    pub fn from_connection(
        conn: Arc<Mutex<Connection>>,
        slots_per_heat: usize,
    ) -> RepositoryResult<Self> {
        let repo = Self {
            conn,
            slots_per_heat,
        };
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
            CREATE TABLE IF NOT EXISTS race_class (
              id INTEGER PRIMARY KEY AUTOINCREMENT,
              name TEXT NOT NULL UNIQUE,
              created_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS heat (
              id INTEGER PRIMARY KEY AUTOINCREMENT,
              name TEXT NOT NULL,
              race_class_id INTEGER,
              FOREIGN KEY (race_class_id) REFERENCES race_class(id)
            );

            CREATE TABLE IF NOT EXISTS heat_slot (
              id INTEGER PRIMARY KEY AUTOINCREMENT,
              heat_id INTEGER NOT NULL,
              slot_index INTEGER NOT NULL,
              pilot_id INTEGER,
              FOREIGN KEY (heat_id) REFERENCES heat(id) ON DELETE CASCADE,
              UNIQUE(heat_id, slot_index)
            );

            CREATE INDEX IF NOT EXISTS idx_heat_class
              ON heat(race_class_id);
            CREATE INDEX IF NOT EXISTS idx_slot_heat
              ON heat_slot(heat_id, slot_index);
            "#,
        )?;
        Ok(())
    }
}

impl RaceRegistry for SqliteRaceRepository {
    fn find_race_class(&self, name: &str) -> RepositoryResult<Option<RaceClass>> {
        let conn = self.get_conn()?;
        let mut stmt =
            conn.prepare("SELECT id, name, created_at FROM race_class WHERE name = ?1")?;

        let result = stmt.query_row(params![name], |row| {
            Ok(RaceClass {
                id: row.get(0)?,
                name: row.get(1)?,
                created_at: row.get::<_, DateTime<Utc>>(2)?,
            })
        });
        match result {
            Ok(class) => Ok(Some(class)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn create_race_class(&self, name: &str) -> RepositoryResult<RaceClass> {
        let now = Utc::now();
        let conn = self.get_conn()?;
        conn.execute(
            "INSERT INTO race_class (name, created_at) VALUES (?1, ?2)",
            params![name, now],
        )?;

        Ok(RaceClass {
            id: conn.last_insert_rowid(),
            name: name.to_string(),
            created_at: now,
        })
    }

    fn create_heat(&self, name: &str) -> RepositoryResult<Heat> {
        let mut conn = self.get_conn()?;
        let tx = conn.transaction().map_err(RepositoryError::from)?;

        tx.execute("INSERT INTO heat (name) VALUES (?1)", params![name])?;
        let heat_id = tx.last_insert_rowid();

        // 宿主行为: 创建赛组的同时预建固定数量的空槽位
        for slot_index in 0..self.slots_per_heat {
            tx.execute(
                "INSERT INTO heat_slot (heat_id, slot_index, pilot_id) VALUES (?1, ?2, NULL)",
                params![heat_id, slot_index as i64],
            )?;
        }

        tx.commit()?;
        Ok(Heat {
            id: heat_id,
            name: name.to_string(),
            race_class_id: None,
        })
    }

    fn bind_heat_to_class(&self, heat_id: i64, class_id: i64) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let updated = conn.execute(
            "UPDATE heat SET race_class_id = ?1 WHERE id = ?2",
            params![class_id, heat_id],
        )?;
        if updated == 0 {
            return Err(RepositoryError::NotFound {
                entity: "Heat".to_string(),
                id: heat_id.to_string(),
            });
        }
        Ok(())
    }

    fn list_slots(&self, heat_id: i64) -> RepositoryResult<Vec<HeatSlot>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT id, heat_id, slot_index, pilot_id
            FROM heat_slot
            WHERE heat_id = ?1
            ORDER BY slot_index
            "#,
        )?;

        let slots = stmt
            .query_map(params![heat_id], |row| {
                Ok(HeatSlot {
                    id: row.get(0)?,
                    heat_id: row.get(1)?,
                    slot_index: row.get(2)?,
                    pilot_id: row.get(3)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(slots)
    }

    fn assign_slot(&self, slot_id: i64, pilot_id: PilotId) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let updated = conn.execute(
            "UPDATE heat_slot SET pilot_id = ?1 WHERE id = ?2",
            params![pilot_id, slot_id],
        )?;
        if updated == 0 {
            return Err(RepositoryError::NotFound {
                entity: "HeatSlot".to_string(),
                id: slot_id.to_string(),
            });
        }
        Ok(())
    }

    fn list_heats_by_class(&self, class_id: i64) -> RepositoryResult<Vec<Heat>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, name, race_class_id FROM heat WHERE race_class_id = ?1 ORDER BY id",
        )?;

        let heats = stmt
            .query_map(params![class_id], |row| {
                Ok(Heat {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    race_class_id: row.get(2)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(heats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn create_repo(slots_per_heat: usize) -> (NamedTempFile, SqliteRaceRepository) {
        let temp_file = NamedTempFile::new().unwrap();
        let repo =
            SqliteRaceRepository::new(temp_file.path().to_str().unwrap(), slots_per_heat).unwrap();
        (temp_file, repo)
    }

    #[test]
    fn test_class_name_is_unique() {
        let (_f, repo) = create_repo(4);
        repo.create_race_class("Imported Class").unwrap();

        let found = repo.find_race_class("Imported Class").unwrap();
        assert!(found.is_some());

        // 同名重复创建触发唯一约束
        let dup = repo.create_race_class("Imported Class");
        assert!(matches!(
            dup,
            Err(RepositoryError::UniqueConstraintViolation(_))
                | Err(RepositoryError::DatabaseQueryError(_))
        ));
    }

    #[test]
    fn test_create_heat_prebuilds_slots() {
        let (_f, repo) = create_repo(4);
        let heat = repo.create_heat("Heat1").unwrap();

        let slots = repo.list_slots(heat.id).unwrap();
        assert_eq!(slots.len(), 4);
        // 槽位按序号升序且初始未分配
        for (idx, slot) in slots.iter().enumerate() {
            assert_eq!(slot.slot_index, idx as i64);
            assert!(slot.pilot_id.is_none());
        }
    }

    #[test]
    fn test_bind_and_list_by_class() {
        let (_f, repo) = create_repo(2);
        let class = repo.create_race_class("X").unwrap();
        let heat = repo.create_heat("Heat1").unwrap();

        repo.bind_heat_to_class(heat.id, class.id).unwrap();

        let heats = repo.list_heats_by_class(class.id).unwrap();
        assert_eq!(heats.len(), 1);
        assert_eq!(heats[0].race_class_id, Some(class.id));
    }

    #[test]
    fn test_assign_slot() {
        let (_f, repo) = create_repo(2);
        let heat = repo.create_heat("Heat1").unwrap();
        let slots = repo.list_slots(heat.id).unwrap();

        repo.assign_slot(slots[0].id, 42).unwrap();

        let slots = repo.list_slots(heat.id).unwrap();
        assert_eq!(slots[0].pilot_id, Some(42));
        assert_eq!(slots[1].pilot_id, None);
    }

    #[test]
    fn test_assign_unknown_slot_is_not_found() {
        let (_f, repo) = create_repo(2);
        let result = repo.assign_slot(9999, 1);
        assert!(matches!(result, Err(RepositoryError::NotFound { .. })));
    }
}
