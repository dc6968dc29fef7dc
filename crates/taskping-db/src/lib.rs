//! # TaskPing DB
//!
//! SQLite-backed task store. Survives restarts, no server process. The
//! reminder pipeline consumes it through the read-only
//! [`TaskRepository`] trait; the CLI uses the write side.

use std::path::Path;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use taskping_core::error::{Result, TaskPingError};
use taskping_core::traits::TaskRepository;
use taskping_core::types::Task;

/// SQLite task store.
pub struct TaskDb {
    conn: Mutex<rusqlite::Connection>,
}

impl TaskDb {
    /// Open or create the task database.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let conn = rusqlite::Connection::open(path)
            .map_err(|e| TaskPingError::Repository(format!("DB open: {e}")))?;
        let db = Self {
            conn: Mutex::new(conn),
        };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<()> {
        self.conn
            .lock()
            .unwrap()
            .execute_batch(
                "
            CREATE TABLE IF NOT EXISTS tasks (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                due_date TEXT,                   -- RFC 3339, NULL when undated
                done INTEGER NOT NULL DEFAULT 0,
                schedule TEXT NOT NULL,          -- cadence key
                user_email TEXT NOT NULL,
                created_at TEXT NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_tasks_schedule ON tasks (schedule, done);
         ",
            )
            .map_err(|e| TaskPingError::Repository(format!("Migration: {e}")))?;
        Ok(())
    }

    /// Insert or update a task.
    pub fn save_task(&self, task: &Task) -> Result<()> {
        self.conn
            .lock()
            .unwrap()
            .execute(
                "INSERT OR REPLACE INTO tasks
                 (id, name, due_date, done, schedule, user_email, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                rusqlite::params![
                    task.id,
                    task.name,
                    task.due_date.map(|d| d.to_rfc3339()),
                    task.done as i32,
                    task.schedule,
                    task.user_email,
                    task.created_at.to_rfc3339(),
                ],
            )
            .map_err(|e| TaskPingError::Repository(format!("Save task: {e}")))?;
        Ok(())
    }

    /// All tasks, oldest first.
    pub fn list_tasks(&self) -> Result<Vec<Task>> {
        self.query_tasks("SELECT id, name, due_date, done, schedule, user_email, created_at FROM tasks ORDER BY rowid", &[])
    }

    /// Mark a task completed. Returns false when the id is unknown.
    pub fn mark_done(&self, id: &str) -> Result<bool> {
        let changed = self
            .conn
            .lock()
            .unwrap()
            .execute("UPDATE tasks SET done = 1 WHERE id = ?1", [id])
            .map_err(|e| TaskPingError::Repository(format!("Mark done: {e}")))?;
        Ok(changed > 0)
    }

    /// Delete a task.
    pub fn delete_task(&self, id: &str) -> Result<()> {
        self.conn
            .lock()
            .unwrap()
            .execute("DELETE FROM tasks WHERE id = ?1", [id])
            .map_err(|e| TaskPingError::Repository(format!("Delete task: {e}")))?;
        Ok(())
    }

    fn query_tasks(&self, sql: &str, params: &[&dyn rusqlite::ToSql]) -> Result<Vec<Task>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn
            .prepare(sql)
            .map_err(|e| TaskPingError::Repository(format!("Prepare: {e}")))?;
        let rows = stmt
            .query_map(params, |row| {
                let due_date_str: Option<String> = row.get(2)?;
                let created_at_str: String = row.get(6)?;
                Ok(Task {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    due_date: due_date_str
                        .and_then(|s| DateTime::parse_from_rfc3339(&s).ok())
                        .map(|d| d.with_timezone(&Utc)),
                    done: row.get::<_, i32>(3)? != 0,
                    schedule: row.get(4)?,
                    user_email: row.get(5)?,
                    created_at: DateTime::parse_from_rfc3339(&created_at_str)
                        .map(|d| d.with_timezone(&Utc))
                        .unwrap_or_else(|_| Utc::now()),
                })
            })
            .map_err(|e| TaskPingError::Repository(format!("Query: {e}")))?;
        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| TaskPingError::Repository(format!("Row: {e}")))
    }
}

#[async_trait]
impl TaskRepository for TaskDb {
    async fn find_open_by_schedule(&self, schedule: &str) -> Result<Vec<Task>> {
        self.query_tasks(
            "SELECT id, name, due_date, done, schedule, user_email, created_at
             FROM tasks WHERE done = 0 AND schedule = ?1 ORDER BY rowid",
            &[&schedule],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_db(name: &str) -> (std::path::PathBuf, TaskDb) {
        let dir = std::env::temp_dir().join(name);
        std::fs::create_dir_all(&dir).ok();
        let path = dir.join("tasks.db");
        std::fs::remove_file(&path).ok();
        let db = TaskDb::open(&path).unwrap();
        (dir, db)
    }

    #[test]
    fn test_open_and_migrate() {
        let (dir, db) = temp_db("taskping-db-test");
        assert!(db.list_tasks().unwrap().is_empty());
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_save_and_list_roundtrip() {
        let (dir, db) = temp_db("taskping-db-test2");
        let task = Task::new("Buy milk", "daily", "b@x.com").with_due_date(Utc::now());
        db.save_task(&task).unwrap();

        let loaded = db.list_tasks().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].name, "Buy milk");
        assert!(loaded[0].due_date.is_some());
        std::fs::remove_dir_all(&dir).ok();
    }

    #[tokio::test]
    async fn test_find_open_skips_done_and_other_schedules() {
        let (dir, db) = temp_db("taskping-db-test3");
        let open = Task::new("t1", "daily", "a@x.com");
        let mut done = Task::new("t2", "daily", "a@x.com");
        done.done = true;
        let weekly = Task::new("t3", "weekly", "a@x.com");
        for t in [&open, &done, &weekly] {
            db.save_task(t).unwrap();
        }

        let found = db.find_open_by_schedule("daily").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, open.id);

        // Unknown key is an empty result, never an error.
        assert!(db.find_open_by_schedule("monthly").await.unwrap().is_empty());
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_mark_done() {
        let (dir, db) = temp_db("taskping-db-test4");
        let task = Task::new("t1", "daily", "a@x.com");
        db.save_task(&task).unwrap();

        assert!(db.mark_done(&task.id).unwrap());
        assert!(!db.mark_done("no-such-id").unwrap());
        assert!(db.list_tasks().unwrap()[0].done);
        std::fs::remove_dir_all(&dir).ok();
    }
}
