//! SQLite-based subject store and study-session log.
//!
//! Provides persistent storage for:
//! - Subjects (the engine's input snapshot)
//! - Logged study sessions and their progress contributions
//! - Aggregate statistics (daily and all-time)
//!
//! The allocation engine never calls back into this store; it only ever
//! receives read-only subject snapshots from [`SubjectDb::list_subjects`].

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use serde::{Deserialize, Serialize};

use super::data_dir;
use crate::error::DatabaseError;
use crate::subject::{Priority, Subject};

/// A logged study session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRecord {
    pub id: i64,
    pub subject_id: String,
    pub duration_min: u32,
    /// Progress percentage points this session added.
    pub progress_delta: u8,
    pub logged_at: DateTime<Utc>,
}

/// Aggregate study statistics.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StudyStats {
    pub total_sessions: u64,
    pub total_minutes: u64,
    pub today_sessions: u64,
    pub today_minutes: u64,
}

/// SQLite database for subjects and study sessions.
pub struct SubjectDb {
    conn: Connection,
}

impl SubjectDb {
    /// Open the database at `~/.config/studyplan/studyplan.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self, DatabaseError> {
        let path = data_dir()
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?
            .join("studyplan.db");
        Self::open_at(&path)
    }

    /// Open the database at an explicit path.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open_at(path: &std::path::Path) -> Result<Self, DatabaseError> {
        let conn = Connection::open(path).map_err(|source| DatabaseError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database (for tests).
    #[cfg(test)]
    pub fn open_memory() -> Result<Self, DatabaseError> {
        let conn = Connection::open_in_memory().map_err(DatabaseError::from)?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), DatabaseError> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS subjects (
                id         TEXT PRIMARY KEY,
                name       TEXT NOT NULL,
                progress   INTEGER NOT NULL DEFAULT 0,
                deadline   TEXT NOT NULL,
                priority   TEXT NOT NULL,
                created_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS sessions (
                id             INTEGER PRIMARY KEY AUTOINCREMENT,
                subject_id     TEXT NOT NULL REFERENCES subjects(id) ON DELETE CASCADE,
                duration_min   INTEGER NOT NULL,
                progress_delta INTEGER NOT NULL,
                logged_at      TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_sessions_logged_at ON sessions(logged_at);
            CREATE INDEX IF NOT EXISTS idx_sessions_subject_id ON sessions(subject_id);",
        )?;
        Ok(())
    }

    /// Insert a new subject.
    ///
    /// # Errors
    /// Returns an error if the insert fails.
    pub fn create_subject(&self, subject: &Subject) -> Result<(), DatabaseError> {
        self.conn.execute(
            "INSERT INTO subjects (id, name, progress, deadline, priority, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                subject.id,
                subject.name,
                subject.progress,
                subject.deadline.to_string(),
                subject.priority.as_str(),
                subject.created_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    /// List all subjects, most recently created first.
    ///
    /// # Errors
    /// Returns an error if the query fails or a row is malformed.
    pub fn list_subjects(&self) -> Result<Vec<Subject>, DatabaseError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, progress, deadline, priority, created_at
             FROM subjects
             ORDER BY created_at DESC",
        )?;
        let rows = stmt.query_map([], row_to_subject)?;
        let mut subjects = Vec::new();
        for row in rows {
            subjects.push(row?);
        }
        Ok(subjects)
    }

    /// Fetch a single subject by id.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub fn get_subject(&self, id: &str) -> Result<Option<Subject>, DatabaseError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, progress, deadline, priority, created_at
             FROM subjects
             WHERE id = ?1",
        )?;
        let mut rows = stmt.query_map(params![id], row_to_subject)?;
        match rows.next() {
            Some(row) => Ok(Some(row?)),
            None => Ok(None),
        }
    }

    /// Update all mutable fields of a subject.
    ///
    /// # Errors
    /// Returns [`DatabaseError::SubjectNotFound`] if the id does not exist.
    pub fn update_subject(&self, subject: &Subject) -> Result<(), DatabaseError> {
        let changed = self.conn.execute(
            "UPDATE subjects
             SET name = ?2, progress = ?3, deadline = ?4, priority = ?5
             WHERE id = ?1",
            params![
                subject.id,
                subject.name,
                subject.progress,
                subject.deadline.to_string(),
                subject.priority.as_str(),
            ],
        )?;
        if changed == 0 {
            return Err(DatabaseError::SubjectNotFound(subject.id.clone()));
        }
        Ok(())
    }

    /// Delete a subject and its sessions.
    ///
    /// # Errors
    /// Returns [`DatabaseError::SubjectNotFound`] if the id does not exist.
    pub fn delete_subject(&self, id: &str) -> Result<(), DatabaseError> {
        self.conn
            .execute("DELETE FROM sessions WHERE subject_id = ?1", params![id])?;
        let changed = self
            .conn
            .execute("DELETE FROM subjects WHERE id = ?1", params![id])?;
        if changed == 0 {
            return Err(DatabaseError::SubjectNotFound(id.to_string()));
        }
        Ok(())
    }

    /// Log a study session and fold its progress into the subject, clamped
    /// at 100%, in a single transaction.
    ///
    /// # Errors
    /// Returns [`DatabaseError::SubjectNotFound`] if the subject id does
    /// not exist.
    pub fn log_session(
        &mut self,
        subject_id: &str,
        duration_min: u32,
        progress_delta: u8,
    ) -> Result<Subject, DatabaseError> {
        let tx = self.conn.transaction()?;

        let mut subject = tx
            .query_row(
                "SELECT id, name, progress, deadline, priority, created_at
                 FROM subjects WHERE id = ?1",
                params![subject_id],
                row_to_subject,
            )
            .optional()?
            .ok_or_else(|| DatabaseError::SubjectNotFound(subject_id.to_string()))?;
        subject.add_progress(progress_delta);

        tx.execute(
            "UPDATE subjects SET progress = ?2 WHERE id = ?1",
            params![subject_id, subject.progress],
        )?;
        tx.execute(
            "INSERT INTO sessions (subject_id, duration_min, progress_delta, logged_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                subject_id,
                duration_min,
                progress_delta,
                Utc::now().to_rfc3339()
            ],
        )?;
        tx.commit()?;

        Ok(subject)
    }

    /// List logged sessions, newest first, optionally for a single subject.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub fn list_sessions(
        &self,
        subject_id: Option<&str>,
    ) -> Result<Vec<SessionRecord>, DatabaseError> {
        let (sql, filter) = match subject_id {
            Some(id) => (
                "SELECT id, subject_id, duration_min, progress_delta, logged_at
                 FROM sessions WHERE subject_id = ?1 ORDER BY logged_at DESC",
                Some(id),
            ),
            None => (
                "SELECT id, subject_id, duration_min, progress_delta, logged_at
                 FROM sessions ORDER BY logged_at DESC",
                None,
            ),
        };
        let mut stmt = self.conn.prepare(sql)?;
        let rows = match filter {
            Some(id) => stmt.query_map(params![id], row_to_session)?,
            None => stmt.query_map([], row_to_session)?,
        };
        let mut sessions = Vec::new();
        for row in rows {
            sessions.push(row?);
        }
        Ok(sessions)
    }

    /// Aggregate statistics over today's sessions.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub fn stats_today(&self) -> Result<StudyStats, DatabaseError> {
        let today = Utc::now().format("%Y-%m-%d").to_string();
        let (sessions, minutes) = self.sum_sessions(Some(&format!("{today}T00:00:00+00:00")))?;
        Ok(StudyStats {
            total_sessions: sessions,
            total_minutes: minutes,
            today_sessions: sessions,
            today_minutes: minutes,
        })
    }

    /// Aggregate statistics over all sessions.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub fn stats_all(&self) -> Result<StudyStats, DatabaseError> {
        let (total_sessions, total_minutes) = self.sum_sessions(None)?;
        let today = self.stats_today()?;
        Ok(StudyStats {
            total_sessions,
            total_minutes,
            today_sessions: today.today_sessions,
            today_minutes: today.today_minutes,
        })
    }

    fn sum_sessions(&self, since: Option<&str>) -> Result<(u64, u64), DatabaseError> {
        let row = match since {
            Some(cutoff) => self.conn.query_row(
                "SELECT COUNT(*), COALESCE(SUM(duration_min), 0)
                 FROM sessions WHERE logged_at >= ?1",
                params![cutoff],
                |row| Ok((row.get::<_, u64>(0)?, row.get::<_, u64>(1)?)),
            )?,
            None => self.conn.query_row(
                "SELECT COUNT(*), COALESCE(SUM(duration_min), 0) FROM sessions",
                [],
                |row| Ok((row.get::<_, u64>(0)?, row.get::<_, u64>(1)?)),
            )?,
        };
        Ok(row)
    }
}

fn row_to_session(row: &rusqlite::Row<'_>) -> Result<SessionRecord, rusqlite::Error> {
    let logged_at: String = row.get(4)?;
    Ok(SessionRecord {
        id: row.get(0)?,
        subject_id: row.get(1)?,
        duration_min: row.get(2)?,
        progress_delta: row.get(3)?,
        logged_at: DateTime::parse_from_rfc3339(&logged_at)
            .map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(
                    4,
                    rusqlite::types::Type::Text,
                    Box::new(e),
                )
            })?
            .with_timezone(&Utc),
    })
}

fn row_to_subject(row: &rusqlite::Row<'_>) -> Result<Subject, rusqlite::Error> {
    let deadline: String = row.get(3)?;
    let priority: String = row.get(4)?;
    let created_at: String = row.get(5)?;

    Ok(Subject {
        id: row.get(0)?,
        name: row.get(1)?,
        progress: row.get(2)?,
        deadline: deadline.parse::<NaiveDate>().map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(3, rusqlite::types::Type::Text, Box::new(e))
        })?,
        priority: priority.parse::<Priority>().map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(4, rusqlite::types::Type::Text, Box::new(e))
        })?,
        created_at: DateTime::parse_from_rfc3339(&created_at)
            .map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(
                    5,
                    rusqlite::types::Type::Text,
                    Box::new(e),
                )
            })?
            .with_timezone(&Utc),
    })
}
