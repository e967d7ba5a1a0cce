use crate::models::SubmissionRow;
use crate::Database;
use anyhow::Result;
use hearts_types::models::Submission;
use rusqlite::Connection;

impl Database {
    // -- Submissions --

    pub fn insert_submission(&self, s: &Submission) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO submissions (
                    id, timestamp, user_name, crush_name, result,
                    device, screen, language, browser, os,
                    country, city, ip_hash,
                    session_id, referrer, page
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16)",
                rusqlite::params![
                    s.id,
                    s.timestamp,
                    s.user_name,
                    s.crush_name,
                    s.result.as_str(),
                    s.device,
                    s.screen,
                    s.language,
                    s.browser,
                    s.os,
                    s.country,
                    s.city,
                    s.ip_hash,
                    s.session_id,
                    s.referrer,
                    s.page,
                ],
            )?;
            Ok(())
        })
    }

    pub fn get_submission(&self, id: &str) -> Result<Option<SubmissionRow>> {
        self.with_conn(|conn| query_submission(conn, id))
    }

    pub fn count_submissions(&self) -> Result<i64> {
        self.with_conn(|conn| {
            let n = conn.query_row("SELECT COUNT(*) FROM submissions", [], |row| row.get(0))?;
            Ok(n)
        })
    }

    // -- Stats --

    /// Bump a counter by one and return the new value. A single statement, so
    /// concurrent increments do not lose updates.
    pub fn increment_stat(&self, key: &str) -> Result<i64> {
        self.with_conn(|conn| {
            let value = conn.query_row(
                "INSERT INTO stats (key, value) VALUES (?1, 1)
                 ON CONFLICT(key) DO UPDATE SET value = value + 1
                 RETURNING value",
                [key],
                |row| row.get(0),
            )?;
            Ok(value)
        })
    }

    pub fn get_stat(&self, key: &str) -> Result<Option<i64>> {
        self.with_conn(|conn| {
            conn.query_row("SELECT value FROM stats WHERE key = ?1", [key], |row| row.get(0))
                .optional()
        })
    }
}

fn query_submission(conn: &Connection, id: &str) -> Result<Option<SubmissionRow>> {
    let mut stmt = conn.prepare(
        "SELECT id, timestamp, user_name, crush_name, result,
                device, screen, language, browser, os,
                country, city, ip_hash,
                session_id, referrer, page
         FROM submissions WHERE id = ?1",
    )?;

    let row = stmt
        .query_row([id], |row| {
            Ok(SubmissionRow {
                id: row.get(0)?,
                timestamp: row.get(1)?,
                user_name: row.get(2)?,
                crush_name: row.get(3)?,
                result: row.get(4)?,
                device: row.get(5)?,
                screen: row.get(6)?,
                language: row.get(7)?,
                browser: row.get(8)?,
                os: row.get(9)?,
                country: row.get(10)?,
                city: row.get(11)?,
                ip_hash: row.get(12)?,
                session_id: row.get(13)?,
                referrer: row.get(14)?,
                page: row.get(15)?,
            })
        })
        .optional()?;

    Ok(row)
}

/// Extension trait for optional query results
trait OptionalExt<T> {
    fn optional(self) -> Result<Option<T>>;
}

impl<T> OptionalExt<T> for std::result::Result<T, rusqlite::Error> {
    fn optional(self) -> Result<Option<T>> {
        match self {
            Ok(val) => Ok(Some(val)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
