use anyhow::Result;
use rusqlite::Connection;
use tracing::info;

pub const SCHEMA_VERSION: i64 = 1;

pub fn run(conn: &Connection) -> Result<()> {
    conn.execute_batch("CREATE TABLE IF NOT EXISTS schema_version (version INTEGER NOT NULL);")?;

    let version: i64 = conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |r| r.get(0),
    )?;

    if version < 1 {
        info!("Running migration v1 (submissions + stats)");
        conn.execute_batch(
            "
            CREATE TABLE submissions (
                id          TEXT PRIMARY KEY,
                timestamp   TEXT NOT NULL,
                user_name   TEXT NOT NULL,
                crush_name  TEXT NOT NULL,
                result      TEXT NOT NULL CHECK (result IN
                    ('Friends', 'Love', 'Affection', 'Marriage', 'Enemies', 'Siblings')),
                device      TEXT,
                screen      TEXT,
                language    TEXT,
                browser     TEXT,
                os          TEXT,
                country     TEXT NOT NULL,
                city        TEXT NOT NULL,
                ip_hash     TEXT NOT NULL,
                session_id  TEXT,
                referrer    TEXT,
                page        TEXT
            );

            CREATE INDEX idx_submissions_timestamp
                ON submissions(timestamp);

            CREATE TABLE stats (
                key     TEXT PRIMARY KEY,
                value   INTEGER NOT NULL DEFAULT 0
            );

            INSERT INTO stats (key, value) VALUES ('totalSubmissions', 0);

            INSERT INTO schema_version (version) VALUES (1);
            ",
        )?;
    }

    info!("Database migrations complete (schema v{})", SCHEMA_VERSION);
    Ok(())
}
