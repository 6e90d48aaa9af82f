// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::Connection;
use std::fs;
use std::path::PathBuf;

use crate::catalog::catalog;

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.dailyspend", "Dailyspend", "dailyspend"));

pub fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")
}

pub fn db_path() -> Result<PathBuf> {
    let proj = project_dirs()?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("dailyspend.sqlite"))
}

pub fn open_or_init() -> Result<Connection> {
    let path = db_path()?;
    let conn =
        Connection::open(&path).with_context(|| format!("Open DB at {}", path.display()))?;
    init_schema(&conn)?;
    Ok(conn)
}

pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
    CREATE TABLE IF NOT EXISTS settings(
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS income(
        username TEXT PRIMARY KEY,
        base_salary TEXT NOT NULL,
        food_deduction TEXT NOT NULL,
        pf TEXT NOT NULL DEFAULT '0',
        last_updated TEXT NOT NULL
    );
    "#,
    )?;
    conn.execute_batch(&expenses_schema())
        .context("Create expenses table")?;
    Ok(())
}

// One amount column per catalog entry, stored as decimal text.
fn expenses_schema() -> String {
    let amount_cols: String = catalog()
        .keys()
        .map(|k| format!("        {} TEXT NOT NULL DEFAULT '0',\n", k))
        .collect();
    format!(
        r#"
    CREATE TABLE IF NOT EXISTS expenses(
        id TEXT PRIMARY KEY,
        username TEXT NOT NULL,
        date TEXT NOT NULL,
{amount_cols}        notes TEXT NOT NULL DEFAULT '',
        total TEXT NOT NULL DEFAULT '0',
        created_at TEXT,
        updated_at TEXT
    );
    CREATE INDEX IF NOT EXISTS idx_expenses_user_date ON expenses(username, date);
    "#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_has_a_column_per_category() {
        let conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();
        let mut stmt = conn.prepare("PRAGMA table_info(expenses)").unwrap();
        let cols: Vec<String> = stmt
            .query_map([], |r| r.get::<_, String>(1))
            .unwrap()
            .map(|c| c.unwrap())
            .collect();
        for key in catalog().keys() {
            assert!(cols.iter().any(|c| c == key), "missing column {key}");
        }
        assert!(cols.iter().any(|c| c == "total"));
    }

    #[test]
    fn init_schema_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();
        init_schema(&conn).unwrap();
    }
}
