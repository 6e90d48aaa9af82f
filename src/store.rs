// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, params, params_from_iter};
use rust_decimal::Decimal;

use crate::catalog::catalog;
use crate::config::AppConfig;
use crate::models::{CategoryAmounts, ExpenseDraft, ExpenseRecord, IncomeProfile};
use crate::remote::RemoteStore;
use crate::stats::daily_total;

/// Where expense records and income profiles live.
pub trait ExpenseStore {
    /// Records of `user`, newest date first, newest creation first within a date.
    fn list_expenses(&self, user: &str) -> Result<Vec<ExpenseRecord>>;
    fn create_expense(&self, user: &str, draft: &ExpenseDraft) -> Result<ExpenseRecord>;
    fn delete_expense(&self, user: &str, id: &str) -> Result<bool>;
    fn get_income(&self, user: &str) -> Result<Option<IncomeProfile>>;
    fn set_income(&self, profile: &IncomeProfile) -> Result<()>;
}

/// Turns a draft into a record: fresh id, timestamps, and a total computed now.
pub fn new_record(draft: &ExpenseDraft) -> ExpenseRecord {
    let now = Utc::now().to_rfc3339();
    ExpenseRecord {
        id: uuid::Uuid::new_v4().to_string(),
        date: draft.date.format("%Y-%m-%d").to_string(),
        total: daily_total(&draft.amounts),
        amounts: draft.amounts.clone(),
        notes: draft.notes.trim().to_string(),
        created_at: Some(now.clone()),
        updated_at: Some(now),
    }
}

fn stored_decimal(raw: &str, field: &str, id: &str) -> Decimal {
    raw.trim().parse::<Decimal>().unwrap_or_else(|_| {
        tracing::warn!(%id, field, value = %raw, "unreadable stored amount, using 0");
        Decimal::ZERO
    })
}

/// SQLite-backed store on the local data file.
pub struct LocalStore<'a> {
    conn: &'a Connection,
}

impl<'a> LocalStore<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    fn select_sql() -> String {
        let cols: Vec<&str> = catalog().keys().collect();
        format!(
            "SELECT id, date, notes, total, created_at, updated_at, {} FROM expenses WHERE username=?1
             ORDER BY date DESC, created_at DESC",
            cols.join(", ")
        )
    }

    /// Inserts or replaces one record by id.
    pub fn upsert(&self, user: &str, record: &ExpenseRecord) -> Result<()> {
        let keys: Vec<&str> = catalog().keys().collect();
        // Amount columns follow the seven fixed ones.
        let placeholders: Vec<String> = (0..keys.len()).map(|i| format!("?{}", i + 8)).collect();
        let sql = format!(
            "INSERT OR REPLACE INTO expenses(id, username, date, notes, total, created_at, updated_at, {})
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, {})",
            keys.join(", "),
            placeholders.join(", ")
        );

        let mut values: Vec<Option<String>> = vec![
            Some(record.id.clone()),
            Some(user.to_string()),
            Some(record.date.clone()),
            Some(record.notes.clone()),
            Some(record.total.to_string()),
            record.created_at.clone(),
            record.updated_at.clone(),
        ];
        values.extend(keys.iter().map(|k| Some(record.amounts.get(k).to_string())));
        self.conn
            .execute(&sql, params_from_iter(values.iter()))
            .with_context(|| format!("Store expense {}", record.id))?;
        Ok(())
    }

    /// Replaces every record of `user` with `records` (mirror of the remote copy).
    pub fn replace_all(&self, user: &str, records: &[ExpenseRecord]) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute("DELETE FROM expenses WHERE username=?1", params![user])?;
        for r in records {
            self.upsert(user, r)?;
        }
        tx.commit()?;
        Ok(())
    }
}

impl ExpenseStore for LocalStore<'_> {
    fn list_expenses(&self, user: &str) -> Result<Vec<ExpenseRecord>> {
        let keys: Vec<&str> = catalog().keys().collect();
        let mut stmt = self.conn.prepare(&Self::select_sql())?;
        let mut rows = stmt.query(params![user])?;

        let mut data = Vec::new();
        while let Some(r) = rows.next()? {
            let id: String = r.get(0)?;
            let date: String = r.get(1)?;
            let notes: Option<String> = r.get(2)?;
            let total: String = r.get(3)?;
            let created_at: Option<String> = r.get(4)?;
            let updated_at: Option<String> = r.get(5)?;

            let mut amounts = CategoryAmounts::new();
            for (i, key) in keys.iter().enumerate() {
                let raw: String = r.get(6 + i)?;
                amounts.put_loaded(key, stored_decimal(&raw, key, &id));
            }
            data.push(ExpenseRecord {
                total: stored_decimal(&total, "total", &id),
                id,
                date,
                amounts,
                notes: notes.unwrap_or_default(),
                created_at,
                updated_at,
            });
        }
        Ok(data)
    }

    fn create_expense(&self, user: &str, draft: &ExpenseDraft) -> Result<ExpenseRecord> {
        let record = new_record(draft);
        self.upsert(user, &record)?;
        Ok(record)
    }

    fn delete_expense(&self, user: &str, id: &str) -> Result<bool> {
        let n = self.conn.execute(
            "DELETE FROM expenses WHERE id=?1 AND username=?2",
            params![id, user],
        )?;
        Ok(n > 0)
    }

    fn get_income(&self, user: &str) -> Result<Option<IncomeProfile>> {
        let row: Option<(String, String, String, String)> = self
            .conn
            .query_row(
                "SELECT base_salary, food_deduction, pf, last_updated FROM income WHERE username=?1",
                params![user],
                |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?, r.get(3)?)),
            )
            .optional()?;
        let Some((base, food, pf, updated)) = row else {
            return Ok(None);
        };
        let last_updated = DateTime::parse_from_rfc3339(&updated)
            .map(|d| d.with_timezone(&Utc))
            .unwrap_or_else(|_| {
                tracing::warn!(%user, value = %updated, "unreadable income timestamp");
                Utc::now()
            });
        Ok(Some(IncomeProfile {
            username: user.to_string(),
            base_salary: stored_decimal(&base, "base_salary", user),
            food_deduction: stored_decimal(&food, "food_deduction", user),
            pf: stored_decimal(&pf, "pf", user),
            last_updated,
        }))
    }

    fn set_income(&self, profile: &IncomeProfile) -> Result<()> {
        self.conn.execute(
            "INSERT INTO income(username, base_salary, food_deduction, pf, last_updated)
             VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT(username) DO UPDATE SET
                base_salary=excluded.base_salary,
                food_deduction=excluded.food_deduction,
                pf=excluded.pf,
                last_updated=excluded.last_updated",
            params![
                profile.username,
                profile.base_salary.to_string(),
                profile.food_deduction.to_string(),
                profile.pf.to_string(),
                profile.last_updated.to_rfc3339()
            ],
        )?;
        Ok(())
    }
}

/// Remote store when configured, local store otherwise or whenever the remote fails.
/// Successful remote reads and writes are mirrored locally.
pub struct FallbackStore<'a> {
    local: LocalStore<'a>,
    remote: Option<RemoteStore>,
}

impl<'a> FallbackStore<'a> {
    pub fn new(local: LocalStore<'a>, remote: Option<RemoteStore>) -> Self {
        Self { local, remote }
    }

    pub fn from_config(conn: &'a Connection, cfg: &AppConfig) -> Result<Self> {
        let remote = match &cfg.remote {
            Some(rc) => Some(RemoteStore::new(rc)?),
            None => {
                tracing::info!("running in offline mode, using the local store");
                None
            }
        };
        Ok(Self::new(LocalStore::new(conn), remote))
    }

    pub fn is_offline(&self) -> bool {
        self.remote.is_none()
    }
}

impl ExpenseStore for FallbackStore<'_> {
    fn list_expenses(&self, user: &str) -> Result<Vec<ExpenseRecord>> {
        if let Some(remote) = &self.remote {
            match remote.list(user) {
                Ok(records) => {
                    self.local.replace_all(user, &records)?;
                    return Ok(records);
                }
                Err(e) => tracing::warn!(error = %e, "remote list failed, using local store"),
            }
        }
        self.local.list_expenses(user)
    }

    fn create_expense(&self, user: &str, draft: &ExpenseDraft) -> Result<ExpenseRecord> {
        let record = new_record(draft);
        let stored = match &self.remote {
            Some(remote) => match remote.insert(user, &record) {
                Ok(stored) => stored,
                Err(e) => {
                    tracing::warn!(error = %e, "remote insert failed, saving locally");
                    record
                }
            },
            None => record,
        };
        self.local.upsert(user, &stored)?;
        Ok(stored)
    }

    fn delete_expense(&self, user: &str, id: &str) -> Result<bool> {
        if id.trim().is_empty() {
            return Ok(false);
        }
        let mut remote_ok = false;
        if let Some(remote) = &self.remote {
            match remote.delete(user, id) {
                Ok(()) => remote_ok = true,
                Err(e) => tracing::warn!(error = %e, "remote delete failed, deleting locally"),
            }
        }
        let local_ok = self.local.delete_expense(user, id)?;
        Ok(remote_ok || local_ok)
    }

    // Income profiles are only kept locally.
    fn get_income(&self, user: &str) -> Result<Option<IncomeProfile>> {
        self.local.get_income(user)
    }

    fn set_income(&self, profile: &IncomeProfile) -> Result<()> {
        self.local.set_income(profile)
    }
}
