// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Hosted Postgres store spoken to through its PostgREST endpoint
//! (`/rest/v1/expenses`). Only expense rows live remotely.

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use serde_json::{Map, Value};

use crate::catalog::catalog;
use crate::config::RemoteConfig;
use crate::errors::DailySpendError;
use crate::models::{CategoryAmounts, ExpenseRecord};
use crate::utils::http_client;

type Row = Map<String, Value>;

pub struct RemoteStore {
    client: reqwest::blocking::Client,
    base_url: String,
    api_key: String,
}

impl RemoteStore {
    pub fn new(cfg: &RemoteConfig) -> Result<Self> {
        Ok(Self {
            client: http_client()?,
            base_url: cfg.url.trim_end_matches('/').to_string(),
            api_key: cfg.api_key.clone(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/rest/v1/expenses", self.base_url)
    }

    fn request(&self, method: reqwest::Method) -> reqwest::blocking::RequestBuilder {
        self.client
            .request(method, self.endpoint())
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    pub fn list(&self, user: &str) -> Result<Vec<ExpenseRecord>> {
        let resp = self
            .request(reqwest::Method::GET)
            .query(&[
                ("select", "*".to_string()),
                ("username", format!("eq.{}", user)),
                ("order", "date.desc,created_at.desc".to_string()),
            ])
            .send()?;
        let rows: Vec<Row> = check(resp)?.json().context("Decode remote expenses")?;
        Ok(rows.iter().map(from_remote_row).collect())
    }

    /// Inserts `record` and returns the row as the server stored it.
    pub fn insert(&self, user: &str, record: &ExpenseRecord) -> Result<ExpenseRecord> {
        let resp = self
            .request(reqwest::Method::POST)
            .header("Prefer", "return=representation")
            .json(&to_remote_row(user, record))
            .send()?;
        let rows: Vec<Row> = check(resp)?.json().context("Decode inserted expense")?;
        Ok(rows
            .first()
            .map(from_remote_row)
            .unwrap_or_else(|| record.clone()))
    }

    pub fn delete(&self, user: &str, id: &str) -> Result<()> {
        let resp = self
            .request(reqwest::Method::DELETE)
            .query(&[
                ("id", format!("eq.{}", id)),
                ("username", format!("eq.{}", user)),
            ])
            .send()?;
        check(resp)?;
        Ok(())
    }
}

fn check(resp: reqwest::blocking::Response) -> Result<reqwest::blocking::Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().unwrap_or_default();
    Err(DailySpendError::Remote(format!("{} {}", status, body.trim())).into())
}

/// Numbers or numeric strings become decimals; anything else is zero.
fn coerce_amount(v: Option<&Value>) -> Decimal {
    match v {
        Some(Value::Number(n)) => n.to_string().parse().unwrap_or(Decimal::ZERO),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(Decimal::ZERO),
        _ => Decimal::ZERO,
    }
}

fn coerce_string(v: Option<&Value>) -> String {
    match v {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

fn coerce_opt_string(v: Option<&Value>) -> Option<String> {
    Some(coerce_string(v)).filter(|s| !s.is_empty())
}

pub fn from_remote_row(row: &Row) -> ExpenseRecord {
    let mut amounts = CategoryAmounts::new();
    for key in catalog().keys() {
        amounts.put_loaded(key, coerce_amount(row.get(key)));
    }
    ExpenseRecord {
        id: coerce_string(row.get("id")),
        date: coerce_string(row.get("date")),
        amounts,
        notes: coerce_string(row.get("notes")),
        total: coerce_amount(row.get("total")),
        created_at: coerce_opt_string(row.get("created_at")),
        updated_at: coerce_opt_string(row.get("updated_at")),
    }
}

/// Insert body. The server assigns `id` and timestamps.
pub fn to_remote_row(user: &str, record: &ExpenseRecord) -> Value {
    let mut row = Row::new();
    row.insert("username".into(), Value::String(user.to_string()));
    row.insert("date".into(), Value::String(record.date.clone()));
    for key in catalog().keys() {
        row.insert(key.into(), Value::String(record.amounts.get(key).to_string()));
    }
    row.insert("notes".into(), Value::String(record.notes.clone()));
    row.insert("total".into(), Value::String(record.total.to_string()));
    Value::Object(row)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::EMERGENCY_FUND;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn row(v: Value) -> Row {
        v.as_object().unwrap().clone()
    }

    #[test]
    fn coerces_numbers_strings_and_junk() {
        let r = from_remote_row(&row(json!({
            "id": 42,
            "date": "2025-04-01",
            "rent": 1000,
            "food": "250.5",
            "groceries": null,
            "medical": "n/a",
            "emergency_fund": 100.25,
            "total": "1350.75",
            "created_at": "2025-04-01T08:00:00+00:00"
        })));
        assert_eq!(r.id, "42");
        assert_eq!(r.amounts.get("rent"), dec!(1000));
        assert_eq!(r.amounts.get("food"), dec!(250.5));
        assert_eq!(r.amounts.get("groceries"), Decimal::ZERO);
        assert_eq!(r.amounts.get("medical"), Decimal::ZERO);
        assert_eq!(r.amounts.get(EMERGENCY_FUND), dec!(100.25));
        assert_eq!(r.total, dec!(1350.75));
        assert_eq!(r.notes, "");
        assert!(r.updated_at.is_none());
    }

    #[test]
    fn missing_date_becomes_empty() {
        let r = from_remote_row(&row(json!({ "id": "x" })));
        assert_eq!(r.date, "");
        assert_eq!(r.total, Decimal::ZERO);
    }

    #[test]
    fn insert_body_has_every_category() {
        let amounts = CategoryAmounts::try_from_pairs([("food", dec!(12))]).unwrap();
        let record = ExpenseRecord {
            id: "local".into(),
            date: "2025-04-02".into(),
            amounts,
            notes: "lunch".into(),
            total: dec!(12),
            created_at: None,
            updated_at: None,
        };
        let body = to_remote_row("soumya", &record);
        assert_eq!(body["username"], "soumya");
        assert_eq!(body["food"], "12");
        assert_eq!(body["credit_card_bill"], "0");
        assert!(body.get("id").is_none());
        for key in catalog().keys() {
            assert!(body.get(key).is_some());
        }
    }
}
