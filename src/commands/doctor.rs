// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::Context;
use crate::stats::parse_record_date;
use crate::utils::pretty_table;
use anyhow::Result;
use rust_decimal::Decimal;

pub fn find_issues(ctx: &Context) -> Result<Vec<Vec<String>>> {
    let user = ctx.require_user()?;
    let records = ctx.store.list_expenses(&user.username)?;
    let mut rows = Vec::new();

    // 1) Dates the reports will skip
    for r in &records {
        if parse_record_date(&r.date).is_none() {
            rows.push(vec!["invalid_date".into(), format!("{} '{}'", r.id, r.date)]);
        }
    }

    // 2) Stored totals that drifted from the category sum
    for r in &records {
        if r.has_total_mismatch() {
            rows.push(vec![
                "total_mismatch".into(),
                format!(
                    "{} {} stored={} computed={}",
                    r.id,
                    r.date,
                    r.total,
                    r.computed_total()
                ),
            ]);
        }
    }

    // 3) Negative amounts that bypassed input validation
    for r in &records {
        for (key, amount) in r.amounts.iter() {
            if amount < Decimal::ZERO {
                rows.push(vec![
                    "negative_amount".into(),
                    format!("{} {}={}", r.id, key, amount),
                ]);
            }
        }
    }
    Ok(rows)
}

pub fn handle(ctx: &Context) -> Result<()> {
    let rows = find_issues(ctx)?;
    if rows.is_empty() {
        println!("✅ doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
