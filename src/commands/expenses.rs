// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::Context;
use crate::catalog::catalog;
use crate::models::{CategoryAmounts, ExpenseDraft, ExpenseRecord};
use crate::stats::format_safe_date;
use crate::utils::{
    fmt_money, maybe_print_json, parse_amount, parse_date, parse_month, pretty_table,
};
use anyhow::Result;

pub fn handle(ctx: &Context, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let record = add_entry(ctx, sub)?;
            println!(
                "Recorded {} for {} (id {})",
                fmt_money(&record.total),
                format_safe_date(&record.date, "%B %-d, %Y"),
                record.id
            );
        }
        Some(("list", sub)) => list(ctx, sub)?,
        Some(("rm", sub)) => {
            let id = sub.get_one::<String>("id").unwrap().trim();
            if remove_entry(ctx, id)? {
                println!("Deleted entry {}", id);
            } else {
                println!("No entry with id {}", id);
            }
        }
        _ => {}
    }
    Ok(())
}

pub fn draft_from_matches(sub: &clap::ArgMatches) -> Result<ExpenseDraft> {
    let date = parse_date(sub.get_one::<String>("date").unwrap())?;
    let mut amounts = CategoryAmounts::new();
    for meta in catalog().iter() {
        let raw = sub
            .get_one::<String>(meta.key)
            .map(String::as_str)
            .unwrap_or("0");
        amounts.set(meta.key, parse_amount(meta.key, raw)?)?;
    }
    let notes = sub
        .get_one::<String>("notes")
        .map(|s| s.trim().to_string())
        .unwrap_or_default();
    Ok(ExpenseDraft {
        date,
        amounts,
        notes,
    })
}

pub fn add_entry(ctx: &Context, sub: &clap::ArgMatches) -> Result<ExpenseRecord> {
    let user = ctx.require_user()?;
    let draft = draft_from_matches(sub)?;
    ctx.store.create_expense(&user.username, &draft)
}

pub fn remove_entry(ctx: &Context, id: &str) -> Result<bool> {
    let user = ctx.require_user()?;
    ctx.store.delete_expense(&user.username, id)
}

/// Records of `user`, optionally narrowed to one `YYYY-MM` month.
pub fn query_records(
    ctx: &Context,
    user: &str,
    month: Option<&str>,
) -> Result<Vec<ExpenseRecord>> {
    let records = ctx.store.list_expenses(user)?;
    match month {
        Some(m) => {
            let m = parse_month(m)?;
            Ok(records
                .into_iter()
                .filter(|r| r.date.trim().starts_with(&m))
                .collect())
        }
        None => Ok(records),
    }
}

pub fn list_rows(ctx: &Context, sub: &clap::ArgMatches) -> Result<Vec<ExpenseRecord>> {
    let user = ctx.require_user()?;
    let month = sub.get_one::<String>("month").map(String::as_str);
    let mut records = query_records(ctx, &user.username, month)?;
    if let Some(limit) = sub.get_one::<usize>("limit") {
        records.truncate(*limit);
    }
    Ok(records)
}

fn list(ctx: &Context, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = list_rows(ctx, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    format_safe_date(&r.date, "%b %d"),
                    format!("{:.2}", r.total),
                    format!("{:.2}", r.spending()),
                    format!("{:.2}", r.amounts.investment()),
                    format!("{:.2}", r.amounts.emergency_fund()),
                    r.notes.clone(),
                    r.id.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Date", "Total", "Spending", "Investment", "Emergency", "Notes", "Id"],
                rows,
            )
        );
    }
    Ok(())
}
