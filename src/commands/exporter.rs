// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::Context;
use super::expenses::query_records;
use crate::catalog::catalog;
use anyhow::{Result, bail};

pub fn handle(ctx: &Context, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("expenses", sub)) => export_expenses(ctx, sub),
        _ => Ok(()),
    }
}

fn export_expenses(ctx: &Context, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().trim().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap().trim();
    if fmt != "csv" && fmt != "json" {
        bail!("Unknown format: {} (use csv|json)", fmt);
    }

    let user = ctx.require_user()?;
    let month = sub.get_one::<String>("month").map(String::as_str);
    let records = query_records(ctx, &user.username, month)?;

    if fmt == "csv" {
        let mut wtr = csv::Writer::from_path(out)?;
        let mut header = vec!["id", "date"];
        header.extend(catalog().keys());
        header.extend(["notes", "total", "created_at"]);
        wtr.write_record(&header)?;
        for r in &records {
            let mut row = vec![r.id.clone(), r.date.clone()];
            row.extend(catalog().keys().map(|k| r.amounts.get(k).to_string()));
            row.push(r.notes.clone());
            row.push(r.total.to_string());
            row.push(r.created_at.clone().unwrap_or_default());
            wtr.write_record(&row)?;
        }
        wtr.flush()?;
    } else {
        std::fs::write(out, serde_json::to_string_pretty(&records)?)?;
    }
    println!("Exported {} entries to {}", records.len(), out);
    Ok(())
}
