// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::catalog::{CategoryKind, catalog};
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::Result;

pub fn handle(m: &clap::ArgMatches) -> Result<()> {
    let entries: Vec<_> = catalog().iter().collect();
    if maybe_print_json(m.get_flag("json"), m.get_flag("jsonl"), &entries)? {
        return Ok(());
    }
    let rows = entries
        .iter()
        .map(|c| {
            let kind = match c.kind {
                CategoryKind::Spending => "spending",
                CategoryKind::Savings => "savings",
            };
            vec![
                format!("{} {}", c.icon, c.label),
                format!("--{}", c.flag),
                kind.to_string(),
            ]
        })
        .collect();
    println!("{}", pretty_table(&["Category", "Flag", "Kind"], rows));
    Ok(())
}
