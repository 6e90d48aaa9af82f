// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::Context;
use crate::income::{IncomeUpdate, apply_update, load_or_default};
use crate::models::IncomeProfile;
use crate::utils::{fmt_money, maybe_print_json, parse_amount, pretty_table};
use anyhow::Result;
use rust_decimal::Decimal;
use serde::Serialize;

pub fn handle(ctx: &Context, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", sub)) => show(ctx, sub)?,
        Some(("set", sub)) => {
            let profile = set(ctx, sub)?;
            println!(
                "Income updated: net {} (base {} - food {}), PF {}",
                fmt_money(&profile.net_income()),
                fmt_money(&profile.base_salary),
                fmt_money(&profile.food_deduction),
                fmt_money(&profile.pf)
            );
        }
        _ => {}
    }
    Ok(())
}

#[derive(Serialize)]
pub struct IncomeRow {
    pub username: String,
    pub base_salary: Decimal,
    pub food_deduction: Decimal,
    pub pf: Decimal,
    pub net_income: Decimal,
    pub last_updated: String,
}

impl From<&IncomeProfile> for IncomeRow {
    fn from(p: &IncomeProfile) -> Self {
        Self {
            username: p.username.clone(),
            base_salary: p.base_salary,
            food_deduction: p.food_deduction,
            pf: p.pf,
            net_income: p.net_income(),
            last_updated: p.last_updated.to_rfc3339(),
        }
    }
}

pub fn current(ctx: &Context) -> Result<IncomeProfile> {
    let user = ctx.require_user()?;
    load_or_default(ctx.store, ctx.config, &user.username)
}

fn show(ctx: &Context, sub: &clap::ArgMatches) -> Result<()> {
    let row = IncomeRow::from(&current(ctx)?);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &row)? {
        let data = vec![
            vec!["Base salary".into(), fmt_money(&row.base_salary)],
            vec!["Food deduction".into(), fmt_money(&row.food_deduction)],
            vec!["Net income".into(), fmt_money(&row.net_income)],
            vec!["PF (not deducted)".into(), fmt_money(&row.pf)],
            vec!["Last updated".into(), row.last_updated.clone()],
        ];
        println!("{}", pretty_table(&["Income", "Amount"], data));
    }
    Ok(())
}

pub fn set(ctx: &Context, sub: &clap::ArgMatches) -> Result<IncomeProfile> {
    let field = |name: &str| -> Result<Option<Decimal>> {
        sub.get_one::<String>(name)
            .map(|raw| parse_amount(name, raw))
            .transpose()
    };
    let update = IncomeUpdate {
        base_salary: field("base-salary")?,
        food_deduction: field("food-deduction")?,
        pf: field("pf")?,
    };
    let current = current(ctx)?;
    if update.is_empty() {
        return Ok(current);
    }
    let next = apply_update(&current, &update)?;
    ctx.store.set_income(&next)?;
    Ok(next)
}
