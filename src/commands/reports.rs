// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::Context;
use super::expenses::query_records;
use crate::income::load_or_default;
use crate::models::{CategorySlice, DailyPoint, ExpenseRecord, MonthlyStats};
use crate::stats::{self, Guideline, Insight};
use crate::utils::{fmt_money, fmt_percent, maybe_print_json, pretty_table};
use anyhow::Result;
use serde::Serialize;

pub fn handle(ctx: &Context, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("summary", sub)) => summary(ctx, sub)?,
        Some(("categories", sub)) => categories(ctx, sub, false)?,
        Some(("top", sub)) => categories(ctx, sub, true)?,
        Some(("weekly", sub)) => weekly(ctx, sub)?,
        Some(("daily", sub)) => daily(ctx, sub)?,
        _ => {}
    }
    Ok(())
}

fn records_for(ctx: &Context, sub: &clap::ArgMatches) -> Result<Vec<ExpenseRecord>> {
    let user = ctx.require_user()?;
    month_records(ctx, &user.username, sub)
}

fn month_records(ctx: &Context, user: &str, sub: &clap::ArgMatches) -> Result<Vec<ExpenseRecord>> {
    let month = sub.get_one::<String>("month").map(String::as_str);
    query_records(ctx, user, month)
}

#[derive(Debug, Serialize)]
pub struct SummaryReport {
    pub stats: MonthlyStats,
    pub insights: Vec<Insight>,
    pub guideline: Guideline,
}

pub fn build_summary(ctx: &Context, sub: &clap::ArgMatches) -> Result<SummaryReport> {
    let user = ctx.require_user()?;
    let income = load_or_default(ctx.store, ctx.config, &user.username)?;
    let records = month_records(ctx, &user.username, sub)?;
    let stats = stats::monthly_stats(&records, &income);
    Ok(SummaryReport {
        insights: stats::insights(&stats),
        guideline: stats::guideline(stats.net_income),
        stats,
    })
}

fn summary(ctx: &Context, sub: &clap::ArgMatches) -> Result<()> {
    let report = build_summary(ctx, sub)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &report)? {
        return Ok(());
    }
    let s = &report.stats;
    let data = vec![
        vec!["Total income".into(), fmt_money(&s.total_income)],
        vec!["Food deduction".into(), fmt_money(&s.food_deduction)],
        vec!["PF (not deducted)".into(), fmt_money(&s.pf)],
        vec!["Net income".into(), fmt_money(&s.net_income)],
        vec!["Total spent".into(), fmt_money(&s.total_spent)],
        vec!["Total investment".into(), fmt_money(&s.total_investment)],
        vec!["Emergency fund".into(), fmt_money(&s.total_emergency_fund)],
        vec!["Final balance".into(), fmt_money(&s.final_balance)],
        vec!["Savings rate".into(), fmt_percent(&s.savings_rate)],
    ];
    println!("{}", pretty_table(&["Metric", "Value"], data));

    let tips: Vec<Vec<String>> = report
        .insights
        .iter()
        .map(|i| vec![i.topic.to_string(), i.message.to_string()])
        .collect();
    println!("{}", pretty_table(&["Topic", "Insight"], tips));

    let g = &report.guideline;
    println!(
        "{}",
        pretty_table(
            &["50% Needs", "30% Wants", "20% Savings"],
            vec![vec![fmt_money(&g.needs), fmt_money(&g.wants), fmt_money(&g.savings)]],
        )
    );
    Ok(())
}

pub fn build_categories(
    ctx: &Context,
    sub: &clap::ArgMatches,
    top_only: bool,
) -> Result<Vec<CategorySlice>> {
    let records = records_for(ctx, sub)?;
    Ok(if top_only {
        stats::top_categories(&records)
    } else {
        stats::category_breakdown(&records)
    })
}

fn categories(ctx: &Context, sub: &clap::ArgMatches, top_only: bool) -> Result<()> {
    let data = build_categories(ctx, sub, top_only)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        return Ok(());
    }
    if data.is_empty() {
        println!("No category data available");
        return Ok(());
    }
    let rows = data
        .iter()
        .map(|s| vec![s.name.clone(), format!("{:.2}", s.value)])
        .collect();
    println!("{}", pretty_table(&["Category", "Spent"], rows));
    Ok(())
}

fn weekly(ctx: &Context, sub: &clap::ArgMatches) -> Result<()> {
    let data = stats::weekly_breakdown(&records_for(ctx, sub)?);
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        return Ok(());
    }
    if data.is_empty() {
        println!("No weekly data available");
        return Ok(());
    }
    let rows = data
        .iter()
        .map(|w| {
            vec![
                w.week.clone(),
                format!("{:.2}", w.expenses),
                format!("{:.2}", w.investment),
                format!("{:.2}", w.emergency_fund),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Week of", "Expenses", "Investment", "Emergency"], rows)
    );
    Ok(())
}

pub fn build_daily(ctx: &Context, sub: &clap::ArgMatches) -> Result<Vec<DailyPoint>> {
    Ok(stats::daily_trend(&records_for(ctx, sub)?))
}

fn daily(ctx: &Context, sub: &clap::ArgMatches) -> Result<()> {
    let data = build_daily(ctx, sub)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        return Ok(());
    }
    if data.is_empty() {
        println!("No daily data available");
        return Ok(());
    }
    let rows = data
        .iter()
        .map(|d| {
            vec![
                d.date.clone(),
                format!("{:.2}", d.total),
                format!("{:.2}", d.spending),
            ]
        })
        .collect();
    println!("{}", pretty_table(&["Day", "Total", "Spending"], rows));
    Ok(())
}
