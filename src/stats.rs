// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Derived views over a user's expense records and income profile.
//!
//! Every function here is pure: it takes the full record set, re-scans it and
//! returns a fresh value. Nothing here fails; bad dates are skipped or shown
//! as [`INVALID_DATE`], missing amounts count as zero and a non-positive net
//! income yields a savings rate of zero.

use chrono::{DateTime, Datelike, Days, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Write;

use crate::catalog::{catalog, display_name};
use crate::models::{
    CategoryAmounts, CategorySlice, DailyPoint, ExpenseRecord, IncomeProfile, MonthlyStats,
    WeeklyBucket,
};

pub const INVALID_DATE: &str = "Invalid Date";
pub const LABEL_FORMAT: &str = "%b %d";
pub const TOP_CATEGORY_LIMIT: usize = 5;

/// Sum of every category amount, savings categories included.
pub fn daily_total(amounts: &CategoryAmounts) -> Decimal {
    catalog().keys().map(|key| amounts.get(key)).sum()
}

pub fn monthly_stats(records: &[ExpenseRecord], income: &IncomeProfile) -> MonthlyStats {
    let (total_spent, total_investment, total_emergency_fund) = records.iter().fold(
        (Decimal::ZERO, Decimal::ZERO, Decimal::ZERO),
        |(spent, investment, emergency), r| {
            (
                spent + r.spending(),
                investment + r.amounts.investment(),
                emergency + r.amounts.emergency_fund(),
            )
        },
    );

    let net_income = income.net_income();
    let final_balance = net_income - total_spent - total_investment - total_emergency_fund;
    let savings_rate = if net_income > Decimal::ZERO {
        final_balance
            .checked_div(net_income)
            .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
            .unwrap_or(Decimal::ZERO)
    } else {
        Decimal::ZERO
    };

    MonthlyStats {
        total_income: net_income,
        food_deduction: income.food_deduction,
        pf: income.pf,
        net_income,
        total_spent,
        total_investment,
        total_emergency_fund,
        final_balance,
        savings_rate,
    }
}

/// Per-category sums over the spending categories, in catalog order.
/// Categories that sum to zero are left out.
pub fn category_breakdown(records: &[ExpenseRecord]) -> Vec<CategorySlice> {
    catalog()
        .reportable()
        .map(|meta| CategorySlice {
            name: display_name(meta.key),
            value: records.iter().map(|r| r.amounts.get(meta.key)).sum(),
        })
        .filter(|slice| slice.value > Decimal::ZERO)
        .collect()
}

/// The largest [`TOP_CATEGORY_LIMIT`] slices of [`category_breakdown`], largest first.
pub fn top_categories(records: &[ExpenseRecord]) -> Vec<CategorySlice> {
    let mut slices = category_breakdown(records);
    slices.sort_by(|a, b| b.value.cmp(&a.value));
    slices.truncate(TOP_CATEGORY_LIMIT);
    slices
}

/// Sunday on or before `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    let back = u64::from(date.weekday().num_days_from_sunday());
    date.checked_sub_days(Days::new(back)).unwrap_or(date)
}

/// Buckets records by calendar week, oldest week first.
pub fn weekly_breakdown(records: &[ExpenseRecord]) -> Vec<WeeklyBucket> {
    let mut weeks: BTreeMap<NaiveDate, WeeklyBucket> = BTreeMap::new();

    for r in records {
        let Some(date) = parse_record_date(&r.date) else {
            tracing::warn!(id = %r.id, date = %r.date, "skipping record with invalid date in weekly breakdown");
            continue;
        };
        let start = week_start(date);
        let bucket = weeks.entry(start).or_insert_with(|| WeeklyBucket {
            week: format_label(start, LABEL_FORMAT),
            week_start: start,
            expenses: Decimal::ZERO,
            investment: Decimal::ZERO,
            emergency_fund: Decimal::ZERO,
        });
        bucket.expenses += r.spending();
        bucket.investment += r.amounts.investment();
        bucket.emergency_fund += r.amounts.emergency_fund();
    }

    weeks.into_values().collect()
}

/// Merges records sharing the same date string, most recent day first.
pub fn daily_trend(records: &[ExpenseRecord]) -> Vec<DailyPoint> {
    // Keyed by the raw date text; the parsed day is only used for ordering.
    let mut days: BTreeMap<&str, (NaiveDate, Decimal, Decimal)> = BTreeMap::new();

    for r in records {
        let Some(date) = parse_record_date(&r.date) else {
            tracing::warn!(id = %r.id, date = %r.date, "skipping record with invalid date in daily trend");
            continue;
        };
        let day = days
            .entry(r.date.as_str())
            .or_insert((date, Decimal::ZERO, Decimal::ZERO));
        day.1 += r.total;
        day.2 += r.spending();
    }

    let mut ordered: Vec<_> = days.into_iter().collect();
    ordered.sort_by(|(_, (a, ..)), (_, (b, ..))| b.cmp(a));
    ordered
        .into_iter()
        .map(|(raw, (_, total, spending))| DailyPoint {
            date: format_safe_date(raw, LABEL_FORMAT),
            total,
            spending,
        })
        .collect()
}

/// Parses a record date. Accepts `YYYY-MM-DD` or an RFC 3339 timestamp.
pub fn parse_record_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|d| d.date_naive()))
}

/// Formats a raw record date with a strftime pattern, or returns [`INVALID_DATE`].
pub fn format_safe_date(raw: &str, fmt: &str) -> String {
    match parse_record_date(raw) {
        Some(date) => format_label(date, fmt),
        None => {
            tracing::warn!(date = %raw, "cannot format invalid date");
            INVALID_DATE.to_string()
        }
    }
}

fn format_label(date: NaiveDate, fmt: &str) -> String {
    let mut out = String::new();
    // A bad pattern surfaces as a fmt::Error here rather than a panic.
    if write!(out, "{}", date.format(fmt)).is_err() {
        tracing::warn!(%date, pattern = fmt, "date format pattern rejected");
        return INVALID_DATE.to_string();
    }
    out
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Good,
    Fair,
    Poor,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Insight {
    pub topic: &'static str,
    pub tone: Tone,
    pub message: &'static str,
}

pub const STRONG_SAVINGS_RATE: Decimal = Decimal::from_parts(20, 0, 0, false, 0);
pub const FAIR_SAVINGS_RATE: Decimal = Decimal::from_parts(10, 0, 0, false, 0);
pub const INVESTMENT_TARGET: Decimal = Decimal::from_parts(5000, 0, 0, false, 0);
pub const EMERGENCY_FUND_TARGET: Decimal = Decimal::from_parts(2000, 0, 0, false, 0);

/// Plain-language feedback on a month's numbers.
pub fn insights(stats: &MonthlyStats) -> Vec<Insight> {
    let mut out = Vec::with_capacity(4);

    out.push(if stats.savings_rate >= STRONG_SAVINGS_RATE {
        Insight {
            topic: "savings_rate",
            tone: Tone::Good,
            message: "Excellent! You're saving well.",
        }
    } else if stats.savings_rate >= FAIR_SAVINGS_RATE {
        Insight {
            topic: "savings_rate",
            tone: Tone::Fair,
            message: "Good savings rate. Consider increasing it.",
        }
    } else {
        Insight {
            topic: "savings_rate",
            tone: Tone::Poor,
            message: "Consider reducing expenses to improve savings.",
        }
    });

    out.push(if stats.total_investment >= INVESTMENT_TARGET {
        Insight {
            topic: "investment",
            tone: Tone::Good,
            message: "Great job!",
        }
    } else {
        Insight {
            topic: "investment",
            tone: Tone::Fair,
            message: "Consider increasing your SIP amount.",
        }
    });

    out.push(if stats.total_emergency_fund >= EMERGENCY_FUND_TARGET {
        Insight {
            topic: "emergency_fund",
            tone: Tone::Good,
            message: "Well prepared!",
        }
    } else {
        Insight {
            topic: "emergency_fund",
            tone: Tone::Fair,
            message: "Consider building it up.",
        }
    });

    if stats.final_balance < Decimal::ZERO {
        out.push(Insight {
            topic: "final_balance",
            tone: Tone::Poor,
            message: "Spending and savings exceed net income this period.",
        });
    }
    out
}

/// 50/30/20 split of net income.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Guideline {
    pub needs: Decimal,
    pub wants: Decimal,
    pub savings: Decimal,
}

pub fn guideline(net_income: Decimal) -> Guideline {
    let share = |pct: i64| net_income * Decimal::new(pct, 2);
    Guideline {
        needs: share(50),
        wants: share(30),
        savings: share(20),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{EMERGENCY_FUND, INVESTMENT};
    use chrono::Utc;
    use rust_decimal_macros::dec;

    fn income(base: Decimal, food: Decimal) -> IncomeProfile {
        IncomeProfile {
            username: "soumodip".into(),
            base_salary: base,
            food_deduction: food,
            pf: dec!(1800),
            last_updated: Utc::now(),
        }
    }

    fn record(id: &str, date: &str, pairs: &[(&str, Decimal)]) -> ExpenseRecord {
        let amounts = CategoryAmounts::try_from_pairs(pairs.iter().copied()).unwrap();
        ExpenseRecord {
            id: id.into(),
            date: date.into(),
            total: daily_total(&amounts),
            amounts,
            notes: String::new(),
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn daily_total_includes_savings() {
        let amounts = CategoryAmounts::try_from_pairs([
            ("food", dec!(200)),
            ("rent", dec!(1000)),
            (INVESTMENT, dec!(500)),
            (EMERGENCY_FUND, dec!(100)),
        ])
        .unwrap();
        assert_eq!(daily_total(&amounts), dec!(1800));
        assert_eq!(daily_total(&CategoryAmounts::new()), Decimal::ZERO);
    }

    #[test]
    fn monthly_stats_single_record_scenario() {
        let r = record(
            "a",
            "2025-06-02",
            &[
                ("food", dec!(200)),
                ("rent", dec!(1000)),
                (INVESTMENT, dec!(500)),
                (EMERGENCY_FUND, dec!(100)),
                ("others", dec!(0)),
            ],
        );
        assert_eq!(r.total, dec!(1800));

        let stats = monthly_stats(&[r], &income(dec!(50000), dec!(0)));
        assert_eq!(stats.net_income, dec!(50000));
        assert_eq!(stats.total_income, stats.net_income);
        assert_eq!(stats.total_spent, dec!(1200));
        assert_eq!(stats.total_investment, dec!(500));
        assert_eq!(stats.total_emergency_fund, dec!(100));
        assert_eq!(stats.final_balance, dec!(48200));
        assert_eq!(stats.savings_rate, dec!(96.4));
        assert_eq!(stats.pf, dec!(1800));
    }

    #[test]
    fn monthly_stats_empty_records() {
        let stats = monthly_stats(&[], &income(dec!(30000), dec!(600)));
        assert_eq!(stats.net_income, dec!(29400));
        assert_eq!(stats.final_balance, dec!(29400));
        assert_eq!(stats.savings_rate, dec!(100));
        assert_eq!(stats.total_spent, Decimal::ZERO);
    }

    #[test]
    fn zero_income_has_zero_savings_rate() {
        let r = record("a", "2025-06-02", &[("food", dec!(50))]);
        let stats = monthly_stats(&[r], &income(dec!(600), dec!(600)));
        assert_eq!(stats.net_income, Decimal::ZERO);
        assert_eq!(stats.final_balance, dec!(-50));
        assert_eq!(stats.savings_rate, Decimal::ZERO);
    }

    #[test]
    fn monthly_stats_uses_stored_total_for_spending() {
        let mut r = record("a", "2025-06-02", &[("food", dec!(100))]);
        r.total = dec!(150);
        let stats = monthly_stats(&[r], &income(dec!(1000), dec!(0)));
        assert_eq!(stats.total_spent, dec!(150));
    }

    #[test]
    fn breakdown_skips_zero_and_savings() {
        let records = vec![
            record("a", "2025-06-02", &[("food", dec!(200)), (INVESTMENT, dec!(500))]),
            record("b", "2025-06-03", &[("rent", dec!(1000)), ("food", dec!(50))]),
            record("c", "2025-06-04", &[("credit_card_bill", dec!(75))]),
        ];
        let slices = category_breakdown(&records);
        let names: Vec<_> = slices.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["Rent", "Food", "Credit Card"]);
        assert_eq!(slices[1].value, dec!(250));
        assert!(slices.iter().all(|s| !s.value.is_zero()));
    }

    #[test]
    fn breakdown_of_nothing_is_empty() {
        assert!(category_breakdown(&[]).is_empty());
        let zeros = record("a", "2025-06-02", &[(INVESTMENT, dec!(10))]);
        assert!(category_breakdown(&[zeros]).is_empty());
    }

    #[test]
    fn top_categories_sorted_and_capped() {
        let r = record(
            "a",
            "2025-06-02",
            &[
                ("rent", dec!(10)),
                ("food", dec!(70)),
                ("groceries", dec!(30)),
                ("electricity", dec!(60)),
                ("recharge", dec!(20)),
                ("transport", dec!(50)),
                ("medical", dec!(40)),
            ],
        );
        let records = [r];
        let top = top_categories(&records);
        let values: Vec<_> = top.iter().map(|s| s.value).collect();
        assert_eq!(values, [dec!(70), dec!(60), dec!(50), dec!(40), dec!(30)]);

        let full = category_breakdown(&records);
        assert!(top.iter().all(|s| full.contains(s)));
    }

    #[test]
    fn week_start_is_sunday() {
        let wed = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        assert_eq!(week_start(wed), NaiveDate::from_ymd_opt(2024, 12, 29).unwrap());
        let sun = NaiveDate::from_ymd_opt(2025, 1, 5).unwrap();
        assert_eq!(week_start(sun), sun);
    }

    #[test]
    fn weekly_breakdown_ascending_and_skips_bad_dates() {
        let records = vec![
            record("a", "2025-01-15", &[("food", dec!(100)), (INVESTMENT, dec!(40))]),
            record("b", "", &[("food", dec!(999))]),
            record("c", "2024-12-31", &[("rent", dec!(500)), (EMERGENCY_FUND, dec!(20))]),
            record("d", "2025-01-13", &[("food", dec!(25))]),
            record("e", "not-a-date", &[("food", dec!(999))]),
        ];
        let weeks = weekly_breakdown(&records);
        assert_eq!(weeks.len(), 2);
        assert_eq!(weeks[0].week, "Dec 29");
        assert_eq!(weeks[0].expenses, dec!(500));
        assert_eq!(weeks[0].emergency_fund, dec!(20));
        assert_eq!(weeks[1].week, "Jan 12");
        assert_eq!(weeks[1].expenses, dec!(125));
        assert_eq!(weeks[1].investment, dec!(40));
        assert!(weeks[0].week_start < weeks[1].week_start);
    }

    #[test]
    fn daily_trend_merges_same_date() {
        let records = vec![
            record("a", "2025-03-10", &[("food", dec!(500))]),
            record("b", "2025-03-10", &[("rent", dec!(300))]),
        ];
        let days = daily_trend(&records);
        assert_eq!(days.len(), 1);
        assert_eq!(days[0].date, "Mar 10");
        assert_eq!(days[0].total, dec!(800));
        assert_eq!(days[0].spending, dec!(800));
    }

    #[test]
    fn daily_trend_descending_and_skips_bad_dates() {
        let records = vec![
            record("a", "2025-03-01", &[("food", dec!(10))]),
            record("b", "", &[("food", dec!(10))]),
            record("c", "2025-03-09", &[("food", dec!(20)), (INVESTMENT, dec!(5))]),
            record("d", "2025-02-28", &[("food", dec!(30))]),
        ];
        let days = daily_trend(&records);
        let labels: Vec<_> = days.iter().map(|d| d.date.as_str()).collect();
        assert_eq!(labels, ["Mar 09", "Mar 01", "Feb 28"]);
        assert_eq!(days[0].total, dec!(25));
        assert_eq!(days[0].spending, dec!(20));
    }

    #[test]
    fn format_safe_date_falls_back() {
        assert_eq!(format_safe_date("2025-07-04", LABEL_FORMAT), "Jul 04");
        assert_eq!(format_safe_date("", LABEL_FORMAT), INVALID_DATE);
        assert_eq!(format_safe_date("2025-13-01", LABEL_FORMAT), INVALID_DATE);
        assert_eq!(format_safe_date("2025-07-04", "%Q"), INVALID_DATE);
        assert_eq!(format_safe_date("2025-07-04T10:00:00Z", "%Y-%m-%d"), "2025-07-04");
    }

    #[test]
    fn insights_follow_thresholds() {
        let r = record(
            "a",
            "2025-06-02",
            &[("food", dec!(1000)), (INVESTMENT, dec!(5000)), (EMERGENCY_FUND, dec!(500))],
        );
        let stats = monthly_stats(&[r], &income(dec!(10000), dec!(0)));
        assert_eq!(stats.savings_rate, dec!(35));
        let tips = insights(&stats);
        assert_eq!(tips[0].tone, Tone::Good);
        assert_eq!(tips[1].tone, Tone::Good);
        assert_eq!(tips[2].tone, Tone::Fair);
        assert_eq!(tips.len(), 3);
    }

    #[test]
    fn overspending_is_flagged() {
        let r = record("a", "2025-06-02", &[("rent", dec!(2000))]);
        let stats = monthly_stats(&[r], &income(dec!(1000), dec!(0)));
        let tips = insights(&stats);
        assert_eq!(tips[0].tone, Tone::Poor);
        assert_eq!(tips.last().unwrap().topic, "final_balance");
    }

    #[test]
    fn guideline_splits_net_income() {
        let g = guideline(dec!(29400));
        assert_eq!(g.needs, dec!(14700));
        assert_eq!(g.wants, dec!(8820));
        assert_eq!(g.savings, dec!(5880));
    }
}
