// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::catalog::{EMERGENCY_FUND, INVESTMENT, catalog};
use crate::errors::DailySpendError;

/// Per-category amounts of one entry. Absent categories read as zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CategoryAmounts(BTreeMap<String, Decimal>);

impl CategoryAmounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds amounts from `(key, amount)` pairs, validating each one.
    pub fn try_from_pairs<'a, I>(pairs: I) -> Result<Self, DailySpendError>
    where
        I: IntoIterator<Item = (&'a str, Decimal)>,
    {
        let mut amounts = Self::new();
        for (key, amount) in pairs {
            amounts.set(key, amount)?;
        }
        Ok(amounts)
    }

    pub fn get(&self, key: &str) -> Decimal {
        self.0.get(key).copied().unwrap_or(Decimal::ZERO)
    }

    pub fn set(&mut self, key: &str, amount: Decimal) -> Result<(), DailySpendError> {
        if !catalog().contains(key) {
            return Err(DailySpendError::UnknownCategory(key.to_string()));
        }
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(DailySpendError::NegativeAmount {
                category: key.to_string(),
                amount,
            });
        }
        self.0.insert(key.to_string(), amount);
        Ok(())
    }

    /// Stores a value read back from a store without re-validating it.
    pub(crate) fn put_loaded(&mut self, key: &str, amount: Decimal) {
        self.0.insert(key.to_string(), amount);
    }

    pub fn investment(&self) -> Decimal {
        self.get(INVESTMENT)
    }

    pub fn emergency_fund(&self) -> Decimal {
        self.get(EMERGENCY_FUND)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Decimal)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

/// A submission that has not been stored yet.
#[derive(Debug, Clone)]
pub struct ExpenseDraft {
    pub date: NaiveDate,
    pub amounts: CategoryAmounts,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpenseRecord {
    pub id: String,
    /// Raw `YYYY-MM-DD` text as stored; may be empty or malformed in legacy data.
    pub date: String,
    #[serde(flatten)]
    pub amounts: CategoryAmounts,
    pub notes: String,
    /// Category sum captured when the entry was created. Kept as the display
    /// value even if it later disagrees with `computed_total`.
    pub total: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl ExpenseRecord {
    /// Sum of the category fields, recomputed from the raw amounts.
    pub fn computed_total(&self) -> Decimal {
        crate::stats::daily_total(&self.amounts)
    }

    pub fn has_total_mismatch(&self) -> bool {
        self.total != self.computed_total()
    }

    /// Stored total minus the savings-directed categories.
    pub fn spending(&self) -> Decimal {
        self.total - self.amounts.investment() - self.amounts.emergency_fund()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeProfile {
    pub username: String,
    pub base_salary: Decimal,
    pub food_deduction: Decimal,
    /// Provident fund contribution, informational only.
    pub pf: Decimal,
    pub last_updated: DateTime<Utc>,
}

impl IncomeProfile {
    pub fn net_income(&self) -> Decimal {
        self.base_salary - self.food_deduction
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyStats {
    pub total_income: Decimal,
    pub food_deduction: Decimal,
    pub pf: Decimal,
    pub net_income: Decimal,
    pub total_spent: Decimal,
    pub total_investment: Decimal,
    pub total_emergency_fund: Decimal,
    pub final_balance: Decimal,
    pub savings_rate: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySlice {
    pub name: String,
    pub value: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklyBucket {
    pub week: String,
    pub week_start: NaiveDate,
    pub expenses: Decimal,
    pub investment: Decimal,
    pub emergency_fund: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyPoint {
    pub date: String,
    pub total: Decimal,
    pub spending: Decimal,
}
