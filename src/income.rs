// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use chrono::Utc;
use rust_decimal::Decimal;

use crate::config::AppConfig;
use crate::errors::DailySpendError;
use crate::models::IncomeProfile;
use crate::store::ExpenseStore;

pub fn default_profile(cfg: &AppConfig, username: &str) -> IncomeProfile {
    let d = cfg.default_income_for(username);
    IncomeProfile {
        username: username.to_string(),
        base_salary: d.base_salary,
        food_deduction: d.food_deduction,
        pf: d.pf,
        last_updated: Utc::now(),
    }
}

/// The user's active profile, created from the configured default on first use.
pub fn load_or_default(
    store: &dyn ExpenseStore,
    cfg: &AppConfig,
    username: &str,
) -> Result<IncomeProfile> {
    if let Some(profile) = store.get_income(username)? {
        return Ok(profile);
    }
    let profile = default_profile(cfg, username);
    store.set_income(&profile)?;
    tracing::info!(user = %username, "created default income profile");
    Ok(profile)
}

/// Fields left as `None` keep their current value.
#[derive(Debug, Clone, Default)]
pub struct IncomeUpdate {
    pub base_salary: Option<Decimal>,
    pub food_deduction: Option<Decimal>,
    pub pf: Option<Decimal>,
}

impl IncomeUpdate {
    pub fn is_empty(&self) -> bool {
        self.base_salary.is_none() && self.food_deduction.is_none() && self.pf.is_none()
    }
}

pub fn apply_update(current: &IncomeProfile, update: &IncomeUpdate) -> Result<IncomeProfile> {
    let pick = |field: &str, new: Option<Decimal>, old: Decimal| -> Result<Decimal> {
        let v = new.unwrap_or(old);
        if v < Decimal::ZERO {
            return Err(DailySpendError::NegativeAmount {
                category: field.to_string(),
                amount: v,
            }
            .into());
        }
        Ok(v)
    };
    Ok(IncomeProfile {
        username: current.username.clone(),
        base_salary: pick("base_salary", update.base_salary, current.base_salary)?,
        food_deduction: pick("food_deduction", update.food_deduction, current.food_deduction)?,
        pf: pick("pf", update.pf, current.pf)?,
        last_updated: Utc::now(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn update_keeps_unspecified_fields() {
        let cfg = AppConfig::default();
        let current = default_profile(&cfg, "soumya");
        let next = apply_update(
            &current,
            &IncomeUpdate {
                base_salary: Some(dec!(32000)),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(next.base_salary, dec!(32000));
        assert_eq!(next.food_deduction, dec!(600));
        assert_eq!(next.net_income(), dec!(31400));
        assert!(next.last_updated >= current.last_updated);
    }

    #[test]
    fn update_rejects_negative() {
        let current = default_profile(&AppConfig::default(), "soumodip");
        let err = apply_update(
            &current,
            &IncomeUpdate {
                pf: Some(dec!(-1)),
                ..Default::default()
            },
        )
        .unwrap_err();
        assert!(err.to_string().contains("pf"));
    }
}
