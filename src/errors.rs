// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use thiserror::Error;

/// Domain failures callers may want to match on.
#[derive(Debug, Error)]
pub enum DailySpendError {
    #[error("Unknown category '{0}'")]
    UnknownCategory(String),
    #[error("Amount for {category} cannot be negative (got {amount})")]
    NegativeAmount { category: String, amount: Decimal },
    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error("Not logged in; run `dailyspend login` or pass --user")]
    NotLoggedIn,
    #[error("Invalid username or password")]
    InvalidCredentials,
    #[error("Unknown user '{0}'")]
    UnknownUser(String),
    #[error("Remote store error: {0}")]
    Remote(String),
}
