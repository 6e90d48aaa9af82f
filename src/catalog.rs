// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Ordered list of expense categories.
//!
//! Every place that needs to walk the categories (record shape, SQL columns,
//! CLI flags, breakdowns, labels) iterates this list instead of naming
//! categories by hand.

use once_cell::sync::Lazy;
use serde::Serialize;

pub const CREDIT_CARD_BILL: &str = "credit_card_bill";
pub const INVESTMENT: &str = "investment";
pub const EMERGENCY_FUND: &str = "emergency_fund";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryKind {
    /// Discretionary or household spend.
    Spending,
    /// Money set aside rather than spent.
    Savings,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryMeta {
    /// Storage key, also the SQL column name.
    pub key: &'static str,
    /// Long CLI flag name.
    pub flag: &'static str,
    pub label: &'static str,
    pub icon: &'static str,
    pub kind: CategoryKind,
}

impl CategoryMeta {
    const fn spending(
        key: &'static str,
        flag: &'static str,
        label: &'static str,
        icon: &'static str,
    ) -> Self {
        Self {
            key,
            flag,
            label,
            icon,
            kind: CategoryKind::Spending,
        }
    }

    const fn savings(
        key: &'static str,
        flag: &'static str,
        label: &'static str,
        icon: &'static str,
    ) -> Self {
        Self {
            key,
            flag,
            label,
            icon,
            kind: CategoryKind::Savings,
        }
    }

    pub fn is_reportable(&self) -> bool {
        self.kind == CategoryKind::Spending
    }
}

#[derive(Debug, Clone)]
pub struct Catalog {
    entries: Vec<CategoryMeta>,
}

static CATALOG: Lazy<Catalog> = Lazy::new(|| {
    Catalog::new(vec![
        CategoryMeta::spending("rent", "rent", "Rent", "🏠"),
        CategoryMeta::spending("food", "food", "Food", "🍽️"),
        CategoryMeta::spending("groceries", "groceries", "Groceries", "🛒"),
        CategoryMeta::spending("electricity", "electricity", "Electricity", "⚡"),
        CategoryMeta::spending("recharge", "recharge", "Recharge", "📱"),
        CategoryMeta::spending("transport", "transport", "Transport", "🚗"),
        CategoryMeta::spending("medical", "medical", "Medical", "💊"),
        CategoryMeta::spending("shopping", "shopping", "Shopping", "🛍️"),
        CategoryMeta::spending(
            CREDIT_CARD_BILL,
            "credit-card-bill",
            "Credit Card Bill",
            "💳",
        ),
        CategoryMeta::spending("others", "others", "Others", "📝"),
        CategoryMeta::savings(INVESTMENT, "investment", "Investment (SIP)", "💰"),
        CategoryMeta::savings(
            EMERGENCY_FUND,
            "emergency-fund",
            "Emergency Fund",
            "🚨",
        ),
    ])
});

/// The process-wide category catalog.
pub fn catalog() -> &'static Catalog {
    &CATALOG
}

impl Catalog {
    fn new(entries: Vec<CategoryMeta>) -> Self {
        Self { entries }
    }

    pub fn iter(&self) -> impl Iterator<Item = &CategoryMeta> {
        self.entries.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|c| c.key)
    }

    pub fn get(&self, key: &str) -> Option<&CategoryMeta> {
        self.entries.iter().find(|c| c.key == key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Spending categories in catalog order; savings categories are reported separately.
    pub fn reportable(&self) -> impl Iterator<Item = &CategoryMeta> {
        self.entries.iter().filter(|c| c.is_reportable())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Short name used in breakdown output ("Credit Card", "Rent", ...).
pub fn display_name(key: &str) -> String {
    if key == CREDIT_CARD_BILL {
        return "Credit Card".to_string();
    }
    let mut chars = key.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_has_ten_reportable_and_two_savings() {
        let cat = catalog();
        assert_eq!(cat.len(), 12);
        assert_eq!(cat.reportable().count(), 10);
        assert!(!cat.get(INVESTMENT).unwrap().is_reportable());
        assert!(!cat.get(EMERGENCY_FUND).unwrap().is_reportable());
    }

    #[test]
    fn reportable_keeps_catalog_order() {
        let keys: Vec<_> = catalog().reportable().map(|c| c.key).collect();
        assert_eq!(keys.first(), Some(&"rent"));
        assert_eq!(keys.last(), Some(&"others"));
        assert_eq!(keys[8], CREDIT_CARD_BILL);
    }

    #[test]
    fn display_names() {
        assert_eq!(display_name("rent"), "Rent");
        assert_eq!(display_name(CREDIT_CARD_BILL), "Credit Card");
        assert_eq!(display_name(""), "");
    }

    #[test]
    fn unknown_key_is_absent() {
        assert!(!catalog().contains("fuel"));
        assert!(catalog().contains("groceries"));
    }
}
