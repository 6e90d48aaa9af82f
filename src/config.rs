// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const REMOTE_URL_ENV: &str = "DAILYSPEND_REMOTE_URL";
pub const REMOTE_KEY_ENV: &str = "DAILYSPEND_REMOTE_KEY";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefaultIncome {
    pub base_salary: Decimal,
    #[serde(default)]
    pub food_deduction: Decimal,
    #[serde(default)]
    pub pf: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserEntry {
    pub username: String,
    pub display_name: String,
    pub password: String,
    pub default_income: DefaultIncome,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteConfig {
    pub url: String,
    pub api_key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_users")]
    pub users: Vec<UserEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote: Option<RemoteConfig>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            users: default_users(),
            remote: None,
        }
    }
}

fn default_users() -> Vec<UserEntry> {
    vec![
        UserEntry {
            username: "soumodip".into(),
            display_name: "Soumodip".into(),
            password: "soumodip".into(),
            default_income: DefaultIncome {
                base_salary: Decimal::from(50000),
                food_deduction: Decimal::ZERO,
                pf: Decimal::from(1800),
            },
        },
        UserEntry {
            username: "soumya".into(),
            display_name: "Soumya".into(),
            password: "soumya".into(),
            default_income: DefaultIncome {
                base_salary: Decimal::from(30000),
                food_deduction: Decimal::from(600),
                pf: Decimal::ZERO,
            },
        },
    ]
}

pub fn config_path() -> Result<PathBuf> {
    let proj = crate::db::project_dirs()?;
    Ok(proj.config_dir().join("config.json"))
}

impl AppConfig {
    /// Loads `config.json` from the platform config dir (defaults when absent)
    /// and applies the remote-store environment overrides.
    pub fn load() -> Result<Self> {
        let cfg = Self::from_path(&config_path()?)?;
        Ok(cfg.with_remote_override(
            std::env::var(REMOTE_URL_ENV).ok(),
            std::env::var(REMOTE_KEY_ENV).ok(),
        ))
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let data = fs::read_to_string(path)
            .with_context(|| format!("Read config {}", path.display()))?;
        let cfg: Self = serde_json::from_str(&data)
            .with_context(|| format!("Parse config {}", path.display()))?;
        if cfg.users.is_empty() {
            anyhow::bail!("Config {} defines no users", path.display());
        }
        Ok(cfg)
    }

    /// Both values must be present and non-empty to enable the remote store.
    pub fn with_remote_override(mut self, url: Option<String>, key: Option<String>) -> Self {
        let url = url.map(|s| s.trim().to_string()).filter(|s| !s.is_empty());
        let key = key.map(|s| s.trim().to_string()).filter(|s| !s.is_empty());
        if let (Some(url), Some(api_key)) = (url, key) {
            self.remote = Some(RemoteConfig { url, api_key });
        }
        self
    }

    pub fn user(&self, username: &str) -> Option<&UserEntry> {
        let wanted = username.trim().to_lowercase();
        self.users.iter().find(|u| u.username.to_lowercase() == wanted)
    }

    /// Default income for `username`; unknown users get the last configured user's defaults.
    pub fn default_income_for(&self, username: &str) -> DefaultIncome {
        self.user(username)
            .or_else(|| self.users.last())
            .map(|u| u.default_income.clone())
            .unwrap_or(DefaultIncome {
                base_salary: Decimal::ZERO,
                food_deduction: Decimal::ZERO,
                pf: Decimal::ZERO,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn defaults_have_two_users() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.users.len(), 2);
        assert_eq!(cfg.default_income_for("soumodip").base_salary, dec!(50000));
        assert_eq!(cfg.default_income_for("SOUMYA").food_deduction, dec!(600));
        assert!(cfg.remote.is_none());
    }

    #[test]
    fn unknown_user_gets_last_user_defaults() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.default_income_for("guest").base_salary, dec!(30000));
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = AppConfig::from_path(&dir.path().join("nope.json")).unwrap();
        assert_eq!(cfg.users.len(), 2);
    }

    #[test]
    fn reads_users_and_remote_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "users": [{{
                    "username": "asha",
                    "display_name": "Asha",
                    "password": "pw",
                    "default_income": {{ "base_salary": 42000, "food_deduction": "150.50" }}
                }}],
                "remote": {{ "url": "https://db.example", "api_key": "k" }}
            }}"#
        )
        .unwrap();
        let cfg = AppConfig::from_path(file.path()).unwrap();
        assert_eq!(cfg.users[0].default_income.base_salary, dec!(42000));
        assert_eq!(cfg.users[0].default_income.food_deduction, dec!(150.50));
        assert_eq!(cfg.users[0].default_income.pf, Decimal::ZERO);
        assert_eq!(cfg.remote.unwrap().url, "https://db.example");
    }

    #[test]
    fn empty_user_list_is_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{ "users": [] }}"#).unwrap();
        assert!(AppConfig::from_path(file.path()).is_err());
    }

    #[test]
    fn remote_override_needs_both_values() {
        let cfg = AppConfig::default().with_remote_override(Some("https://x".into()), None);
        assert!(cfg.remote.is_none());
        let cfg = AppConfig::default()
            .with_remote_override(Some(" https://x ".into()), Some("key".into()));
        assert_eq!(
            cfg.remote,
            Some(RemoteConfig {
                url: "https://x".into(),
                api_key: "key".into()
            })
        );
    }
}
