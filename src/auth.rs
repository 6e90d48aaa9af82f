// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Fixed credential table and the persisted "current user" session.
//!
//! Passwords are compared in plain text. This is a household tool with a
//! configured user list, not an authentication system.

use anyhow::Result;
use rusqlite::Connection;
use serde::Serialize;
use std::collections::HashMap;

use crate::config::AppConfig;
use crate::errors::DailySpendError;
use crate::utils::{clear_setting, get_setting, set_setting};

const SESSION_KEY: &str = "current_user";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub username: String,
    pub display_name: String,
}

struct Credential {
    password: String,
    display_name: String,
}

pub struct CredentialStore {
    users: HashMap<String, Credential>,
}

impl CredentialStore {
    pub fn from_config(cfg: &AppConfig) -> Self {
        let users = cfg
            .users
            .iter()
            .map(|u| {
                (
                    u.username.to_lowercase(),
                    Credential {
                        password: u.password.clone(),
                        display_name: u.display_name.clone(),
                    },
                )
            })
            .collect();
        Self { users }
    }

    pub fn lookup(&self, username: &str) -> Option<User> {
        let key = username.trim().to_lowercase();
        self.users.get(&key).map(|c| User {
            username: key,
            display_name: c.display_name.clone(),
        })
    }

    /// Usernames are case-insensitive; passwords are not.
    pub fn authenticate(&self, username: &str, password: &str) -> Option<User> {
        let key = username.trim().to_lowercase();
        match self.users.get(&key) {
            Some(c) if c.password == password => self.lookup(&key),
            _ => None,
        }
    }
}

pub fn login(
    conn: &Connection,
    creds: &CredentialStore,
    username: &str,
    password: &str,
) -> Result<User> {
    let user = creds
        .authenticate(username, password)
        .ok_or(DailySpendError::InvalidCredentials)?;
    set_setting(conn, SESSION_KEY, &user.username)?;
    tracing::info!(user = %user.username, "logged in");
    Ok(user)
}

pub fn logout(conn: &Connection) -> Result<()> {
    clear_setting(conn, SESSION_KEY)
}

/// The logged-in user, if the stored name still exists in the credential table.
pub fn current_user(conn: &Connection, creds: &CredentialStore) -> Result<Option<User>> {
    let Some(name) = get_setting(conn, SESSION_KEY)? else {
        return Ok(None);
    };
    let user = creds.lookup(&name);
    if user.is_none() {
        tracing::warn!(user = %name, "stored session names an unknown user");
    }
    Ok(user)
}

/// Picks the acting user: an explicit override wins over the stored session.
pub fn resolve_user(
    conn: &Connection,
    creds: &CredentialStore,
    override_user: Option<&str>,
) -> Result<User> {
    if let Some(name) = override_user {
        return creds
            .lookup(name)
            .ok_or_else(|| DailySpendError::UnknownUser(name.trim().to_string()).into());
    }
    current_user(conn, creds)?.ok_or_else(|| DailySpendError::NotLoggedIn.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn creds() -> CredentialStore {
        CredentialStore::from_config(&AppConfig::default())
    }

    #[test]
    fn authenticate_is_case_insensitive_on_username() {
        let user = creds().authenticate("Soumya", "soumya").unwrap();
        assert_eq!(user.username, "soumya");
        assert_eq!(user.display_name, "Soumya");
    }

    #[test]
    fn wrong_password_or_user_fails() {
        assert!(creds().authenticate("soumya", "SOUMYA").is_none());
        assert!(creds().authenticate("nobody", "x").is_none());
    }
}
