// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod categories;
pub mod doctor;
pub mod expenses;
pub mod exporter;
pub mod income;
pub mod reports;
pub mod session;

use anyhow::Result;
use rusqlite::Connection;

use crate::auth::{self, CredentialStore, User};
use crate::config::AppConfig;
use crate::store::ExpenseStore;

/// Everything a command handler needs.
pub struct Context<'a> {
    pub conn: &'a Connection,
    pub store: &'a dyn ExpenseStore,
    pub config: &'a AppConfig,
    /// Value of the global `--user` flag.
    pub user: Option<String>,
}

impl Context<'_> {
    pub fn credentials(&self) -> CredentialStore {
        CredentialStore::from_config(self.config)
    }

    pub fn require_user(&self) -> Result<User> {
        auth::resolve_user(self.conn, &self.credentials(), self.user.as_deref())
    }
}
