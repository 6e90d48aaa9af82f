// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::Context;
use crate::auth;
use anyhow::Result;

pub fn login(ctx: &Context, sub: &clap::ArgMatches) -> Result<()> {
    let username = sub.get_one::<String>("username").unwrap();
    let password = sub.get_one::<String>("password").unwrap();
    let user = auth::login(ctx.conn, &ctx.credentials(), username, password)?;
    println!("Welcome, {}!", user.display_name);
    Ok(())
}

pub fn logout(ctx: &Context) -> Result<()> {
    auth::logout(ctx.conn)?;
    println!("Logged out");
    Ok(())
}

pub fn whoami(ctx: &Context) -> Result<()> {
    let user = ctx.require_user()?;
    println!("{} ({})", user.display_name, user.username);
    Ok(())
}
