// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use dailyspend::commands::{self, Context};
use dailyspend::config::AppConfig;
use dailyspend::store::FallbackStore;
use dailyspend::{cli, db, utils};

fn main() -> Result<()> {
    utils::init_tracing();
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let config = AppConfig::load()?;
    let conn = db::open_or_init()?;
    let store = FallbackStore::from_config(&conn, &config)?;
    let ctx = Context {
        conn: &conn,
        store: &store,
        config: &config,
        user: matches.get_one::<String>("user").cloned(),
    };

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Database initialized at {}", db::db_path()?.display());
            if store.is_offline() {
                println!("Running in offline mode (local store only)");
            } else {
                println!("Remote store enabled with local fallback");
            }
        }
        Some(("login", sub)) => commands::session::login(&ctx, sub)?,
        Some(("logout", _)) => commands::session::logout(&ctx)?,
        Some(("whoami", _)) => commands::session::whoami(&ctx)?,
        Some(("expense", sub)) => commands::expenses::handle(&ctx, sub)?,
        Some(("income", sub)) => commands::income::handle(&ctx, sub)?,
        Some(("report", sub)) => commands::reports::handle(&ctx, sub)?,
        Some(("categories", sub)) => commands::categories::handle(sub)?,
        Some(("export", sub)) => commands::exporter::handle(&ctx, sub)?,
        Some(("doctor", _)) => commands::doctor::handle(&ctx)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
