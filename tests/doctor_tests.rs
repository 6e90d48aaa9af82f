// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use dailyspend::commands::{Context, doctor};
use dailyspend::config::AppConfig;
use dailyspend::db;
use dailyspend::store::LocalStore;
use rusqlite::Connection;

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    conn
}

#[test]
fn clean_data_reports_nothing() {
    let conn = setup();
    conn.execute(
        "INSERT INTO expenses(id,username,date,food,rent,total) VALUES ('a','soumya','2025-01-02','100','900','1000')",
        [],
    )
    .unwrap();
    let store = LocalStore::new(&conn);
    let config = AppConfig::default();
    let ctx = Context {
        conn: &conn,
        store: &store,
        config: &config,
        user: Some("soumya".into()),
    };
    assert!(doctor::find_issues(&ctx).unwrap().is_empty());
}

#[test]
fn flags_bad_dates_drifted_totals_and_negatives() {
    let conn = setup();
    conn.execute_batch(
        r#"
        INSERT INTO expenses(id,username,date,food,total) VALUES ('bad-date','soumya','not-a-date','50','50');
        INSERT INTO expenses(id,username,date,food,rent,total) VALUES ('drift','soumya','2025-01-03','100','900','1200');
        INSERT INTO expenses(id,username,date,medical,total) VALUES ('neg','soumya','2025-01-04','-20','-20');
        INSERT INTO expenses(id,username,date,food,total) VALUES ('other','soumodip','','1','5');
        "#,
    )
    .unwrap();
    let store = LocalStore::new(&conn);
    let config = AppConfig::default();
    let ctx = Context {
        conn: &conn,
        store: &store,
        config: &config,
        user: Some("soumya".into()),
    };

    let issues = doctor::find_issues(&ctx).unwrap();
    let kinds: Vec<(&str, &str)> = issues
        .iter()
        .map(|row| (row[0].as_str(), row[1].split(' ').next().unwrap()))
        .collect();
    assert_eq!(
        kinds,
        vec![
            ("invalid_date", "bad-date"),
            ("total_mismatch", "drift"),
            ("negative_amount", "neg"),
        ]
    );
    assert!(issues[1][1].contains("stored=1200 computed=1000"));
    assert!(issues[2][1].contains("medical=-20"));
}
