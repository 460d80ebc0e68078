#![allow(dead_code)]
use retention_dashboard::employee_events::{schema, Database};
use std::env;
use std::fs;
use std::path::PathBuf;

/// Fresh demo-seeded database in the system temp dir, unique per test name.
pub fn seeded_database(name: &str) -> Database {
    let path = temp_db_path(name);
    schema::initialize(&path, true).expect("demo database initializes")
}

/// Database with the schema but no rows.
pub fn empty_database(name: &str) -> Database {
    let path = temp_db_path(name);
    schema::initialize(&path, false).expect("empty database initializes")
}

pub fn temp_db_path(name: &str) -> PathBuf {
    let mut path = env::temp_dir();
    path.push(format!(
        "retention_dashboard_{}_{}.sqlite",
        name,
        std::process::id()
    ));
    fs::remove_file(&path).ok();
    path
}
