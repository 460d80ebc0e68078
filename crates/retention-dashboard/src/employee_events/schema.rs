//! Table definitions and a small demo dataset for local runs and tests.

use super::sql::{Database, QueryError};
use rusqlite::Connection;
use std::path::Path;
use tracing::info;

pub const SCHEMA_SQL: &str = "
CREATE TABLE IF NOT EXISTS team (
    team_id      INTEGER PRIMARY KEY,
    team_name    TEXT NOT NULL,
    shift        TEXT,
    manager_name TEXT
);

CREATE TABLE IF NOT EXISTS employee (
    employee_id INTEGER PRIMARY KEY,
    first_name  TEXT NOT NULL,
    last_name   TEXT NOT NULL,
    team_id     INTEGER REFERENCES team (team_id)
);

CREATE TABLE IF NOT EXISTS employee_events (
    event_date      TEXT NOT NULL,
    employee_id     INTEGER REFERENCES employee (employee_id),
    team_id         INTEGER REFERENCES team (team_id),
    positive_events INTEGER NOT NULL DEFAULT 0 CHECK (positive_events >= 0),
    negative_events INTEGER NOT NULL DEFAULT 0 CHECK (negative_events >= 0)
);

CREATE TABLE IF NOT EXISTS notes (
    employee_id INTEGER REFERENCES employee (employee_id),
    team_id     INTEGER REFERENCES team (team_id),
    note        TEXT NOT NULL,
    note_date   TEXT NOT NULL
);
";

/// Three teams, six employees, and a handful of events and notes.
pub const DEMO_SEED_SQL: &str = "
INSERT INTO team (team_id, team_name, shift, manager_name) VALUES
    (1, 'Team Alpha', 'Day',   'Morgan Reyes'),
    (2, 'Team Bravo', 'Night', 'Priya Natarajan'),
    (3, 'Team Delta', 'Day',   'Sam Okafor');

INSERT INTO employee (employee_id, first_name, last_name, team_id) VALUES
    (1, 'Alex',   'Kim',     1),
    (2, 'Jordan', 'Baker',   1),
    (3, 'Taylor', 'Nguyen',  2),
    (4, 'Casey',  'Alvarez', 2),
    (5, 'Riley',  'Chen',    2),
    (6, 'Quinn',  'Foster',  3);

INSERT INTO employee_events (event_date, employee_id, team_id, positive_events, negative_events) VALUES
    ('2023-01-02', 1, 1, 2, 0),
    ('2023-01-03', 1, 1, 1, 1),
    ('2023-01-05', 1, 1, 3, 0),
    ('2023-01-03', 2, 1, 0, 2),
    ('2023-01-06', 2, 1, 1, 3),
    ('2023-01-02', 3, 2, 1, 1),
    ('2023-01-04', 3, 2, 0, 4),
    ('2023-01-04', 4, 2, 2, 0),
    ('2023-01-09', 4, 2, 1, 2),
    ('2023-01-05', 5, 2, 0, 1);

INSERT INTO notes (employee_id, team_id, note, note_date) VALUES
    (1, 1, 'Led the onboarding session for new hires', '2023-01-03'),
    (1, 1, 'Asked about the senior engineer track', '2023-01-06'),
    (2, 1, 'Missed two stand-ups without notice', '2023-01-06'),
    (3, 2, 'Raised concerns about night shift staffing', '2023-01-04'),
    (4, 2, 'Covered an extra shift for Team Bravo', '2023-01-09');
";

/// Creates the schema at `path`, optionally loading the demo dataset.
///
/// This is the only code path that writes to an events database; the
/// dashboard itself opens the file read-only.
pub fn initialize(path: &Path, seed: bool) -> Result<Database, QueryError> {
    let conn = Connection::open(path)?;
    conn.execute_batch(SCHEMA_SQL)?;
    if seed {
        conn.execute_batch(DEMO_SEED_SQL)?;
    }
    info!(database = %path.display(), seed, "initialized employee events database");
    Ok(Database::new(path))
}
