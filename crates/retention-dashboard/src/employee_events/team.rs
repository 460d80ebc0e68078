use super::query_base::{EntityKind, EventTotals, NameEntry, QueryBase};
use super::sql::{Database, QueryError};

/// Queries scoped to whole teams.
#[derive(Debug, Clone)]
pub struct Team {
    database: Database,
}

impl Team {
    pub fn new(database: Database) -> Self {
        Self { database }
    }
}

impl QueryBase for Team {
    fn kind(&self) -> EntityKind {
        EntityKind::Team
    }

    fn database(&self) -> &Database {
        &self.database
    }

    fn names(&self) -> Result<Vec<NameEntry>, QueryError> {
        self.database.query(
            "SELECT team_name, team_id
             FROM team
             ORDER BY team_name",
            [],
            |row| {
                Ok(NameEntry {
                    name: row.get(0)?,
                    id: row.get(1)?,
                })
            },
        )
    }

    fn username(&self, id: i64) -> Result<Option<String>, QueryError> {
        let rows = self.database.query(
            "SELECT team_name
             FROM team
             WHERE team_id = ?1",
            [id],
            |row| row.get::<_, String>(0),
        )?;
        Ok(rows.into_iter().next())
    }

    /// One row per team member who has recorded events.
    fn model_data(&self, id: i64) -> Result<Vec<EventTotals>, QueryError> {
        self.database.query(
            "SELECT positive_events, negative_events FROM (
                 SELECT employee_id,
                        SUM(positive_events) AS positive_events,
                        SUM(negative_events) AS negative_events
                 FROM team
                 JOIN employee_events
                   USING (team_id)
                 WHERE team.team_id = ?1
                 GROUP BY employee_id
             )
             ORDER BY employee_id",
            [id],
            |row| {
                Ok(EventTotals {
                    positive_events: row.get::<_, Option<i64>>(0)?.unwrap_or(0),
                    negative_events: row.get::<_, Option<i64>>(1)?.unwrap_or(0),
                })
            },
        )
    }
}
