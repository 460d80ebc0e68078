use super::query_base::{EntityKind, EventTotals, NameEntry, QueryBase};
use super::sql::{Database, QueryError};

/// Queries scoped to individual employees.
#[derive(Debug, Clone)]
pub struct Employee {
    database: Database,
}

impl Employee {
    pub fn new(database: Database) -> Self {
        Self { database }
    }
}

impl QueryBase for Employee {
    fn kind(&self) -> EntityKind {
        EntityKind::Employee
    }

    fn database(&self) -> &Database {
        &self.database
    }

    /// Full names ordered by last name, then first name.
    fn names(&self) -> Result<Vec<NameEntry>, QueryError> {
        self.database.query(
            "SELECT (first_name || ' ' || last_name) AS full_name,
                    employee_id
             FROM employee
             ORDER BY last_name, first_name",
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
            "SELECT (first_name || ' ' || last_name) AS full_name
             FROM employee
             WHERE employee_id = ?1",
            [id],
            |row| row.get::<_, String>(0),
        )?;
        Ok(rows.into_iter().next())
    }

    /// A single row of summed events; an employee without events sums to zero.
    fn model_data(&self, id: i64) -> Result<Vec<EventTotals>, QueryError> {
        let rows = self.database.query(
            "SELECT SUM(positive_events) AS positive_events,
                    SUM(negative_events) AS negative_events
             FROM employee
             JOIN employee_events
               USING (employee_id)
             WHERE employee.employee_id = ?1",
            [id],
            |row| {
                Ok(EventTotals {
                    positive_events: row.get::<_, Option<i64>>(0)?.unwrap_or(0),
                    negative_events: row.get::<_, Option<i64>>(1)?.unwrap_or(0),
                })
            },
        )?;

        Ok(if rows.is_empty() {
            vec![EventTotals::default()]
        } else {
            rows
        })
    }
}
