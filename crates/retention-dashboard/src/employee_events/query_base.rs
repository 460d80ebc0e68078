use super::sql::{Database, QueryError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// The two units of analysis the dashboard reports on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum EntityKind {
    #[serde(rename = "Employee")]
    Employee,
    #[serde(rename = "Team")]
    Team,
}

impl EntityKind {
    pub const fn ordered() -> [Self; 2] {
        [Self::Employee, Self::Team]
    }

    /// Table name, also used as the model name and URL segment.
    pub const fn table(self) -> &'static str {
        match self {
            Self::Employee => "employee",
            Self::Team => "team",
        }
    }

    pub const fn id_column(self) -> &'static str {
        match self {
            Self::Employee => "employee_id",
            Self::Team => "team_id",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Employee => "Employee",
            Self::Team => "Team",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown profile type '{0}' (expected Employee or Team)")]
pub struct UnknownEntityKind(pub String);

impl FromStr for EntityKind {
    type Err = UnknownEntityKind;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ordered()
            .into_iter()
            .find(|kind| kind.label().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| UnknownEntityKind(value.to_string()))
    }
}

impl TryFrom<String> for EntityKind {
    type Error = UnknownEntityKind;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Display name and identifier used to populate selectors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NameEntry {
    pub name: String,
    pub id: i64,
}

/// Positive and negative events recorded on one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventCount {
    pub event_date: NaiveDate,
    pub positive_events: i64,
    pub negative_events: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Note {
    pub note_date: NaiveDate,
    pub note: String,
}

/// Summed events for one employee; the risk model's input row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EventTotals {
    pub positive_events: i64,
    pub negative_events: i64,
}

/// Queries shared by every entity model.
///
/// Implementors supply the entity kind and the database handle; the event
/// and note queries are generated from the kind's table and id column, and
/// the entity id is always passed as a bound parameter.
pub trait QueryBase: Send + Sync {
    fn kind(&self) -> EntityKind;

    fn database(&self) -> &Database;

    fn name(&self) -> &'static str {
        self.kind().table()
    }

    /// Selector entries for every entity of this kind.
    fn names(&self) -> Result<Vec<NameEntry>, QueryError> {
        Ok(Vec::new())
    }

    /// Display name for `id`, or `None` when no such entity exists.
    fn username(&self, id: i64) -> Result<Option<String>, QueryError>;

    /// Event totals fed to the risk model.
    fn model_data(&self, id: i64) -> Result<Vec<EventTotals>, QueryError>;

    fn event_counts(&self, id: i64) -> Result<Vec<EventCount>, QueryError> {
        let table = self.kind().table();
        let id_col = self.kind().id_column();
        let sql = format!(
            "SELECT ee.event_date,
                    SUM(ee.positive_events) AS positive_events,
                    SUM(ee.negative_events) AS negative_events
             FROM employee_events AS ee
             JOIN {table} AS t
               ON ee.{id_col} = t.{id_col}
             WHERE t.{id_col} = ?1
             GROUP BY ee.event_date
             ORDER BY ee.event_date"
        );

        let rows = self.database().query(&sql, [id], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, Option<i64>>(1)?,
                row.get::<_, Option<i64>>(2)?,
            ))
        })?;

        rows.into_iter()
            .map(|(date, positive, negative)| -> Result<EventCount, QueryError> {
                Ok(EventCount {
                    event_date: parse_date(&date)?,
                    positive_events: positive.unwrap_or(0),
                    negative_events: negative.unwrap_or(0),
                })
            })
            .collect()
    }

    fn notes(&self, id: i64) -> Result<Vec<Note>, QueryError> {
        let table = self.kind().table();
        let id_col = self.kind().id_column();
        let sql = format!(
            "SELECT n.note_date, n.note
             FROM notes AS n
             JOIN {table} AS t
               ON n.{id_col} = t.{id_col}
             WHERE t.{id_col} = ?1
             ORDER BY n.note_date"
        );

        let rows = self.database().query(&sql, [id], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, Option<String>>(1)?))
        })?;

        rows.into_iter()
            .map(|(date, note)| -> Result<Note, QueryError> {
                Ok(Note {
                    note_date: parse_date(&date)?,
                    note: note.unwrap_or_default(),
                })
            })
            .collect()
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, QueryError> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .map_err(|_| QueryError::InvalidDate(raw.to_string()))
}
