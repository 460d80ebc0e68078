//! Read-only queries over the employee events database.

pub mod employee;
pub mod query_base;
pub mod schema;
pub mod sql;
pub mod team;

pub use employee::Employee;
pub use query_base::{
    EntityKind, EventCount, EventTotals, NameEntry, Note, QueryBase, UnknownEntityKind,
};
pub use sql::{Database, QueryError};
pub use team::Team;

/// Builds the query model for `kind` over `database`.
pub fn model_for(kind: EntityKind, database: Database) -> Box<dyn QueryBase> {
    match kind {
        EntityKind::Employee => Box::new(Employee::new(database)),
        EntityKind::Team => Box::new(Team::new(database)),
    }
}
