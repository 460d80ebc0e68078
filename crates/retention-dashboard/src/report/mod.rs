//! Server-side rendering of the retention dashboard.

pub mod charts;
pub mod components;
pub mod dashboard;
pub mod html;

use crate::employee_events::{EntityKind, QueryError};
use charts::ChartError;

pub use components::{Component, Figure, Visualization};
pub use dashboard::{
    dashboard_filters, visualizations, BarChart, Header, LineChart, NotesTable, Report,
    ReportDropdown,
};

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error(transparent)]
    Query(#[from] QueryError),
    #[error(transparent)]
    Chart(#[from] ChartError),
    #[error("{} {id} not found", kind.table())]
    EntityNotFound { kind: EntityKind, id: i64 },
}
