//! Employee and team retention risk: SQLite queries, the risk model, and the
//! HTML report components that render them.

pub mod config;
pub mod employee_events;
pub mod error;
pub mod report;
pub mod risk;
pub mod telemetry;
