use crate::config::ConfigError;
use crate::employee_events::QueryError;
use crate::report::html::{page, Element, Node};
use crate::report::ReportError;
use crate::risk::RiskModelError;
use crate::telemetry::TelemetryError;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use std::fmt;
use tracing::error;

#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Query(QueryError),
    Report(ReportError),
    Model(RiskModelError),
    Task(tokio::task::JoinError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Report(ReportError::EntityNotFound { .. }) => StatusCode::NOT_FOUND,
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Query(_)
            | AppError::Report(_)
            | AppError::Model(_)
            | AppError::Task(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::BadRequest(reason) => write!(f, "bad request: {}", reason),
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Query(err) => write!(f, "query error: {}", err),
            AppError::Report(err) => write!(f, "report error: {}", err),
            AppError::Model(err) => write!(f, "risk model error: {}", err),
            AppError::Task(err) => write!(f, "render task failed: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::BadRequest(_) => None,
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Query(err) => Some(err),
            AppError::Report(err) => Some(err),
            AppError::Model(err) => Some(err),
            AppError::Task(err) => Some(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "request failed");
        }

        let reason = status.canonical_reason().unwrap_or("Error");
        let body = Element::new("article")
            .class("error")
            .child(Element::new("h1").child(format!("{} {}", status.as_u16(), reason)))
            .child(Element::new("p").child(self.to_string()))
            .child(Element::new("a").attr("href", "/").child("Back to dashboard"));

        (status, Html(page(reason, Node::from(body)))).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<QueryError> for AppError {
    fn from(value: QueryError) -> Self {
        Self::Query(value)
    }
}

impl From<ReportError> for AppError {
    fn from(value: ReportError) -> Self {
        Self::Report(value)
    }
}

impl From<RiskModelError> for AppError {
    fn from(value: RiskModelError) -> Self {
        Self::Model(value)
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(value: tokio::task::JoinError) -> Self {
        Self::Task(value)
    }
}
