use crate::infra::{AppState, DashboardState};
use axum::extract::rejection::{FormRejection, QueryRejection};
use axum::extract::{Form, Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use retention_dashboard::employee_events::{model_for, EntityKind};
use retention_dashboard::error::AppError;
use retention_dashboard::report::{Component, ReportDropdown};
use serde::Deserialize;
use serde_json::json;
use std::io::ErrorKind;
use tracing::debug;

const EMBEDDED_STYLESHEET: &str = include_str!("../assets/report.css");
const DEFAULT_EMPLOYEE_ID: i64 = 1;

#[derive(Debug, Deserialize)]
pub(crate) struct DropdownQuery {
    pub(crate) profile_type: EntityKind,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UpdateDataForm {
    pub(crate) profile_type: EntityKind,
    #[serde(rename = "user-selection")]
    pub(crate) selection: i64,
}

pub(crate) fn dashboard_router(state: DashboardState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/employee/:id", get(employee_report))
        .route("/team/:id", get(team_report))
        .route("/update_dropdown", get(update_dropdown))
        .route("/update_data", post(update_data))
        .route("/static/:file", get(static_asset))
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .with_state(state)
}

pub(crate) async fn index(State(state): State<DashboardState>) -> Result<Html<String>, AppError> {
    render_report(state, EntityKind::Employee, DEFAULT_EMPLOYEE_ID).await
}

pub(crate) async fn employee_report(
    State(state): State<DashboardState>,
    Path(id): Path<i64>,
) -> Result<Html<String>, AppError> {
    render_report(state, EntityKind::Employee, id).await
}

pub(crate) async fn team_report(
    State(state): State<DashboardState>,
    Path(id): Path<i64>,
) -> Result<Html<String>, AppError> {
    render_report(state, EntityKind::Team, id).await
}

/// SQLite reads and chart drawing both block, so pages render off the async workers.
async fn render_report(
    state: DashboardState,
    kind: EntityKind,
    id: i64,
) -> Result<Html<String>, AppError> {
    debug!(%kind, id, "rendering report");
    let page = tokio::task::spawn_blocking(move || {
        let model = model_for(kind, state.database.clone());
        state.report.render_page(id, model.as_ref())
    })
    .await??;
    Ok(Html(page))
}

pub(crate) async fn update_dropdown(
    State(state): State<DashboardState>,
    query: Result<Query<DropdownQuery>, QueryRejection>,
) -> Result<Html<String>, AppError> {
    let Query(query) = query.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
    let kind = query.profile_type;
    let fragment = tokio::task::spawn_blocking(move || {
        let model = model_for(kind, state.database.clone());
        ReportDropdown::new().render(None, model.as_ref())
    })
    .await??;
    Ok(Html(fragment))
}

pub(crate) async fn update_data(
    form: Result<Form<UpdateDataForm>, FormRejection>,
) -> Result<Redirect, AppError> {
    let Form(form) = form.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
    Ok(Redirect::to(&format!(
        "/{}/{}",
        form.profile_type.table(),
        form.selection
    )))
}

pub(crate) async fn static_asset(
    State(state): State<DashboardState>,
    Path(file): Path<String>,
) -> Response {
    if file.is_empty() || file.starts_with('.') || file.contains(['/', '\\']) {
        return StatusCode::NOT_FOUND.into_response();
    }

    let content_type = mime_guess::from_path(&file)
        .first_or_octet_stream()
        .to_string();

    match tokio::fs::read(state.assets_dir.join(&file)).await {
        Ok(bytes) => (StatusCode::OK, [(header::CONTENT_TYPE, content_type)], bytes).into_response(),
        Err(err) if err.kind() == ErrorKind::NotFound && file == "report.css" => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, content_type)],
            EMBEDDED_STYLESHEET,
        )
            .into_response(),
        Err(err) if err.kind() == ErrorKind::NotFound => StatusCode::NOT_FOUND.into_response(),
        Err(err) => AppError::from(err).into_response(),
    }
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use retention_dashboard::employee_events::{schema, Database};
    use retention_dashboard::risk::RiskModel;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn seeded_state(name: &str) -> DashboardState {
        let path = std::env::temp_dir().join(format!(
            "retention_web_{}_{}.sqlite",
            name,
            std::process::id()
        ));
        std::fs::remove_file(&path).ok();
        let database = schema::initialize(&path, true).expect("demo database");
        DashboardState::new(
            database,
            RiskModel::default(),
            PathBuf::from("/nonexistent/assets"),
        )
    }

    fn app_state(ready: bool) -> AppState {
        AppState {
            readiness: Arc::new(AtomicBool::new(ready)),
            metrics: Arc::new(PrometheusBuilder::new().build_recorder().handle()),
        }
    }

    async fn send(router: Router, request: Request<Body>) -> (StatusCode, String) {
        let response = router.oneshot(request).await.expect("router responds");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        (status, String::from_utf8_lossy(&bytes).into_owned())
    }

    async fn get(state: DashboardState, uri: &str) -> (StatusCode, String) {
        send(
            dashboard_router(state),
            Request::get(uri).body(Body::empty()).expect("request"),
        )
        .await
    }

    fn post_form(body: &'static str) -> Request<Body> {
        Request::post("/update_data")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .expect("request")
    }

    #[tokio::test]
    async fn index_renders_first_employee() {
        let (status, body) = get(seeded_state("index"), "/").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("<h1>Employee Dashboard</h1>"));
        assert!(body.contains("Alex Kim"));
    }

    #[tokio::test]
    async fn team_route_renders_team_report() {
        let (status, body) = get(seeded_state("team_route"), "/team/2").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("<h1>Team Dashboard</h1>"));
        assert!(body.contains("Team Bravo"));
    }

    #[tokio::test]
    async fn unknown_employee_is_not_found() {
        let (status, body) = get(seeded_state("unknown_employee"), "/employee/999").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.contains("employee 999 not found"));
    }

    #[tokio::test]
    async fn non_numeric_id_is_rejected() {
        let (status, _) = get(seeded_state("bad_id"), "/employee/abc").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn update_dropdown_swaps_in_team_options() {
        let (status, body) = get(
            seeded_state("dropdown_team"),
            "/update_dropdown?profile_type=Team",
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.starts_with("<div id=\"selector-field\" class=\"dropdown\"><label for=\"selector\">team"));
        assert!(body.contains("<select id=\"selector\" name=\"user-selection\">"));
        assert!(body.contains(">Team Alpha</option>"));
        assert!(!body.contains("<html"));
    }

    #[tokio::test]
    async fn update_dropdown_rejects_unknown_profile() {
        let (status, _) = get(
            seeded_state("dropdown_bad"),
            "/update_dropdown?profile_type=Manager",
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn update_dropdown_ignores_profile_case() {
        let (status, body) = get(
            seeded_state("dropdown_case"),
            "/update_dropdown?profile_type=employee",
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains(">Alex Kim</option>"));
    }

    #[tokio::test]
    async fn update_data_redirects_to_selected_report() {
        let response = dashboard_router(seeded_state("update_data"))
            .oneshot(post_form("profile_type=Team&user-selection=3"))
            .await
            .expect("router responds");

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response
                .headers()
                .get(header::LOCATION)
                .and_then(|value| value.to_str().ok()),
            Some("/team/3")
        );
    }

    #[tokio::test]
    async fn update_data_accepts_upper_case_profile() {
        let response = dashboard_router(seeded_state("update_data_case"))
            .oneshot(post_form("profile_type=TEAM&user-selection=3"))
            .await
            .expect("router responds");
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response
                .headers()
                .get(header::LOCATION)
                .and_then(|value| value.to_str().ok()),
            Some("/team/3")
        );
    }

    #[tokio::test]
    async fn update_data_rejects_unknown_profile() {
        let (status, body) = send(
            dashboard_router(seeded_state("update_data_profile")),
            post_form("profile_type=Manager&user-selection=3"),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.contains("unknown profile type"));
    }

    #[tokio::test]
    async fn update_data_rejects_non_numeric_selection() {
        let (status, body) = send(
            dashboard_router(seeded_state("update_data_selection")),
            post_form("profile_type=Team&user-selection=abc"),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.contains("400 Bad Request"));
    }

    #[tokio::test]
    async fn missing_database_is_a_server_error() {
        let state = DashboardState::new(
            Database::new("/nonexistent/employee_events.db"),
            RiskModel::default(),
            PathBuf::from("/nonexistent/assets"),
        );
        let (status, body) = get(state, "/employee/1").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body.contains("/nonexistent/employee_events.db"));
    }

    #[tokio::test]
    async fn readiness_follows_flag() {
        let state = app_state(false);
        let router = dashboard_router(seeded_state("ready")).layer(Extension(state.clone()));

        let request = || Request::get("/ready").body(Body::empty()).expect("request");
        let (status, body) = send(router.clone(), request()).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert!(body.contains("\"initializing\""));

        state.readiness.store(true, Ordering::Relaxed);
        let (status, body) = send(router, request()).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("\"ready\""));
    }

    #[tokio::test]
    async fn metrics_use_prometheus_text_format() {
        let router = dashboard_router(seeded_state("metrics")).layer(Extension(app_state(true)));
        let response = router
            .oneshot(Request::get("/metrics").body(Body::empty()).expect("request"))
            .await
            .expect("router responds");
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response
                .headers()
                .get(header::CONTENT_TYPE)
                .and_then(|value| value.to_str().ok()),
            Some("text/plain; version=0.0.4")
        );
    }

    #[tokio::test]
    async fn stylesheet_falls_back_to_embedded_copy() {
        let response = dashboard_router(seeded_state("stylesheet"))
            .oneshot(
                Request::get("/static/report.css")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("router responds");
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response
                .headers()
                .get(header::CONTENT_TYPE)
                .and_then(|value| value.to_str().ok()),
            Some("text/css")
        );
    }

    #[tokio::test]
    async fn hidden_and_missing_assets_are_not_found() {
        let state = seeded_state("assets");
        let (status, _) = get(state.clone(), "/static/.env").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, _) = get(state, "/static/logo.png").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn healthcheck_reports_ok() {
        let (status, body) = get(seeded_state("health"), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("\"ok\""));
    }
}
