mod common;

use common::seeded_database;
use retention_dashboard::employee_events::{EntityKind, Employee, QueryBase, Team};
use retention_dashboard::report::{
    dashboard_filters, BarChart, Component, Figure, Header, LineChart, NotesTable, Report,
    ReportDropdown, ReportError, Visualization,
};
use retention_dashboard::risk::{RiskLevel, RiskModel};
use std::sync::Arc;

fn report() -> Report {
    Report::new(Arc::new(RiskModel::default()))
}

#[test]
fn employee_page_contains_every_section() {
    let employee = Employee::new(seeded_database("page_employee"));
    let html = report().render_page(1, &employee).expect("page renders");

    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("<h1>Employee Dashboard</h1>"));
    assert!(html.contains("<h2 class=\"entity-name\">Alex Kim</h2>"));
    assert!(html.contains("<form id=\"top-filters\" action=\"/update_data\" method=\"POST\">"));
    assert!(html.contains("value=\"Employee\" checked"));
    assert!(html.contains("<option value=\"1\" selected>Alex Kim</option>"));
    assert!(html.contains("<div class=\"grid\">"));
    assert!(html.contains("Cumulative Events Over Time"));
    assert!(html.contains("Predicted Recruitment Risk"));
    assert!(html.contains("<td>Led the onboarding session for new hires</td>"));
}

#[test]
fn team_page_selects_team_profile() {
    let team = Team::new(seeded_database("page_team"));
    let html = report().render_page(2, &team).expect("page renders");

    assert!(html.contains("<title>Team Dashboard</title>"));
    assert!(html.contains("value=\"Team\" checked"));
    assert!(html.contains("<option value=\"2\" selected>Team Bravo</option>"));
    assert!(html.contains("Raised concerns about night shift staffing"));
}

#[test]
fn unknown_entity_is_not_found() {
    let employee = Employee::new(seeded_database("page_missing"));
    let err = report()
        .render_page(404, &employee)
        .expect_err("no such employee");
    assert!(matches!(
        err,
        ReportError::EntityNotFound {
            kind: EntityKind::Employee,
            id: 404
        }
    ));
}

#[test]
fn team_without_events_shows_message_instead_of_chart() {
    let team = Team::new(seeded_database("page_quiet_team"));
    assert_eq!(
        LineChart.visualization(3, &team).expect("visualization"),
        Figure::Message("No event data available".to_string())
    );

    let html = report().render_page(3, &team).expect("page renders");
    assert!(html.contains("No event data available"));
}

#[test]
fn bar_chart_uses_mean_for_teams_and_first_row_for_employees() {
    let db = seeded_database("bar_chart_risk");
    let model = Arc::new(RiskModel::default());
    let bar = BarChart::new(model.clone());

    let team = Team::new(db.clone());
    let rows = team.model_data(2).expect("model data");
    let probs = model.predict_proba(&rows);
    let expected = probs.iter().sum::<f64>() / probs.len() as f64;
    let team_risk = bar.risk(2, &team).expect("team risk");
    assert!((team_risk - expected).abs() < 1e-12);

    let employee = Employee::new(db);
    let jordan = bar.risk(2, &employee).expect("employee risk");
    assert_eq!(RiskLevel::from_probability(jordan), RiskLevel::High);
    let alex = bar.risk(1, &employee).expect("employee risk");
    assert_eq!(RiskLevel::from_probability(alex), RiskLevel::Low);
    assert_eq!(bar.risk(3, &team).expect("quiet team"), 0.0);
}

#[test]
fn dropdown_fragment_lists_all_entities_without_selection() {
    let team = Team::new(seeded_database("dropdown_fragment"));
    let html = ReportDropdown::new().render(None, &team).expect("renders");
    assert!(html.starts_with(
        "<div id=\"selector-field\" class=\"dropdown\"><label for=\"selector\">team<select id=\"selector\" name=\"user-selection\">"
    ));
    assert_eq!(html.matches("<option").count(), 3);
    assert!(!html.contains("selected"));
}

#[test]
fn header_without_entity_shows_only_title() {
    let employee = Employee::new(seeded_database("header_only"));
    let html = Header.render(None, &employee).expect("renders");
    assert_eq!(html, "<header><h1>Employee Dashboard</h1></header>");
}

#[test]
fn notes_table_escapes_note_text() {
    let db = seeded_database("notes_escape");
    let conn = rusqlite::Connection::open(db.path()).expect("open for insert");
    conn.execute(
        "INSERT INTO notes (employee_id, team_id, note, note_date) VALUES (6, 3, '<script>alert(1)</script>', '2023-02-01')",
        [],
    )
    .expect("insert note");
    drop(conn);

    let employee = Employee::new(db);
    let html = NotesTable::new().render(Some(6), &employee).expect("renders");
    assert!(html.contains("<td>2023-02-01</td><td>&lt;script&gt;alert(1)&lt;/script&gt;</td>"));
}

#[test]
fn filters_post_to_update_data() {
    let employee = Employee::new(seeded_database("filters"));
    let html = dashboard_filters().render(Some(2), &employee).expect("renders");
    assert!(html.contains(
        "hx-get=\"/update_dropdown\" hx-target=\"#selector-field\" hx-swap=\"outerHTML\""
    ));
    assert!(html.contains("<div id=\"selector-field\" class=\"dropdown\"><label for=\"selector\">employee"));
    assert!(html.contains("<option value=\"2\" selected>Jordan Baker</option>"));
    assert!(html.ends_with("<button type=\"submit\">Submit</button></form>"));
}
