use super::charts::{render_line_chart, render_risk_bar, CumulativeSeries};
use super::components::{
    ChartComponent, CombinedComponent, Component, DataTable, Dropdown, Figure, FormGroup, Radio,
    Visualization,
};
use super::html::{page, Element, Node};
use super::ReportError;
use crate::employee_events::{EntityKind, QueryBase};
use crate::risk::RiskModel;
use std::sync::Arc;
use tracing::debug;

/// Entity selector populated from `model.names()`.
#[derive(Debug, Clone)]
pub struct ReportDropdown {
    dropdown: Dropdown,
}

impl ReportDropdown {
    pub fn new() -> Self {
        Self {
            dropdown: Dropdown::new("selector", "user-selection"),
        }
    }
}

impl Default for ReportDropdown {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for ReportDropdown {
    fn build(&self, entity_id: Option<i64>, model: &dyn QueryBase) -> Result<Node, ReportError> {
        let options = model.names()?;
        Ok(self.dropdown.build_select(model.name(), &options, entity_id))
    }
}

/// Page title plus the selected entity's display name.
#[derive(Debug, Clone, Default)]
pub struct Header;

impl Component for Header {
    fn build(&self, entity_id: Option<i64>, model: &dyn QueryBase) -> Result<Node, ReportError> {
        let title = Element::new("h1").child(format!("{} Dashboard", model.kind().label()));
        let Some(id) = entity_id else {
            return Ok(Element::new("header").child(title).into());
        };

        let name = model
            .username(id)?
            .ok_or(ReportError::EntityNotFound {
                kind: model.kind(),
                id,
            })?;

        Ok(Element::new("header")
            .child(title)
            .child(Element::new("h2").class("entity-name").child(name))
            .into())
    }
}

/// Cumulative positive and negative events over time.
#[derive(Debug, Clone, Default)]
pub struct LineChart;

impl Visualization for LineChart {
    fn title(&self) -> &'static str {
        "Cumulative Events Over Time"
    }

    fn visualization(&self, entity_id: i64, model: &dyn QueryBase) -> Result<Figure, ReportError> {
        let counts = model.event_counts(entity_id)?;
        let series = CumulativeSeries::from_counts(&counts);
        if series.is_empty() {
            return Ok(Figure::Message("No event data available".to_string()));
        }
        Ok(Figure::Svg(render_line_chart(&series)?))
    }
}

/// Predicted recruitment risk for the entity.
#[derive(Debug, Clone)]
pub struct BarChart {
    predictor: Arc<RiskModel>,
}

impl BarChart {
    pub fn new(predictor: Arc<RiskModel>) -> Self {
        Self { predictor }
    }

    pub fn risk(&self, entity_id: i64, model: &dyn QueryBase) -> Result<f64, ReportError> {
        let rows = model.model_data(entity_id)?;
        Ok(self.predictor.entity_risk(model.kind(), &rows))
    }
}

impl Visualization for BarChart {
    fn title(&self) -> &'static str {
        "Predicted Recruitment Risk"
    }

    fn visualization(&self, entity_id: i64, model: &dyn QueryBase) -> Result<Figure, ReportError> {
        let risk = self.risk(entity_id, model)?;
        debug!(kind = %model.kind(), entity_id, risk, "predicted recruitment risk");
        Ok(Figure::Svg(render_risk_bar(risk)?))
    }
}

pub fn visualizations(predictor: Arc<RiskModel>) -> CombinedComponent {
    CombinedComponent::new(vec![
        Box::new(ChartComponent::new(LineChart)),
        Box::new(ChartComponent::new(BarChart::new(predictor))),
    ])
    .with_outer(Element::new("div").class("grid"))
}

#[derive(Debug, Clone)]
pub struct NotesTable {
    table: DataTable,
}

impl NotesTable {
    pub fn new() -> Self {
        Self {
            table: DataTable::new(["Date", "Note"]),
        }
    }
}

impl Default for NotesTable {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for NotesTable {
    fn build(&self, entity_id: Option<i64>, model: &dyn QueryBase) -> Result<Node, ReportError> {
        let rows = match entity_id {
            Some(id) => model
                .notes(id)?
                .into_iter()
                .map(|note| vec![note.note_date.format("%Y-%m-%d").to_string(), note.note])
                .collect(),
            None => Vec::new(),
        };
        Ok(Element::new("section")
            .class("notes")
            .child(Element::new("h3").child("Notes"))
            .child(self.table.build_table(rows))
            .into())
    }
}

pub fn dashboard_filters() -> FormGroup {
    let profiles = EntityKind::ordered().map(EntityKind::label);
    FormGroup {
        id: "top-filters".to_string(),
        action: "/update_data".to_string(),
        method: "POST".to_string(),
        children: vec![
            Box::new(
                Radio::new(profiles, "profile_type")
                    .hx("/update_dropdown", "#selector-field")
                    .hx_swap("outerHTML"),
            ),
            Box::new(ReportDropdown::new()),
        ],
    }
}

/// The full dashboard: header, filters, charts, and notes.
pub struct Report {
    root: CombinedComponent,
}

impl Report {
    pub fn new(predictor: Arc<RiskModel>) -> Self {
        Self {
            root: CombinedComponent::new(vec![
                Box::new(Header),
                Box::new(dashboard_filters()),
                Box::new(visualizations(predictor)),
                Box::new(NotesTable::new()),
            ]),
        }
    }

    /// Renders a complete HTML document for entity `id`.
    pub fn render_page(&self, id: i64, model: &dyn QueryBase) -> Result<String, ReportError> {
        let body = self.root.build(Some(id), model)?;
        let title = format!("{} Dashboard", model.kind().label());
        Ok(page(&title, body))
    }
}

impl Component for Report {
    fn build(&self, entity_id: Option<i64>, model: &dyn QueryBase) -> Result<Node, ReportError> {
        self.root.build(entity_id, model)
    }
}
