//! Composable HTML components.
//!
//! Every component renders itself for an optional entity id and the query
//! model of that entity's kind, fetching whatever data it needs through the
//! model. Combined components render their children recursively.

use super::charts::{svg_data_uri, ChartError};
use super::html::{Element, Node};
use super::ReportError;
use crate::employee_events::{NameEntry, QueryBase};
use tracing::warn;

pub trait Component: Send + Sync {
    fn build(&self, entity_id: Option<i64>, model: &dyn QueryBase) -> Result<Node, ReportError>;

    fn render(&self, entity_id: Option<i64>, model: &dyn QueryBase) -> Result<String, ReportError> {
        Ok(self.build(entity_id, model)?.to_html())
    }
}

/// A labelled `<select>` inside a `<div id="{id}-field">`, so the label and
/// options can be swapped out together.
#[derive(Debug, Clone)]
pub struct Dropdown {
    pub id: String,
    pub name: String,
}

impl Dropdown {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    pub fn field_id(&self) -> String {
        format!("{}-field", self.id)
    }

    pub fn build_select(&self, label: &str, options: &[NameEntry], selected: Option<i64>) -> Node {
        let options = options.iter().map(|entry| {
            Element::new("option")
                .attr("value", entry.id.to_string())
                .flag_if("selected", selected == Some(entry.id))
                .child(entry.name.as_str())
        });

        let select = Element::new("select")
            .id(self.id.as_str())
            .attr("name", self.name.as_str())
            .children(options);

        Element::new("div")
            .id(self.field_id())
            .class("dropdown")
            .child(
                Element::new("label")
                    .attr("for", self.id.as_str())
                    .child(label)
                    .child(select),
            )
            .into()
    }
}

/// Radio buttons; the value matching the model's kind is checked.
#[derive(Debug, Clone)]
pub struct Radio {
    pub values: Vec<String>,
    pub name: String,
    pub hx_get: Option<String>,
    pub hx_target: Option<String>,
    pub hx_swap: Option<String>,
}

impl Radio {
    pub fn new<I, S>(values: I, name: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            values: values.into_iter().map(Into::into).collect(),
            name: name.into(),
            hx_get: None,
            hx_target: None,
            hx_swap: None,
        }
    }

    pub fn hx(mut self, get: impl Into<String>, target: impl Into<String>) -> Self {
        self.hx_get = Some(get.into());
        self.hx_target = Some(target.into());
        self
    }

    pub fn hx_swap(mut self, swap: impl Into<String>) -> Self {
        self.hx_swap = Some(swap.into());
        self
    }
}

impl Component for Radio {
    fn build(&self, _entity_id: Option<i64>, model: &dyn QueryBase) -> Result<Node, ReportError> {
        let current = model.kind().label();
        let inputs = self.values.iter().map(|value| {
            let mut input = Element::new("input")
                .attr("type", "radio")
                .attr("name", self.name.as_str())
                .attr("value", value.as_str())
                .flag_if("checked", value.eq_ignore_ascii_case(current));
            if let Some(get) = &self.hx_get {
                input = input.attr("hx-get", get.as_str());
            }
            if let Some(target) = &self.hx_target {
                input = input.attr("hx-target", target.as_str());
            }
            if let Some(swap) = &self.hx_swap {
                input = input.attr("hx-swap", swap.as_str());
            }
            Element::new("label").child(input).child(value.as_str())
        });

        Ok(Element::new("fieldset").class("radio-group").children(inputs).into())
    }
}

/// A table with a header row.
#[derive(Debug, Clone, Default)]
pub struct DataTable {
    pub headers: Vec<String>,
}

impl DataTable {
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
        }
    }

    pub fn build_table(&self, rows: Vec<Vec<String>>) -> Node {
        let header = Element::new("tr").children(
            self.headers
                .iter()
                .map(|h| Element::new("th").child(h.as_str())),
        );
        let body = rows.into_iter().map(|row| {
            Element::new("tr").children(row.into_iter().map(|cell| Element::new("td").child(cell)))
        });

        Element::new("table")
            .child(Element::new("thead").child(header))
            .child(Element::new("tbody").children(body))
            .into()
    }
}

/// Output of a visualization: an image, or a message shown in its place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Figure {
    Svg(String),
    Message(String),
}

pub trait Visualization: Send + Sync {
    /// Alt text and placeholder heading.
    fn title(&self) -> &'static str;

    fn visualization(&self, entity_id: i64, model: &dyn QueryBase) -> Result<Figure, ReportError>;
}

/// Embeds a visualization as a base64 SVG `<img>`.
///
/// Drawing failures degrade to a placeholder so the rest of the report still
/// renders; query failures propagate.
#[derive(Debug, Clone)]
pub struct ChartComponent<V> {
    visualization: V,
}

impl<V: Visualization> ChartComponent<V> {
    pub fn new(visualization: V) -> Self {
        Self { visualization }
    }

    fn placeholder(&self, message: &str) -> Node {
        Element::new("article")
            .class("chart-placeholder")
            .child(Element::new("h3").child(self.visualization.title()))
            .child(Element::new("p").child(message))
            .into()
    }
}

impl<V: Visualization> Component for ChartComponent<V> {
    fn build(&self, entity_id: Option<i64>, model: &dyn QueryBase) -> Result<Node, ReportError> {
        let Some(entity_id) = entity_id else {
            return Ok(self.placeholder("Select an entity to see this chart"));
        };

        match self.visualization.visualization(entity_id, model) {
            Ok(Figure::Svg(svg)) => Ok(Element::new("img")
                .class("chart")
                .attr("alt", self.visualization.title())
                .attr("src", svg_data_uri(&svg))
                .into()),
            Ok(Figure::Message(message)) => Ok(self.placeholder(&message)),
            Err(ReportError::Chart(err)) => {
                warn!(chart = self.visualization.title(), error = %err, "chart rendering failed");
                Ok(self.placeholder(&chart_unavailable(&err)))
            }
            Err(err) => Err(err),
        }
    }
}

fn chart_unavailable(err: &ChartError) -> String {
    match err {
        ChartError::EmptySeries => "No data available for this chart".to_string(),
        ChartError::Draw(_) => "Chart could not be drawn".to_string(),
    }
}

/// Renders children inside an outer element (a plain `<div>` by default).
pub struct CombinedComponent {
    pub children: Vec<Box<dyn Component>>,
    pub outer: Element,
}

impl CombinedComponent {
    pub fn new(children: Vec<Box<dyn Component>>) -> Self {
        Self {
            children,
            outer: Element::new("div"),
        }
    }

    pub fn with_outer(mut self, outer: Element) -> Self {
        self.outer = outer;
        self
    }
}

impl Component for CombinedComponent {
    fn build(&self, entity_id: Option<i64>, model: &dyn QueryBase) -> Result<Node, ReportError> {
        let children = self
            .children
            .iter()
            .map(|child| child.build(entity_id, model))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(self.outer.clone().children(children).into())
    }
}

/// A `<form>` wrapping its children and a submit button.
pub struct FormGroup {
    pub id: String,
    pub action: String,
    pub method: String,
    pub children: Vec<Box<dyn Component>>,
}

impl Component for FormGroup {
    fn build(&self, entity_id: Option<i64>, model: &dyn QueryBase) -> Result<Node, ReportError> {
        let children = self
            .children
            .iter()
            .map(|child| child.build(entity_id, model))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Element::new("form")
            .id(self.id.as_str())
            .attr("action", self.action.as_str())
            .attr("method", self.method.as_str())
            .children(children)
            .child(
                Element::new("button")
                    .attr("type", "submit")
                    .child("Submit"),
            )
            .into())
    }
}
