use crate::employee_events::EventCount;
use crate::risk::RiskLevel;
use base64::{engine::general_purpose::STANDARD as B64, Engine};
use chrono::NaiveDate;
use plotters::prelude::*;

// Dark dashboard palette.
const FIGURE_BG: RGBColor = RGBColor(0x1a, 0x1a, 0x2e);
const AXES_BG: RGBColor = RGBColor(0x16, 0x21, 0x3e);
const BORDER: RGBColor = RGBColor(0xe9, 0x45, 0x60);
const GRID: RGBColor = RGBColor(0x0f, 0x34, 0x60);
const TEXT: RGBColor = RGBColor(0xff, 0xff, 0xff);
const POSITIVE: RGBColor = RGBColor(0x00, 0xd9, 0xff);
const NEGATIVE: RGBColor = RGBColor(0xff, 0x6b, 0x6b);

const LINE_SIZE: (u32, u32) = (1200, 600);
const BAR_SIZE: (u32, u32) = (1200, 375);
const MAX_DATE_LABELS: usize = 6;

#[derive(Debug, thiserror::Error)]
pub enum ChartError {
    #[error("no data points to plot")]
    EmptySeries,
    #[error("chart drawing failed: {0}")]
    Draw(String),
}

fn draw_err<E: std::fmt::Display>(err: E) -> ChartError {
    ChartError::Draw(err.to_string())
}

/// Running totals of positive and negative events, one point per date.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CumulativeSeries {
    pub dates: Vec<NaiveDate>,
    pub positive: Vec<i64>,
    pub negative: Vec<i64>,
}

impl CumulativeSeries {
    pub fn from_counts(counts: &[EventCount]) -> Self {
        let mut sorted: Vec<&EventCount> = counts.iter().collect();
        sorted.sort_by_key(|count| count.event_date);

        let mut series = Self::default();
        let (mut positive, mut negative) = (0i64, 0i64);
        for count in sorted {
            positive += count.positive_events.max(0);
            negative += count.negative_events.max(0);
            series.dates.push(count.event_date);
            series.positive.push(positive);
            series.negative.push(negative);
        }
        series
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Final `(positive, negative)` totals.
    pub fn totals(&self) -> (i64, i64) {
        (
            self.positive.last().copied().unwrap_or(0),
            self.negative.last().copied().unwrap_or(0),
        )
    }
}

/// Draws the cumulative events line chart as an SVG document.
pub fn render_line_chart(series: &CumulativeSeries) -> Result<String, ChartError> {
    if series.is_empty() {
        return Err(ChartError::EmptySeries);
    }

    let mut svg = String::new();

    {
        let root = SVGBackend::with_string(&mut svg, LINE_SIZE).into_drawing_area();
        root.fill(&FIGURE_BG).map_err(draw_err)?;

        let (positive_total, negative_total) = series.totals();
        let y_top = positive_total.max(negative_total).max(1);
        let y_max = y_top + y_top / 8 + 1;
        let x_max = (series.len() as i32 - 1).max(1);
        let dates = &series.dates;
        let label_step = (series.len() / MAX_DATE_LABELS).max(1);

        let mut chart = ChartBuilder::on(&root)
            .caption(
                "Cumulative Events Over Time",
                ("sans-serif", 30).into_font().style(FontStyle::Bold).color(&TEXT),
            )
            .margin(24)
            .x_label_area_size(70)
            .y_label_area_size(70)
            .build_cartesian_2d(0i32..x_max, 0i64..y_max)
            .map_err(draw_err)?;

        chart.plotting_area().fill(&AXES_BG).map_err(draw_err)?;

        chart
            .configure_mesh()
            .bold_line_style(GRID.mix(0.6))
            .light_line_style(TRANSPARENT)
            .axis_style(BORDER.stroke_width(2))
            .label_style(("sans-serif", 15).into_font().color(&TEXT))
            .axis_desc_style(("sans-serif", 18).into_font().color(&TEXT))
            .x_labels(series.len().min(MAX_DATE_LABELS * 2))
            .x_label_formatter(&|idx| {
                let idx = *idx as usize;
                if idx % label_step != 0 {
                    return String::new();
                }
                dates
                    .get(idx)
                    .map(|date| date.format("%Y-%m-%d").to_string())
                    .unwrap_or_default()
            })
            .x_desc("Date")
            .y_desc("Cumulative Event Count")
            .draw()
            .map_err(draw_err)?;

        for (label, values, color) in [
            ("Positive Events", &series.positive, POSITIVE),
            ("Negative Events", &series.negative, NEGATIVE),
        ] {
            chart
                .draw_series(LineSeries::new(
                    values.iter().enumerate().map(|(i, v)| (i as i32, *v)),
                    color.stroke_width(3),
                ))
                .map_err(draw_err)?
                .label(label)
                .legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 24, y)], color.stroke_width(3))
                });

            let last_x = values.len() as i32 - 1;
            let last_value = values.last().copied().unwrap_or(0);
            chart
                .draw_series(std::iter::once(Text::new(
                    last_value.to_string(),
                    (last_x, last_value),
                    ("sans-serif", 18)
                        .into_font()
                        .style(FontStyle::Bold)
                        .color(&color),
                )))
                .map_err(draw_err)?;
        }

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .background_style(AXES_BG.mix(0.95))
            .border_style(BORDER)
            .label_font(("sans-serif", 16).into_font().color(&TEXT))
            .draw()
            .map_err(draw_err)?;

        root.present().map_err(draw_err)?;
    }

    Ok(svg)
}

/// Draws the horizontal recruitment-risk bar for `probability` in `[0, 1]`.
pub fn render_risk_bar(probability: f64) -> Result<String, ChartError> {
    let probability = if probability.is_finite() {
        probability.clamp(0.0, 1.0)
    } else {
        0.0
    };
    let level = RiskLevel::from_probability(probability);
    let (r, g, b) = level.rgb();
    let bar_color = RGBColor(r, g, b);

    let mut svg = String::new();

    {
        let root = SVGBackend::with_string(&mut svg, BAR_SIZE).into_drawing_area();
        root.fill(&FIGURE_BG).map_err(draw_err)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(
                "Predicted Recruitment Risk",
                ("sans-serif", 28).into_font().style(FontStyle::Bold).color(&TEXT),
            )
            .margin(24)
            .x_label_area_size(60)
            .y_label_area_size(20)
            .build_cartesian_2d(0f64..1f64, 0f64..1f64)
            .map_err(draw_err)?;

        chart.plotting_area().fill(&AXES_BG).map_err(draw_err)?;

        chart
            .configure_mesh()
            .disable_y_mesh()
            .disable_y_axis()
            .bold_line_style(TEXT.mix(0.3))
            .light_line_style(TRANSPARENT)
            .axis_style(BORDER.stroke_width(2))
            .label_style(("sans-serif", 15).into_font().color(&TEXT))
            .axis_desc_style(("sans-serif", 17).into_font().color(&TEXT))
            .x_labels(5)
            .x_label_formatter(&|v| format!("{:.0}%", v * 100.0))
            .x_desc("Probability")
            .draw()
            .map_err(draw_err)?;

        chart
            .draw_series(std::iter::once(Rectangle::new(
                [(0.0, 0.35), (probability, 0.75)],
                bar_color.filled(),
            )))
            .map_err(draw_err)?;

        let label_x = (probability + 0.02).min(0.88);
        chart
            .draw_series([
                Text::new(
                    format!("{:.1}%", probability * 100.0),
                    (label_x, 0.62),
                    ("sans-serif", 22)
                        .into_font()
                        .style(FontStyle::Bold)
                        .color(&TEXT),
                ),
                Text::new(
                    format!("Risk Level: {}", level.label()),
                    (0.40, 0.2),
                    ("sans-serif", 17)
                        .into_font()
                        .style(FontStyle::Italic)
                        .color(&TEXT),
                ),
            ])
            .map_err(draw_err)?;

        root.present().map_err(draw_err)?;
    }

    Ok(svg)
}

/// Embeds an SVG document as an `<img src>` value.
pub fn svg_data_uri(svg: &str) -> String {
    format!("data:image/svg+xml;base64,{}", B64.encode(svg.as_bytes()))
}
