use std::path::Path;

use anyhow::{Context, Result};

use crate::analysis::{PairOutcome, PairReport};
use crate::config::PLOT_CONFIG;
use crate::domain::PairSpec;
use crate::render::GridLayout;
use crate::utils::maths_utils::{nice_ticks, padded_extent_with_zero};
use crate::utils::time_utils::{TimeUtils, date_ticks, date_to_epoch_days};

const FONT_FAMILY: &str = "DejaVu Sans, Arial, sans-serif";
const AXIS_COLOR: &str = "#000000";
const TEXT_COLOR: &str = "#262626";
const GRID_DASH: &str = "4 3";
const ZERO_DASH: &str = "6 4";
// Room for tick labels and axis titles around the plot area
const LEFT_GUTTER: f64 = 58.0;
const BOTTOM_GUTTER: f64 = 40.0;

/// Pixel rectangle of one chart's plotting area, relative to its cell.
struct PlotArea {
    left: f64,
    top: f64,
    width: f64,
    height: f64,
}

impl PlotArea {
    fn for_cell() -> Self {
        let left = PLOT_CONFIG.cell_padding + LEFT_GUTTER;
        let top = PLOT_CONFIG.cell_padding + PLOT_CONFIG.title_height;
        Self {
            left,
            top,
            width: PLOT_CONFIG.cell_width - left - PLOT_CONFIG.cell_padding,
            height: PLOT_CONFIG.cell_height - top - PLOT_CONFIG.cell_padding - BOTTOM_GUTTER,
        }
    }

    fn right(&self) -> f64 {
        self.left + self.width
    }

    fn bottom(&self) -> f64 {
        self.top + self.height
    }

    fn x(&self, value: f64, min_v: f64, max_v: f64) -> f64 {
        self.left + norm(value, min_v, max_v) * self.width
    }

    fn y(&self, value: f64, min_v: f64, max_v: f64) -> f64 {
        self.top + (1.0 - norm(value, min_v, max_v)) * self.height
    }
}

fn norm(value: f64, min_v: f64, max_v: f64) -> f64 {
    if (max_v - min_v).abs() < f64::EPSILON {
        return 0.5;
    }
    (value - min_v) / (max_v - min_v)
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn svg_header(width: f64, height: f64) -> String {
    format!(
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="{w:.0}" height="{h:.0}" viewBox="0 0 {w:.0} {h:.0}" font-family="{font}"><rect x="0" y="0" width="{w:.0}" height="{h:.0}" fill="#ffffff" />"##,
        w = width,
        h = height,
        font = FONT_FAMILY,
    )
}

fn push_text(svg: &mut String, x: f64, y: f64, size: f64, anchor: &str, text: &str) {
    svg.push_str(&format!(
        r##"<text x="{x:.2}" y="{y:.2}" font-size="{size}" text-anchor="{anchor}" fill="{color}">{text}</text>"##,
        color = TEXT_COLOR,
        text = escape_text(text),
    ));
}

fn push_title(svg: &mut String, title: &str) {
    push_text(
        svg,
        PLOT_CONFIG.cell_width / 2.0,
        PLOT_CONFIG.cell_padding + PLOT_CONFIG.title_height * 0.6,
        12.0,
        "middle",
        title,
    );
}

/// The whole figure: one cell per outcome at its slot; cells without an
/// outcome are left out entirely.
pub fn render_svg(outcomes: &[PairOutcome], layout: &GridLayout) -> String {
    let (width, height) = layout.figure_size();
    let mut svg = svg_header(width, height);

    for outcome in outcomes {
        let (row, col) = layout.cell_of(outcome.slot);
        svg.push_str(&format!(
            r#"<g class="cell" transform="translate({:.2},{:.2})">"#,
            col as f64 * PLOT_CONFIG.cell_width,
            row as f64 * PLOT_CONFIG.cell_height
        ));
        match &outcome.result {
            Ok(report) => draw_spread_cell(&mut svg, report, outcome.slot),
            Err(e) => draw_placeholder_cell(&mut svg, &outcome.pair, &e.placeholder_text()),
        }
        svg.push_str("</g>");
    }

    svg.push_str("</svg>");
    svg
}

pub fn write_svg(path: &Path, svg: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .context(format!("Failed to create directory: {}", parent.display()))?;
    }
    std::fs::write(path, svg).context(format!("Failed to write figure: {}", path.display()))
}

fn draw_spread_cell(svg: &mut String, report: &PairReport, slot: usize) {
    let spread = &report.spread;
    let area = PlotArea::for_cell();
    let color = PLOT_CONFIG.series_color(slot);

    let (Some(first), Some(last)) = (spread.dates.first(), spread.dates.last()) else {
        return;
    };
    let (mut x_min, mut x_max) = (date_to_epoch_days(*first), date_to_epoch_days(*last));
    if x_max <= x_min {
        x_min -= 1.0;
        x_max += 1.0;
    }
    let (y_min, y_max) = padded_extent_with_zero(&spread.values, PLOT_CONFIG.y_padding_pct);

    // Gridlines and tick labels
    for tick in nice_ticks(y_min, y_max, PLOT_CONFIG.axis_divisions) {
        let y = area.y(tick, y_min, y_max);
        svg.push_str(&format!(
            r##"<line x1="{x1:.2}" y1="{y:.2}" x2="{x2:.2}" y2="{y:.2}" stroke="{color}" stroke-opacity="{op}" stroke-width="0.8" stroke-dasharray="{dash}" />"##,
            x1 = area.left,
            x2 = area.right(),
            color = PLOT_CONFIG.grid_line_color,
            op = PLOT_CONFIG.grid_line_opacity,
            dash = GRID_DASH,
        ));
        push_text(svg, area.left - 6.0, y + 3.5, 10.0, "end", &format!("{:.2}", tick));
    }
    for tick in date_ticks(*first, *last, PLOT_CONFIG.axis_divisions) {
        let x = area.x(date_to_epoch_days(tick), x_min, x_max);
        svg.push_str(&format!(
            r##"<line x1="{x:.2}" y1="{y1:.2}" x2="{x:.2}" y2="{y2:.2}" stroke="{color}" stroke-opacity="{op}" stroke-width="0.8" stroke-dasharray="{dash}" />"##,
            y1 = area.top,
            y2 = area.bottom(),
            color = PLOT_CONFIG.grid_line_color,
            op = PLOT_CONFIG.grid_line_opacity,
            dash = GRID_DASH,
        ));
        let label = tick.format(TimeUtils::AXIS_TIME_FORMAT).to_string();
        push_text(svg, x, area.bottom() + 14.0, 10.0, "middle", &label);
    }

    // Frame
    svg.push_str(&format!(
        r##"<rect x="{x:.2}" y="{y:.2}" width="{w:.2}" height="{h:.2}" fill="none" stroke="{color}" stroke-width="0.8" />"##,
        x = area.left,
        y = area.top,
        w = area.width,
        h = area.height,
        color = AXIS_COLOR,
    ));

    // Zero reference
    let zero_y = area.y(0.0, y_min, y_max);
    svg.push_str(&format!(
        r##"<line class="zero-line" x1="{x1:.2}" y1="{y:.2}" x2="{x2:.2}" y2="{y:.2}" stroke="{color}" stroke-opacity="{op}" stroke-width="1" stroke-dasharray="{dash}" />"##,
        x1 = area.left,
        x2 = area.right(),
        y = zero_y,
        color = PLOT_CONFIG.zero_line_color,
        op = PLOT_CONFIG.zero_line_opacity,
        dash = ZERO_DASH,
    ));

    // Spread line
    let points = spread
        .dates
        .iter()
        .zip(&spread.values)
        .map(|(date, value)| {
            format!(
                "{:.2},{:.2}",
                area.x(date_to_epoch_days(*date), x_min, x_max),
                area.y(*value, y_min, y_max)
            )
        })
        .collect::<Vec<_>>()
        .join(" ");
    svg.push_str(&format!(
        r##"<polyline fill="none" stroke="{color}" stroke-width="{width}" points="{points}" />"##,
        width = PLOT_CONFIG.spread_line_width,
    ));

    // Legend, top left inside the plot area
    let legend_x = area.left + 8.0;
    let legend_y = area.top + 14.0;
    svg.push_str(&format!(
        r##"<rect x="{x:.2}" y="{y:.2}" width="{w:.2}" height="18" fill="#ffffff" fill-opacity="0.8" stroke="#cccccc" stroke-width="0.6" />"##,
        x = legend_x - 4.0,
        y = legend_y - 12.0,
        w = 34.0 + 6.0 * report.spread.pair.label().chars().count() as f64,
    ));
    svg.push_str(&format!(
        r##"<line x1="{x1:.2}" y1="{y:.2}" x2="{x2:.2}" y2="{y:.2}" stroke="{color}" stroke-width="{width}" />"##,
        x1 = legend_x,
        x2 = legend_x + 20.0,
        y = legend_y - 3.5,
        width = PLOT_CONFIG.spread_line_width,
    ));
    push_text(svg, legend_x + 26.0, legend_y, 10.0, "start", &spread.pair.label());

    // Labels
    push_title(svg, &report.title());
    push_text(
        svg,
        area.left + area.width / 2.0,
        area.bottom() + 32.0,
        11.0,
        "middle",
        PLOT_CONFIG.x_axis_label,
    );
    let y_label_x = PLOT_CONFIG.cell_padding + 8.0;
    let y_label_y = area.top + area.height / 2.0;
    svg.push_str(&format!(
        r##"<text x="{x:.2}" y="{y:.2}" font-size="11" text-anchor="middle" fill="{color}" transform="rotate(-90 {x:.2} {y:.2})">{text}</text>"##,
        x = y_label_x,
        y = y_label_y,
        color = TEXT_COLOR,
        text = escape_text(PLOT_CONFIG.y_axis_label),
    ));
}

fn draw_placeholder_cell(svg: &mut String, pair: &PairSpec, reason: &str) {
    let area = PlotArea::for_cell();
    svg.push_str(&format!(
        r##"<rect class="placeholder" x="{x:.2}" y="{y:.2}" width="{w:.2}" height="{h:.2}" fill="#f7f7f7" stroke="{color}" stroke-width="0.8" stroke-dasharray="{dash}" />"##,
        x = area.left,
        y = area.top,
        w = area.width,
        h = area.height,
        color = PLOT_CONFIG.placeholder_color,
        dash = GRID_DASH,
    ));
    push_title(svg, &pair.label());
    svg.push_str(&format!(
        r##"<text x="{x:.2}" y="{y:.2}" font-size="13" text-anchor="middle" fill="{color}">{text}</text>"##,
        x = area.left + area.width / 2.0,
        y = area.top + area.height / 2.0,
        color = PLOT_CONFIG.placeholder_color,
        text = escape_text(reason),
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::PairError;
    use crate::models::PairSpreadSeries;
    use chrono::{Days, NaiveDate};

    fn ready(slot: usize, pair: PairSpec) -> PairOutcome {
        let start = NaiveDate::from_ymd_opt(2023, 1, 2).unwrap();
        let dates: Vec<NaiveDate> = (0..40).map(|i| start + Days::new(i)).collect();
        let values: Vec<f64> = (0..40).map(|i| i as f64 * 0.01 - 0.1).collect();
        PairOutcome {
            slot,
            pair: pair.clone(),
            result: Ok(PairReport {
                spread: PairSpreadSeries {
                    pair,
                    window: 250,
                    dates,
                    values,
                    clipped: 0,
                },
                percentile: 100.0,
            }),
        }
    }

    fn skipped(slot: usize, pair: PairSpec, err: PairError) -> PairOutcome {
        PairOutcome {
            slot,
            pair,
            result: Err(err),
        }
    }

    #[test]
    fn test_only_filled_cells_are_drawn() {
        let outcomes = vec![
            ready(0, PairSpec::new("QQQ", "GLD")),
            skipped(
                1,
                PairSpec::new("ZZZZ", "GLD"),
                PairError::MissingSymbol("ZZZZ".to_string()),
            ),
        ];
        let layout = GridLayout::for_pairs(outcomes.len(), 3);
        let svg = render_svg(&outcomes, &layout);

        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert_eq!(svg.matches(r#"class="cell""#).count(), 2);
        assert_eq!(svg.matches("<polyline").count(), 1);
        assert_eq!(svg.matches(r#"class="zero-line""#).count(), 1);
        assert_eq!(svg.matches(r#"class="placeholder""#).count(), 1);
    }

    #[test]
    fn test_ready_cell_text() {
        let svg = render_svg(
            &[ready(0, PairSpec::new("QQQ", "GLD"))],
            &GridLayout::for_pairs(1, 3),
        );
        assert!(svg.contains("QQQ − GLD (250-Day) | pct 100.0%"));
        assert!(svg.contains(PLOT_CONFIG.x_axis_label));
        assert!(svg.contains(PLOT_CONFIG.y_axis_label));
        assert!(svg.contains(PLOT_CONFIG.series_color(0)));
    }

    #[test]
    fn test_placeholder_reason() {
        let outcome = skipped(
            4,
            PairSpec::new("QQQ", "GLD"),
            PairError::InsufficientHistory {
                symbol: "QQQ".to_string(),
                observations: 10,
                window: 250,
            },
        );
        let svg = render_svg(&[outcome], &GridLayout::for_pairs(9, 3));
        assert!(svg.contains(PLOT_CONFIG.insufficient_data_text));
        // slot 4 is the middle cell
        assert!(svg.contains(&format!(
            "translate({:.2},{:.2})",
            PLOT_CONFIG.cell_width, PLOT_CONFIG.cell_height
        )));
    }

    #[test]
    fn test_colour_follows_slot() {
        let svg = render_svg(
            &[ready(11, PairSpec::new("QQQ", "GLD"))],
            &GridLayout::for_pairs(12, 3),
        );
        assert!(svg.contains(&format!(r#"stroke="{}""#, PLOT_CONFIG.series_color(1))));
    }

    #[test]
    fn test_text_is_escaped() {
        assert_eq!(escape_text("A&B <C>"), "A&amp;B &lt;C&gt;");
    }
}
