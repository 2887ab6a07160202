use eframe::egui::{self, Align2, FontId, RichText, Sense, Stroke, Vec2};
use egui_plot::{AxisHints, Corner, GridMark, HLine, Legend, Line, LineStyle, Plot, PlotPoints};

use crate::analysis::PairReport;
use crate::config::PLOT_CONFIG;
use crate::domain::PairSpec;
use crate::ui::config::UI_CONFIG;
use crate::ui::utils::hex_to_color32;
use crate::utils::maths_utils::padded_extent_with_zero;
use crate::utils::time_utils::{
    TimeUtils, date_ticks, date_to_epoch_days, epoch_days_to_date,
};

/// Plot-ready copy of one pair's spread: x in epoch days, y in spread units.
#[derive(Clone, Debug)]
pub struct SpreadPlotData {
    pub slot: usize,
    pub title: String,
    pub legend: String,
    pub points: Vec<[f64; 2]>,
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl SpreadPlotData {
    pub fn from_report(report: &PairReport, slot: usize) -> Self {
        let spread = &report.spread;
        let points: Vec<[f64; 2]> = spread
            .dates
            .iter()
            .zip(&spread.values)
            .map(|(date, value)| [date_to_epoch_days(*date), *value])
            .collect();

        let x_min = points.first().map(|p| p[0]).unwrap_or(0.0);
        let x_max = points.last().map(|p| p[0]).unwrap_or(1.0).max(x_min + 1.0);
        let (y_min, y_max) = padded_extent_with_zero(&spread.values, PLOT_CONFIG.y_padding_pct);

        Self {
            slot,
            title: report.title(),
            legend: spread.pair.label(),
            points,
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }
}

fn create_x_axis() -> AxisHints<'static> {
    AxisHints::new_x()
        .label(PLOT_CONFIG.x_axis_label)
        .formatter(|grid_mark, _range| {
            epoch_days_to_date(grid_mark.value)
                .map(|d| d.format(TimeUtils::AXIS_TIME_FORMAT).to_string())
                .unwrap_or_default()
        })
}

fn create_y_axis() -> AxisHints<'static> {
    AxisHints::new_y()
        .label(PLOT_CONFIG.y_axis_label)
        .formatter(|grid_mark, _range| format!("{:.2}", grid_mark.value))
}

fn cell_title(ui: &mut egui::Ui, text: &str) {
    ui.add_sized(
        [ui.available_width(), UI_CONFIG.title_row_height],
        egui::Label::new(RichText::new(text).color(UI_CONFIG.colors.title).strong()),
    );
}

/// One static chart: spread line, dashed zero line, legend and date axis.
pub fn show_spread_plot(ui: &mut egui::Ui, data: &SpreadPlotData, size: Vec2) {
    ui.vertical(|ui| {
        ui.set_width(size.x);
        cell_title(ui, &data.title);

        let (first, last) = (epoch_days_to_date(data.x_min), epoch_days_to_date(data.x_max));
        let color = hex_to_color32(PLOT_CONFIG.series_color(data.slot), 1.0);
        let zero_color =
            hex_to_color32(PLOT_CONFIG.zero_line_color, PLOT_CONFIG.zero_line_opacity);

        Plot::new(format!("spread_plot_{}", data.slot))
            .width(size.x)
            .height(size.y - UI_CONFIG.title_row_height)
            .legend(Legend::default().position(Corner::LeftTop))
            .custom_x_axes(vec![create_x_axis()])
            .custom_y_axes(vec![create_y_axis()])
            .x_grid_spacer(move |_input| match (first, last) {
                (Some(first), Some(last)) => date_ticks(first, last, PLOT_CONFIG.axis_divisions)
                    .into_iter()
                    .map(|d| GridMark {
                        value: date_to_epoch_days(d),
                        step_size: 365.0,
                    })
                    .collect(),
                _ => Vec::new(),
            })
            .label_formatter(|_, _| String::new())
            .allow_scroll(false)
            .allow_zoom(false)
            .allow_drag(false)
            .allow_boxed_zoom(false)
            .show(ui, |plot_ui| {
                plot_ui.set_plot_bounds_x(data.x_min..=data.x_max);
                plot_ui.set_plot_bounds_y(data.y_min..=data.y_max);

                plot_ui.hline(
                    HLine::new("", 0.0)
                        .color(zero_color)
                        .width(1.0)
                        .style(LineStyle::dashed_loose()),
                );
                plot_ui.line(
                    Line::new(data.legend.as_str(), PlotPoints::new(data.points.clone()))
                        .color(color)
                        .width(PLOT_CONFIG.spread_line_width as f32),
                );
            });
    });
}

/// Framed empty panel carrying the pair label and why it has no chart.
pub fn show_placeholder(ui: &mut egui::Ui, pair: &PairSpec, reason: &str, size: Vec2) {
    ui.vertical(|ui| {
        ui.set_width(size.x);
        cell_title(ui, &pair.label());

        let (rect, _response) = ui.allocate_exact_size(
            Vec2::new(size.x, size.y - UI_CONFIG.title_row_height),
            Sense::hover(),
        );
        let color = hex_to_color32(PLOT_CONFIG.placeholder_color, 1.0);
        let painter = ui.painter();
        painter.rect_stroke(
            rect,
            0.0,
            Stroke::new(1.0, color),
            egui::StrokeKind::Inside,
        );
        painter.text(
            rect.center(),
            Align2::CENTER_CENTER,
            reason,
            FontId::proportional(14.0),
            color,
        );
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PairSpreadSeries;
    use chrono::NaiveDate;

    #[test]
    fn test_plot_data_from_report() {
        let pair = PairSpec::new("QQQ", "GLD");
        let d1 = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let d2 = NaiveDate::from_ymd_opt(2024, 1, 3).unwrap();
        let report = PairReport {
            spread: PairSpreadSeries {
                pair,
                window: 250,
                dates: vec![d1, d2],
                values: vec![0.1, 0.3],
                clipped: 0,
            },
            percentile: 100.0,
        };
        let data = SpreadPlotData::from_report(&report, 2);

        assert_eq!(data.points.len(), 2);
        assert_eq!(data.points[0], [date_to_epoch_days(d1), 0.1]);
        assert_eq!(data.x_min, date_to_epoch_days(d1));
        assert_eq!(data.x_max, date_to_epoch_days(d2));
        // Zero stays in view
        assert!(data.y_min < 0.0 && data.y_max > 0.3);
        assert_eq!(data.legend, "QQQ − GLD");
        assert!(data.title.ends_with("| pct 100.0%"));
    }
}
