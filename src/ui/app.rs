use eframe::egui::{self, CentralPanel, Frame, Margin, RichText, TopBottomPanel, Vec2};

use crate::analysis::PairOutcome;
use crate::domain::PairSpec;
use crate::render::GridLayout;
use crate::ui::config::UI_CONFIG;
use crate::ui::ui_plot_view::{SpreadPlotData, show_placeholder, show_spread_plot};
use crate::ui::utils::setup_custom_visuals;

/// What goes in one grid slot
enum CellView {
    Chart(SpreadPlotData),
    Placeholder { pair: PairSpec, reason: String },
}

/// Static figure window: every pair's chart in its slot, no interaction.
pub struct SpreadMonitorApp {
    cells: Vec<CellView>,
    layout: GridLayout,
    window: usize,
    data_source: &'static str,
    ready_count: usize,
}

impl SpreadMonitorApp {
    pub fn new(
        cc: &eframe::CreationContext,
        outcomes: &[PairOutcome],
        layout: GridLayout,
        window: usize,
        data_source: &'static str,
    ) -> Self {
        setup_custom_visuals(&cc.egui_ctx);

        let mut sorted: Vec<&PairOutcome> = outcomes.iter().collect();
        sorted.sort_by_key(|o| o.slot);
        let cells = sorted
            .into_iter()
            .map(|outcome| match &outcome.result {
                Ok(report) => CellView::Chart(SpreadPlotData::from_report(report, outcome.slot)),
                Err(e) => CellView::Placeholder {
                    pair: outcome.pair.clone(),
                    reason: e.placeholder_text(),
                },
            })
            .collect();

        Self {
            cells,
            layout,
            window,
            data_source,
            ready_count: outcomes.iter().filter(|o| o.is_ready()).count(),
        }
    }

    fn render_status_panel(&self, ctx: &egui::Context) {
        let status_frame = Frame::new()
            .fill(UI_CONFIG.colors.status_panel)
            .inner_margin(Margin::symmetric(8, 4));
        TopBottomPanel::bottom("status_panel")
            .frame(status_frame)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(
                        RichText::new(format!(
                            "{} of {} pairs charted",
                            self.ready_count,
                            self.cells.len()
                        ))
                        .small()
                        .color(UI_CONFIG.colors.label),
                    );
                    ui.separator();
                    ui.label(
                        RichText::new(format!("{}-day window", self.window))
                            .small()
                            .color(UI_CONFIG.colors.label),
                    );
                    ui.separator();
                    ui.label(
                        RichText::new(format!("Source: {}", self.data_source))
                            .small()
                            .color(UI_CONFIG.colors.label),
                    );
                });
            });
    }

    fn render_central_panel(&self, ctx: &egui::Context) {
        let central_panel_frame = Frame::new()
            .fill(UI_CONFIG.colors.central_panel)
            .inner_margin(Margin::same(8));
        CentralPanel::default()
            .frame(central_panel_frame)
            .show(ctx, |ui| {
                let spacing = UI_CONFIG.cell_spacing;
                let available = ui.available_size();
                let columns = self.layout.columns as f32;
                let rows = self.layout.rows as f32;
                let cell_size = Vec2::new(
                    (available.x - spacing * (columns - 1.0)) / columns,
                    (available.y - spacing * (rows - 1.0)) / rows,
                );

                egui::Grid::new("spread_grid")
                    .num_columns(self.layout.columns)
                    .spacing([spacing, spacing])
                    .show(ui, |ui| {
                        for (i, cell) in self.cells.iter().enumerate() {
                            match cell {
                                CellView::Chart(data) => show_spread_plot(ui, data, cell_size),
                                CellView::Placeholder { pair, reason } => {
                                    show_placeholder(ui, pair, reason, cell_size)
                                }
                            }
                            if (i + 1) % self.layout.columns == 0 {
                                ui.end_row();
                            }
                        }
                        // Remaining cells are simply not drawn
                    });
            });
    }
}

impl eframe::App for SpreadMonitorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.render_status_panel(ctx);
        self.render_central_panel(ctx);
    }
}
