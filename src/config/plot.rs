//! Plot visualization configuration, shared by the SVG export and the native window.

pub struct PlotConfig {
    /// Fixed number of grid columns
    pub grid_columns: usize,
    /// Size of one grid cell in pixels (the whole figure is columns x rows cells)
    pub cell_width: f64,
    pub cell_height: f64,
    /// Inner padding between the cell border and the plot area
    pub cell_padding: f64,
    /// Space reserved above the plot area for the title
    pub title_height: f64,
    /// Line colours, cycled by slot index (matplotlib's default cycle)
    pub series_colors: &'static [&'static str],
    pub zero_line_color: &'static str,
    pub zero_line_opacity: f64,
    pub grid_line_color: &'static str,
    pub grid_line_opacity: f64,
    pub placeholder_color: &'static str,
    pub spread_line_width: f64,
    /// Fraction of the value span added above and below the series
    pub y_padding_pct: f64,
    /// Approximate tick count per axis
    pub axis_divisions: usize,
    pub x_axis_label: &'static str,
    pub y_axis_label: &'static str,
    pub insufficient_data_text: &'static str,
}

pub const PLOT_CONFIG: PlotConfig = PlotConfig {
    grid_columns: 3,
    // 14in x 3.5in-per-row at 100 dpi
    cell_width: 466.0,
    cell_height: 350.0,
    cell_padding: 12.0,
    title_height: 28.0,
    series_colors: &[
        "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
        "#bcbd22", "#17becf",
    ],
    zero_line_color: "#000000",
    zero_line_opacity: 0.7,
    grid_line_color: "#b0b0b0",
    grid_line_opacity: 0.5,
    placeholder_color: "#8c8c8c",
    spread_line_width: 1.5,
    y_padding_pct: 0.05,
    axis_divisions: 5,
    x_axis_label: "Date",
    y_axis_label: "Rolling CumReturn Diff",
    insufficient_data_text: "insufficient data",
};

impl PlotConfig {
    pub fn series_color(&self, slot: usize) -> &'static str {
        self.series_colors[slot % self.series_colors.len()]
    }
}
