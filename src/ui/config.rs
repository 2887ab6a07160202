use eframe::egui::Color32;

/// UI Colors for consistent theming
#[derive(Clone, Copy)]
pub struct UiColors {
    pub central_panel: Color32,
    pub status_panel: Color32,
    pub title: Color32,
    pub label: Color32,
}

/// Main UI configuration struct that holds all window-related settings
#[derive(Clone, Copy)]
pub struct UiConfig {
    pub colors: UiColors,
    pub window_title: &'static str,
    /// Vertical space for each cell's title row
    pub title_row_height: f32,
    pub cell_spacing: f32,
}

/// Global UI configuration instance
pub static UI_CONFIG: UiConfig = UiConfig {
    colors: UiColors {
        central_panel: Color32::WHITE,
        status_panel: Color32::from_rgb(235, 235, 235),
        title: Color32::from_rgb(38, 38, 38),
        label: Color32::from_rgb(90, 90, 90),
    },
    window_title: "Spread Monitor",
    title_row_height: 20.0,
    cell_spacing: 8.0,
};
