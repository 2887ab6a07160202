// Native figure window
pub mod app;
pub mod config;
pub mod ui_plot_view;
pub mod utils;

// Re-export main app
pub use app::SpreadMonitorApp;
pub use config::UI_CONFIG;
