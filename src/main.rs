use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use eframe::NativeOptions;
use eframe::egui::ViewportBuilder;
use tokio::runtime::Runtime;

use spread_monitor::data::write_price_table_async;
use spread_monitor::render::{render_svg, write_svg};
use spread_monitor::ui::UI_CONFIG;
use spread_monitor::{
    Cli, FetchRequest, GridLayout, analyze_all_pairs, fetch_price_table, log_run_summary,
    resolve_symbols, run_app,
};

fn main() -> Result<()> {
    // A. Init Logging
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    // B. Parse Args
    let args = Cli::parse();
    #[cfg(debug_assertions)]
    log::info!("Parsed arguments: {:?}", args);

    let config = args.build_monitor_config()?;
    let request = FetchRequest {
        symbols: resolve_symbols(&config.pairs),
        start_date: config.start_date,
        end_date: config.end_date,
    };
    log::info!(
        "Monitoring {} pairs over {} symbols, {} .. {} (window {})",
        config.pairs.len(),
        request.symbols.len(),
        request.start_date,
        request.end_date,
        config.window
    );

    // C. Data Loading (Blocking)
    let rt = Runtime::new().context("Failed to create Tokio runtime")?;
    let cache_path = args.cache_path();
    let (price_table, price_signature) = rt.block_on(fetch_price_table(
        &request,
        args.prefer_api,
        args.cache_max_age_secs,
        &cache_path,
    ))?;

    // D. Background Cache Write
    let cache_write = rt.spawn(write_price_table_async(
        price_signature,
        price_table.clone(),
        cache_path,
    ));

    // E. Per-pair analysis
    let prices = Arc::new(price_table);
    let outcomes = analyze_all_pairs(&config, &prices);
    log_run_summary(&outcomes);

    let layout = GridLayout::for_pairs(outcomes.len(), config.grid_rows);
    log::info!(
        "Figure grid {}x{}, {} cells left blank",
        layout.rows,
        layout.columns,
        layout.unused_cells(outcomes.len())
    );

    // F. SVG export
    if let Some(path) = &args.output {
        write_svg(path, &render_svg(&outcomes, &layout))?;
        log::info!("Figure written to {}", path.display());
    }

    // G. Native window
    if !args.no_window {
        let (width, height) = layout.figure_size();
        let options = NativeOptions {
            viewport: ViewportBuilder::default()
                .with_title(UI_CONFIG.window_title)
                .with_inner_size([width as f32, height as f32 + 30.0]),
            ..Default::default()
        };
        let window = config.window;
        eframe::run_native(
            UI_CONFIG.window_title,
            options,
            Box::new(move |cc| Ok(run_app(cc, &outcomes, layout, window, price_signature))),
        )
        .map_err(|e| anyhow!("Window failed: {}", e))?;
    }

    // The window may have closed before the cache write finished
    match rt.block_on(cache_write) {
        Ok(Err(e)) => log::error!("⚠️  Failed to write cache: {:#}", e),
        Err(e) => log::error!("⚠️  Cache write task failed: {}", e),
        Ok(Ok(())) => {}
    }
    Ok(())
}
