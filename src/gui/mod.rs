//! GUI module
//!
//! egui-based graphical user interface.

mod app;

use anyhow::Result;

use crate::config::Config;

/// Run the GUI application
pub fn run(config: Config) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window.width, config.window.height])
            .with_min_inner_size([800.0, 600.0])
            .with_title("CubicLauncher"),
        ..Default::default()
    };

    eframe::run_native(
        "CubicLauncher",
        options,
        Box::new(|cc| Ok(Box::new(app::LauncherApp::new(cc, config, runtime)))),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run GUI: {}", e))
}
