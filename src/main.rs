//! duet-shell: a login/dashboard desktop shell.
//!
//! Architecture:
//! - Main thread: runs the egui UI (store, pages, language/theme switchers)
//! - Host thread: runs a Tokio runtime, owns the menu and its own locale
//! - Communication via one named crossbeam channel (`ipc-example`)

use eframe::egui;

use duet_shell::app::ShellApp;
use duet_shell::config::{self, Settings, APP_TITLE};
use duet_shell::logging;

fn main() -> eframe::Result<()> {
    let (settings, settings_error) = match config::load_settings() {
        Ok(settings) => (settings, None),
        Err(e) => (Settings::default(), Some(e)),
    };
    let settings = settings.with_env_overrides();

    let data_dir = config::data_dir();
    if let Err(e) = logging::init_tracing(&settings.log_level, data_dir.as_deref()) {
        eprintln!("logging disabled: {}", e);
    }
    if let Some(e) = settings_error {
        tracing::warn!("using default settings: {}", e);
    }
    tracing::info!("starting {} {}", APP_TITLE, env!("CARGO_PKG_VERSION"));

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(APP_TITLE)
            .with_inner_size(settings.window_size)
            .with_min_inner_size(settings.min_window_size)
            .with_minimized(settings.start_minimized),
        ..Default::default()
    };

    eframe::run_native(
        APP_TITLE,
        options,
        Box::new(move |cc| Ok(Box::new(ShellApp::new(cc, &settings)))),
    )
}
