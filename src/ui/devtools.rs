//! Diagnostics window, opened by "Toggle Developer Tools".

use eframe::egui;

use crate::i18n::Translator;
use crate::state::AppState;

/// Snapshot of what the window shows.
pub struct Diagnostics<'a> {
    pub state: &'a AppState,
    pub last_pong: Option<String>,
    pub path: &'a str,
}

/// Rows as (label key, value), in display order.
pub fn diagnostic_rows(t: &Translator, info: &Diagnostics<'_>) -> Vec<(String, String)> {
    let auth = &info.state.auth;
    vec![
        (t.t("devtools.uiLocale"), t.language().code().to_string()),
        (
            t.t("devtools.lastPong"),
            info.last_pong.clone().unwrap_or_else(|| "-".into()),
        ),
        (
            t.t("devtools.state"),
            format!(
                "authenticated={} user={} theme={}",
                auth.is_authenticated(),
                auth.user().map(|u| u.username.as_str()).unwrap_or("-"),
                info.state.theme.theme
            ),
        ),
        ("path".into(), info.path.to_string()),
    ]
}

pub fn render(ctx: &egui::Context, open: &mut bool, t: &Translator, info: &Diagnostics<'_>) {
    egui::Window::new(t.t("devtools.title"))
        .open(open)
        .resizable(true)
        .default_width(360.0)
        .show(ctx, |ui| {
            egui::Grid::new("devtools_grid")
                .num_columns(2)
                .striped(true)
                .show(ui, |ui| {
                    for (label, value) in diagnostic_rows(t, info) {
                        ui.label(egui::RichText::new(label).strong());
                        ui.monospace(value);
                        ui.end_row();
                    }
                });
        });
}
