//! Dashboard page.

use eframe::egui;

use crate::i18n::Translator;
use crate::state::{Theme, User};
use crate::ui::switchers::{render_switchers, SwitcherAction};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardEvent {
    Logout,
    Switch(SwitcherAction),
}

pub fn welcome_text(t: &Translator, user: Option<&User>) -> String {
    let username = user.map(|u| u.username.as_str()).unwrap_or_default();
    format!("{}!", t.t_with("dashboard.welcome", &[("username", username)]))
}

pub fn render(
    ui: &mut egui::Ui,
    t: &Translator,
    user: Option<&User>,
    theme: Theme,
) -> Option<DashboardEvent> {
    let mut event = None;
    ui.vertical_centered(|ui| {
        ui.add_space(48.0);
        ui.heading(welcome_text(t, user));
        ui.add_space(16.0);
        if ui.button(t.t("dashboard.logout")).clicked() {
            event = Some(DashboardEvent::Logout);
        }
        ui.add_space(12.0);
        if let Some(action) = render_switchers(ui, t, theme) {
            event = Some(DashboardEvent::Switch(action));
        }
    });
    event
}
