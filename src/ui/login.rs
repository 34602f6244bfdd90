//! Login page.

use eframe::egui;

use crate::i18n::Translator;
use crate::state::{Theme, User};
use crate::ui::switchers::{render_switchers, SwitcherAction};
use crate::ui::theme::{named_or, FOOTER, PAGE_TITLE};

pub const DOCS_URL: &str = "https://docs.rs/eframe";
pub const DONATE_URL: &str = "https://github.com/sponsors/emilk";

/// What the login page asks the app to do.
#[derive(Debug, Clone, PartialEq)]
pub enum LoginEvent {
    LoggedIn(User),
    Switch(SwitcherAction),
}

/// Form state. Lives in the app so input survives re-renders.
#[derive(Debug, Default, Clone)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

impl LoginForm {
    /// Both fields must be non-empty. The password is only checked for
    /// presence and is cleared on success.
    pub fn submit(&mut self) -> Option<User> {
        if self.username.is_empty() || self.password.is_empty() {
            return None;
        }
        self.password.clear();
        Some(User::new(self.username.clone()))
    }

    pub fn render(&mut self, ui: &mut egui::Ui, t: &Translator, theme: Theme) -> Option<LoginEvent> {
        let mut event = None;
        let title_style = named_or(ui.style(), PAGE_TITLE, egui::TextStyle::Heading);
        let footer = named_or(ui.style(), FOOTER, egui::TextStyle::Small);

        ui.vertical_centered(|ui| {
            ui.add_space(48.0);
            ui.label(
                egui::RichText::new(t.t("app.title"))
                    .text_style(title_style),
            );
            ui.add_space(24.0);

            ui.add(
                egui::TextEdit::singleline(&mut self.username)
                    .hint_text(t.t("login.username"))
                    .desired_width(240.0),
            );
            let password = ui.add(
                egui::TextEdit::singleline(&mut self.password)
                    .hint_text(t.t("login.password"))
                    .password(true)
                    .desired_width(240.0),
            );
            ui.add_space(8.0);

            let enter = password.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
            if ui.button(t.t("login.submit")).clicked() || enter {
                event = self.submit().map(LoginEvent::LoggedIn);
            }

            ui.add_space(24.0);
            ui.horizontal(|ui| {
                ui.hyperlink_to(
                    egui::RichText::new(format!("📚 {}", t.t("footer.readDoc"))).text_style(footer.clone()),
                    DOCS_URL,
                );
                ui.hyperlink_to(
                    egui::RichText::new(format!("🙏 {}", t.t("footer.donate"))).text_style(footer),
                    DONATE_URL,
                );
            });

            ui.add_space(12.0);
            if let Some(action) = render_switchers(ui, t, theme) {
                event = Some(LoginEvent::Switch(action));
            }
        });

        event
    }
}
