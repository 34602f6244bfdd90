//! Language and theme toggles.

use eframe::egui;

use crate::i18n::Translator;
use crate::state::Theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwitcherAction {
    ToggleLanguage,
    ToggleTheme,
}

/// Icon for the theme button: what is active now.
pub fn theme_icon(theme: Theme) -> &'static str {
    match theme {
        Theme::Light => "☀",
        Theme::Dark => "🌙",
    }
}

/// Render both switchers on one row.
pub fn render_switchers(ui: &mut egui::Ui, t: &Translator, theme: Theme) -> Option<SwitcherAction> {
    let mut action = None;
    ui.horizontal(|ui| {
        // Label names the language you switch to
        if ui.button(t.t("dashboard.language")).clicked() {
            action = Some(SwitcherAction::ToggleLanguage);
        }
        if ui
            .button(theme_icon(theme))
            .on_hover_text(theme.toggled().as_str())
            .clicked()
        {
            action = Some(SwitcherAction::ToggleTheme);
        }
    });
    action
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_icon() {
        assert_eq!(theme_icon(Theme::Light), "☀");
        assert_eq!(theme_icon(Theme::Dark), "🌙");
    }
}
