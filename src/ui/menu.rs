//! Window chrome for the host-built menu.
//!
//! The host thread installs a [`MenuModel`] through [`WindowMenu`]; the UI
//! renders whatever is installed at the top of the window and reports the
//! clicked command back to the app.

use eframe::egui::{self, Key, KeyboardShortcut, Modifiers};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::host::menu::{MenuCommand, MenuEntry, MenuHost, MenuModel};

/// Shared slot the host writes menus into.
#[derive(Clone, Default)]
pub struct WindowMenu {
    installed: Arc<Mutex<Option<MenuModel>>>,
    repaint: Option<egui::Context>,
}

impl WindowMenu {
    /// A menu slot that wakes `ctx` whenever a new menu is installed.
    pub fn new(ctx: egui::Context) -> Self {
        Self {
            installed: Arc::default(),
            repaint: Some(ctx),
        }
    }

    fn slot(&self) -> MutexGuard<'_, Option<MenuModel>> {
        // Writers only ever swap in a whole model
        match self.installed.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    pub fn current(&self) -> Option<MenuModel> {
        self.slot().clone()
    }
}

impl MenuHost for WindowMenu {
    fn install_menu(&self, menu: MenuModel) {
        tracing::debug!(
            "installing {} menu: {:?}",
            menu.language,
            menu.section_labels()
        );
        *self.slot() = Some(menu);
        if let Some(ctx) = &self.repaint {
            ctx.request_repaint();
        }
    }
}

/// Edit roles belong to the focused text widget; the menu never steals their keys.
fn is_edit_role(command: MenuCommand) -> bool {
    matches!(
        command,
        MenuCommand::Undo
            | MenuCommand::Redo
            | MenuCommand::Cut
            | MenuCommand::Copy
            | MenuCommand::Paste
            | MenuCommand::SelectAll
    )
}

/// Parse an accelerator like `"Shift+Cmd+Z"` into an egui shortcut.
///
/// `Cmd` maps to the platform command key, `Ctrl` to the control key.
pub fn parse_accelerator(accelerator: &str) -> Option<KeyboardShortcut> {
    let mut modifiers = Modifiers::NONE;
    let mut key = None;
    for part in accelerator.split('+') {
        match part {
            "Cmd" => modifiers = modifiers | Modifiers::COMMAND,
            "Ctrl" => modifiers = modifiers | Modifiers::CTRL,
            "Alt" => modifiers = modifiers | Modifiers::ALT,
            "Shift" => modifiers = modifiers | Modifiers::SHIFT,
            other => key = Some(Key::from_name(other)?),
        }
    }
    Some(KeyboardShortcut::new(modifiers, key?))
}

fn collect_shortcuts(entries: &[MenuEntry], out: &mut Vec<(KeyboardShortcut, MenuCommand)>) {
    for entry in entries {
        match entry {
            MenuEntry::Item(item) if !is_edit_role(item.command) => {
                if let Some(shortcut) = item.accelerator.and_then(parse_accelerator) {
                    out.push((shortcut, item.command));
                }
            }
            MenuEntry::Submenu(section) => collect_shortcuts(&section.entries, out),
            _ => {}
        }
    }
}

/// Every keyboard shortcut bound in `menu`, edit roles excluded.
pub fn menu_shortcuts(menu: &MenuModel) -> Vec<(KeyboardShortcut, MenuCommand)> {
    let mut out = Vec::new();
    for section in &menu.sections {
        collect_shortcuts(&section.entries, &mut out);
    }
    out
}

/// Consume the first menu shortcut pressed this frame.
pub fn triggered_shortcut(ctx: &egui::Context, menu: &MenuModel) -> Option<MenuCommand> {
    menu_shortcuts(menu)
        .into_iter()
        .find(|(shortcut, _)| ctx.input_mut(|i| i.consume_shortcut(shortcut)))
        .map(|(_, command)| command)
}

fn render_entries(ui: &mut egui::Ui, entries: &[MenuEntry], clicked: &mut Option<MenuCommand>) {
    for entry in entries {
        match entry {
            MenuEntry::Separator => {
                ui.separator();
            }
            MenuEntry::Submenu(section) => {
                ui.menu_button(section.label.as_str(), |ui| {
                    render_entries(ui, &section.entries, clicked);
                });
            }
            MenuEntry::Item(item) => {
                ui.horizontal(|ui| {
                    if ui.button(item.label.as_str()).clicked() {
                        *clicked = Some(item.command);
                        ui.close_menu();
                    }
                    if let Some(accelerator) = item.accelerator {
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            ui.label(egui::RichText::new(accelerator).weak().small());
                        });
                    }
                });
            }
        }
    }
}

/// Render the installed menu as a horizontal menu bar.
/// Returns the command of the item clicked this frame.
pub fn render_menu_bar(ui: &mut egui::Ui, menu: &MenuModel) -> Option<MenuCommand> {
    let mut clicked = None;
    egui::menu::bar(ui, |ui| {
        for section in &menu.sections {
            ui.menu_button(section.label.as_str(), |ui| {
                render_entries(ui, &section.entries, &mut clicked);
            });
        }
    });
    clicked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::menu::{MenuBuilder, MenuPlatform};
    use crate::i18n::{BuiltinCatalogs, Language, Translator};

    fn menu(platform: MenuPlatform, debug: bool) -> MenuModel {
        MenuBuilder::new(platform, debug).build(&Translator::load(&BuiltinCatalogs, Language::En))
    }

    #[test]
    fn test_window_menu_holds_latest_install() {
        let window = WindowMenu::default();
        assert!(window.current().is_none());

        let host_side = window.clone();
        host_side.install_menu(menu(MenuPlatform::Default, false));
        let zh = MenuBuilder::new(MenuPlatform::Default, false)
            .build(&Translator::load(&BuiltinCatalogs, Language::Zh));
        host_side.install_menu(zh);

        assert_eq!(window.current().map(|m| m.language), Some(Language::Zh));
    }

    #[test]
    fn test_parse_accelerator() {
        assert_eq!(
            parse_accelerator("Ctrl+W"),
            Some(KeyboardShortcut::new(Modifiers::CTRL, Key::W))
        );
        assert_eq!(
            parse_accelerator("Alt+Cmd+I"),
            Some(KeyboardShortcut::new(Modifiers::ALT | Modifiers::COMMAND, Key::I))
        );
        assert_eq!(
            parse_accelerator("F11"),
            Some(KeyboardShortcut::new(Modifiers::NONE, Key::F11))
        );
        assert_eq!(parse_accelerator("Ctrl+Nope"), None);
        assert_eq!(parse_accelerator("Ctrl"), None);
    }

    #[test]
    fn test_shortcuts_skip_edit_roles() {
        let shortcuts = menu_shortcuts(&menu(MenuPlatform::Darwin, true));
        let commands: Vec<MenuCommand> = shortcuts.iter().map(|(_, c)| *c).collect();
        assert!(commands.contains(&MenuCommand::Quit));
        assert!(commands.contains(&MenuCommand::Reload));
        assert!(!commands.contains(&MenuCommand::Copy));
        assert!(!commands.contains(&MenuCommand::Undo));
    }
}
