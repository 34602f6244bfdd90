//! Application menu templates.
//!
//! The host owns the menu. Labels are resolved against the host's own
//! translator each time the menu is built, so a rebuild after a locale change
//! is all it takes to relabel everything.

use crate::i18n::{Language, Translator};

pub const LEARN_MORE_URL: &str = "https://www.egui.rs";
pub const DOCUMENTATION_URL: &str = "https://docs.rs/eframe";
pub const COMMUNITY_URL: &str = "https://github.com/emilk/egui/discussions";
pub const ISSUES_URL: &str = "https://github.com/emilk/egui/issues";

/// What a menu item does when clicked. Executed by the window chrome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuCommand {
    Open,
    CloseWindow,
    Reload,
    ToggleFullScreen,
    ToggleDevTools,
    Minimize,
    BringAllToFront,
    About,
    Hide,
    HideOthers,
    ShowAll,
    Quit,
    Undo,
    Redo,
    Cut,
    Copy,
    Paste,
    SelectAll,
    OpenUrl(&'static str),
}

#[derive(Debug, Clone, PartialEq)]
pub struct MenuItem {
    pub label: String,
    pub accelerator: Option<&'static str>,
    pub command: MenuCommand,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MenuEntry {
    Item(MenuItem),
    Submenu(MenuSection),
    Separator,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MenuSection {
    pub label: String,
    pub entries: Vec<MenuEntry>,
}

/// A fully labelled menu, ready to install.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuModel {
    pub language: Language,
    pub sections: Vec<MenuSection>,
}

impl MenuModel {
    pub fn section_labels(&self) -> Vec<&str> {
        self.sections.iter().map(|s| s.label.as_str()).collect()
    }

    /// Find the first item bound to `command`, searching submenus too.
    #[cfg(test)]
    pub fn find(&self, command: MenuCommand) -> Option<&MenuItem> {
        fn search(entries: &[MenuEntry], command: MenuCommand) -> Option<&MenuItem> {
            entries.iter().find_map(|entry| match entry {
                MenuEntry::Item(item) if item.command == command => Some(item),
                MenuEntry::Submenu(section) => search(&section.entries, command),
                _ => None,
            })
        }
        self.sections
            .iter()
            .find_map(|section| search(&section.entries, command))
    }
}

/// The window/menu collaborator: receives each rebuilt menu.
pub trait MenuHost: Send + 'static {
    fn install_menu(&self, menu: MenuModel);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuPlatform {
    Darwin,
    Default,
}

impl MenuPlatform {
    pub fn current() -> Self {
        if cfg!(target_os = "macos") {
            MenuPlatform::Darwin
        } else {
            MenuPlatform::Default
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct MenuBuilder {
    platform: MenuPlatform,
    debug: bool,
}

fn item(
    t: &Translator,
    key: &str,
    accelerator: Option<&'static str>,
    command: MenuCommand,
) -> MenuEntry {
    MenuEntry::Item(MenuItem {
        label: t.t(key),
        accelerator,
        command,
    })
}

fn section(t: &Translator, key: &str, entries: Vec<MenuEntry>) -> MenuSection {
    MenuSection {
        label: t.t(key),
        entries,
    }
}

impl MenuBuilder {
    pub fn new(platform: MenuPlatform, debug: bool) -> Self {
        Self { platform, debug }
    }

    pub fn build(&self, t: &Translator) -> MenuModel {
        let sections = match self.platform {
            MenuPlatform::Darwin => self.darwin_template(t),
            MenuPlatform::Default => self.default_template(t),
        };
        MenuModel {
            language: t.language(),
            sections,
        }
    }

    fn view_section(&self, t: &Translator, darwin: bool) -> MenuSection {
        let (reload, fullscreen, devtools) = if darwin {
            ("Cmd+R", "Ctrl+Cmd+F", "Alt+Cmd+I")
        } else {
            ("Ctrl+R", "F11", "Alt+Ctrl+I")
        };
        let mut entries = Vec::new();
        if self.debug {
            entries.push(item(t, "menu.view.reload", Some(reload), MenuCommand::Reload));
        }
        entries.push(item(
            t,
            "menu.view.toggleFullScreen",
            Some(fullscreen),
            MenuCommand::ToggleFullScreen,
        ));
        if self.debug {
            entries.push(item(
                t,
                "menu.view.toggleDevTool",
                Some(devtools),
                MenuCommand::ToggleDevTools,
            ));
        }
        section(t, "menu.view.label", entries)
    }

    fn help_section(&self, t: &Translator) -> MenuSection {
        section(
            t,
            "menu.help.label",
            vec![
                item(t, "menu.help.learnMore", None, MenuCommand::OpenUrl(LEARN_MORE_URL)),
                item(
                    t,
                    "menu.help.documentation",
                    None,
                    MenuCommand::OpenUrl(DOCUMENTATION_URL),
                ),
                item(
                    t,
                    "menu.help.communityDiscussions",
                    None,
                    MenuCommand::OpenUrl(COMMUNITY_URL),
                ),
                item(t, "menu.help.searchIssues", None, MenuCommand::OpenUrl(ISSUES_URL)),
            ],
        )
    }

    fn default_template(&self, t: &Translator) -> Vec<MenuSection> {
        vec![
            section(
                t,
                "menu.file.label",
                vec![
                    item(t, "menu.file.open", Some("Ctrl+O"), MenuCommand::Open),
                    item(t, "menu.file.close", Some("Ctrl+W"), MenuCommand::CloseWindow),
                ],
            ),
            self.view_section(t, false),
            self.help_section(t),
        ]
    }

    fn darwin_template(&self, t: &Translator) -> Vec<MenuSection> {
        let about = section(
            t,
            "menu.macOS.label",
            vec![
                item(t, "menu.macOS.about", None, MenuCommand::About),
                MenuEntry::Separator,
                MenuEntry::Submenu(section(t, "menu.macOS.services", Vec::new())),
                MenuEntry::Separator,
                item(t, "menu.macOS.hide", Some("Cmd+H"), MenuCommand::Hide),
                item(
                    t,
                    "menu.macOS.hideOthers",
                    Some("Cmd+Shift+H"),
                    MenuCommand::HideOthers,
                ),
                item(t, "menu.macOS.showAll", None, MenuCommand::ShowAll),
                MenuEntry::Separator,
                item(t, "menu.macOS.quit", Some("Cmd+Q"), MenuCommand::Quit),
            ],
        );
        let edit = section(
            t,
            "menu.edit.label",
            vec![
                item(t, "menu.edit.undo", Some("Cmd+Z"), MenuCommand::Undo),
                item(t, "menu.edit.redo", Some("Shift+Cmd+Z"), MenuCommand::Redo),
                MenuEntry::Separator,
                item(t, "menu.edit.cut", Some("Cmd+X"), MenuCommand::Cut),
                item(t, "menu.edit.copy", Some("Cmd+C"), MenuCommand::Copy),
                item(t, "menu.edit.paste", Some("Cmd+V"), MenuCommand::Paste),
                item(t, "menu.edit.selectAll", Some("Cmd+A"), MenuCommand::SelectAll),
            ],
        );
        let window = section(
            t,
            "menu.window.label",
            vec![
                item(t, "menu.window.minimize", Some("Cmd+M"), MenuCommand::Minimize),
                item(t, "menu.file.close", Some("Cmd+W"), MenuCommand::CloseWindow),
                MenuEntry::Separator,
                item(
                    t,
                    "menu.window.bringAllToFront",
                    None,
                    MenuCommand::BringAllToFront,
                ),
            ],
        );
        vec![about, edit, self.view_section(t, true), window, self.help_section(t)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::BuiltinCatalogs;

    fn translator(language: Language) -> Translator {
        Translator::load(&BuiltinCatalogs, language)
    }

    #[test]
    fn test_default_template_sections() {
        let menu = MenuBuilder::new(MenuPlatform::Default, false).build(&translator(Language::En));
        assert_eq!(menu.language, Language::En);
        assert_eq!(menu.section_labels(), vec!["File", "View", "Help"]);
        assert!(menu.find(MenuCommand::Reload).is_none());
        assert!(menu.find(MenuCommand::ToggleDevTools).is_none());
        assert_eq!(
            menu.find(MenuCommand::CloseWindow).map(|i| i.accelerator),
            Some(Some("Ctrl+W"))
        );
    }

    #[test]
    fn test_debug_adds_dev_items() {
        let menu = MenuBuilder::new(MenuPlatform::Default, true).build(&translator(Language::En));
        assert_eq!(
            menu.find(MenuCommand::Reload).map(|i| i.label.as_str()),
            Some("Reload")
        );
        assert!(menu.find(MenuCommand::ToggleDevTools).is_some());
    }

    #[test]
    fn test_labels_follow_translator() {
        let menu = MenuBuilder::new(MenuPlatform::Default, false).build(&translator(Language::Zh));
        assert_eq!(menu.language, Language::Zh);
        assert_eq!(menu.section_labels(), vec!["文件", "视图", "帮助"]);
        assert_eq!(
            menu.find(MenuCommand::OpenUrl(ISSUES_URL)).map(|i| i.label.as_str()),
            Some("搜索问题")
        );
    }

    #[test]
    fn test_darwin_template() {
        let menu = MenuBuilder::new(MenuPlatform::Darwin, false).build(&translator(Language::Zh));
        assert_eq!(
            menu.section_labels(),
            vec!["duet-shell", "编辑", "视图", "窗口", "帮助"]
        );
        assert_eq!(
            menu.find(MenuCommand::Quit).map(|i| i.accelerator),
            Some(Some("Cmd+Q"))
        );
        assert!(matches!(
            &menu.sections[0].entries[2],
            MenuEntry::Submenu(services) if services.label == "服务" && services.entries.is_empty()
        ));
    }
}
