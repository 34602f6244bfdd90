//! Menu commands and page events

use eframe::egui;

use super::ShellApp;
use crate::host::menu::MenuCommand;
use crate::ui::dashboard::DashboardEvent;
use crate::ui::login::LoginEvent;
use crate::ui::SwitcherAction;

impl ShellApp {
    pub(super) fn run_menu_command(&mut self, ctx: &egui::Context, command: MenuCommand) {
        tracing::debug!("menu command {:?}", command);
        match command {
            MenuCommand::CloseWindow | MenuCommand::Quit => {
                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            }
            MenuCommand::Minimize | MenuCommand::Hide => {
                ctx.send_viewport_cmd(egui::ViewportCommand::Minimized(true));
            }
            MenuCommand::ToggleFullScreen => {
                let fullscreen = ctx.input(|i| i.viewport().fullscreen.unwrap_or(false));
                ctx.send_viewport_cmd(egui::ViewportCommand::Fullscreen(!fullscreen));
            }
            MenuCommand::BringAllToFront => {
                ctx.send_viewport_cmd(egui::ViewportCommand::Focus);
            }
            MenuCommand::ToggleDevTools => self.show_devtools = !self.show_devtools,
            MenuCommand::About => self.show_about = true,
            MenuCommand::Reload => {
                // Reload the view: fresh form, route re-resolved from "/"
                self.login = Default::default();
                self.shell.navigate("/");
            }
            MenuCommand::Cut => ctx.send_viewport_cmd(egui::ViewportCommand::RequestCut),
            MenuCommand::Copy => ctx.send_viewport_cmd(egui::ViewportCommand::RequestCopy),
            MenuCommand::Paste => ctx.send_viewport_cmd(egui::ViewportCommand::RequestPaste),
            MenuCommand::OpenUrl(url) => ctx.open_url(egui::OpenUrl::new_tab(url)),
            MenuCommand::Open
            | MenuCommand::HideOthers
            | MenuCommand::ShowAll
            | MenuCommand::Undo
            | MenuCommand::Redo
            | MenuCommand::SelectAll => {
                tracing::debug!("{:?} has no window action", command);
            }
        }
    }

    fn handle_switch(&mut self, action: SwitcherAction) {
        match action {
            SwitcherAction::ToggleLanguage => {
                self.shell.toggle_language();
            }
            SwitcherAction::ToggleTheme => {
                self.shell.toggle_theme();
            }
        }
    }

    pub(super) fn handle_login_event(&mut self, event: LoginEvent) {
        match event {
            LoginEvent::LoggedIn(user) => {
                self.shell.login(user);
            }
            LoginEvent::Switch(action) => self.handle_switch(action),
        }
    }

    pub(super) fn handle_dashboard_event(&mut self, event: DashboardEvent) {
        match event {
            DashboardEvent::Logout => {
                self.shell.logout();
            }
            DashboardEvent::Switch(action) => self.handle_switch(action),
        }
    }
}
