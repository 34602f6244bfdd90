//! Main update loop

use eframe::egui;
use std::time::Duration;

use super::ShellApp;
use crate::config::APP_TITLE;
use crate::routes::Route;
use crate::ui::{dashboard, devtools, menu};

/// How often an idle window wakes up to drain the channel.
const IPC_POLL_INTERVAL: Duration = Duration::from_millis(100);

impl eframe::App for ShellApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Host replies (pong) are delivered to listeners here
        self.shell.pump();

        let installed = self.menu.current();
        let mut command = installed
            .as_ref()
            .and_then(|m| menu::triggered_shortcut(ctx, m));

        if let Some(model) = &installed {
            egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
                if let Some(clicked) = menu::render_menu_bar(ui, model) {
                    command = Some(clicked);
                }
            });
        }
        if let Some(command) = command {
            self.run_menu_command(ctx, command);
        }

        let route = self.shell.route();
        let theme = self.shell.state().theme.theme;
        egui::CentralPanel::default().show(ctx, |ui| match route {
            Route::Login => {
                if let Some(event) = self.login.render(ui, self.shell.translator(), theme) {
                    self.handle_login_event(event);
                }
            }
            Route::Dashboard => {
                let event = dashboard::render(
                    ui,
                    self.shell.translator(),
                    self.shell.state().auth.user(),
                    theme,
                );
                if let Some(event) = event {
                    self.handle_dashboard_event(event);
                }
            }
        });

        if self.show_devtools {
            let info = devtools::Diagnostics {
                state: self.shell.state(),
                last_pong: self.shell.last_pong(),
                path: self.shell.path(),
            };
            devtools::render(ctx, &mut self.show_devtools, self.shell.translator(), &info);
        }

        if self.show_about {
            egui::Window::new(APP_TITLE)
                .open(&mut self.show_about)
                .resizable(false)
                .collapsible(false)
                .show(ctx, |ui| {
                    ui.label(format!("{} {}", APP_TITLE, env!("CARGO_PKG_VERSION")));
                });
        }

        ctx.request_repaint_after(IPC_POLL_INTERVAL);
    }
}
