//! ShellApp struct definition and initialization

use std::sync::Arc;

use crate::config::{self, Settings};
use crate::host::{spawn_host, HostOptions};
use crate::i18n::BuiltinCatalogs;
use crate::ipc::ipc_pair;
use crate::protocol::IPC_CHANNEL;
use crate::state::AppState;
use crate::storage;
use crate::store::AppStore;
use crate::ui::theme::apply_theme;
use crate::ui::{LoginForm, WindowMenu};

pub struct ShellApp {
    // Session: store, translator, navigator, UI end of the channel
    pub shell: super::Shell,

    // Menu slot written by the host thread
    pub menu: WindowMenu,

    // Page state
    pub login: LoginForm,

    // Windows
    pub show_devtools: bool,
    pub show_about: bool,
}

impl ShellApp {
    pub fn new(cc: &eframe::CreationContext<'_>, settings: &Settings) -> Self {
        let ctx = cc.egui_ctx.clone();
        cc.egui_ctx.set_fonts(crate::fonts::setup_fonts());

        let data_dir = config::data_dir();
        let mut store = AppStore::load(storage::open_default(data_dir.as_deref()));

        // Visuals follow the theme slice: once now, then after every commit
        let mut applied = store.state().theme.theme;
        apply_theme(&ctx, applied);
        let theme_ctx = ctx.clone();
        store.subscribe(move |state: &AppState| {
            if state.theme.theme != applied {
                applied = state.theme.theme;
                apply_theme(&theme_ctx, applied);
            }
        });

        let (ui_end, host_end) = ipc_pair(IPC_CHANNEL);
        let menu = WindowMenu::new(ctx);
        let options = HostOptions {
            debug_menu: settings.debug_menu,
            ..HostOptions::default()
        };
        // The host thread exits on its own once `ui_end` is dropped
        if let Err(e) = spawn_host(host_end, menu.clone(), options) {
            tracing::error!("failed to spawn host thread: {}", e);
        }

        let shell = super::Shell::start(ui_end, store, Arc::new(BuiltinCatalogs));

        Self {
            shell,
            menu,
            login: LoginForm::default(),
            show_devtools: false,
            show_about: false,
        }
    }
}
