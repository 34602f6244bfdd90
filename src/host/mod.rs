//! The host side: owns the application menu and its own active locale.
//!
//! Runs on a dedicated thread with its own Tokio runtime. The loop drains the
//! channel every tick, answers pings, and turns each language notification
//! into an asynchronous catalog load. Completions come back through an mpsc
//! queue and are committed by [`LocaleSync`], which then triggers the menu
//! rebuild.
//!
//! - `locale_sync`: request sequencing and the Idle/Applying/Failed states
//! - `menu`: menu templates and the `MenuHost` seam

pub mod locale_sync;
pub mod menu;

pub use locale_sync::{Completion, LocaleSync, SyncState, Ticket};
pub use menu::{MenuBuilder, MenuHost, MenuModel, MenuPlatform};

use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tokio::runtime::Runtime;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

use crate::error::I18nError;
use crate::i18n::{load_catalog, BuiltinCatalogs, Catalog, CatalogSource, Language, Translator};
use crate::ipc::{IpcEndpoint, Poll};
use crate::protocol::{ipc_test_line, pong_message, HostRequest, IpcMessage};

const DEFAULT_TICK: Duration = Duration::from_millis(16);

type LocaleResult = (Ticket, Result<Catalog, I18nError>);

/// Host configuration.
#[derive(Clone)]
pub struct HostOptions {
    pub platform: MenuPlatform,
    pub debug_menu: bool,
    pub catalogs: Arc<dyn CatalogSource>,
    /// Channel polling interval.
    pub tick: Duration,
}

impl Default for HostOptions {
    fn default() -> Self {
        Self {
            platform: MenuPlatform::current(),
            debug_menu: false,
            catalogs: Arc::new(BuiltinCatalogs),
            tick: DEFAULT_TICK,
        }
    }
}

/// Host state. One per window.
pub struct Host<M: MenuHost> {
    endpoint: IpcEndpoint,
    menu_host: M,
    builder: MenuBuilder,
    translator: Translator,
    sync: LocaleSync,
    catalogs: Arc<dyn CatalogSource>,
    done_tx: UnboundedSender<LocaleResult>,
}

impl<M: MenuHost> Host<M> {
    pub fn new(
        endpoint: IpcEndpoint,
        menu_host: M,
        options: &HostOptions,
    ) -> (Self, UnboundedReceiver<LocaleResult>) {
        let (done_tx, done_rx) = unbounded_channel();
        let sync = LocaleSync::default();
        let host = Self {
            endpoint,
            menu_host,
            builder: MenuBuilder::new(options.platform, options.debug_menu),
            translator: Translator::load(options.catalogs.as_ref(), sync.active()),
            sync,
            catalogs: options.catalogs.clone(),
            done_tx,
        };
        (host, done_rx)
    }

    pub fn active_language(&self) -> Language {
        self.sync.active()
    }

    pub fn sync_state(&self) -> &SyncState {
        self.sync.state()
    }

    /// Build the menu for the current locale and hand it to the window.
    pub fn install_menu(&self) {
        self.menu_host.install_menu(self.builder.build(&self.translator));
    }

    /// React to one inbound message. Must run inside a Tokio runtime.
    pub fn handle_message(&mut self, message: IpcMessage) {
        let Some(request) = HostRequest::decode(&message) else {
            tracing::debug!("dropping unrecognized message: {}", message.to_json());
            return;
        };

        match request {
            HostRequest::PingPong(_) => {
                tracing::info!("{}", ipc_test_line(&message));
                self.endpoint.send_message(pong_message());
            }
            HostRequest::Language { kind, language } => {
                let ticket = self.sync.begin(language, kind);
                tracing::debug!("locale change #{} to {} started", ticket.seq, language);
                let catalogs = self.catalogs.clone();
                let done_tx = self.done_tx.clone();
                tokio::spawn(async move {
                    let result = load_catalog(catalogs, language).await;
                    // Receiver gone means the host loop has exited
                    let _ = done_tx.send((ticket, result));
                });
            }
        }
    }

    /// Commit a finished locale change.
    pub fn complete(&mut self, ticket: Ticket, result: Result<Catalog, I18nError>) -> Completion {
        let (catalog, outcome) = match result {
            Ok(catalog) => (Some(catalog), Ok(())),
            Err(e) => (None, Err(e.to_string())),
        };
        let completion = self.sync.finish(ticket, outcome);

        match &completion {
            Completion::Applied { language, kind } => {
                if let Some(catalog) = catalog {
                    self.translator.set_catalog(catalog);
                }
                self.install_menu();
                tracing::info!("Main process language {} to: {}", kind.verb(), language);
            }
            Completion::Superseded => {
                tracing::debug!(
                    "locale change #{} to {} superseded by a newer request",
                    ticket.seq,
                    ticket.language
                );
            }
            Completion::Failed { reason } => {
                tracing::error!(
                    "locale change to {} failed, keeping {}: {}",
                    ticket.language,
                    self.sync.active(),
                    reason
                );
            }
        }
        completion
    }

    /// Drain the channel. Returns `false` once the UI end is gone.
    fn pump(&mut self) -> bool {
        loop {
            match self.endpoint.poll() {
                Poll::Message(message) => self.handle_message(message),
                Poll::Empty => return true,
                Poll::Disconnected => return false,
            }
        }
    }
}

/// Run the host loop on the current thread until the UI drops its endpoint.
pub fn run_host<M: MenuHost>(endpoint: IpcEndpoint, menu_host: M, options: HostOptions) {
    let rt = match Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            tracing::error!("failed to create host runtime: {}", e);
            return;
        }
    };

    rt.block_on(async move {
        let (mut host, mut done_rx) = Host::new(endpoint, menu_host, &options);

        // Built once at window creation with the default locale
        host.install_menu();
        tracing::info!("host ready, locale {}", host.active_language());

        loop {
            if !host.pump() {
                tracing::info!("ui endpoint closed, host exiting");
                break;
            }

            while let Ok((ticket, result)) = done_rx.try_recv() {
                host.complete(ticket, result);
            }

            tokio::time::sleep(options.tick).await;
        }
    });
}

/// Spawn the host on its own named thread.
pub fn spawn_host<M: MenuHost>(
    endpoint: IpcEndpoint,
    menu_host: M,
    options: HostOptions,
) -> std::io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("host".into())
        .spawn(move || run_host(endpoint, menu_host, options))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ipc::ipc_pair;
    use crate::protocol::{language_message, LanguageRequestKind, IPC_CHANNEL};
    use crossbeam_channel::{unbounded, Receiver, Sender};

    struct ChannelMenuHost(Sender<MenuModel>);

    impl MenuHost for ChannelMenuHost {
        fn install_menu(&self, menu: MenuModel) {
            let _ = self.0.send(menu);
        }
    }

    struct BrokenZh;

    impl CatalogSource for BrokenZh {
        fn load(&self, language: Language) -> Result<Catalog, I18nError> {
            match language {
                Language::Zh => Err(I18nError::MalformedCatalog {
                    language: "zh",
                    reason: "truncated".into(),
                }),
                other => BuiltinCatalogs.load(other),
            }
        }
    }

    fn host_with(
        catalogs: Arc<dyn CatalogSource>,
    ) -> (
        IpcEndpoint,
        Host<ChannelMenuHost>,
        UnboundedReceiver<LocaleResult>,
        Receiver<MenuModel>,
    ) {
        let (ui, host_end) = ipc_pair(IPC_CHANNEL);
        let (menu_tx, menu_rx) = unbounded();
        let options = HostOptions {
            platform: MenuPlatform::Default,
            catalogs,
            ..HostOptions::default()
        };
        let (host, done_rx) = Host::new(host_end, ChannelMenuHost(menu_tx), &options);
        (ui, host, done_rx, menu_rx)
    }

    #[tokio::test]
    async fn test_language_message_applies_and_rebuilds_menu() {
        let (_ui, mut host, mut done_rx, menu_rx) = host_with(Arc::new(BuiltinCatalogs));
        assert_eq!(host.active_language(), Language::En);

        host.handle_message(language_message(LanguageRequestKind::Init, Language::Zh));
        assert!(matches!(host.sync_state(), SyncState::Applying { .. }));

        let (ticket, result) = done_rx.recv().await.unwrap();
        let completion = host.complete(ticket, result);
        assert!(matches!(completion, Completion::Applied { language: Language::Zh, .. }));
        assert_eq!(host.active_language(), Language::Zh);
        assert_eq!(host.sync_state(), &SyncState::Idle);

        let menu = menu_rx.try_recv().unwrap();
        assert_eq!(menu.language, Language::Zh);
        assert_eq!(menu.section_labels()[0], "文件");
    }

    #[tokio::test]
    async fn test_failed_locale_change_keeps_menu() {
        let (_ui, mut host, mut done_rx, menu_rx) = host_with(Arc::new(BrokenZh));

        host.handle_message(language_message(LanguageRequestKind::Change, Language::Zh));
        let (ticket, result) = done_rx.recv().await.unwrap();
        assert!(matches!(host.complete(ticket, result), Completion::Failed { .. }));

        assert_eq!(host.active_language(), Language::En);
        assert!(matches!(host.sync_state(), SyncState::Failed { language: Language::Zh, .. }));
        assert!(menu_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_unknown_action_is_ignored() {
        let (ui, mut host, _done_rx, menu_rx) = host_with(Arc::new(BuiltinCatalogs));
        host.handle_message(IpcMessage::new("open-settings", true));
        host.handle_message(IpcMessage::new(crate::protocol::ACTION_LANGUAGE_CHANGE, "de"));

        assert_eq!(host.sync_state(), &SyncState::Idle);
        assert!(menu_rx.try_recv().is_err());
        assert_eq!(ui.poll(), Poll::Empty);
    }

    #[tokio::test]
    async fn test_ping_gets_one_pong() {
        let (ui, mut host, _done_rx, _menu_rx) = host_with(Arc::new(BuiltinCatalogs));
        host.handle_message(crate::protocol::ping_message());
        assert_eq!(ui.poll(), Poll::Message(pong_message()));
        assert_eq!(ui.poll(), Poll::Empty);
    }

    #[test]
    fn test_run_host_exits_when_ui_drops() {
        let (ui, host_end) = ipc_pair(IPC_CHANNEL);
        let (menu_tx, menu_rx) = unbounded();
        let handle = spawn_host(host_end, ChannelMenuHost(menu_tx), HostOptions::default()).unwrap();

        // Initial menu is installed in the default locale
        let initial = menu_rx.recv_timeout(Duration::from_secs(2)).unwrap();
        assert_eq!(initial.language, Language::En);

        drop(ui);
        handle.join().unwrap();
    }
}
