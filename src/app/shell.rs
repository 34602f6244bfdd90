//! UI-side session state, independent of egui.
//!
//! Owns the store, the UI translator, the navigator and the UI end of the
//! channel. Everything a page action does goes through here, which keeps the
//! startup handshake and the language toggle testable without a window.

use std::sync::{Arc, Mutex};

use crate::i18n::{CatalogSource, Language, Translator};
use crate::ipc::IpcEndpoint;
use crate::protocol::{language_message, ping_message, LanguageRequestKind};
use crate::routes::{Navigator, Route};
use crate::state::{AppState, StoreAction, User};
use crate::store::AppStore;

pub struct Shell {
    store: AppStore,
    translator: Translator,
    /// Locale the user chose; the catalog may lag behind it after a failed load.
    language: Language,
    navigator: Navigator,
    ipc: IpcEndpoint,
    catalogs: Arc<dyn CatalogSource>,
    last_pong: Arc<Mutex<Option<String>>>,
}

impl Shell {
    /// Hydrate the UI locale from storage and run the startup handshake:
    /// one `language:init`, then the ping whose reply is captured once.
    pub fn start(mut ipc: IpcEndpoint, store: AppStore, catalogs: Arc<dyn CatalogSource>) -> Self {
        let language = store.saved_language();
        let translator = Translator::load(catalogs.as_ref(), language);
        tracing::info!("ui starting with locale {}", language);

        ipc.send_message(language_message(LanguageRequestKind::Init, language));

        let last_pong = Arc::new(Mutex::new(None));
        let sink = last_pong.clone();
        ipc.once(move |reply| {
            let text = match reply.value.as_str() {
                Some(text) => text.to_string(),
                None => reply.value.to_string(),
            };
            tracing::info!("{}", text);
            if let Ok(mut slot) = sink.lock() {
                *slot = Some(text);
            }
        });
        ipc.send_message(ping_message());

        Self {
            store,
            translator,
            language,
            navigator: Navigator::default(),
            ipc,
            catalogs,
            last_pong,
        }
    }

    /// Deliver host messages queued since the last frame.
    pub fn pump(&mut self) -> usize {
        self.ipc.dispatch_pending()
    }

    pub fn state(&self) -> &AppState {
        self.store.state()
    }

    pub fn store_mut(&mut self) -> &mut AppStore {
        &mut self.store
    }

    pub fn translator(&self) -> &Translator {
        &self.translator
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn path(&self) -> &str {
        self.navigator.path()
    }

    pub fn navigate(&mut self, path: &str) {
        self.navigator.navigate(path);
    }

    /// The page to show for the current auth status and location.
    pub fn route(&mut self) -> Route {
        self.navigator.resolve(self.store.state().auth.is_authenticated())
    }

    pub fn last_pong(&self) -> Option<String> {
        self.last_pong.lock().ok().and_then(|slot| slot.clone())
    }

    /// Navigation only follows a committed dispatch.
    pub fn login(&mut self, user: User) -> bool {
        let committed = self.store.dispatch(StoreAction::Login(user)).is_ok();
        if committed {
            self.navigator.navigate(Route::Dashboard.path());
        }
        committed
    }

    pub fn logout(&mut self) -> bool {
        let committed = self.store.dispatch(StoreAction::Logout).is_ok();
        if committed {
            self.navigator.navigate(Route::Login.path());
        }
        committed
    }

    pub fn toggle_theme(&mut self) -> bool {
        let next = self.store.state().theme.theme.toggled();
        self.store.dispatch(StoreAction::SetTheme(next)).is_ok()
    }

    /// Switch the UI locale, remember it, and tell the host.
    ///
    /// The notification is sent even if the UI catalog failed to load; the
    /// host keeps its own copy and may still succeed. The next toggle starts
    /// from the chosen locale, not the catalog still on screen.
    pub fn toggle_language(&mut self) -> Language {
        let next = self.language.toggled();
        self.language = next;
        match self.catalogs.load(next) {
            Ok(catalog) => self.translator.set_catalog(catalog),
            Err(e) => tracing::error!("ui catalog for {} unavailable: {}", next, e),
        }
        self.store.persist_language(next);
        self.ipc
            .send_message(language_message(LanguageRequestKind::Change, next));
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::I18nError;
    use crate::i18n::{BuiltinCatalogs, Catalog};
    use crate::ipc::{ipc_pair, Poll};
    use crate::protocol::{pong_message, IpcMessage, IPC_CHANNEL};
    use crate::storage::{MemoryStorage, Storage, STORAGE_KEY_LANGUAGE};

    fn drain(endpoint: &IpcEndpoint) -> Vec<IpcMessage> {
        let mut out = Vec::new();
        while let Poll::Message(msg) = endpoint.poll() {
            out.push(msg);
        }
        out
    }

    fn shell_with(storage: MemoryStorage) -> (Shell, IpcEndpoint) {
        let (ui, host) = ipc_pair(IPC_CHANNEL);
        let shell = Shell::start(ui, AppStore::load(Box::new(storage)), Arc::new(BuiltinCatalogs));
        (shell, host)
    }

    #[test]
    fn test_start_sends_init_then_ping() {
        let mut storage = MemoryStorage::new();
        storage.set_item(STORAGE_KEY_LANGUAGE, "zh").unwrap();
        let (shell, host) = shell_with(storage);

        assert_eq!(shell.language(), Language::Zh);
        assert_eq!(
            drain(&host),
            vec![
                language_message(LanguageRequestKind::Init, Language::Zh),
                ping_message()
            ]
        );
    }

    #[test]
    fn test_pong_captured_once() {
        let (mut shell, host) = shell_with(MemoryStorage::new());
        host.send_message(pong_message());
        host.send_message(IpcMessage::new("ping-pong", "second"));
        assert_eq!(shell.pump(), 2);
        assert_eq!(shell.last_pong().as_deref(), Some("IPC test: \"pong\""));
    }

    #[test]
    fn test_toggle_language_persists_and_notifies() {
        let (mut shell, host) = shell_with(MemoryStorage::new());
        drain(&host);

        assert_eq!(shell.toggle_language(), Language::Zh);
        assert_eq!(shell.translator().t("login.submit"), "登录");
        assert_eq!(
            shell.store_mut().storage().get_item(STORAGE_KEY_LANGUAGE).as_deref(),
            Some("zh")
        );
        assert_eq!(
            drain(&host),
            vec![language_message(LanguageRequestKind::Change, Language::Zh)]
        );
    }

    #[test]
    fn test_login_logout_navigation() {
        let (mut shell, _host) = shell_with(MemoryStorage::new());
        assert_eq!(shell.route(), Route::Login);

        shell.login(User::new("alice"));
        assert_eq!(shell.route(), Route::Dashboard);
        assert_eq!(shell.path(), "/dashboard");

        shell.logout();
        assert_eq!(shell.route(), Route::Login);
        assert_eq!(shell.path(), "/login");
    }

    /// Only the English catalog is available.
    struct EnglishOnly;

    impl CatalogSource for EnglishOnly {
        fn load(&self, language: Language) -> Result<Catalog, I18nError> {
            match language {
                Language::En => BuiltinCatalogs.load(language),
                Language::Zh => Err(I18nError::MalformedCatalog {
                    language: "zh",
                    reason: "missing".into(),
                }),
            }
        }
    }

    #[test]
    fn test_toggle_follows_chosen_language_when_catalog_fails() {
        let (ui, host) = ipc_pair(IPC_CHANNEL);
        let mut shell = Shell::start(
            ui,
            AppStore::load(Box::new(MemoryStorage::new())),
            Arc::new(EnglishOnly),
        );
        drain(&host);

        assert_eq!(shell.toggle_language(), Language::Zh);
        assert_eq!(shell.language(), Language::Zh);
        assert_eq!(shell.translator().language(), Language::En);

        assert_eq!(shell.toggle_language(), Language::En);
        assert_eq!(shell.language(), Language::En);
        assert_eq!(
            shell.store_mut().storage().get_item(STORAGE_KEY_LANGUAGE).as_deref(),
            Some("en")
        );
        assert_eq!(
            drain(&host),
            vec![
                language_message(LanguageRequestKind::Change, Language::Zh),
                language_message(LanguageRequestKind::Change, Language::En),
            ]
        );
    }

    #[test]
    fn test_failed_logout_stays_on_dashboard() {
        use crate::error::StorageError;

        /// Accepts writes, refuses removals.
        struct Frozen(MemoryStorage);
        impl Storage for Frozen {
            fn get_item(&self, key: &str) -> Option<String> {
                self.0.get_item(key)
            }
            fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
                self.0.set_item(key, value)
            }
            fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
                Err(StorageError::Write {
                    path: key.into(),
                    source: std::io::Error::other("frozen"),
                })
            }
        }

        let (ui, _host) = ipc_pair(IPC_CHANNEL);
        let mut shell = Shell::start(
            ui,
            AppStore::load(Box::new(Frozen(MemoryStorage::new()))),
            Arc::new(BuiltinCatalogs),
        );
        assert!(shell.login(User::new("alice")));
        assert!(!shell.logout());
        assert!(shell.state().auth.is_authenticated());
        assert_eq!(shell.path(), "/dashboard");
        assert_eq!(shell.route(), Route::Dashboard);
    }
}
