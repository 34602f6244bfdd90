//! The UI-side state container.
//!
//! `AppStore` is created once by the composition root and owns the durable
//! storage. Every update goes through [`AppStore::dispatch`], which writes the
//! changed slice to storage, runs the pure reducer and then notifies
//! subscribers, in that order.

use crate::error::StorageError;
use crate::i18n::Language;
use crate::state::{reduce, AppState, AuthState, StoreAction, Theme, ThemeState, User};
use crate::storage::{Storage, STORAGE_KEY_LANGUAGE, STORAGE_KEY_THEME, STORAGE_KEY_USER};

pub type SubscriptionId = u64;

type Listener = Box<dyn FnMut(&AppState)>;

pub struct AppStore {
    state: AppState,
    storage: Box<dyn Storage>,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_id: SubscriptionId,
}

impl AppStore {
    /// Hydrate state from storage. Missing or invalid entries fall back to
    /// logged out / light theme.
    pub fn load(storage: Box<dyn Storage>) -> Self {
        let user = storage.get_item(STORAGE_KEY_USER).and_then(|raw| {
            match serde_json::from_str::<User>(&raw) {
                Ok(user) => Some(user),
                Err(e) => {
                    tracing::warn!("ignoring persisted user entry: {}", e);
                    None
                }
            }
        });
        let theme = storage
            .get_item(STORAGE_KEY_THEME)
            .and_then(|raw| {
                let parsed = Theme::parse(&raw);
                if parsed.is_none() {
                    tracing::warn!("ignoring persisted theme '{}'", raw);
                }
                parsed
            })
            .unwrap_or_default();

        Self {
            state: AppState {
                auth: AuthState::with_user(user),
                theme: ThemeState { theme },
            },
            storage,
            listeners: Vec::new(),
            next_id: 0,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Persist, then commit, then notify.
    ///
    /// A failed write leaves both state and storage as they were, and no
    /// subscriber runs.
    pub fn dispatch(&mut self, action: StoreAction) -> Result<(), StorageError> {
        if let Err(e) = self.persist(&action) {
            tracing::warn!("dropping {:?}, storage write failed: {}", action, e);
            return Err(e);
        }
        reduce(&mut self.state, &action);
        tracing::debug!("store committed {:?}", action);

        for (_, listener) in self.listeners.iter_mut() {
            listener(&self.state);
        }
        Ok(())
    }

    fn persist(&mut self, action: &StoreAction) -> Result<(), StorageError> {
        match action {
            StoreAction::Login(user) => {
                let raw = serde_json::to_string(user)?;
                self.storage.set_item(STORAGE_KEY_USER, &raw)
            }
            StoreAction::Logout => self.storage.remove_item(STORAGE_KEY_USER),
            StoreAction::SetTheme(theme) => self.storage.set_item(STORAGE_KEY_THEME, theme.as_str()),
        }
    }

    /// Register a callback fired after every committed dispatch.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&AppState) + 'static,
    {
        let id = self.next_id;
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    /// The persisted language preference, `en` when absent or unknown.
    pub fn saved_language(&self) -> Language {
        self.storage
            .get_item(STORAGE_KEY_LANGUAGE)
            .and_then(|raw| Language::parse(&raw))
            .unwrap_or_default()
    }

    pub fn persist_language(&mut self, language: Language) {
        if let Err(e) = self.storage.set_item(STORAGE_KEY_LANGUAGE, language.code()) {
            tracing::warn!("failed to persist language {}: {}", language, e);
        }
    }

    pub fn storage(&self) -> &dyn Storage {
        self.storage.as_ref()
    }
}
