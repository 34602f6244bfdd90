//! Host-side language synchronisation state machine.
//!
//! The host's locale is its own ephemeral copy: it starts at English on every
//! launch and only learns the UI's remembered language through the
//! `language:init` notification.
//!
//! Concurrent requests are sequenced: every request takes a ticket, and only
//! the most recently submitted ticket may commit. A slower, older locale change
//! finishing late is discarded instead of overwriting a newer one.

use crate::i18n::Language;
use crate::protocol::LanguageRequestKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncState {
    /// Locale set, menu built.
    Idle,
    /// A locale change for `language` is in flight.
    Applying { language: Language, ticket: u64 },
    /// The newest locale change failed. Locale and menu are unchanged.
    Failed { language: Language, reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    pub seq: u64,
    pub language: Language,
    pub kind: LanguageRequestKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    /// The locale is now `language`; the menu must be rebuilt.
    Applied {
        language: Language,
        kind: LanguageRequestKind,
    },
    /// A newer request was submitted meanwhile; nothing changes.
    Superseded,
    Failed { reason: String },
}

#[derive(Debug, Clone)]
pub struct LocaleSync {
    active: Language,
    state: SyncState,
    next_seq: u64,
    latest: Option<u64>,
}

impl Default for LocaleSync {
    fn default() -> Self {
        Self::new(Language::default())
    }
}

impl LocaleSync {
    pub fn new(active: Language) -> Self {
        Self {
            active,
            state: SyncState::Idle,
            next_seq: 1,
            latest: None,
        }
    }

    pub fn active(&self) -> Language {
        self.active
    }

    pub fn state(&self) -> &SyncState {
        &self.state
    }

    /// `Idle`/`Failed` → `Applying`, or a newer `Applying`.
    pub fn begin(&mut self, language: Language, kind: LanguageRequestKind) -> Ticket {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.latest = Some(seq);
        self.state = SyncState::Applying {
            language,
            ticket: seq,
        };
        Ticket {
            seq,
            language,
            kind,
        }
    }

    /// Record the outcome of the async operation behind `ticket`.
    pub fn finish(&mut self, ticket: Ticket, outcome: Result<(), String>) -> Completion {
        if self.latest != Some(ticket.seq) {
            return Completion::Superseded;
        }

        match outcome {
            Ok(()) => {
                self.active = ticket.language;
                self.state = SyncState::Idle;
                Completion::Applied {
                    language: ticket.language,
                    kind: ticket.kind,
                }
            }
            Err(reason) => {
                self.state = SyncState::Failed {
                    language: ticket.language,
                    reason: reason.clone(),
                };
                Completion::Failed { reason }
            }
        }
    }
}
