//! Wire shape of the messaging channel between the UI and the host.
//!
//! Every message is `{ "action": <string>, "value": <any> }`. The host only
//! understands the three actions below; anything else decodes to `None`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::i18n::Language;

/// The one named channel both sides talk on.
pub const IPC_CHANNEL: &str = "ipc-example";

pub const ACTION_PING_PONG: &str = "ping-pong";
pub const ACTION_LANGUAGE_INIT: &str = "language:init";
pub const ACTION_LANGUAGE_CHANGE: &str = "language:change";

/// Channel payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IpcMessage {
    pub action: String,
    #[serde(default)]
    pub value: Value,
}

impl IpcMessage {
    pub fn new(action: &str, value: impl Into<Value>) -> Self {
        Self {
            action: action.to_string(),
            value: value.into(),
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| format!("{{\"action\":{:?}}}", self.action))
    }
}

/// Which language notification the host received.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguageRequestKind {
    Init,
    Change,
}

impl LanguageRequestKind {
    pub fn action(self) -> &'static str {
        match self {
            LanguageRequestKind::Init => ACTION_LANGUAGE_INIT,
            LanguageRequestKind::Change => ACTION_LANGUAGE_CHANGE,
        }
    }

    /// Past-tense verb used in the host's log line.
    pub fn verb(self) -> &'static str {
        match self {
            LanguageRequestKind::Init => "initialized",
            LanguageRequestKind::Change => "changed",
        }
    }
}

/// Requests the host acts on.
#[derive(Debug, Clone, PartialEq)]
pub enum HostRequest {
    /// Test message, answered with exactly one pong.
    PingPong(Value),
    Language {
        kind: LanguageRequestKind,
        language: Language,
    },
}

impl HostRequest {
    /// Decode a channel message. Unknown actions and unsupported language
    /// codes yield `None`.
    pub fn decode(message: &IpcMessage) -> Option<HostRequest> {
        let kind = match message.action.as_str() {
            ACTION_PING_PONG => return Some(HostRequest::PingPong(message.value.clone())),
            ACTION_LANGUAGE_INIT => LanguageRequestKind::Init,
            ACTION_LANGUAGE_CHANGE => LanguageRequestKind::Change,
            _ => return None,
        };
        let language = message.value.as_str().and_then(Language::parse)?;
        Some(HostRequest::Language { kind, language })
    }
}

/// Message the UI sends for a language notification.
pub fn language_message(kind: LanguageRequestKind, language: Language) -> IpcMessage {
    IpcMessage::new(kind.action(), language.code())
}

/// The startup ping.
pub fn ping_message() -> IpcMessage {
    IpcMessage::new(ACTION_PING_PONG, vec![Value::from("ping")])
}

/// Formats the host's console line for a test message.
pub fn ipc_test_line(value: &impl Serialize) -> String {
    let json = serde_json::to_string(value).unwrap_or_else(|_| "null".to_string());
    format!("IPC test: {}", json)
}

/// The host's single reply to a ping.
pub fn pong_message() -> IpcMessage {
    IpcMessage::new(ACTION_PING_PONG, ipc_test_line(&"pong"))
}
