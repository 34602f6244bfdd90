//! The messaging channel.
//!
//! Two endpoints joined by a pair of unbounded crossbeam queues. Sending never
//! blocks and never reports failure to the caller; delivery is in send order.
//! Receivers poll: the UI drains once per frame, the host once per tick.

use crossbeam_channel::{unbounded, Receiver, Sender, TryRecvError};
use serde_json::Value;

use crate::protocol::IpcMessage;

#[derive(Debug, Clone)]
struct Packet {
    channel: String,
    message: IpcMessage,
}

type Handler = Box<dyn FnMut(&IpcMessage) + Send>;

struct Listener {
    handler: Handler,
    once: bool,
}

/// Result of a single non-blocking receive.
#[derive(Debug, Clone, PartialEq)]
pub enum Poll {
    Message(IpcMessage),
    Empty,
    /// The other side dropped its endpoint and nothing is left to read.
    Disconnected,
}

/// One side of the channel.
pub struct IpcEndpoint {
    channel: String,
    side: &'static str,
    tx: Sender<Packet>,
    rx: Receiver<Packet>,
    listeners: Vec<Listener>,
}

/// Create the UI and host ends of a named channel, in that order.
pub fn ipc_pair(channel: &str) -> (IpcEndpoint, IpcEndpoint) {
    let (to_host_tx, to_host_rx) = unbounded::<Packet>();
    let (to_ui_tx, to_ui_rx) = unbounded::<Packet>();

    let ui = IpcEndpoint {
        channel: channel.to_string(),
        side: "ui",
        tx: to_host_tx,
        rx: to_ui_rx,
        listeners: Vec::new(),
    };
    let host = IpcEndpoint {
        channel: channel.to_string(),
        side: "host",
        tx: to_ui_tx,
        rx: to_host_rx,
        listeners: Vec::new(),
    };
    (ui, host)
}

impl IpcEndpoint {
    /// Fire-and-forget send of `{action, value}`.
    pub fn send(&self, action: &str, value: impl Into<Value>) {
        self.send_message(IpcMessage::new(action, value));
    }

    pub fn send_message(&self, message: IpcMessage) {
        self.send_on(&self.channel, message);
    }

    fn send_on(&self, channel: &str, message: IpcMessage) {
        tracing::trace!("[{}] send on {}: {}", self.side, channel, message.to_json());
        let packet = Packet {
            channel: channel.to_string(),
            message,
        };
        if let Err(e) = self.tx.send(packet) {
            tracing::warn!(
                "[{}] peer is gone, dropping '{}' message",
                self.side,
                e.into_inner().message.action
            );
        }
    }

    /// Standing listener, called for every inbound message.
    pub fn on_receive<F>(&mut self, handler: F)
    where
        F: FnMut(&IpcMessage) + Send + 'static,
    {
        self.listeners.push(Listener {
            handler: Box::new(handler),
            once: false,
        });
    }

    /// Listener removed after the first message it sees.
    pub fn once<F>(&mut self, handler: F)
    where
        F: FnMut(&IpcMessage) + Send + 'static,
    {
        self.listeners.push(Listener {
            handler: Box::new(handler),
            once: true,
        });
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Receive one message for this channel without blocking.
    ///
    /// Packets addressed to another channel name are skipped.
    pub fn poll(&self) -> Poll {
        loop {
            match self.rx.try_recv() {
                Ok(packet) if packet.channel == self.channel => {
                    return Poll::Message(packet.message)
                }
                Ok(packet) => {
                    tracing::debug!(
                        "[{}] ignoring message for channel '{}'",
                        self.side,
                        packet.channel
                    );
                }
                Err(TryRecvError::Empty) => return Poll::Empty,
                Err(TryRecvError::Disconnected) => return Poll::Disconnected,
            }
        }
    }

    /// Deliver every queued message to the listeners, in order.
    ///
    /// Returns the number of messages delivered.
    pub fn dispatch_pending(&mut self) -> usize {
        let mut delivered = 0;
        while let Poll::Message(message) = self.poll() {
            for listener in self.listeners.iter_mut() {
                (listener.handler)(&message);
            }
            self.listeners.retain(|listener| !listener.once);
            delivered += 1;
        }
        delivered
    }
}

#[cfg(test)]
impl IpcEndpoint {
    /// Inject a packet addressed to an arbitrary channel name.
    pub(crate) fn send_raw(&self, channel: &str, message: IpcMessage) {
        self.send_on(channel, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::IPC_CHANNEL;
    use std::sync::{Arc, Mutex};

    fn recorder() -> (Arc<Mutex<Vec<String>>>, impl FnMut(&IpcMessage) + Send + 'static) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        (seen, move |msg: &IpcMessage| {
            sink.lock().unwrap().push(msg.action.clone())
        })
    }

    #[test]
    fn test_messages_arrive_in_send_order() {
        let (ui, host) = ipc_pair(IPC_CHANNEL);
        ui.send("a", 1);
        ui.send("b", 2);
        ui.send("c", 3);

        let mut actions = Vec::new();
        while let Poll::Message(msg) = host.poll() {
            actions.push(msg.action);
        }
        assert_eq!(actions, vec!["a", "b", "c"]);
        assert_eq!(host.poll(), Poll::Empty);
    }

    #[test]
    fn test_listeners_and_once() {
        let (mut ui, host) = ipc_pair(IPC_CHANNEL);
        let (standing, standing_fn) = recorder();
        let (single, single_fn) = recorder();
        ui.on_receive(standing_fn);
        ui.once(single_fn);
        assert_eq!(ui.listener_count(), 2);

        host.send("first", Value::Null);
        host.send("second", Value::Null);
        assert_eq!(ui.dispatch_pending(), 2);

        assert_eq!(*standing.lock().unwrap(), vec!["first", "second"]);
        assert_eq!(*single.lock().unwrap(), vec!["first"]);
        assert_eq!(ui.listener_count(), 1);
    }

    #[test]
    fn test_other_channels_are_ignored() {
        let (ui, host) = ipc_pair(IPC_CHANNEL);
        ui.send_raw("elsewhere", IpcMessage::new("x", 0));
        ui.send("y", 0);
        assert_eq!(host.poll(), Poll::Message(IpcMessage::new("y", 0)));
        assert_eq!(host.poll(), Poll::Empty);
    }

    #[test]
    fn test_send_to_dropped_peer_is_silent() {
        let (ui, host) = ipc_pair(IPC_CHANNEL);
        drop(host);
        ui.send("anything", "value");
        assert_eq!(ui.poll(), Poll::Disconnected);
    }
}
