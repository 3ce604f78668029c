//! Realtime notification client.
//!
//! A [`NotificationClient`] runs in one of two modes fixed at construction:
//!
//! - **mock**: no I/O. Reports `Connected` after a delay and answers every
//!   `send_message` with a synthesized reply event.
//! - **live**: a Socket.IO connection authenticated with the session token,
//!   reached through a [`TransportConnector`].
//!
//! In both modes `send_message` calls made while not connected are queued
//! and flushed in FIFO order once the connection is up. Connection problems
//! are reported through [`ConnectionState`], not as errors.

pub mod client;
pub mod socketio;
#[cfg(any(test, feature = "test-utils"))]
pub mod testing;
pub mod transport;

pub use client::{
    ConnectionState, MOCK_SENDER_ID, NotificationClient, RealtimeEvent, SendOutcome,
};
pub use socketio::SocketIoConnector;
pub use transport::{RealtimeError, RealtimeTransport, TransportConnector, TransportEvent};

/// Emitted event names.
pub mod events {
    pub const SEND_MESSAGE: &str = "send_message";
    pub const JOIN_CONVERSATION: &str = "join_conversation";
    pub const MARK_READ: &str = "mark_read";

    pub const CONNECTED: &str = "connected";
    pub const NOTIFICATION: &str = "notification";
    pub const MESSAGE: &str = "message";
}
