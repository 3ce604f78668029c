use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::mpsc::UnboundedSender;

/// Connection-level events delivered by a transport.
#[derive(Debug, Clone, PartialEq)]
pub enum TransportEvent {
    /// `connect` or the server's `connected` acknowledgement.
    Connected,
    Disconnected(String),
    ConnectError(String),
    Notification(Value),
    Message(Value),
}

#[derive(Debug, thiserror::Error)]
pub enum RealtimeError {
    #[error("{0}")]
    NotConnected(String),

    #[error("{0}")]
    Validation(String),

    #[error("Socket transport error: {0}")]
    Transport(String),
}

impl From<validator::ValidationErrors> for RealtimeError {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self::Validation(errors.to_string())
    }
}

/// An open connection.
#[async_trait]
pub trait RealtimeTransport: Send + Sync {
    async fn emit(&self, event: &str, payload: Value) -> Result<(), RealtimeError>;

    async fn disconnect(&self) -> Result<(), RealtimeError>;
}

/// Opens connections. Events for the new connection go to `events`.
#[async_trait]
pub trait TransportConnector: Send + Sync {
    /// # Errors
    ///
    /// The error text is inspected to tell authentication failures apart
    /// from network failures.
    async fn connect(
        &self,
        url: &str,
        token: &str,
        events: UnboundedSender<TransportEvent>,
    ) -> Result<Box<dyn RealtimeTransport>, RealtimeError>;
}
