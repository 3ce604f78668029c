use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex as StdMutex};

use chrono::Utc;
use serde_json::{Value, json};
use tokio::sync::{Mutex, broadcast, mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;
use validator::Validate;

use swimdesk_config::RealtimeConfig;
use swimdesk_core::{Language, MessageKey};
use swimdesk_models::OutgoingMessage;

use super::events;
use super::socketio::SocketIoConnector;
use super::transport::{RealtimeError, RealtimeTransport, TransportConnector, TransportEvent};

const EVENT_CAPACITY: usize = 64;

/// Sender id on replies synthesized in mock mode.
pub const MOCK_SENDER_ID: &str = "mock-assistant";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionState {
    /// `init` not called yet, or the client was closed.
    Idle,
    Connecting,
    Connected,
    Disconnected,
    /// The server rejected the token. The user should log in again.
    TokenExpired(String),
    /// Any other connection failure. Retrying may help.
    ConnectionError(String),
}

impl ConnectionState {
    pub fn is_connected(&self) -> bool {
        matches!(self, ConnectionState::Connected)
    }
}

/// Events fanned out to subscribers.
#[derive(Debug, Clone, PartialEq)]
pub enum RealtimeEvent {
    Notification(Value),
    Message(Value),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    Sent,
    /// Held until the next successful connect.
    Queued,
}

enum Mode {
    Mock,
    Live(Arc<dyn TransportConnector>),
}

struct Outgoing {
    event: &'static str,
    payload: Value,
}

#[derive(Default)]
struct Connection {
    transport: Option<Arc<dyn RealtimeTransport>>,
    connected: bool,
    queue: VecDeque<Outgoing>,
}

struct Inner {
    config: RealtimeConfig,
    language: Language,
    mode: Mode,
    state: watch::Sender<ConnectionState>,
    events: broadcast::Sender<RealtimeEvent>,
    /// Sends and queue flushes hold this lock, which keeps flush order FIFO.
    connection: Mutex<Connection>,
    generation: AtomicU64,
    tasks: StdMutex<Vec<JoinHandle<()>>>,
}

/// Notification socket client. Cheap to clone; clones share one connection.
#[derive(Clone)]
pub struct NotificationClient {
    inner: Arc<Inner>,
}

impl std::fmt::Debug for NotificationClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationClient")
            .field("mock", &self.is_mock())
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}

impl NotificationClient {
    /// Mock mode when configured or when no server URL is set, live otherwise.
    pub fn new(config: RealtimeConfig, language: Language) -> Self {
        if config.mock || config.url().is_none() {
            Self::mock(config, language)
        } else {
            let connector = Arc::new(SocketIoConnector::new(&config));
            Self::with_connector(config, language, connector)
        }
    }

    pub fn mock(config: RealtimeConfig, language: Language) -> Self {
        Self::build(config, language, Mode::Mock)
    }

    /// Live mode over `connector`.
    pub fn with_connector(
        config: RealtimeConfig,
        language: Language,
        connector: Arc<dyn TransportConnector>,
    ) -> Self {
        Self::build(config, language, Mode::Live(connector))
    }

    fn build(config: RealtimeConfig, language: Language, mode: Mode) -> Self {
        let (state, _) = watch::channel(ConnectionState::Idle);
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            inner: Arc::new(Inner {
                config,
                language,
                mode,
                state,
                events,
                connection: Mutex::new(Connection::default()),
                generation: AtomicU64::new(0),
                tasks: StdMutex::new(Vec::new()),
            }),
        }
    }

    pub fn is_mock(&self) -> bool {
        matches!(self.inner.mode, Mode::Mock)
    }

    pub fn state(&self) -> ConnectionState {
        self.inner.state.borrow().clone()
    }

    pub fn watch_state(&self) -> watch::Receiver<ConnectionState> {
        self.inner.state.subscribe()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<RealtimeEvent> {
        self.inner.events.subscribe()
    }

    pub async fn queued(&self) -> usize {
        self.inner.connection.lock().await.queue.len()
    }

    /// Opens a connection for `token`, replacing any previous one.
    ///
    /// Returns immediately; progress is reported through [`Self::watch_state`].
    #[instrument(skip_all, fields(mock = self.is_mock()))]
    pub async fn init(&self, token: &str) {
        let generation = self.teardown().await;
        self.inner.set_state(ConnectionState::Connecting);

        let task = match &self.inner.mode {
            Mode::Mock => {
                let inner = self.inner.clone();
                tokio::spawn(async move {
                    tokio::time::sleep(inner.config.mock_connect_delay()).await;
                    if inner.is_current(generation) {
                        inner.on_connected(generation).await;
                    }
                })
            }
            Mode::Live(connector) => {
                let Some(url) = self.inner.config.url() else {
                    warn!("No socket server URL configured");
                    self.inner.set_state(ConnectionState::ConnectionError(
                        self.inner.text(MessageKey::SocketUnavailable),
                    ));
                    return;
                };
                let inner = self.inner.clone();
                let connector = connector.clone();
                let token = token.to_string();
                tokio::spawn(async move {
                    inner.run_live(connector, url, token, generation).await;
                })
            }
        };

        self.inner.track(task);
    }

    /// Sends a chat message, or queues it while not connected.
    ///
    /// # Errors
    ///
    /// Only validation failures. Transport problems queue the message.
    #[instrument(skip_all, fields(conversation.id = %message.conversation_id))]
    pub async fn send_message(&self, message: OutgoingMessage) -> Result<SendOutcome, RealtimeError> {
        message.validate()?;
        let payload = serde_json::to_value(&message)
            .map_err(|e| RealtimeError::Validation(e.to_string()))?;

        let mut connection = self.inner.connection.lock().await;
        if !connection.connected {
            debug!(queued = connection.queue.len() + 1, "Not connected, queueing message");
            connection.queue.push_back(Outgoing {
                event: events::SEND_MESSAGE,
                payload,
            });
            return Ok(SendOutcome::Queued);
        }

        match self.inner.deliver(&connection, events::SEND_MESSAGE, payload.clone()).await {
            Ok(()) => Ok(SendOutcome::Sent),
            Err(e) => {
                warn!(error = %e, "Send failed, queueing message");
                connection.queue.push_back(Outgoing {
                    event: events::SEND_MESSAGE,
                    payload,
                });
                Ok(SendOutcome::Queued)
            }
        }
    }

    pub async fn join_conversation(&self, conversation_id: &str) -> Result<(), RealtimeError> {
        self.emit_now(
            events::JOIN_CONVERSATION,
            json!({ "conversation_id": conversation_id }),
        )
        .await
    }

    pub async fn mark_read(
        &self,
        conversation_id: &str,
        message_ids: &[String],
    ) -> Result<(), RealtimeError> {
        self.emit_now(
            events::MARK_READ,
            json!({ "conversation_id": conversation_id, "message_ids": message_ids }),
        )
        .await
    }

    /// Closes the connection and drops queued messages.
    pub async fn close(&self) {
        self.teardown().await;
        self.inner.connection.lock().await.queue.clear();
        self.inner.set_state(ConnectionState::Idle);
        info!("Notification client closed");
    }

    async fn emit_now(&self, event: &'static str, payload: Value) -> Result<(), RealtimeError> {
        let connection = self.inner.connection.lock().await;
        if !connection.connected {
            return Err(RealtimeError::NotConnected(
                self.inner.text(MessageKey::NotConnected),
            ));
        }
        self.inner.deliver(&connection, event, payload).await
    }

    /// Invalidates running tasks and closes the transport. Returns the new generation.
    async fn teardown(&self) -> u64 {
        let generation = self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1;

        if let Ok(mut tasks) = self.inner.tasks.lock() {
            for task in tasks.drain(..) {
                task.abort();
            }
        }

        let transport = {
            let mut connection = self.inner.connection.lock().await;
            connection.connected = false;
            connection.transport.take()
        };
        if let Some(transport) = transport
            && let Err(e) = transport.disconnect().await
        {
            debug!(error = %e, "Error while closing previous connection");
        }

        generation
    }
}

impl Inner {
    fn text(&self, key: MessageKey) -> String {
        self.language.text(key).to_string()
    }

    fn set_state(&self, state: ConnectionState) {
        debug!(?state, "Connection state changed");
        self.state.send_replace(state);
    }

    fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }

    fn track(&self, task: JoinHandle<()>) {
        if let Ok(mut tasks) = self.tasks.lock() {
            tasks.retain(|t| !t.is_finished());
            tasks.push(task);
        }
    }

    async fn run_live(
        self: Arc<Self>,
        connector: Arc<dyn TransportConnector>,
        url: String,
        token: String,
        generation: u64,
    ) {
        let attempts = self.config.reconnect_attempts.max(1);

        for attempt in 1..=attempts {
            let (tx, mut rx) = mpsc::unbounded_channel();

            match connector.connect(&url, &token, tx).await {
                Ok(transport) => {
                    if !self.is_current(generation) {
                        let _ = transport.disconnect().await;
                        return;
                    }
                    self.connection.lock().await.transport = Some(Arc::from(transport));

                    while let Some(event) = rx.recv().await {
                        if !self.is_current(generation) {
                            return;
                        }
                        self.handle(event, generation).await;
                    }
                    return;
                }
                Err(e) => {
                    let reason = e.to_string();
                    if is_auth_failure(&reason) {
                        warn!(reason = %reason, "Socket rejected the token");
                        self.set_state(ConnectionState::TokenExpired(
                            self.text(MessageKey::SessionExpired),
                        ));
                        return;
                    }

                    warn!(attempt, attempts, reason = %reason, "Socket connection failed");
                    if attempt < attempts {
                        tokio::time::sleep(self.config.reconnect_delay()).await;
                        if !self.is_current(generation) {
                            return;
                        }
                    }
                }
            }
        }

        self.set_state(ConnectionState::ConnectionError(
            self.text(MessageKey::SocketUnavailable),
        ));
    }

    async fn handle(self: &Arc<Self>, event: TransportEvent, generation: u64) {
        match event {
            TransportEvent::Connected => self.on_connected(generation).await,
            TransportEvent::Disconnected(reason) => {
                info!(reason = %reason, "Socket disconnected");
                self.connection.lock().await.connected = false;
                self.set_state(ConnectionState::Disconnected);
            }
            TransportEvent::ConnectError(reason) => {
                self.connection.lock().await.connected = false;
                if is_auth_failure(&reason) {
                    warn!(reason = %reason, "Socket rejected the token");
                    self.set_state(ConnectionState::TokenExpired(
                        self.text(MessageKey::SessionExpired),
                    ));
                } else {
                    warn!(reason = %reason, "Socket connection error");
                    self.set_state(ConnectionState::ConnectionError(
                        self.text(MessageKey::SocketUnavailable),
                    ));
                }
            }
            TransportEvent::Notification(payload) => self.publish(RealtimeEvent::Notification(payload)),
            TransportEvent::Message(payload) => self.publish(RealtimeEvent::Message(payload)),
        }
    }

    /// Marks the connection up and flushes the queue in order.
    async fn on_connected(self: &Arc<Self>, generation: u64) {
        let mut connection = self.connection.lock().await;
        if !self.is_current(generation) {
            return;
        }
        connection.connected = true;

        let pending = connection.queue.len();
        while let Some(outgoing) = connection.queue.pop_front() {
            if let Err(e) = self
                .deliver(&connection, outgoing.event, outgoing.payload.clone())
                .await
            {
                warn!(error = %e, remaining = connection.queue.len() + 1, "Flush interrupted");
                connection.queue.push_front(outgoing);
                break;
            }
        }
        if pending > 0 {
            info!(flushed = pending - connection.queue.len(), "Queued messages flushed");
        }
        drop(connection);

        self.set_state(ConnectionState::Connected);
    }

    /// Emits on the live transport, or synthesizes a reply in mock mode.
    async fn deliver(
        self: &Arc<Self>,
        connection: &Connection,
        event: &'static str,
        payload: Value,
    ) -> Result<(), RealtimeError> {
        match &self.mode {
            Mode::Mock => {
                if event == events::SEND_MESSAGE {
                    self.schedule_mock_reply(payload);
                }
                Ok(())
            }
            Mode::Live(_) => match &connection.transport {
                Some(transport) => transport.emit(event, payload).await,
                None => Err(RealtimeError::NotConnected(
                    self.text(MessageKey::NotConnected),
                )),
            },
        }
    }

    fn schedule_mock_reply(self: &Arc<Self>, sent: Value) {
        let inner = self.clone();
        let generation = self.generation.load(Ordering::SeqCst);
        let task = tokio::spawn(async move {
            tokio::time::sleep(inner.config.mock_reply_delay()).await;
            if inner.is_current(generation) {
                inner.publish(RealtimeEvent::Message(mock_reply(&sent)));
            }
        });
        self.track(task);
    }

    fn publish(&self, event: RealtimeEvent) {
        if self.events.send(event).is_err() {
            debug!("No subscribers for realtime event");
        }
    }
}

fn mock_reply(sent: &Value) -> Value {
    let content = sent.get("content").and_then(Value::as_str).unwrap_or_default();
    json!({
        "_id": Uuid::new_v4().to_string(),
        "conversation_id": sent.get("conversation_id").cloned().unwrap_or(Value::Null),
        "sender_id": MOCK_SENDER_ID,
        "content": format!("Received: {content}"),
        "created_at": Utc::now().to_rfc3339(),
    })
}

/// Whether a connect error reads like a rejected credential.
pub fn is_auth_failure(reason: &str) -> bool {
    let reason = reason.to_ascii_lowercase();
    ["auth", "token", "unauthorized", "jwt", "expired"]
        .iter()
        .any(|needle| reason.contains(needle))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_auth_failure() {
        assert!(is_auth_failure("unauthorized token"));
        assert!(is_auth_failure("JWT expired"));
        assert!(is_auth_failure("Authentication error"));
        assert!(!is_auth_failure("connection refused"));
        assert!(!is_auth_failure("timeout"));
    }

    #[test]
    fn test_mock_reply_shape() {
        let reply = mock_reply(&json!({ "conversation_id": "c1", "content": "hello" }));
        assert_eq!(reply["conversation_id"], "c1");
        assert_eq!(reply["sender_id"], MOCK_SENDER_ID);
        assert_eq!(reply["content"], "Received: hello");
        assert!(Uuid::parse_str(reply["_id"].as_str().unwrap()).is_ok());
    }

    #[tokio::test]
    async fn test_send_before_init_is_queued() {
        let client = NotificationClient::mock(RealtimeConfig::default(), Language::En);
        let outcome = client
            .send_message(OutgoingMessage::new("c1", "hi"))
            .await
            .unwrap();
        assert_eq!(outcome, SendOutcome::Queued);
        assert_eq!(client.queued().await, 1);
        assert_eq!(client.state(), ConnectionState::Idle);
    }

    #[tokio::test]
    async fn test_invalid_message_rejected() {
        let client = NotificationClient::mock(RealtimeConfig::default(), Language::En);
        let result = client.send_message(OutgoingMessage::new("c1", "")).await;
        assert!(matches!(result, Err(RealtimeError::Validation(_))));
        assert_eq!(client.queued().await, 0);
    }

    #[tokio::test]
    async fn test_join_requires_connection() {
        let client = NotificationClient::mock(RealtimeConfig::default(), Language::Th);
        let err = client.join_conversation("c1").await.unwrap_err();
        assert_eq!(err.to_string(), Language::Th.text(MessageKey::NotConnected));
    }
}
