//! Socket.IO transport built on `rust_socketio`.

use async_trait::async_trait;
use futures_util::FutureExt;
use rust_socketio::asynchronous::{Client, ClientBuilder};
use rust_socketio::{Event, Payload};
use serde_json::{Value, json};
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info, instrument};

use swimdesk_config::RealtimeConfig;

use super::events;
use super::transport::{RealtimeError, RealtimeTransport, TransportConnector, TransportEvent};

/// Connects with `auth: { token }` in the handshake.
#[derive(Debug, Clone)]
pub struct SocketIoConnector {
    reconnect_attempts: u8,
    reconnect_delay_ms: u64,
}

impl SocketIoConnector {
    pub fn new(config: &RealtimeConfig) -> Self {
        Self {
            reconnect_attempts: config.reconnect_attempts,
            reconnect_delay_ms: config.reconnect_delay_ms,
        }
    }
}

#[async_trait]
impl TransportConnector for SocketIoConnector {
    #[instrument(skip(self, token, events_tx))]
    async fn connect(
        &self,
        url: &str,
        token: &str,
        events_tx: UnboundedSender<TransportEvent>,
    ) -> Result<Box<dyn RealtimeTransport>, RealtimeError> {
        let on_connect = events_tx.clone();
        let on_connected = events_tx.clone();
        let on_close = events_tx.clone();
        let on_error = events_tx.clone();
        let on_notification = events_tx.clone();
        let on_message = events_tx;

        let client = ClientBuilder::new(url)
            .auth(json!({ "token": token }))
            .reconnect(true)
            .reconnect_on_disconnect(true)
            .max_reconnect_attempts(self.reconnect_attempts)
            .reconnect_delay(self.reconnect_delay_ms, self.reconnect_delay_ms)
            .on(Event::Connect, move |_, _| {
                let tx = on_connect.clone();
                async move {
                    let _ = tx.send(TransportEvent::Connected);
                }
                .boxed()
            })
            .on(events::CONNECTED, move |_, _| {
                let tx = on_connected.clone();
                async move {
                    let _ = tx.send(TransportEvent::Connected);
                }
                .boxed()
            })
            .on(Event::Close, move |payload, _| {
                let tx = on_close.clone();
                async move {
                    let _ = tx.send(TransportEvent::Disconnected(payload_text(&payload)));
                }
                .boxed()
            })
            .on(Event::Error, move |payload, _| {
                let tx = on_error.clone();
                async move {
                    let _ = tx.send(TransportEvent::ConnectError(payload_text(&payload)));
                }
                .boxed()
            })
            .on(events::NOTIFICATION, move |payload, _| {
                let tx = on_notification.clone();
                async move {
                    let _ = tx.send(TransportEvent::Notification(payload_value(payload)));
                }
                .boxed()
            })
            .on(events::MESSAGE, move |payload, _| {
                let tx = on_message.clone();
                async move {
                    let _ = tx.send(TransportEvent::Message(payload_value(payload)));
                }
                .boxed()
            })
            .connect()
            .await
            .map_err(|e| RealtimeError::Transport(e.to_string()))?;

        info!("Socket connection opened");
        Ok(Box::new(SocketIoTransport { client }))
    }
}

struct SocketIoTransport {
    client: Client,
}

#[async_trait]
impl RealtimeTransport for SocketIoTransport {
    async fn emit(&self, event: &str, payload: Value) -> Result<(), RealtimeError> {
        debug!(event, "Emitting socket event");
        self.client
            .emit(event, payload)
            .await
            .map_err(|e| RealtimeError::Transport(e.to_string()))
    }

    async fn disconnect(&self) -> Result<(), RealtimeError> {
        self.client
            .disconnect()
            .await
            .map_err(|e| RealtimeError::Transport(e.to_string()))
    }
}

/// First JSON value of a text payload, `null` otherwise.
fn payload_value(payload: Payload) -> Value {
    match payload {
        Payload::Text(mut values) if !values.is_empty() => values.swap_remove(0),
        _ => Value::Null,
    }
}

fn payload_text(payload: &Payload) -> String {
    match payload {
        Payload::Text(values) => values
            .iter()
            .map(|value| match value {
                Value::String(s) => s.clone(),
                Value::Object(map) => map
                    .get("message")
                    .and_then(Value::as_str)
                    .map(str::to_string)
                    .unwrap_or_else(|| value.to_string()),
                other => other.to_string(),
            })
            .collect::<Vec<_>>()
            .join(", "),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_text() {
        let payload = Payload::Text(vec![json!({ "message": "unauthorized token" })]);
        assert_eq!(payload_text(&payload), "unauthorized token");

        let payload = Payload::Text(vec![json!("transport close")]);
        assert_eq!(payload_text(&payload), "transport close");
    }

    #[test]
    fn test_payload_value() {
        let payload = Payload::Text(vec![json!({ "title": "New message" }), json!(2)]);
        assert_eq!(payload_value(payload), json!({ "title": "New message" }));
        assert_eq!(payload_value(Payload::Text(vec![])), Value::Null);
    }
}
