//! In-process transport for exercising the live code path without a server.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::Notify;
use tokio::sync::mpsc::UnboundedSender;

use super::transport::{RealtimeError, RealtimeTransport, TransportConnector, TransportEvent};

/// Connector whose connections are driven by the test.
///
/// Connect attempts consume scripted failures first and then succeed.
/// Nothing happens on a successful connection until the test calls
/// [`FakeConnector::fire`] with [`TransportEvent::Connected`].
#[derive(Default)]
pub struct FakeConnector {
    failures: Mutex<VecDeque<String>>,
    attempts: AtomicUsize,
    tokens: Mutex<Vec<String>>,
    events: Mutex<Option<UnboundedSender<TransportEvent>>>,
    emitted: Arc<Mutex<Vec<(String, Value)>>>,
    connected: Notify,
}

impl FakeConnector {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Fails the next connect attempts with these messages, in order.
    pub fn failing_with(messages: &[&str]) -> Arc<Self> {
        let connector = Self::default();
        if let Ok(mut failures) = connector.failures.lock() {
            failures.extend(messages.iter().map(|m| m.to_string()));
        }
        Arc::new(connector)
    }

    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }

    pub fn tokens(&self) -> Vec<String> {
        self.tokens.lock().map(|t| t.clone()).unwrap_or_default()
    }

    /// `(event, payload)` pairs emitted so far, in order.
    pub fn emitted(&self) -> Vec<(String, Value)> {
        self.emitted.lock().map(|e| e.clone()).unwrap_or_default()
    }

    /// Waits until a connect attempt has succeeded.
    pub async fn wait_for_connection(&self) {
        loop {
            let notified = self.connected.notified();
            if self.events.lock().map(|e| e.is_some()).unwrap_or(false) {
                return;
            }
            notified.await;
        }
    }

    /// Delivers `event` on the current connection. Returns false if none is open.
    pub fn fire(&self, event: TransportEvent) -> bool {
        self.events
            .lock()
            .ok()
            .and_then(|events| events.as_ref().map(|tx| tx.send(event).is_ok()))
            .unwrap_or(false)
    }
}

#[async_trait]
impl TransportConnector for FakeConnector {
    async fn connect(
        &self,
        _url: &str,
        token: &str,
        events: UnboundedSender<TransportEvent>,
    ) -> Result<Box<dyn RealtimeTransport>, RealtimeError> {
        if let Ok(mut tokens) = self.tokens.lock() {
            tokens.push(token.to_string());
        }

        let failure = self.failures.lock().ok().and_then(|mut f| f.pop_front());
        if let Some(message) = failure {
            self.attempts.fetch_add(1, Ordering::SeqCst);
            return Err(RealtimeError::Transport(message));
        }

        if let Ok(mut slot) = self.events.lock() {
            *slot = Some(events);
        }
        // Counted after the sender is stored.
        self.attempts.fetch_add(1, Ordering::SeqCst);
        self.connected.notify_waiters();

        Ok(Box::new(FakeTransport {
            emitted: self.emitted.clone(),
        }))
    }
}

struct FakeTransport {
    emitted: Arc<Mutex<Vec<(String, Value)>>>,
}

#[async_trait]
impl RealtimeTransport for FakeTransport {
    async fn emit(&self, event: &str, payload: Value) -> Result<(), RealtimeError> {
        self.emitted
            .lock()
            .map_err(|_| RealtimeError::Transport("emit log poisoned".to_string()))?
            .push((event.to_string(), payload));
        Ok(())
    }

    async fn disconnect(&self) -> Result<(), RealtimeError> {
        Ok(())
    }
}
