//! Scripted transport.
//!
//! Records every line sent, fails a configurable number of connects, and
//! fires listener callbacks the way a real connection would.

use async_trait::async_trait;
use parking_lot::Mutex;
use slirc_client::config::ServerRecord;
use slirc_client::proto::{Batch, IrcMessage};
use slirc_client::transport::{Transport, TransportError, TransportFactory, TransportListener};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Weak};
use tokio::sync::Notify;

#[derive(Default)]
struct Inner {
    connected: bool,
    nick: String,
    isupport: HashMap<String, String>,
    caps: HashSet<String>,
    sent: Vec<String>,
    failures_left: u32,
    /// When set, connect succeeds without firing on_connect.
    suppress_welcome: bool,
}

/// In-memory transport for tests.
#[derive(Default)]
pub struct MockTransport {
    inner: Mutex<Inner>,
    listener: Mutex<Option<Weak<dyn TransportListener>>>,
    registrations: AtomicUsize,
    connects: AtomicUsize,
    /// When set, connect waits for this before completing.
    gate: Mutex<Option<Arc<Notify>>>,
}

#[allow(dead_code)]
impl MockTransport {
    pub fn new(nick: &str) -> Arc<Self> {
        let transport = Self::default();
        transport.inner.lock().nick = nick.to_string();
        Arc::new(transport)
    }

    fn listener(&self) -> Option<Arc<dyn TransportListener>> {
        self.listener.lock().as_ref().and_then(Weak::upgrade)
    }

    // ------------------------------------------------------------------
    // Scripting
    // ------------------------------------------------------------------

    pub fn fail_next_connects(&self, count: u32) {
        self.inner.lock().failures_left = count;
    }

    /// Hold every connect until the returned gate is notified.
    pub fn gate_connects(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.gate.lock() = Some(Arc::clone(&gate));
        gate
    }

    pub fn suppress_welcome(&self) {
        self.inner.lock().suppress_welcome = true;
    }

    pub fn set_isupport(&self, key: &str, value: &str) {
        self.inner
            .lock()
            .isupport
            .insert(key.to_string(), value.to_string());
    }

    pub fn add_capability(&self, name: &str) {
        self.inner.lock().caps.insert(name.to_string());
    }

    pub fn set_nick(&self, nick: &str) {
        self.inner.lock().nick = nick.to_string();
    }

    // ------------------------------------------------------------------
    // Server side
    // ------------------------------------------------------------------

    /// Deliver one wire line to the listener.
    pub fn deliver(&self, line: &str) {
        let message: IrcMessage = line.parse().expect("test line must parse");
        if let Some(listener) = self.listener() {
            listener.on_message(&message);
        }
    }

    pub fn deliver_batch(&self, batch: Batch) {
        if let Some(listener) = self.listener() {
            listener.on_batch(batch);
        }
    }

    /// The server closed the link.
    pub fn drop_connection(&self, reason: &str) {
        self.inner.lock().connected = false;
        if let Some(listener) = self.listener() {
            listener.on_disconnect(reason);
        }
    }

    // ------------------------------------------------------------------
    // Inspection
    // ------------------------------------------------------------------

    pub fn sent(&self) -> Vec<String> {
        self.inner.lock().sent.clone()
    }

    pub fn take_sent(&self) -> Vec<String> {
        std::mem::take(&mut self.inner.lock().sent)
    }

    pub fn connect_calls(&self) -> usize {
        self.connects.load(Ordering::SeqCst)
    }

    pub fn registrations(&self) -> usize {
        self.registrations.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn connect(&self) -> Result<(), TransportError> {
        self.connects.fetch_add(1, Ordering::SeqCst);
        let gate = self.gate.lock().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        let welcome = {
            let mut inner = self.inner.lock();
            if inner.failures_left > 0 {
                inner.failures_left -= 1;
                return Err(TransportError::Connect("connection refused".into()));
            }
            inner.connected = true;
            !inner.suppress_welcome
        };
        if welcome && let Some(listener) = self.listener() {
            listener.on_connect();
        }
        Ok(())
    }

    fn quit(&self, reason: Option<&str>) {
        let was_connected = {
            let mut inner = self.inner.lock();
            let was_connected = inner.connected;
            if was_connected {
                let line = match reason {
                    Some(reason) => format!("QUIT :{}", reason),
                    None => "QUIT".to_string(),
                };
                inner.sent.push(line);
            }
            inner.connected = false;
            was_connected
        };
        if was_connected && let Some(listener) = self.listener() {
            listener.on_disconnect("Quit");
        }
    }

    fn send(&self, command: &str, params: &[&str]) -> Result<(), TransportError> {
        let line = IrcMessage::new(command)
            .with_params(params.iter().copied())
            .to_string();
        self.send_raw(&line)
    }

    fn send_raw(&self, line: &str) -> Result<(), TransportError> {
        let mut inner = self.inner.lock();
        if !inner.connected {
            return Err(TransportError::NotConnected);
        }
        inner.sent.push(line.to_string());
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.inner.lock().connected
    }

    fn current_nick(&self) -> String {
        self.inner.lock().nick.clone()
    }

    fn isupport(&self, key: &str) -> Option<String> {
        self.inner.lock().isupport.get(key).cloned()
    }

    fn has_capability(&self, name: &str) -> bool {
        self.inner.lock().caps.contains(name)
    }

    fn register(&self, listener: Weak<dyn TransportListener>) {
        self.registrations.fetch_add(1, Ordering::SeqCst);
        *self.listener.lock() = Some(listener);
    }
}

/// Factory that hands out mock transports and remembers them by host.
#[derive(Default)]
pub struct MockFactory {
    created: Mutex<Vec<(String, Arc<MockTransport>)>>,
}

#[allow(dead_code)]
impl MockFactory {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn transport_for(&self, hostname: &str) -> Option<Arc<MockTransport>> {
        self.created
            .lock()
            .iter()
            .rev()
            .find(|(host, _)| host == hostname)
            .map(|(_, t)| Arc::clone(t))
    }

    pub fn created(&self) -> usize {
        self.created.lock().len()
    }
}

impl TransportFactory for MockFactory {
    fn create(&self, record: &ServerRecord) -> Arc<dyn Transport> {
        let transport = MockTransport::new(record.nickname());
        self.created
            .lock()
            .push((record.hostname.clone(), Arc::clone(&transport)));
        transport
    }
}
