//! Test doubles for list clients.
//!
//! [`InMemoryList`] stands in for both the snapshot reader and the webhook
//! gateway, so a [`SlackListClient`](crate::lists::SlackListClient) can be
//! exercised without a network. [`LogCapture`] records log output for
//! assertions on severity.

use std::io;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use slack_clients_core::{ListItem, Snapshot};
use tracing::subscriber::DefaultGuard;
use tracing::{Level, error, info};
use tracing_subscriber::fmt::MakeWriter;

use crate::error::SlackError;
use crate::lists::{COMPLETION_CAPABILITY, ItemMutations, SnapshotSource};

/// A mutation received by [`InMemoryList`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedCall {
    Add(String),
    Delete(String),
    SetCompleted(String, bool),
}

#[derive(Debug, Default)]
struct State {
    items: Vec<ListItem>,
    calls: Vec<RecordedCall>,
    reads: usize,
    failing: Vec<String>,
}

/// Shared in-memory list.
///
/// Clones share state, so one clone can serve as the reader and another as
/// the gateway of the same client. Mutations apply immediately and are
/// recorded in order. A delete removes the first row with the name; a
/// completion change applies to every row with the name.
#[derive(Debug, Clone)]
pub struct InMemoryList {
    state: Arc<Mutex<State>>,
    completion: bool,
}

impl InMemoryList {
    /// A list with the completion capability.
    #[must_use]
    pub fn new(items: impl IntoIterator<Item = ListItem>) -> Self {
        Self {
            state: Arc::new(Mutex::new(State {
                items: items.into_iter().collect(),
                ..State::default()
            })),
            completion: true,
        }
    }

    /// A list whose gateway has no complete webhook.
    #[must_use]
    pub fn without_completion(items: impl IntoIterator<Item = ListItem>) -> Self {
        Self {
            completion: false,
            ..Self::new(items)
        }
    }

    /// Make every mutation of `name` fail like a webhook answering 500.
    #[must_use]
    pub fn fail_on(self, name: impl Into<String>) -> Self {
        self.lock().failing.push(name.into());
        self
    }

    /// Mutations received so far, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.lock().calls.clone()
    }

    /// Number of mutations received, failed ones included.
    #[must_use]
    pub fn mutation_count(&self) -> usize {
        self.lock().calls.len()
    }

    /// Number of snapshot reads.
    #[must_use]
    pub fn reads(&self) -> usize {
        self.lock().reads
    }

    /// Current rows.
    #[must_use]
    pub fn items(&self) -> Vec<ListItem> {
        self.lock().items.clone()
    }

    /// Forget recorded calls and reads, keeping the rows.
    pub fn reset_counters(&self) {
        let mut state = self.lock();
        state.calls.clear();
        state.reads = 0;
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Record a call and report whether it should fail.
    fn record(&self, call: RecordedCall) -> Result<MutexGuard<'_, State>, SlackError> {
        let mut state = self.lock();
        let name = match &call {
            RecordedCall::Add(name)
            | RecordedCall::Delete(name)
            | RecordedCall::SetCompleted(name, _) => name.clone(),
        };
        state.calls.push(call);

        if state.failing.contains(&name) {
            error!(name = %name, status = 500, "Webhook returned an error");
            return Err(SlackError::Webhook {
                status: 500,
                body: "simulated failure".to_string(),
            });
        }
        Ok(state)
    }
}

#[async_trait]
impl SnapshotSource for InMemoryList {
    async fn read(&self) -> Result<Snapshot, SlackError> {
        let mut state = self.lock();
        state.reads += 1;
        Ok(Snapshot::new(state.items.clone()))
    }
}

#[async_trait]
impl ItemMutations for InMemoryList {
    async fn add(&self, name: &str) -> Result<(), SlackError> {
        let mut state = self.record(RecordedCall::Add(name.to_owned()))?;
        state.items.push(ListItem::new(name));
        info!(action = "add", name, "Webhook triggered");
        Ok(())
    }

    async fn delete(&self, name: &str) -> Result<(), SlackError> {
        let mut state = self.record(RecordedCall::Delete(name.to_owned()))?;
        if let Some(pos) = state.items.iter().position(|item| item.name == name) {
            state.items.remove(pos);
        }
        info!(action = "delete", name, "Webhook triggered");
        Ok(())
    }

    async fn set_completed(&self, name: &str, completed: bool) -> Result<(), SlackError> {
        if !self.completion {
            return Err(SlackError::CapabilityUnavailable(COMPLETION_CAPABILITY));
        }
        let mut state = self.record(RecordedCall::SetCompleted(name.to_owned(), completed))?;
        for item in state.items.iter_mut().filter(|item| item.name == name) {
            item.completed = completed;
        }
        info!(action = "complete", name, "Webhook triggered");
        Ok(())
    }

    fn supports_completion(&self) -> bool {
        self.completion
    }
}

/// Captures formatted log output of the current thread.
#[derive(Debug, Clone, Default)]
pub struct LogCapture {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl LogCapture {
    /// Install a capturing subscriber for the current thread.
    ///
    /// Events are captured until the returned guard is dropped. Works with
    /// `#[tokio::test]`, whose default runtime stays on one thread.
    #[must_use]
    pub fn install() -> (Self, DefaultGuard) {
        let capture = Self::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(capture.clone())
            .with_max_level(Level::DEBUG)
            .with_ansi(false)
            .with_target(false)
            .without_time()
            .finish();
        let guard = tracing::subscriber::set_default(subscriber);
        (capture, guard)
    }

    /// Everything captured so far.
    #[must_use]
    pub fn contents(&self) -> String {
        let buffer = self.buffer.lock().unwrap_or_else(PoisonError::into_inner);
        String::from_utf8_lossy(&buffer).into_owned()
    }

    /// Captured lines logged at exactly `level`.
    #[must_use]
    pub fn lines_at(&self, level: Level) -> Vec<String> {
        self.contents()
            .lines()
            .filter(|line| line.trim_start().starts_with(level.as_str()))
            .map(String::from)
            .collect()
    }
}

/// Writer handed out by [`LogCapture`].
pub struct CaptureWriter(Arc<Mutex<Vec<u8>>>);

impl io::Write for CaptureWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogCapture {
    type Writer = CaptureWriter;

    fn make_writer(&'a self) -> Self::Writer {
        CaptureWriter(Arc::clone(&self.buffer))
    }
}
