#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Notify;
use vacancy_relay::{
    ActiveHours, Channel, ChannelMessage, Vacancy, VacancySearcher, WorkerConfig,
};
use vacancy_store::{ChatId, MemoryQueryStore, Query, QueryStore, StoreError};

/// Records every outbound message instead of delivering it.
#[derive(Default)]
pub struct RecordingChannel {
    sent: Mutex<Vec<(String, String)>>,
}

impl RecordingChannel {
    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().expect("sent lock").clone()
    }

    pub fn sent_texts(&self) -> Vec<String> {
        self.sent().into_iter().map(|(_, text)| text).collect()
    }
}

#[async_trait]
impl Channel for RecordingChannel {
    fn name(&self) -> &str {
        "recording"
    }

    async fn send(&self, message: &str, recipient: &str) -> anyhow::Result<()> {
        self.sent
            .lock()
            .expect("sent lock")
            .push((recipient.to_string(), message.to_string()));
        Ok(())
    }

    async fn listen(&self, _tx: tokio::sync::mpsc::Sender<ChannelMessage>) -> anyhow::Result<()> {
        Ok(())
    }
}

/// Returns a fixed result set per keyword and counts calls.
#[derive(Default)]
pub struct StaticSearcher {
    results: Mutex<HashMap<String, Vec<Vacancy>>>,
    calls: AtomicUsize,
    fail: bool,
}

impl StaticSearcher {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn with_results(self, keyword: &str, ids: &[&str]) -> Self {
        self.results.lock().expect("results lock").insert(
            keyword.to_string(),
            ids.iter().map(|id| vacancy(id)).collect(),
        );
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl VacancySearcher for StaticSearcher {
    async fn search(&self, query: &Query, _period_days: u32) -> anyhow::Result<Vec<Vacancy>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            anyhow::bail!("search backend unavailable");
        }
        Ok(self
            .results
            .lock()
            .expect("results lock")
            .get(&query.text)
            .cloned()
            .unwrap_or_default())
    }
}

/// Holds every search until [`GatedSearcher::release`] is called.
pub struct GatedSearcher {
    ids: Vec<String>,
    entered: Notify,
    gate: Notify,
}

impl GatedSearcher {
    pub fn new(ids: &[&str]) -> Self {
        Self {
            ids: ids.iter().map(|id| (*id).to_string()).collect(),
            entered: Notify::new(),
            gate: Notify::new(),
        }
    }

    /// Resolves once a search is waiting at the gate.
    pub async fn wait_entered(&self) {
        self.entered.notified().await;
    }

    /// Let one waiting search return.
    pub fn release(&self) {
        self.gate.notify_one();
    }
}

#[async_trait]
impl VacancySearcher for GatedSearcher {
    async fn search(&self, _query: &Query, _period_days: u32) -> anyhow::Result<Vec<Vacancy>> {
        self.entered.notify_one();
        self.gate.notified().await;
        Ok(self.ids.iter().map(|id| vacancy(id)).collect())
    }
}

/// In-memory store whose `read_all` is slow and counted.
pub struct SlowLoadStore {
    inner: MemoryQueryStore,
    delay: Duration,
    loads: AtomicUsize,
}

impl SlowLoadStore {
    pub fn new(delay: Duration) -> Self {
        Self {
            inner: MemoryQueryStore::new(),
            delay,
            loads: AtomicUsize::new(0),
        }
    }

    pub fn loads(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl QueryStore for SlowLoadStore {
    async fn exists(&self, chat_id: ChatId, query: &Query) -> Result<bool, StoreError> {
        self.inner.exists(chat_id, query).await
    }

    async fn save(&self, chat_id: ChatId, query: &Query) -> Result<(), StoreError> {
        self.inner.save(chat_id, query).await
    }

    async fn remove(&self, chat_id: ChatId, query: &Query) -> Result<(), StoreError> {
        self.inner.remove(chat_id, query).await
    }

    async fn read_all(&self, chat_id: ChatId) -> Result<Vec<Query>, StoreError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;
        self.inner.read_all(chat_id).await
    }
}

pub fn vacancy(id: &str) -> Vacancy {
    Vacancy {
        id: id.to_string(),
        name: format!("Vacancy {id}"),
        experience: None,
    }
}

/// Fast ticks, always active.
pub fn fast_worker_config(search_interval: Duration) -> WorkerConfig {
    WorkerConfig {
        search_interval,
        active_hours: ActiveHours::always(),
        ..WorkerConfig::default()
    }
}
