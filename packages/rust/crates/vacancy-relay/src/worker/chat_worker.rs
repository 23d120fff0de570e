//! Per-chat worker state machine.
//!
//! `Idle -> Working -> Idle`. The search loop runs on its own task and observes a
//! [`CancellationToken`]; searches already launched by a tick are never aborted.

use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::RwLock;
use tokio::task::JoinSet;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use vacancy_store::{ChatId, Query, QueryStore, StoreError};

use crate::channels::Channel;
use crate::search::VacancySearcher;

use super::config::WorkerConfig;
use super::dedup::VacancyDedupCache;
use super::error::QueryCommandError;
use super::notify::{format_query_line, format_vacancy_notification};

enum WorkerState {
    Idle,
    Working(CancellationToken),
}

/// Result of [`ChatWorker::start`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    /// The search loop was launched.
    Started,
    /// A loop is already running; nothing changed.
    AlreadyRunning,
    /// No saved queries; the worker stays idle.
    NoQueries,
}

/// Snapshot for `/status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkerStatus {
    /// Whether the search loop runs.
    pub working: bool,
    /// Number of saved queries.
    pub query_count: usize,
}

/// One chat's saved queries, search loop and dedup cache.
pub struct ChatWorker {
    chat_id: ChatId,
    recipient: String,
    queries: RwLock<Vec<Query>>,
    state: Mutex<WorkerState>,
    dedup: VacancyDedupCache,
    store: Arc<dyn QueryStore>,
    searcher: Arc<dyn VacancySearcher>,
    notifier: Arc<dyn Channel>,
    config: WorkerConfig,
}

impl ChatWorker {
    /// Idle worker holding `queries` (as loaded from the store).
    pub fn new(
        chat_id: ChatId,
        queries: Vec<Query>,
        store: Arc<dyn QueryStore>,
        searcher: Arc<dyn VacancySearcher>,
        notifier: Arc<dyn Channel>,
        config: WorkerConfig,
    ) -> Self {
        Self {
            chat_id,
            recipient: chat_id.to_string(),
            queries: RwLock::new(queries),
            state: Mutex::new(WorkerState::Idle),
            dedup: VacancyDedupCache::new(config.retention),
            store,
            searcher,
            notifier,
            config,
        }
    }

    /// Create a worker with the chat's persisted queries.
    pub async fn load(
        chat_id: ChatId,
        store: Arc<dyn QueryStore>,
        searcher: Arc<dyn VacancySearcher>,
        notifier: Arc<dyn Channel>,
        config: WorkerConfig,
    ) -> Result<Self, StoreError> {
        let queries = store.read_all(chat_id).await?;
        tracing::info!(chat_id, queries = queries.len(), "chat worker created");
        Ok(Self::new(chat_id, queries, store, searcher, notifier, config))
    }

    /// Chat this worker serves.
    pub fn chat_id(&self) -> ChatId {
        self.chat_id
    }

    /// Worker timing.
    pub fn config(&self) -> &WorkerConfig {
        &self.config
    }

    /// Whether the search loop runs.
    pub fn is_working(&self) -> bool {
        matches!(
            *self.state.lock().unwrap_or_else(PoisonError::into_inner),
            WorkerState::Working(_)
        )
    }

    /// Snapshot of the saved queries in display order.
    pub async fn queries(&self) -> Vec<Query> {
        self.queries.read().await.clone()
    }

    /// Working flag and query count.
    pub async fn status(&self) -> WorkerStatus {
        let query_count = self.queries.read().await.len();
        WorkerStatus {
            working: self.is_working(),
            query_count,
        }
    }

    /// `Idle -> Working`, only with at least one saved query.
    pub async fn start(self: &Arc<Self>) -> StartOutcome {
        if self.queries.read().await.is_empty() {
            return StartOutcome::NoQueries;
        }

        let cancel = {
            let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
            if matches!(*state, WorkerState::Working(_)) {
                return StartOutcome::AlreadyRunning;
            }
            let cancel = CancellationToken::new();
            *state = WorkerState::Working(cancel.clone());
            cancel
        };

        let worker = Arc::clone(self);
        tokio::spawn(async move { worker.run_loop(cancel).await });
        tracing::info!(
            chat_id = self.chat_id,
            interval_secs = self.config.search_interval.as_secs(),
            active_hours = %self.config.active_hours,
            "chat worker started"
        );
        StartOutcome::Started
    }

    /// `Working -> Idle`. Returns `false` (and does nothing) when already idle.
    pub fn stop(&self) -> bool {
        let previous = std::mem::replace(
            &mut *self.state.lock().unwrap_or_else(PoisonError::into_inner),
            WorkerState::Idle,
        );
        match previous {
            WorkerState::Working(cancel) => {
                cancel.cancel();
                tracing::info!(chat_id = self.chat_id, "chat worker stopped");
                true
            }
            WorkerState::Idle => false,
        }
    }

    /// Validate, persist, then append. A failed persist leaves the list unchanged.
    pub async fn add_query(&self, query: Query) -> Result<(), QueryCommandError> {
        let mut queries = self.queries.write().await;
        if self
            .store
            .exists(self.chat_id, &query)
            .await
            .map_err(QueryCommandError::Save)?
        {
            return Err(QueryCommandError::AlreadyExists);
        }
        match self.store.save(self.chat_id, &query).await {
            Ok(()) => {}
            Err(StoreError::AlreadyExists(_)) => return Err(QueryCommandError::AlreadyExists),
            Err(error) => return Err(QueryCommandError::Save(error)),
        }
        tracing::info!(chat_id = self.chat_id, query = %query.canonical(), "query added");
        queries.push(query);
        Ok(())
    }

    /// Remove the query at 1-based `index`. Bounds are checked before touching storage.
    ///
    /// A record already gone from storage is dropped from memory and reported as
    /// [`QueryCommandError::NotFound`].
    pub async fn remove_query(&self, index: i64) -> Result<Query, QueryCommandError> {
        let mut queries = self.queries.write().await;
        if queries.is_empty() {
            return Err(QueryCommandError::EmptyList);
        }
        let len = queries.len();
        let position = usize::try_from(index)
            .ok()
            .filter(|position| (1..=len).contains(position))
            .ok_or(QueryCommandError::IndexOutOfRange { index, len })?
            - 1;

        match self.store.remove(self.chat_id, &queries[position]).await {
            Ok(()) => {}
            Err(StoreError::NotFound(canonical)) => {
                tracing::warn!(
                    chat_id = self.chat_id,
                    query = %canonical,
                    "query record already missing; dropping it from memory"
                );
                queries.remove(position);
                return Err(QueryCommandError::NotFound(canonical));
            }
            Err(error) => return Err(QueryCommandError::Remove(error)),
        }
        let removed = queries.remove(position);
        tracing::info!(chat_id = self.chat_id, query = %removed.canonical(), "query removed");
        Ok(removed)
    }

    /// Display lines, 1-based.
    pub async fn list_queries(&self) -> Vec<String> {
        self.queries
            .read()
            .await
            .iter()
            .enumerate()
            .map(|(index, query)| format_query_line(index + 1, query))
            .collect()
    }

    /// One search pass over every query, ignoring active hours. Returns the number checked.
    pub async fn check_now(self: &Arc<Self>) -> usize {
        let queries = self.queries().await;
        Arc::clone(self).search_all(queries).await
    }

    async fn run_loop(self: Arc<Self>, cancel: CancellationToken) {
        let start = Instant::now();
        let mut search_ticker = tokio::time::interval_at(
            start + self.config.search_interval,
            self.config.search_interval,
        );
        search_ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut sweep_ticker =
            tokio::time::interval_at(start + self.config.sweep_interval, self.config.sweep_interval);
        sweep_ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                biased;
                () = cancel.cancelled() => break,
                _ = search_ticker.tick() => self.on_search_tick().await,
                _ = sweep_ticker.tick() => {
                    let evicted = self.dedup.sweep();
                    tracing::debug!(
                        chat_id = self.chat_id,
                        evicted,
                        remaining = self.dedup.len(),
                        "dedup cache swept"
                    );
                }
            }
        }
        tracing::debug!(chat_id = self.chat_id, "chat worker loop exited");
    }

    async fn on_search_tick(self: &Arc<Self>) {
        if !self.config.active_hours.is_active_now() {
            tracing::debug!(chat_id = self.chat_id, "outside active hours; skipping tick");
            return;
        }
        let queries = self.queries().await;
        // Detached so a stop never aborts searches this tick already launched.
        let worker = Arc::clone(self);
        tokio::spawn(async move {
            worker.search_all(queries).await;
        });
    }

    async fn search_all(self: Arc<Self>, queries: Vec<Query>) -> usize {
        let count = queries.len();
        let mut searches = JoinSet::new();
        for query in queries {
            let worker = Arc::clone(&self);
            searches.spawn(async move { worker.search_one(&query).await });
        }
        while let Some(result) = searches.join_next().await {
            if let Err(error) = result {
                tracing::error!(chat_id = self.chat_id, "vacancy search task crashed: {error}");
            }
        }
        count
    }

    async fn search_one(&self, query: &Query) {
        let vacancies = match self.searcher.search(query, self.config.period_days).await {
            Ok(vacancies) => vacancies,
            Err(error) => {
                tracing::warn!(
                    chat_id = self.chat_id,
                    query = %query.canonical(),
                    error = %error,
                    "vacancy search failed"
                );
                return;
            }
        };

        let mut notified = 0_usize;
        for vacancy in &vacancies {
            if !self.dedup.mark_if_new(&vacancy.id) {
                continue;
            }
            notified += 1;
            let message = format_vacancy_notification(query, vacancy);
            if let Err(error) = self.notifier.send(&message, &self.recipient).await {
                tracing::warn!(
                    chat_id = self.chat_id,
                    vacancy_id = %vacancy.id,
                    error = %error,
                    "failed to deliver vacancy notification"
                );
            }
        }
        tracing::debug!(
            chat_id = self.chat_id,
            query = %query.canonical(),
            found = vacancies.len(),
            notified,
            "vacancy search finished"
        );
    }
}
