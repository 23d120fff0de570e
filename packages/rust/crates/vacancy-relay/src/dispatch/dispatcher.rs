use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::OnceCell;
use vacancy_store::{ChatId, QueryStore, StoreError};

use crate::channels::{Channel, ChannelMessage};
use crate::commands::{RelayCommand, SlashCommand, parse_command};
use crate::search::VacancySearcher;
use crate::worker::{ChatWorker, QueryCommandError, StartOutcome, WorkerConfig, escape_html};

use super::replies;

type WorkerSlot = Arc<OnceCell<Arc<ChatWorker>>>;

/// Collaborators injected into every worker.
#[derive(Clone)]
pub struct RelayServices {
    /// Query persistence.
    pub store: Arc<dyn QueryStore>,
    /// Vacancy lookup.
    pub searcher: Arc<dyn VacancySearcher>,
    /// Worker timing.
    pub worker_config: WorkerConfig,
}

/// Owns the chat to worker map and produces exactly one reply per inbound message.
pub struct Dispatcher {
    channel: Arc<dyn Channel>,
    services: RelayServices,
    workers: Mutex<HashMap<ChatId, WorkerSlot>>,
}

impl Dispatcher {
    /// Dispatcher replying and notifying through `channel`.
    pub fn new(channel: Arc<dyn Channel>, services: RelayServices) -> Self {
        Self {
            channel,
            services,
            workers: Mutex::new(HashMap::new()),
        }
    }

    /// Worker for `chat_id`, created (with its persisted queries) on first use.
    ///
    /// Concurrent first calls for one chat share a single creation; a failed load is
    /// retried on the next call.
    pub async fn worker_for(&self, chat_id: ChatId) -> Result<Arc<ChatWorker>, StoreError> {
        let slot = {
            let mut workers = self.workers.lock().unwrap_or_else(PoisonError::into_inner);
            Arc::clone(workers.entry(chat_id).or_default())
        };
        let worker = slot
            .get_or_try_init(|| async {
                ChatWorker::load(
                    chat_id,
                    Arc::clone(&self.services.store),
                    Arc::clone(&self.services.searcher),
                    Arc::clone(&self.channel),
                    self.services.worker_config,
                )
                .await
                .map(Arc::new)
            })
            .await?;
        Ok(Arc::clone(worker))
    }

    /// Number of chats with a live worker.
    pub fn worker_count(&self) -> usize {
        self.workers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .filter(|slot| slot.initialized())
            .count()
    }

    /// Route one message and send its reply. Delivery failures are logged.
    pub async fn handle_message(&self, msg: &ChannelMessage) {
        tracing::info!(
            chat_id = msg.chat_id,
            sender = %msg.sender,
            message_id = %msg.id,
            "inbound message"
        );
        let reply = self.reply_for(msg.chat_id, &msg.content).await;
        if let Err(error) = self.channel.send(&reply, &msg.recipient).await {
            tracing::warn!(chat_id = msg.chat_id, error = %error, "failed to send reply");
        }
    }

    /// The reply a message from `chat_id` produces, including its side effects.
    pub async fn reply_for(&self, chat_id: ChatId, text: &str) -> String {
        let worker = match self.worker_for(chat_id).await {
            Ok(worker) => worker,
            Err(error) => {
                tracing::warn!(chat_id, error = %error, "failed to load chat queries");
                return replies::MESSAGE_LOAD_FAILED.to_string();
            }
        };

        match parse_command(text) {
            RelayCommand::Slash(command) => Self::handle_slash(&worker, command).await,
            RelayCommand::AddQuery(query) => match worker.add_query(query).await {
                Ok(()) => replies::MESSAGE_QUERY_ADDED.to_string(),
                Err(error) => command_error_reply(chat_id, &error),
            },
            RelayCommand::RemoveQuery(index) => match worker.remove_query(index).await {
                Ok(_) => replies::MESSAGE_QUERY_REMOVED.to_string(),
                Err(error) => command_error_reply(chat_id, &error),
            },
            RelayCommand::Malformed(error) => {
                command_error_reply(chat_id, &QueryCommandError::Parse(error))
            }
            RelayCommand::Text(text) => {
                if text.trim().is_empty() {
                    replies::MESSAGE_UNKNOWN_COMMAND.to_string()
                } else {
                    escape_html(&text)
                }
            }
        }
    }

    async fn handle_slash(worker: &Arc<ChatWorker>, command: SlashCommand) -> String {
        match command {
            SlashCommand::Start => match worker.start().await {
                StartOutcome::Started => replies::MESSAGE_WORKER_STARTED.to_string(),
                StartOutcome::AlreadyRunning => {
                    replies::MESSAGE_WORKER_ALREADY_RUNNING.to_string()
                }
                StartOutcome::NoQueries => replies::no_queries_with_instructions(),
            },
            SlashCommand::Stop => {
                if worker.stop() {
                    replies::MESSAGE_WORKER_STOPPED.to_string()
                } else {
                    replies::MESSAGE_WORKER_NOT_RUNNING.to_string()
                }
            }
            SlashCommand::Check => replies::checked_message(worker.check_now().await),
            SlashCommand::Help => replies::help_message(),
            SlashCommand::Queries => {
                let lines = worker.list_queries().await;
                if lines.is_empty() {
                    replies::MESSAGE_NO_QUERIES.to_string()
                } else {
                    format!("{}\n{}", replies::MESSAGE_ACTIVE_QUERIES, lines.join("\n"))
                }
            }
            SlashCommand::Status => {
                let status = worker.status().await;
                if status.working {
                    replies::working_status_message(
                        status.query_count,
                        worker.config().search_interval.as_secs(),
                    )
                } else {
                    replies::idle_status_message(status.query_count)
                }
            }
            SlashCommand::Unknown(text) => {
                tracing::debug!(chat_id = worker.chat_id(), command = %text, "unknown slash command");
                replies::MESSAGE_UNKNOWN_COMMAND.to_string()
            }
        }
    }

    /// Stop every working worker. Returns how many were stopped.
    pub fn shutdown(&self) -> usize {
        let slots: Vec<WorkerSlot> = self
            .workers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .cloned()
            .collect();
        let stopped = slots
            .iter()
            .filter_map(|slot| slot.get())
            .filter(|worker| worker.stop())
            .count();
        tracing::info!(stopped, "dispatcher shut down");
        stopped
    }
}

fn command_error_reply(chat_id: ChatId, error: &QueryCommandError) -> String {
    match error {
        QueryCommandError::Save(_) | QueryCommandError::Remove(_) => {
            tracing::warn!(chat_id, error = %error, "query command failed");
        }
        _ => tracing::debug!(chat_id, error = %error, "query command rejected"),
    }
    error.user_message()
}
