use std::sync::Arc;
use std::time::Duration;

use encore_feed::{FeedConfig, Record};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::{Instant, sleep_until};

use super::{FeedKind, FeedListener};

#[derive(Clone)]
pub struct FeedHandle {
    inner: Arc<FeedHandleInner>,
}

impl FeedHandle {
    const MAX_COMMANDS: usize = 4;

    /// Simulated latency before a follow-up page arrives.
    pub const PAGE_DELAY: Duration = Duration::from_millis(500);

    pub fn new(kind: FeedKind, listener: Arc<dyn FeedListener>) -> Self {
        let (command_tx, command_rx) = mpsc::channel(Self::MAX_COMMANDS);
        let main_task = tokio::spawn(Self::main_loop(kind, kind.config(), command_rx, listener));
        Self {
            inner: Arc::new(FeedHandleInner {
                kind,
                command_tx,
                main_task,
            }),
        }
    }

    pub fn kind(&self) -> FeedKind {
        self.inner.kind
    }

    /// Clear the query and reload the first page right away.
    pub async fn refresh(&self) -> Result<(), anyhow::Error> {
        self.send_command(HandleCommand::Refresh).await
    }

    /// Ask for the next page; it arrives after the simulated latency.
    pub async fn load_next_page(&self) -> Result<(), anyhow::Error> {
        self.send_command(HandleCommand::LoadNextPage).await
    }

    /// Replace the active query and reload the first page right away.
    pub async fn search(&self, query: impl Into<String>) -> Result<(), anyhow::Error> {
        self.send_command(HandleCommand::Search {
            query: query.into(),
        })
        .await
    }

    pub async fn toggle_favorite(&self, id: u32) -> Result<(), anyhow::Error> {
        self.send_command(HandleCommand::ToggleFavorite { id })
            .await
    }

    pub async fn delete_record(&self, id: u32) -> Result<(), anyhow::Error> {
        self.send_command(HandleCommand::DeleteRecord { id }).await
    }

    /// Current list state as seen by the feed task.
    pub async fn snapshot(&self) -> Result<FeedSnapshot, anyhow::Error> {
        let (tx, rx) = oneshot::channel();
        self.send_command(HandleCommand::Snapshot { tx }).await?;
        rx.await.map_err(|_| anyhow::Error::msg("Handle is broken"))
    }

    async fn send_command(&self, command: HandleCommand) -> Result<(), anyhow::Error> {
        self.inner
            .command_tx
            .send(command)
            .await
            .map_err(|_| anyhow::Error::msg("Handle is broken"))
    }

    async fn main_loop(
        kind: FeedKind,
        config: FeedConfig,
        mut command_rx: mpsc::Receiver<HandleCommand>,
        listener: Arc<dyn FeedListener>,
    ) {
        let mut state = FeedState {
            config,
            records: Vec::new(),
            page: 0,
            query: String::new(),
            has_more: true,
            pending: None,
        };
        loop {
            tracing::trace!(?kind, "Wait for feed update");
            let deadline = state
                .pending
                .as_ref()
                .map(|pending| pending.deadline)
                .unwrap_or_else(Instant::now);
            tokio::select! {
                command = command_rx.recv() => {
                    let command = match command {
                        Some(v) => v,
                        None => return,
                    };
                    match command {
                        HandleCommand::Refresh => {
                            state.reset(String::new());
                            listener
                                .on_feed_reset(kind, state.records.clone(), state.has_more)
                                .await;
                        }
                        HandleCommand::Search { query } => {
                            if state.pending.is_some() {
                                tracing::debug!(?kind, "Search cancelled a pending page load");
                            }
                            state.reset(query);
                            listener
                                .on_feed_reset(kind, state.records.clone(), state.has_more)
                                .await;
                        }
                        HandleCommand::LoadNextPage => {
                            if state.pending.is_some() {
                                tracing::debug!(?kind, "Ignored page load while another is pending");
                                continue;
                            }
                            if !state.has_more {
                                tracing::debug!(?kind, "Ignored page load past the end of the feed");
                                continue;
                            }
                            state.pending = Some(PendingLoad {
                                page: state.page + 1,
                                deadline: Instant::now() + Self::PAGE_DELAY,
                            });
                        }
                        HandleCommand::ToggleFavorite { id } => {
                            let Some(index) = state.records.iter().position(|r| r.id == id) else {
                                tracing::debug!(?kind, id, "Ignored favorite toggle for unknown record");
                                continue;
                            };
                            match kind {
                                FeedKind::General => {
                                    state.records[index].favorite = !state.records[index].favorite;
                                    let record = state.records[index].clone();
                                    listener.on_record_updated(kind, record).await;
                                }
                                FeedKind::Favorites => {
                                    // Unstarring retires the entry from the favorites list.
                                    state.records.remove(index);
                                    listener.on_record_removed(kind, id).await;
                                }
                            }
                        }
                        HandleCommand::DeleteRecord { id } => {
                            let count = state.records.len();
                            state.records.retain(|r| r.id != id);
                            if state.records.len() == count {
                                tracing::debug!(?kind, id, "Ignored delete for unknown record");
                                continue;
                            }
                            listener.on_record_removed(kind, id).await;
                        }
                        HandleCommand::Snapshot { tx } => {
                            _ = tx.send(FeedSnapshot {
                                records: state.records.clone(),
                                page: state.page,
                                query: state.query.clone(),
                                loading: state.pending.is_some(),
                                has_more: state.has_more,
                            });
                        }
                    }
                }
                _ = sleep_until(deadline), if state.pending.is_some() => {
                    let Some(pending) = state.pending.take() else {
                        continue;
                    };
                    let page = state.config.generate(pending.page, &state.query);
                    state.page = pending.page;
                    state.has_more = state.has_more && !page.reached_ceiling;
                    state.records.extend(page.records.iter().cloned());
                    tracing::debug!(
                        ?kind,
                        page = pending.page,
                        count = page.records.len(),
                        has_more = state.has_more,
                        "Loaded feed page",
                    );
                    listener
                        .on_page_loaded(kind, page.records, state.has_more)
                        .await;
                }
            }
        }
    }
}

/// Point-in-time copy of a feed task's list state.
#[derive(Clone, Debug)]
pub struct FeedSnapshot {
    pub records: Vec<Record>,
    pub page: u32,
    pub query: String,
    pub loading: bool,
    pub has_more: bool,
}

struct FeedState {
    config: FeedConfig,
    records: Vec<Record>,
    page: u32,
    query: String,
    has_more: bool,
    pending: Option<PendingLoad>,
}

impl FeedState {
    /// Drop any pending load and start over from the first page.
    fn reset(&mut self, query: String) {
        self.pending = None;
        self.query = query;
        self.page = 1;
        let page = self.config.generate(self.page, &self.query);
        self.records = page.records;
        self.has_more = !page.reached_ceiling;
    }
}

struct PendingLoad {
    page: u32,
    deadline: Instant,
}

struct FeedHandleInner {
    kind: FeedKind,
    command_tx: mpsc::Sender<HandleCommand>,
    main_task: JoinHandle<()>,
}

impl Drop for FeedHandleInner {
    fn drop(&mut self) {
        self.main_task.abort();
    }
}

enum HandleCommand {
    Refresh,
    LoadNextPage,
    Search { query: String },
    ToggleFavorite { id: u32 },
    DeleteRecord { id: u32 },
    Snapshot { tx: oneshot::Sender<FeedSnapshot> },
}
