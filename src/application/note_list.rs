// src/application/note_list.rs
use crate::application::{lock, NoteEvent, NoteEvents, NoteRepository};
use crate::domain::Note;
use std::sync::{Arc, Mutex};
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::{broadcast, watch};
use tokio::task::AbortHandle;
use tracing::{debug, error, info, instrument, warn};

/// What the `notes-list` element currently displays.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListView {
    /// Bumped on every render
    pub revision: u64,
    pub loading: bool,
    pub notes: Vec<Note>,
}

impl ListView {
    /// One delete control per displayed card, bound to this render
    pub fn delete_controls(&self) -> Vec<DeleteControl> {
        self.notes
            .iter()
            .map(|note| DeleteControl {
                note_id: note.id.clone(),
                revision: self.revision,
            })
            .collect()
    }
}

/// Delete button of a single card. Only valid for the render that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteControl {
    pub note_id: String,
    pub revision: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The service removed the note and the collection was refetched
    Deleted,
    /// The request failed; the displayed collection was left as is
    Failed,
    /// The control belonged to a render that has since been replaced
    StaleControl,
}

#[derive(Debug, Default)]
struct FetchState {
    /// Ticket of the most recently issued fetch
    issued: u64,
    in_flight: usize,
}

struct Inner<R> {
    repository: Arc<R>,
    fetch: Mutex<FetchState>,
    view: watch::Sender<ListView>,
    listener: Mutex<Option<AbortHandle>>,
}

/// A fetch that raised the in-flight count. Dropping it unsettled, e.g. when
/// the listener task is aborted mid-request, still lowers the count.
struct PendingFetch<R> {
    inner: Arc<Inner<R>>,
    ticket: u64,
    settled: bool,
}

impl<R> PendingFetch<R> {
    /// Lower the in-flight count and render `notes` if this is the latest fetch
    fn settle(&mut self, notes: Option<Vec<Note>>) {
        if self.settled {
            return;
        }
        self.settled = true;

        let mut fetch = lock(&self.inner.fetch);
        fetch.in_flight = fetch.in_flight.saturating_sub(1);
        let loading = fetch.in_flight > 0;
        let latest = self.ticket == fetch.issued;
        let notes = notes.filter(|_| latest);
        if !latest {
            debug!(ticket = self.ticket, latest = fetch.issued, "Discarding stale fetch result");
        }

        self.inner.view.send_modify(|view| {
            if let Some(notes) = notes {
                view.revision += 1;
                view.notes = notes;
            }
            view.loading = loading;
        });
    }
}

impl<R> Drop for PendingFetch<R> {
    fn drop(&mut self) {
        if !self.settled {
            debug!(ticket = self.ticket, "Fetch abandoned before it settled");
            self.settle(None);
        }
    }
}

/// The `notes-list` element.
///
/// Cheap to clone; clones share the same displayed state. Every render replaces
/// the whole collection with the service's latest answer. When fetches overlap,
/// only the result of the most recently issued one is rendered.
pub struct NoteList<R: NoteRepository> {
    inner: Arc<Inner<R>>,
}

impl<R: NoteRepository> Clone for NoteList<R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<R: NoteRepository + 'static> NoteList<R> {
    /// A list that is not wired to any notifications and has not fetched yet
    pub fn new(repository: Arc<R>) -> Self {
        let (view, _) = watch::channel(ListView::default());
        Self {
            inner: Arc::new(Inner {
                repository,
                fetch: Mutex::new(FetchState::default()),
                view,
                listener: Mutex::new(None),
            }),
        }
    }

    /// Construct the element the way a page does: start the initial fetch and
    /// subscribe to "note added" right away, then refetch on every signal.
    ///
    /// Must be called from within a tokio runtime.
    pub fn attach(repository: Arc<R>, events: &NoteEvents) -> Self {
        let list = Self::new(repository);
        let receiver = events.subscribe();
        let pending = list.begin_fetch();

        let task_list = list.clone();
        let handle = tokio::spawn(async move {
            task_list.complete_fetch(pending).await;
            task_list.listen(receiver).await;
        });
        *lock(&list.inner.listener) = Some(handle.abort_handle());

        list
    }

    async fn listen(&self, mut receiver: broadcast::Receiver<NoteEvent>) {
        loop {
            match receiver.recv().await {
                Ok(NoteEvent::Added) => self.refresh().await,
                Err(RecvError::Lagged(missed)) => {
                    debug!(missed, "Note signals coalesced");
                    self.refresh().await;
                }
                Err(RecvError::Closed) => {
                    debug!("Note signal channel closed, list stops listening");
                    break;
                }
            }
        }
    }

    /// Stop reacting to notifications. The displayed state stays readable.
    pub fn detach(&self) {
        if let Some(handle) = lock(&self.inner.listener).take() {
            handle.abort();
        }
    }

    pub fn view(&self) -> ListView {
        self.inner.view.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ListView> {
        self.inner.view.subscribe()
    }

    /// Wait until at least one render happened and no fetch is in flight
    pub async fn settled(&self) -> ListView {
        let mut receiver = self.subscribe();
        let settled = receiver
            .wait_for(|view| view.revision > 0 && !view.loading)
            .await
            .map(|view| view.clone());
        settled.unwrap_or_else(|_| self.view())
    }

    /// Refetch the full collection and render it.
    ///
    /// A failed fetch renders an empty collection.
    #[instrument(level = "debug", skip(self))]
    pub async fn refresh(&self) {
        let pending = self.begin_fetch();
        self.complete_fetch(pending).await;
    }

    fn begin_fetch(&self) -> PendingFetch<R> {
        let mut fetch = lock(&self.inner.fetch);
        fetch.issued += 1;
        fetch.in_flight += 1;
        self.inner.view.send_modify(|view| view.loading = true);
        PendingFetch {
            inner: Arc::clone(&self.inner),
            ticket: fetch.issued,
            settled: false,
        }
    }

    async fn complete_fetch(&self, mut pending: PendingFetch<R>) {
        let ticket = pending.ticket;
        let notes = match self.inner.repository.list_notes().await {
            Ok(notes) => {
                debug!(ticket, count = notes.len(), "Fetched notes");
                notes
            }
            Err(e) => {
                error!(ticket, error = %e, "Error fetching notes");
                Vec::new()
            }
        };
        pending.settle(Some(notes));
    }

    /// Delete a note by id and refetch on success
    #[instrument(level = "debug", skip(self))]
    pub async fn delete(&self, id: &str) -> DeleteOutcome {
        match self.inner.repository.delete_note(id).await {
            Ok(()) => {
                info!(note_id = id, "Note deleted");
                self.refresh().await;
                DeleteOutcome::Deleted
            }
            Err(e) => {
                error!(note_id = id, error = %e, "Error deleting note");
                DeleteOutcome::Failed
            }
        }
    }

    /// Activate a card's delete control
    pub async fn press(&self, control: &DeleteControl) -> DeleteOutcome {
        let current = self.inner.view.borrow().revision;
        if control.revision != current {
            warn!(
                note_id = %control.note_id,
                control_revision = control.revision,
                current_revision = current,
                "Ignoring delete control from a replaced render"
            );
            return DeleteOutcome::StaleControl;
        }
        self.delete(&control.note_id).await
    }
}
