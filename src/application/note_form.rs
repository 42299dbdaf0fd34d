// src/application/note_form.rs
use crate::application::{lock, NoteEvents, NoteRepository};
use crate::domain::NoteDraft;
use std::sync::{Arc, Mutex};
use tokio::sync::watch;
use tracing::{debug, error, info, instrument};

/// Raw values of the form's two inputs, untrimmed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The service accepted the note; the signal was sent and the inputs cleared
    Created,
    /// A required input was empty, nothing was sent
    Incomplete,
    /// The request failed; the error was logged and the inputs kept
    Failed,
}

/// The `notes-form` element: two required inputs and a submit action.
pub struct NoteForm<R: NoteRepository> {
    repository: Arc<R>,
    events: NoteEvents,
    fields: Mutex<FormFields>,
    /// Submissions whose request has not settled yet
    pending: Mutex<usize>,
    loading: watch::Sender<bool>,
}

/// Keeps the indicator shown while at least one submission is pending.
/// Dropping it, also on cancellation, lowers the count.
struct PendingSubmit<'a> {
    pending: &'a Mutex<usize>,
    loading: &'a watch::Sender<bool>,
}

impl<'a> PendingSubmit<'a> {
    fn begin(pending: &'a Mutex<usize>, loading: &'a watch::Sender<bool>) -> Self {
        *lock(pending) += 1;
        loading.send_replace(true);
        Self { pending, loading }
    }
}

impl Drop for PendingSubmit<'_> {
    fn drop(&mut self) {
        let mut pending = lock(self.pending);
        *pending = pending.saturating_sub(1);
        self.loading.send_replace(*pending > 0);
    }
}

impl<R: NoteRepository> NoteForm<R> {
    pub fn new(repository: Arc<R>, events: NoteEvents) -> Self {
        let (loading, _) = watch::channel(false);
        Self {
            repository,
            events,
            fields: Mutex::new(FormFields::default()),
            pending: Mutex::new(0),
            loading,
        }
    }

    pub fn set_title(&self, title: impl Into<String>) {
        lock(&self.fields).title = title.into();
    }

    pub fn set_body(&self, body: impl Into<String>) {
        lock(&self.fields).body = body.into();
    }

    pub fn fields(&self) -> FormFields {
        lock(&self.fields).clone()
    }

    pub fn is_loading(&self) -> bool {
        *self.loading.borrow()
    }

    /// Watch the "Adding note..." indicator
    pub fn loading(&self) -> watch::Receiver<bool> {
        self.loading.subscribe()
    }

    /// Send the current input as a new note.
    ///
    /// Both inputs are `required`: an empty raw value blocks the submission before
    /// anything is sent. Values are trimmed but not validated again after trimming.
    /// Failures are logged and otherwise absorbed; there is no retry.
    #[instrument(level = "debug", skip(self))]
    pub async fn submit(&self) -> SubmitOutcome {
        let fields = self.fields();
        if fields.title.is_empty() || fields.body.is_empty() {
            debug!("Submission blocked, required input is empty");
            return SubmitOutcome::Incomplete;
        }

        let draft = NoteDraft::from_input(&fields.title, &fields.body);

        let pending = PendingSubmit::begin(&self.pending, &self.loading);
        let outcome = match self.repository.create_note(&draft).await {
            Ok(()) => {
                info!(title = %draft.title, "Note added");
                self.events.notify_added();
                *lock(&self.fields) = FormFields::default();
                SubmitOutcome::Created
            }
            Err(e) => {
                error!(error = %e, "Error adding note");
                SubmitOutcome::Failed
            }
        };
        drop(pending);

        outcome
    }
}
