// src/util/testing.rs

use anyhow::Result;
use async_trait::async_trait;
use std::collections::{HashSet, VecDeque};
use std::env;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::Notify;
use tracing::{debug, info};
use tracing_subscriber::{
    filter::filter_fn,
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use crate::application::NoteRepository;
use crate::domain::{DomainError, Note, NoteDraft};

/// Shorthand for building a [`Note`] in tests
pub fn note(id: &str, title: &str, body: &str) -> Note {
    Note {
        id: id.to_string(),
        title: title.to_string(),
        body: body.to_string(),
    }
}

/// A call the mock received, in arrival order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedCall {
    List,
    Create(NoteDraft),
    Delete(String),
}

enum CreateFailure {
    Status(u16),
    Transport,
}

enum ListBehavior {
    Respond(Vec<Note>),
    Fail,
}

struct ScriptedList {
    behavior: ListBehavior,
    gate: Option<Arc<Notify>>,
}

/// In-memory stand-in for the remote notes service.
///
/// Holds a collection that creates append to and deletes remove from, so a
/// refetch after a mutation sees the change. List responses can be scripted
/// ahead of time; once the script is used up the current collection is returned.
///
/// # Examples
///
/// ```
/// use notesboard::util::testing::{note, MockNoteRepository};
///
/// let mock = MockNoteRepository::builder()
///     .with_note(note("1", "Groceries", "milk"))
///     .with_list_failure()
///     .with_delete_failure("1")
///     .build();
/// ```
pub struct MockNoteRepository {
    notes: Mutex<Vec<Note>>,
    list_script: Mutex<VecDeque<ScriptedList>>,
    create_failure: Option<CreateFailure>,
    create_gate: Option<Arc<Notify>>,
    delete_failures: HashSet<String>,
    calls: Mutex<Vec<RecordedCall>>,
    next_id: Mutex<usize>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MockNoteRepository {
    pub fn builder() -> MockNoteRepositoryBuilder {
        MockNoteRepositoryBuilder::new()
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        lock(&self.calls).clone()
    }

    pub fn list_calls(&self) -> usize {
        lock(&self.calls)
            .iter()
            .filter(|call| matches!(call, RecordedCall::List))
            .count()
    }

    pub fn created(&self) -> Vec<NoteDraft> {
        lock(&self.calls)
            .iter()
            .filter_map(|call| match call {
                RecordedCall::Create(draft) => Some(draft.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn deleted(&self) -> Vec<String> {
        lock(&self.calls)
            .iter()
            .filter_map(|call| match call {
                RecordedCall::Delete(id) => Some(id.clone()),
                _ => None,
            })
            .collect()
    }

    /// Current state of the simulated remote collection
    pub fn notes(&self) -> Vec<Note> {
        lock(&self.notes).clone()
    }

    fn record(&self, call: RecordedCall) {
        lock(&self.calls).push(call);
    }
}

#[async_trait]
impl NoteRepository for MockNoteRepository {
    async fn list_notes(&self) -> Result<Vec<Note>, DomainError> {
        self.record(RecordedCall::List);
        let scripted = lock(&self.list_script).pop_front();

        let Some(scripted) = scripted else {
            return Ok(self.notes());
        };
        if let Some(gate) = scripted.gate {
            gate.notified().await;
        }
        match scripted.behavior {
            ListBehavior::Respond(notes) => Ok(notes),
            ListBehavior::Fail => Err(DomainError::Transport("connection refused".to_string())),
        }
    }

    async fn create_note(&self, draft: &NoteDraft) -> Result<(), DomainError> {
        self.record(RecordedCall::Create(draft.clone()));
        if let Some(gate) = &self.create_gate {
            gate.notified().await;
        }
        match self.create_failure {
            Some(CreateFailure::Status(status)) => {
                return Err(DomainError::Status {
                    status,
                    url: "mock://notes".to_string(),
                });
            }
            Some(CreateFailure::Transport) => {
                return Err(DomainError::Transport("connection refused".to_string()));
            }
            None => {}
        }

        let id = {
            let mut next_id = lock(&self.next_id);
            *next_id += 1;
            format!("mock-{}", *next_id)
        };
        lock(&self.notes).push(Note {
            id,
            title: draft.title.clone(),
            body: draft.body.clone(),
        });
        Ok(())
    }

    async fn delete_note(&self, id: &str) -> Result<(), DomainError> {
        self.record(RecordedCall::Delete(id.to_string()));
        if self.delete_failures.contains(id) {
            return Err(DomainError::Transport("connection reset".to_string()));
        }

        let mut notes = lock(&self.notes);
        let before = notes.len();
        notes.retain(|note| note.id != id);
        if notes.len() == before {
            return Err(DomainError::Status {
                status: 404,
                url: format!("mock://notes/{id}"),
            });
        }
        Ok(())
    }
}

/// Builder for MockNoteRepository
///
/// Provides a fluent interface for configuring mock behavior.
pub struct MockNoteRepositoryBuilder {
    notes: Vec<Note>,
    list_script: VecDeque<ScriptedList>,
    create_failure: Option<CreateFailure>,
    create_gate: Option<Arc<Notify>>,
    delete_failures: HashSet<String>,
}

impl MockNoteRepositoryBuilder {
    pub fn new() -> Self {
        Self {
            notes: vec![],
            list_script: VecDeque::new(),
            create_failure: None,
            create_gate: None,
            delete_failures: HashSet::new(),
        }
    }

    /// Seed the remote collection
    pub fn with_note(mut self, note: Note) -> Self {
        self.notes.push(note);
        self
    }

    /// Answer the next list call with these notes. Scripted calls are consumed in order.
    pub fn with_list_response(mut self, notes: Vec<Note>) -> Self {
        self.list_script.push_back(ScriptedList {
            behavior: ListBehavior::Respond(notes),
            gate: None,
        });
        self
    }

    /// Like [`Self::with_list_response`], but the call waits for `gate` first
    pub fn with_gated_list_response(mut self, gate: Arc<Notify>, notes: Vec<Note>) -> Self {
        self.list_script.push_back(ScriptedList {
            behavior: ListBehavior::Respond(notes),
            gate: Some(gate),
        });
        self
    }

    /// Fail the next list call with a transport error
    pub fn with_list_failure(mut self) -> Self {
        self.list_script.push_back(ScriptedList {
            behavior: ListBehavior::Fail,
            gate: None,
        });
        self
    }

    /// Reject every create with the given HTTP status
    pub fn with_create_failure(mut self, status: u16) -> Self {
        self.create_failure = Some(CreateFailure::Status(status));
        self
    }

    /// Fail every create as if the service could not be reached
    pub fn with_create_transport_failure(mut self) -> Self {
        self.create_failure = Some(CreateFailure::Transport);
        self
    }

    /// Make every create wait for `gate` before answering
    pub fn with_gated_create(mut self, gate: Arc<Notify>) -> Self {
        self.create_gate = Some(gate);
        self
    }

    /// Fail deletes of this id with a transport error
    pub fn with_delete_failure(mut self, id: &str) -> Self {
        self.delete_failures.insert(id.to_string());
        self
    }

    pub fn build(self) -> MockNoteRepository {
        MockNoteRepository {
            notes: Mutex::new(self.notes),
            list_script: Mutex::new(self.list_script),
            create_failure: self.create_failure,
            create_gate: self.create_gate,
            delete_failures: self.delete_failures,
            calls: Mutex::new(vec![]),
            next_id: Mutex::new(0),
        }
    }
}

impl Default for MockNoteRepositoryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn init_test_setup() -> Result<()> {
    // Set up logging first
    setup_test_logging();

    info!("Test Setup complete");
    Ok(())
}

fn setup_test_logging() {
    debug!("INIT: Attempting logger init from testing.rs");
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "trace");
    }

    // Create a filter for noisy modules
    let noisy_modules = ["hyper", "reqwest", "rustls", "mio", "wiremock"];
    let module_filter = filter_fn(move |metadata| {
        !noisy_modules
            .iter()
            .any(|name| metadata.target().starts_with(name))
    });

    // Set up the subscriber with environment filter
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    // Build and set the subscriber
    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_names(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(module_filter)
            .with_filter(env_filter),
    );

    // Only set if we haven't already set a global subscriber
    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
    } else {
        subscriber.try_init().unwrap_or_else(|e| {
            eprintln!("Error: Failed to set up logging: {}", e);
        });
    }
}
