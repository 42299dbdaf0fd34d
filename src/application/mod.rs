// src/application/mod.rs
pub mod app;
pub mod events;
pub mod footer;
pub mod note_form;
pub mod note_list;
pub mod note_repository;
pub mod registry;

pub use app::{NotesApp, PageSnapshot};
pub use events::{NoteEvent, NoteEvents};
pub use footer::{NotesFooter, SocialLink};
pub use note_form::{FormFields, NoteForm, SubmitOutcome};
pub use note_list::{DeleteControl, DeleteOutcome, ListView, NoteList};
pub use note_repository::NoteRepository;
pub use registry::ElementRegistry;

use std::sync::{Mutex, MutexGuard, PoisonError};

/// Element state is plain data, so a poisoned lock is still usable.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
