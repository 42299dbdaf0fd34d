// src/application/app.rs
use crate::application::{
    ElementRegistry, FormFields, ListView, NoteEvents, NoteForm, NoteList, NoteRepository,
    NotesFooter,
};
use crate::constants::{NOTES_FOOTER_TAG, NOTES_FORM_TAG, NOTES_LIST_TAG};
use crate::domain::DomainError;
use std::sync::Arc;
use tracing::{debug, info};

/// Everything needed to draw the page at one point in time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSnapshot {
    pub form: FormFields,
    pub form_loading: bool,
    pub list: ListView,
    pub footer: NotesFooter,
}

/// Hosting page for the three elements.
///
/// Owns the "note added" channel so the dependency between the form (emitter)
/// and the list (listener) goes through one explicit handle.
pub struct NotesApp<R: NoteRepository + 'static> {
    registry: ElementRegistry,
    events: NoteEvents,
    form: NoteForm<R>,
    list: NoteList<R>,
    footer: NotesFooter,
}

impl<R: NoteRepository + 'static> NotesApp<R> {
    /// Define the element tags and construct the elements. The list starts its
    /// initial fetch immediately.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(repository: Arc<R>, footer: NotesFooter) -> Result<Self, DomainError> {
        let mut registry = ElementRegistry::new();
        for tag in [NOTES_LIST_TAG, NOTES_FORM_TAG, NOTES_FOOTER_TAG] {
            registry.define(tag)?;
        }

        let events = NoteEvents::new();
        let list = NoteList::attach(Arc::clone(&repository), &events);
        let form = NoteForm::new(repository, events.clone());
        info!("Notes app started");

        Ok(Self {
            registry,
            events,
            form,
            list,
            footer,
        })
    }

    pub fn form(&self) -> &NoteForm<R> {
        &self.form
    }

    pub fn list(&self) -> &NoteList<R> {
        &self.list
    }

    pub fn footer(&self) -> &NotesFooter {
        &self.footer
    }

    pub fn events(&self) -> &NoteEvents {
        &self.events
    }

    pub fn registry(&self) -> &ElementRegistry {
        &self.registry
    }

    pub fn snapshot(&self) -> PageSnapshot {
        PageSnapshot {
            form: self.form.fields(),
            form_loading: self.form.is_loading(),
            list: self.list.view(),
            footer: self.footer.clone(),
        }
    }

    /// Stop the list's notification listener
    pub fn shutdown(&self) {
        debug!("Detaching notes list");
        self.list.detach();
    }
}

impl<R: NoteRepository + 'static> Drop for NotesApp<R> {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::SubmitOutcome;
    use crate::util::testing::{note, MockNoteRepository, RecordedCall};
    use std::time::Duration;

    #[tokio::test]
    async fn given_started_app_when_inspecting_registry_then_all_tags_are_defined() {
        let repository = Arc::new(MockNoteRepository::builder().build());

        let app = NotesApp::start(repository, NotesFooter::default()).expect("App should start");

        assert_eq!(
            app.registry().names().collect::<Vec<_>>(),
            vec!["notes-list", "notes-form", "notes-footer"]
        );
    }

    #[tokio::test]
    async fn given_started_app_when_form_creates_note_then_list_refetches_once() {
        // Arrange
        let repository = Arc::new(
            MockNoteRepository::builder()
                .with_note(note("1", "A", "x"))
                .build(),
        );
        let app = NotesApp::start(Arc::clone(&repository), NotesFooter::default())
            .expect("App should start");
        app.list().settled().await;
        let mut views = app.list().subscribe();
        app.form().set_title("T");
        app.form().set_body("B");

        // Act
        let outcome = app.form().submit().await;

        // Assert
        assert_eq!(outcome, SubmitOutcome::Created);
        let view = tokio::time::timeout(
            Duration::from_secs(5),
            views.wait_for(|view| view.revision == 2 && !view.loading),
        )
        .await
        .expect("List should refetch after the signal")
        .expect("List should still be alive")
        .clone();
        assert_eq!(view.notes.len(), 2);
        assert_eq!(view.notes[1].title, "T");
        assert!(matches!(
            repository.calls().as_slice(),
            [RecordedCall::List, RecordedCall::Create(_), RecordedCall::List]
        ));
    }

    #[tokio::test]
    async fn given_started_app_when_snapshotting_then_reflects_element_state() {
        let repository = Arc::new(MockNoteRepository::builder().build());
        let app = NotesApp::start(repository, NotesFooter::default()).expect("App should start");
        app.list().settled().await;
        app.form().set_title("draft");

        let snapshot = app.snapshot();

        assert_eq!(snapshot.form.title, "draft");
        assert!(!snapshot.form_loading);
        assert_eq!(snapshot.list.revision, 1);
        assert_eq!(snapshot.footer, NotesFooter::default());
    }
}
