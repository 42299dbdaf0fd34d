// src/application/note_repository.rs
use crate::domain::{DomainError, Note, NoteDraft};
use async_trait::async_trait;

/// Remote notes collection the elements read from and write to.
#[async_trait]
pub trait NoteRepository: Send + Sync {
    /// Fetch the full collection in the order the service returns it
    async fn list_notes(&self) -> Result<Vec<Note>, DomainError>;

    /// Ask the service to create a note; the assigned id is not returned
    async fn create_note(&self, draft: &NoteDraft) -> Result<(), DomainError>;

    async fn delete_note(&self, id: &str) -> Result<(), DomainError>;
}
