// src/infrastructure/http.rs
use crate::application::NoteRepository;
use crate::domain::{DomainError, Note, NoteDraft};
use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Response, Url};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument};

/// `GET /notes` answers with the collection wrapped in `data`.
#[derive(Debug, Deserialize)]
struct NotesEnvelope {
    data: Vec<Note>,
}

/// [`NoteRepository`] backed by the notes REST API.
#[derive(Debug, Clone)]
pub struct HttpNoteRepository {
    client: Client,
    base_url: Url,
}

impl HttpNoteRepository {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Self::with_client(client, base_url)
    }

    pub fn with_client(client: Client, base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .with_context(|| format!("Invalid notes API URL: {base_url}"))?;
        if base_url.cannot_be_a_base() {
            bail!("Notes API URL cannot carry a path: {base_url}");
        }
        debug!(%base_url, "Created notes API client");
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `{base}/notes`, followed by `segment` when given. Segments are percent-encoded.
    fn notes_url(&self, segment: Option<&str>) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push("notes");
            if let Some(segment) = segment {
                segments.push(segment);
            }
        }
        url
    }
}

fn transport(err: reqwest::Error) -> DomainError {
    DomainError::Transport(err.to_string())
}

fn ensure_success(response: Response) -> Result<Response, DomainError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(DomainError::Status {
            status: status.as_u16(),
            url: response.url().to_string(),
        })
    }
}

#[async_trait]
impl NoteRepository for HttpNoteRepository {
    #[instrument(level = "debug", skip(self))]
    async fn list_notes(&self) -> Result<Vec<Note>, DomainError> {
        let response = self
            .client
            .get(self.notes_url(None))
            .send()
            .await
            .map_err(transport)?;
        let body = ensure_success(response)?.bytes().await.map_err(transport)?;

        let envelope: NotesEnvelope = serde_json::from_slice(&body)
            .map_err(|e| DomainError::MalformedBody(e.to_string()))?;
        debug!(count = envelope.data.len(), "Received notes");
        Ok(envelope.data)
    }

    #[instrument(level = "debug", skip(self))]
    async fn create_note(&self, draft: &NoteDraft) -> Result<(), DomainError> {
        let response = self
            .client
            .post(self.notes_url(None))
            .json(draft)
            .send()
            .await
            .map_err(transport)?;
        ensure_success(response)?;
        Ok(())
    }

    #[instrument(level = "debug", skip(self))]
    async fn delete_note(&self, id: &str) -> Result<(), DomainError> {
        let response = self
            .client
            .delete(self.notes_url(Some(id)))
            .send()
            .await
            .map_err(transport)?;
        ensure_success(response)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn repository(base_url: &str) -> HttpNoteRepository {
        HttpNoteRepository::new(base_url, Duration::from_secs(1)).expect("Valid base URL")
    }

    #[rstest]
    #[case("https://notes-api.dicoding.dev/v2", "https://notes-api.dicoding.dev/v2/notes")]
    #[case("https://notes-api.dicoding.dev/v2/", "https://notes-api.dicoding.dev/v2/notes")]
    #[case("http://127.0.0.1:8080", "http://127.0.0.1:8080/notes")]
    fn test_collection_url(#[case] base: &str, #[case] expected: &str) {
        assert_eq!(repository(base).notes_url(None).as_str(), expected);
    }

    #[test]
    fn given_id_with_reserved_characters_when_building_url_then_encodes_segment() {
        let url = repository("http://localhost/v2").notes_url(Some("a/b c"));

        assert_eq!(url.as_str(), "http://localhost/v2/notes/a%2Fb%20c");
    }

    #[test]
    fn given_unparseable_url_when_creating_repository_then_returns_error() {
        let result = HttpNoteRepository::new("not a url", Duration::from_secs(1));

        assert!(result.is_err());
    }

    #[test]
    fn given_non_base_url_when_creating_repository_then_returns_error() {
        let result = HttpNoteRepository::new("mailto:notes@example.com", Duration::from_secs(1));

        assert!(result.is_err());
    }
}
