use notesboard::domain::Note;
use notesboard::infrastructure::HttpNoteRepository;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// A stand-in for the notes API on a local port
#[allow(dead_code)]
pub struct TestApi {
    pub server: MockServer,
}

#[allow(dead_code)]
impl TestApi {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    pub fn repository(&self) -> Arc<HttpNoteRepository> {
        Arc::new(
            HttpNoteRepository::new(&self.server.uri(), Duration::from_secs(5))
                .expect("Mock server URI should be valid"),
        )
    }

    /// Answer every `GET /notes` with these notes, expecting `times` calls
    pub async fn serve_notes(&self, notes: &[Note], times: u64) {
        Mock::given(method("GET"))
            .and(path("/notes"))
            .respond_with(ResponseTemplate::new(200).set_body_json(envelope(notes)))
            .expect(times)
            .mount(&self.server)
            .await;
    }

    /// Answer the next `GET /notes` with these notes, then fall through to later mocks
    pub async fn serve_notes_once(&self, notes: &[Note]) {
        Mock::given(method("GET"))
            .and(path("/notes"))
            .respond_with(ResponseTemplate::new(200).set_body_json(envelope(notes)))
            .up_to_n_times(1)
            .expect(1)
            .mount(&self.server)
            .await;
    }
}

/// The service's list response shape
pub fn envelope(notes: &[Note]) -> Value {
    let data: Vec<Value> = notes
        .iter()
        .map(|note| {
            json!({
                "id": note.id,
                "title": note.title,
                "body": note.body,
                "createdAt": "2025-01-01T00:00:00.000Z",
                "archived": false,
            })
        })
        .collect();

    json!({
        "status": "success",
        "message": "Notes retrieved",
        "data": data,
    })
}

#[allow(dead_code)]
pub fn note(id: &str, title: &str, body: &str) -> Note {
    Note {
        id: id.to_string(),
        title: title.to_string(),
        body: body.to_string(),
    }
}
