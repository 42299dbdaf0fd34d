mod helpers;

use anyhow::Result;
use helpers::{note, TestApi};
use notesboard::application::{
    DeleteOutcome, FormFields, ListView, NoteEvent, NotesApp, NotesFooter, SubmitOutcome,
};
use notesboard::infrastructure::HttpNoteRepository;
use notesboard::ports::HtmlPresenter;
use serde_json::json;
use std::future::Future;
use std::time::Duration;
use tokio::sync::broadcast::error::TryRecvError;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, ResponseTemplate};

async fn within<T>(future: impl Future<Output = T>) -> T {
    tokio::time::timeout(Duration::from_secs(5), future)
        .await
        .expect("Operation should finish in time")
}

async fn wait_for_revision(app: &NotesApp<HttpNoteRepository>, revision: u64) -> ListView {
    let mut views = app.list().subscribe();
    let view = within(views.wait_for(|view| view.revision >= revision && !view.loading))
        .await
        .expect("List should still be alive")
        .clone();
    view
}

#[tokio::test]
async fn given_one_note_when_pressing_its_delete_control_then_deletes_and_refetches() -> Result<()> {
    // Arrange
    let api = TestApi::start().await;
    api.serve_notes_once(&[note("1", "A", "x")]).await;
    Mock::given(method("DELETE"))
        .and(path("/notes/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "message": "Note deleted"
        })))
        .expect(1)
        .mount(&api.server)
        .await;
    api.serve_notes(&[], 1).await;

    let app = NotesApp::start(api.repository(), NotesFooter::default())?;
    let view = within(app.list().settled()).await;

    let html = HtmlPresenter::new().render_list(&view);
    assert_eq!(html.matches(r#"<div class="note">"#).count(), 1);
    assert!(html.contains("<h2>A</h2>"));
    assert!(html.contains("<p>x</p>"));
    assert!(html.contains(r#"data-id="1""#));
    let control = view.delete_controls().remove(0);

    // Act
    let outcome = within(app.list().press(&control)).await;

    // Assert
    assert_eq!(outcome, DeleteOutcome::Deleted);
    let view = app.list().view();
    assert_eq!(view.revision, 2);
    assert!(view.notes.is_empty());
    Ok(())
}

#[tokio::test]
async fn given_valid_input_when_submitting_then_posts_once_notifies_once_and_list_refetches() -> Result<()> {
    // Arrange
    let api = TestApi::start().await;
    api.serve_notes_once(&[]).await;
    Mock::given(method("POST"))
        .and(path("/notes"))
        .and(body_json(json!({ "title": "T", "body": "B" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "status": "success",
            "message": "Note created",
            "data": { "id": "notes-1", "title": "T", "body": "B" }
        })))
        .expect(1)
        .mount(&api.server)
        .await;
    api.serve_notes(&[note("notes-1", "T", "B")], 1).await;

    let app = NotesApp::start(api.repository(), NotesFooter::default())?;
    within(app.list().settled()).await;
    let mut signals = app.events().subscribe();
    app.form().set_title("T");
    app.form().set_body("B");

    // Act
    let outcome = within(app.form().submit()).await;

    // Assert
    assert_eq!(outcome, SubmitOutcome::Created);
    assert_eq!(signals.try_recv(), Ok(NoteEvent::Added));
    assert_eq!(signals.try_recv(), Err(TryRecvError::Empty));
    assert_eq!(app.form().fields(), FormFields::default());
    let view = wait_for_revision(&app, 2).await;
    assert_eq!(view.notes, vec![note("notes-1", "T", "B")]);
    Ok(())
}

#[tokio::test]
async fn given_unavailable_service_when_app_starts_then_list_renders_empty() -> Result<()> {
    // Arrange
    let api = TestApi::start().await;
    Mock::given(method("GET"))
        .and(path("/notes"))
        .respond_with(ResponseTemplate::new(503).set_body_string("Service Unavailable"))
        .expect(1)
        .mount(&api.server)
        .await;

    // Act
    let app = NotesApp::start(api.repository(), NotesFooter::default())?;
    let view = within(app.list().settled()).await;

    // Assert
    assert_eq!(view.revision, 1);
    assert!(view.notes.is_empty());
    assert!(!view.loading);
    Ok(())
}

#[tokio::test]
async fn given_rejected_create_when_submitting_then_keeps_input_and_list_is_not_refetched() -> Result<()> {
    // Arrange
    let api = TestApi::start().await;
    api.serve_notes(&[note("1", "A", "x")], 1).await;
    Mock::given(method("POST"))
        .and(path("/notes"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&api.server)
        .await;

    let app = NotesApp::start(api.repository(), NotesFooter::default())?;
    within(app.list().settled()).await;
    let mut signals = app.events().subscribe();
    app.form().set_title("T");
    app.form().set_body("B");

    // Act
    let outcome = within(app.form().submit()).await;

    // Assert
    assert_eq!(outcome, SubmitOutcome::Failed);
    assert_eq!(signals.try_recv(), Err(TryRecvError::Empty));
    assert_eq!(app.form().fields().title, "T");
    assert_eq!(app.list().view().revision, 1);
    Ok(())
}

#[tokio::test]
async fn given_failing_delete_when_pressing_control_then_keeps_stale_collection() -> Result<()> {
    // Arrange
    let api = TestApi::start().await;
    api.serve_notes(&[note("1", "A", "x")], 1).await;
    Mock::given(method("DELETE"))
        .and(path("/notes/1"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&api.server)
        .await;

    let app = NotesApp::start(api.repository(), NotesFooter::default())?;
    let before = within(app.list().settled()).await;
    let control = before.delete_controls().remove(0);

    // Act
    let outcome = within(app.list().press(&control)).await;

    // Assert
    assert_eq!(outcome, DeleteOutcome::Failed);
    assert_eq!(app.list().view(), before);
    Ok(())
}

#[tokio::test]
async fn given_unchanged_collection_when_fetching_twice_then_renders_identical_markup() -> Result<()> {
    // Arrange
    let api = TestApi::start().await;
    api.serve_notes(&[note("1", "A", "x"), note("2", "B", "y")], 2).await;
    let app = NotesApp::start(api.repository(), NotesFooter::default())?;
    let presenter = HtmlPresenter::new();
    let first = presenter.render_list(&within(app.list().settled()).await);

    // Act
    within(app.list().refresh()).await;
    let second = presenter.render_list(&app.list().view());

    // Assert
    assert_eq!(first, second);
    Ok(())
}
