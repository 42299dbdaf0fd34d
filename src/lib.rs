// src/lib.rs
pub mod application;
pub mod cli;
pub mod constants;
pub mod domain;
pub mod infrastructure;
pub mod ports;
pub mod util;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use application::{DeleteOutcome, NoteEvents, NoteForm, NoteList, NotesApp, SubmitOutcome};
use infrastructure::{Config, HttpNoteRepository, PageRenderer};
use ports::HtmlPresenter;
use tracing::{debug, info};

use crate::cli::args::{Args, Command};
use crate::cli::output::format_notes;

pub async fn run(args: Args) -> Result<()> {
    debug!(?args, "Starting notesboard with arguments");

    let Args {
        config: config_path,
        endpoint,
        command,
        ..
    } = args;

    if let Command::Init { force } = command {
        return init_config(config_path.as_deref(), force);
    }

    let config = Config::load_or_default(config_path.as_deref())?;
    let base_url = endpoint.unwrap_or_else(|| config.api.base_url.clone());
    let repository = Arc::new(HttpNoteRepository::new(&base_url, config.api.timeout())?);
    info!(base_url = %repository.base_url(), "Using notes API");

    match command {
        Command::List { json } => list_notes(repository, json).await,
        Command::Add { title, body } => add_note(repository, &title, &body).await,
        Command::Delete { note_id } => delete_note(repository, &note_id).await,
        Command::Page { output } => {
            let app = NotesApp::start(repository, config.footer.to_footer())?;
            export_page(&app, output.as_deref()).await
        }
        Command::Shell => {
            let app = NotesApp::start(repository, config.footer.to_footer())?;
            cli::shell::run_shell(&app).await
        }
        Command::Init { .. } => Ok(()),
    }
}

async fn list_notes(repository: Arc<HttpNoteRepository>, json: bool) -> Result<()> {
    let list = NoteList::new(repository);
    list.refresh().await;
    let view = list.view();

    if json {
        println!("{}", serde_json::to_string_pretty(&view.notes)?);
    } else {
        println!("{}", format_notes(&view.notes));
    }
    Ok(())
}

async fn add_note(repository: Arc<HttpNoteRepository>, title: &str, body: &str) -> Result<()> {
    let form = NoteForm::new(repository, NoteEvents::new());
    form.set_title(title);
    form.set_body(body);

    match form.submit().await {
        SubmitOutcome::Created => {
            println!("Note added");
            Ok(())
        }
        SubmitOutcome::Incomplete => bail!("Title and body are required"),
        SubmitOutcome::Failed => bail!("Note was not added"),
    }
}

async fn delete_note(repository: Arc<HttpNoteRepository>, note_id: &str) -> Result<()> {
    let list = NoteList::new(repository);

    match list.delete(note_id).await {
        DeleteOutcome::Deleted => {
            println!("Note {note_id} deleted, {} remaining", list.view().notes.len());
            Ok(())
        }
        DeleteOutcome::Failed | DeleteOutcome::StaleControl => {
            bail!("Note {note_id} was not deleted")
        }
    }
}

async fn export_page(app: &NotesApp<HttpNoteRepository>, output: Option<&Path>) -> Result<()> {
    app.list().settled().await;
    let html = HtmlPresenter::new().render_page(&app.snapshot());
    debug!(bytes = html.len(), "Rendered page");

    let mut renderer = PageRenderer::new();
    match output {
        Some(path) => {
            renderer.write_to(path, &html)?;
            println!("Page written to {}", path.display());
        }
        None => {
            let path = renderer.create_temp_file(&html)?;
            renderer.open_in_browser(&path).await?;
        }
    }
    Ok(())
}

fn init_config(path: Option<&Path>, force: bool) -> Result<()> {
    let path: PathBuf = match path {
        Some(path) => path.to_path_buf(),
        None => Config::default_path().context("Could not determine config directory")?,
    };
    if path.exists() && !force {
        bail!("Config file already exists at {} (use --force to overwrite)", path.display());
    }

    Config::create_default(&path)?;
    println!("Config written to {}", path.display());
    Ok(())
}
