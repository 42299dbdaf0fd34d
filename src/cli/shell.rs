// src/cli/shell.rs
use crate::application::{DeleteOutcome, ListView, NoteList, NoteRepository, NotesApp, SubmitOutcome};
use crate::cli::output::format_notes;
use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::JoinHandle;
use tracing::debug;

const HELP: &str = "Commands:
  add <title> | <body>   add a note through the form
  delete <id>            press the delete control of a displayed note
  show                   print the displayed notes
  help                   show this help
  quit                   leave the shell";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Add { title: String, body: String },
    Delete(String),
    Show,
    Help,
    Quit,
    Empty,
    Unknown(String),
}

pub fn parse_line(line: &str) -> ShellCommand {
    let line = line.trim();
    if line.is_empty() {
        return ShellCommand::Empty;
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    match word {
        "add" => {
            let (title, body) = rest.split_once('|').unwrap_or((rest, ""));
            ShellCommand::Add {
                title: title.trim().to_string(),
                body: body.trim().to_string(),
            }
        }
        "delete" | "rm" if !rest.is_empty() => ShellCommand::Delete(rest.to_string()),
        "show" | "ls" => ShellCommand::Show,
        "help" | "?" => ShellCommand::Help,
        "quit" | "exit" => ShellCommand::Quit,
        _ => ShellCommand::Unknown(line.to_string()),
    }
}

fn print_view(view: &ListView) {
    println!("-- notes (render {}) --", view.revision);
    println!("{}", format_notes(&view.notes));
}

/// Reprint the list after every completed render
fn spawn_printer<R: NoteRepository + 'static>(list: &NoteList<R>, printed: u64) -> JoinHandle<()> {
    let mut views = list.subscribe();
    tokio::spawn(async move {
        let mut printed = printed;
        while views.changed().await.is_ok() {
            let view = views.borrow_and_update().clone();
            if !view.loading && view.revision != printed {
                printed = view.revision;
                print_view(&view);
            }
        }
    })
}

/// Read commands from stdin until `quit` or end of input
pub async fn run_shell<R: NoteRepository + 'static>(app: &NotesApp<R>) -> Result<()> {
    println!("{HELP}");
    let view = app.list().settled().await;
    print_view(&view);
    let printer = spawn_printer(app.list(), view.revision);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("Failed to read from stdin")? {
        let command = parse_line(&line);
        debug!(?command, "Shell command");
        match command {
            ShellCommand::Add { title, body } => {
                app.form().set_title(title);
                app.form().set_body(body);
                match app.form().submit().await {
                    SubmitOutcome::Created => println!("Note added"),
                    SubmitOutcome::Incomplete => println!("Title and body are required"),
                    SubmitOutcome::Failed => println!("Note was not added"),
                }
            }
            ShellCommand::Delete(id) => {
                let control = app
                    .list()
                    .view()
                    .delete_controls()
                    .into_iter()
                    .find(|control| control.note_id == id);
                match control {
                    Some(control) => match app.list().press(&control).await {
                        DeleteOutcome::Deleted => println!("Note deleted"),
                        DeleteOutcome::Failed => println!("Note was not deleted"),
                        DeleteOutcome::StaleControl => println!("List changed, try again"),
                    },
                    None => println!("No displayed note with id {id}"),
                }
            }
            ShellCommand::Show => print_view(&app.list().view()),
            ShellCommand::Help => println!("{HELP}"),
            ShellCommand::Quit => break,
            ShellCommand::Empty => {}
            ShellCommand::Unknown(line) => println!("Unknown command: {line}. Type 'help'."),
        }
    }

    printer.abort();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("add Groceries | milk, eggs", ShellCommand::Add { title: "Groceries".into(), body: "milk, eggs".into() })]
    #[case("add Groceries", ShellCommand::Add { title: "Groceries".into(), body: "".into() })]
    #[case("add | body only", ShellCommand::Add { title: "".into(), body: "body only".into() })]
    #[case("add a | b | c", ShellCommand::Add { title: "a".into(), body: "b | c".into() })]
    #[case("delete notes-123", ShellCommand::Delete("notes-123".into()))]
    #[case("rm notes-123", ShellCommand::Delete("notes-123".into()))]
    #[case("delete", ShellCommand::Unknown("delete".into()))]
    #[case("  show ", ShellCommand::Show)]
    #[case("?", ShellCommand::Help)]
    #[case("exit", ShellCommand::Quit)]
    #[case("   ", ShellCommand::Empty)]
    #[case("frobnicate", ShellCommand::Unknown("frobnicate".into()))]
    fn test_parse_line(#[case] line: &str, #[case] expected: ShellCommand) {
        assert_eq!(parse_line(line), expected);
    }
}
