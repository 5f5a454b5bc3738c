//! Terminal front end for the todo service.
//!
//! Loads the list once at start-up, then reads one command per line from
//! stdin. Notifications queued by the view-model are printed after every
//! command.

mod command;
mod render;

use std::io::{self, BufRead, Write};

use anyhow::Context;
use todo_core::{AppError, Config, TodoApp, TodoResource, Transport};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use command::{Command, HELP};

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "todo_app=info,todo_core=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = Config::from_env();
    tracing::info!(base_url = %config.base_url, "starting");

    let mut app = TodoApp::new(TodoResource::from_config(&config));
    app.load();

    let stdin = io::stdin();
    let stdout = io::stdout();
    run(&mut app, stdin.lock(), stdout.lock())
}

/// The command loop. Returns on `quit` or end of input.
fn run<T: Transport>(app: &mut TodoApp<T>, mut input: impl BufRead, mut out: impl Write) -> anyhow::Result<()> {
    writeln!(out, "{}", render::todo_list(app.todos(), app.load_state()))?;
    loop {
        write!(out, "> ")?;
        out.flush()?;
        let Some(line) = read_line(&mut input)? else {
            return Ok(());
        };

        let command = match Command::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(err) => {
                writeln!(out, "{err}")?;
                continue;
            }
        };

        match command {
            Command::Quit => return Ok(()),
            Command::Help => writeln!(out, "{HELP}")?,
            Command::List => writeln!(out, "{}", render::todo_list(app.todos(), app.load_state()))?,
            Command::Reload => {
                app.load();
                writeln!(out, "{}", render::todo_list(app.todos(), app.load_state()))?;
            }
            Command::New => {
                if fill_draft(app, &mut input, &mut out)? {
                    // Errors are reported through notifications.
                    let _ = app.submit();
                }
            }
            Command::Done(id) => match app.mark_finished(id) {
                Err(AppError::AlreadyFinished(_)) => writeln!(out, "#{id} is already finished")?,
                Ok(()) | Err(_) => {}
            },
            Command::Delete(id) => {
                let _ = app.delete(id);
            }
            Command::Show(id) => {
                if let Ok(todo) = app.refresh(id) {
                    writeln!(out, "{}", render::todo_card(todo))?;
                }
            }
        }

        for note in app.take_notifications() {
            writeln!(out, "{}", render::notification(&note))?;
        }
    }
}

/// Prompt for each draft field. Blank answers keep the current value.
/// Returns `false` when input ended before the form was complete.
fn fill_draft<T: Transport>(
    app: &mut TodoApp<T>,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> anyhow::Result<bool> {
    let draft = app.draft().clone();

    let Some(title) = prompt(input, out, "title", &draft.title)? else {
        return Ok(false);
    };
    let Some(description) = prompt(input, out, "description", &draft.description)? else {
        return Ok(false);
    };
    let due = draft.due_date().format("%Y-%m-%d").to_string();
    let Some(due_date) = prompt(input, out, "due date", &due)? else {
        return Ok(false);
    };
    let Some(priority) = prompt(input, out, "priority (low/medium/high)", draft.priority().as_str())? else {
        return Ok(false);
    };

    let draft = app.draft_mut();
    draft.set_title(title);
    draft.set_description(description);
    if let Err(err) = draft.set_due_date(&due_date) {
        writeln!(out, "{err}, keeping {due}")?;
    }
    draft.set_priority(&priority);
    Ok(true)
}

fn prompt(input: &mut impl BufRead, out: &mut impl Write, label: &str, current: &str) -> anyhow::Result<Option<String>> {
    if current.is_empty() {
        write!(out, "{label}: ")?;
    } else {
        write!(out, "{label} [{current}]: ")?;
    }
    out.flush()?;
    Ok(read_line(input)?.map(|line| if line.trim().is_empty() { current.to_string() } else { line }))
}

fn read_line(input: &mut impl BufRead) -> anyhow::Result<Option<String>> {
    let mut line = String::new();
    let read = input.read_line(&mut line).context("failed to read from stdin")?;
    if read == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}
