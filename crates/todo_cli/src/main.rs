//! Command line host for the task list.
//!
//! # Responsibility
//! - Resolve configuration, start logging and open durable storage.
//! - Translate one subcommand into events on the core service and print the
//!   resulting list.

mod cli;
mod config;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use cli::{Cli, Command, ThemeAction};
use config::resolve_config;
use todo_core::db::open_db;
use todo_core::{
    FilterMode, ListEvent, RenderModel, RowState, SqliteStorage, TaskStore, ThemeController,
    TodoService,
};

fn main() {
    if let Err(err) = run(Cli::parse()) {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = resolve_config(cli.data_dir.as_deref(), cli.log_level.as_deref())?;
    std::fs::create_dir_all(&config.data_dir).with_context(|| {
        format!(
            "failed to create data directory `{}`",
            config.data_dir.display()
        )
    })?;
    // A log setup failure should not block the task list itself.
    if let Err(err) = todo_core::init_logging(&config.log_level, &config.log_dir.to_string_lossy())
    {
        eprintln!("warning: logging disabled: {err}");
    }

    let command = cli.command.name();
    info!("event=cli_command module=cli status=start command={command}");

    let conn = open_db(&config.db_path)
        .with_context(|| format!("failed to open `{}`", config.db_path.display()))?;
    let storage = SqliteStorage::try_new(&conn)?;

    if let Command::Theme { action } = cli.command {
        let themes = ThemeController::new(&storage);
        let mut theme = themes.load(false);
        if action == ThemeAction::Toggle {
            theme = themes.toggle(theme)?;
        }
        println!("{} {theme}", theme.indicator());
        info!("event=cli_command module=cli status=ok command={command} theme={theme}");
        return Ok(());
    }

    let mut service = TodoService::new(TaskStore::load(&storage));
    let events = match cli.command {
        Command::Add { text } => vec![ListEvent::Submit(text)],
        Command::List { filter, search } => {
            vec![ListEvent::SetFilter(filter), ListEvent::SetSearch(search)]
        }
        Command::Toggle { id } => vec![ListEvent::Toggle(id.into())],
        Command::Edit { id, text } => vec![
            ListEvent::BeginEdit(id.into()),
            ListEvent::UpdateDraft(text),
            ListEvent::CommitEdit,
        ],
        Command::Rm { id } => vec![ListEvent::Delete(id.into())],
        Command::ClearCompleted => vec![ListEvent::ClearCompleted],
        Command::Theme { .. } => Vec::new(),
    };

    let mut model = service.render();
    for event in events {
        model = service.dispatch(event)?;
    }
    print!("{}", format_model(&model, service.filter()));
    info!(
        "event=cli_command module=cli status=ok command={command} rows={} remaining={}",
        model.rows.len(),
        model.remaining_count
    );
    Ok(())
}

fn format_model(model: &RenderModel, filter: FilterMode) -> String {
    let mut out = String::new();
    if model.empty_state_visible {
        out.push_str("No tasks.\n");
    }
    for row in &model.rows {
        let mark = if row.completed { "x" } else { " " };
        let text = match &row.state {
            RowState::Display => row.text.as_str(),
            RowState::Editing { draft, .. } => draft.as_str(),
        };
        out.push_str(&format!("[{mark}] {}  {text}\n", row.id));
    }
    out.push_str(&format!(
        "{} remaining ({filter})\n",
        model.remaining_count
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::format_model;
    use todo_core::{render, FilterMode, Task};

    #[test]
    fn empty_model_prints_empty_state_and_count() {
        let model = render(&[], FilterMode::Active, "", None);
        assert_eq!(
            format_model(&model, FilterMode::Active),
            "No tasks.\n0 remaining (active)\n"
        );
    }

    #[test]
    fn rows_show_completion_mark() {
        let mut done = Task::new("Pay bills").unwrap();
        done.completed = true;
        let open = Task::new("Buy milk").unwrap();
        let model = render(&[open.clone(), done.clone()], FilterMode::All, "", None);

        let printed = format_model(&model, FilterMode::All);
        assert!(printed.contains(&format!("[ ] {}  Buy milk", open.id)));
        assert!(printed.contains(&format!("[x] {}  Pay bills", done.id)));
        assert!(printed.ends_with("1 remaining (all)\n"));
    }
}
