//! Command-line surface and the dispatcher routing each command to the repository.

use crate::error::{Result, TaskError};
use crate::repository::{ListFilter, TaskRepository};
use crate::store::Store;
use clap::{Parser, Subcommand};
use std::io::Write;

pub const USAGE: &str = "\
Usage: task-cli <command> [arguments]

Commands:
  add <description>           Add a new task
  update <id> <description>   Replace a task's description
  delete <id>                 Delete a task
  mark-in-progress <id>       Mark a task as in progress
  mark-done <id>              Mark a task as done
  list [filter]               List tasks (all | todo | in-progress | done)";

pub const LIST_HINT: &str = "Add a valid option (all | todo | in-progress | done)";

const MISSING_DESCRIPTION: &str = "Please add a description to the task.";
const MISSING_ID: &str = "Please add an ID number.";

/// Arguments are optional at parse time so that missing ones are reported
/// with the tracker's own messages, in arity-then-type order.
#[derive(Parser, Debug)]
#[command(name = "task-cli", version, about = "Track tasks in a local JSON file")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Clone, PartialEq, Subcommand)]
pub enum Commands {
    /// Add a new task
    Add {
        #[arg(allow_hyphen_values = true)]
        description: Option<String>,
    },
    /// Replace a task's description
    Update {
        #[arg(allow_hyphen_values = true)]
        id: Option<String>,
        #[arg(allow_hyphen_values = true)]
        description: Option<String>,
    },
    /// Delete a task
    Delete {
        #[arg(allow_hyphen_values = true)]
        id: Option<String>,
    },
    /// Mark a task as in progress
    MarkInProgress {
        #[arg(allow_hyphen_values = true)]
        id: Option<String>,
    },
    /// Mark a task as done
    MarkDone {
        #[arg(allow_hyphen_values = true)]
        id: Option<String>,
    },
    /// List tasks, optionally filtered by status
    List { filter: Vec<String> },
    #[command(external_subcommand)]
    Unknown(Vec<String>),
}

/// Runs one command against the collection, saving it after any mutation.
pub fn dispatch(
    command: Commands,
    tasks: &mut TaskRepository,
    store: &Store,
    out: &mut impl Write,
) -> Result<()> {
    match command {
        Commands::Add { description } => {
            let description = required(description, MISSING_DESCRIPTION)?;
            let id = tasks.add(description)?;
            store.save(tasks)?;
            writeln!(out, "Task added successfully (ID: {id})")?;
        }
        Commands::Update { id, description } => {
            let id = required(id, MISSING_ID)?;
            let description = required(description, MISSING_DESCRIPTION)?;
            tasks.update(parse_id(id)?, description)?;
            store.save(tasks)?;
        }
        Commands::Delete { id } => {
            let id = parse_id(required(id, MISSING_ID)?)?;
            tasks.delete(id)?;
            store.save(tasks)?;
        }
        Commands::MarkInProgress { id } => {
            let id = parse_id(required(id, MISSING_ID)?)?;
            tasks.mark_in_progress(id)?;
            store.save(tasks)?;
        }
        Commands::MarkDone { id } => {
            let id = parse_id(required(id, MISSING_ID)?)?;
            tasks.mark_done(id)?;
            store.save(tasks)?;
        }
        Commands::List { filter } => {
            let filter = match filter.as_slice() {
                [] => ListFilter::All,
                [value] => match value.parse::<ListFilter>() {
                    Ok(filter) => filter,
                    Err(_) => {
                        writeln!(out, "{LIST_HINT}")?;
                        return Ok(());
                    }
                },
                _ => return Err(TaskError::Usage("too many arguments".to_string())),
            };
            for task in tasks.list(filter) {
                writeln!(out, "{task}")?;
            }
        }
        Commands::Unknown(_) => writeln!(out, "{USAGE}")?,
    }
    Ok(())
}

fn required(value: Option<String>, message: &str) -> Result<String> {
    value.ok_or_else(|| TaskError::Usage(message.to_string()))
}

fn parse_id(input: String) -> Result<u32> {
    input
        .trim()
        .parse::<u32>()
        .map_err(|source| TaskError::Parse { input, source })
}
