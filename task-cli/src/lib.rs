pub mod cli;
pub mod config;
pub mod error;
pub mod repository;
pub mod store;
pub mod task;

pub use error::{Result, TaskError};
pub use repository::{ListFilter, TaskRepository};
pub use store::Store;
pub use task::{Status, Task};

use cli::{Commands, USAGE};
use std::io::Write;

/// Runs a single invocation: load the task file, apply the command, save if it mutated.
///
/// Without a command only the usage text is printed and the file is left alone.
pub fn run(
    command: Option<Commands>,
    config: &config::Config,
    out: &mut impl Write,
) -> Result<()> {
    let Some(command) = command else {
        writeln!(out, "{USAGE}")?;
        return Ok(());
    };
    let store = Store::open(&config.file)?;
    let mut tasks = store.load()?;
    cli::dispatch(command, &mut tasks, &store, out)
}
