use std::num::ParseIntError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TaskError {
    #[error("{0}")]
    Usage(String),
    #[error("invalid task id '{input}'")]
    Parse {
        input: String,
        #[source]
        source: ParseIntError,
    },
    #[error("cannot access task file {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("task file {} is corrupt", path.display())]
    Format {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("task list is empty")]
    EmptyCollection,
    #[error("no task with id {0}")]
    NotFound(u32),
    #[error("no task ids left, highest id {0} is already taken")]
    IdsExhausted(u32),
    #[error("cannot write output")]
    Output(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TaskError>;
