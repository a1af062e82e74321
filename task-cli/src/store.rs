use crate::error::{Result, TaskError};
use crate::repository::TaskRepository;
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

pub const DEFAULT_TASK_FILE: &str = "task.json";

/// The JSON file backing a [`TaskRepository`].
///
/// Every save rewrites the whole file. There is no locking, so two processes
/// saving to the same file race and the last write wins.
#[derive(Debug)]
pub struct Store {
    path: PathBuf,
}

impl Store {
    /// Opens the backing file for reading and writing, creating it empty if missing.
    #[tracing::instrument]
    pub fn open(path: &Path) -> Result<Self> {
        OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)
            .map_err(|source| io_error(path, source))?;
        debug!("opened task file");
        Ok(Self {
            path: path.to_path_buf(),
        })
    }

    #[cfg(test)]
    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    /// Decodes the whole file. Blank content or `null` is an empty collection;
    /// zero or repeated ids are a format error.
    #[tracing::instrument(skip(self), fields(path = %self.path.display()))]
    pub fn load(&self) -> Result<TaskRepository> {
        let contents =
            fs::read_to_string(&self.path).map_err(|source| io_error(&self.path, source))?;
        if contents.trim().is_empty() {
            debug!("task file is empty");
            return Ok(TaskRepository::new());
        }
        let tasks: Option<TaskRepository> =
            serde_json::from_str(&contents).map_err(|source| TaskError::Format {
                path: self.path.clone(),
                source,
            })?;
        let tasks = tasks.unwrap_or_default();
        debug!(count = tasks.len(), "loaded tasks");
        Ok(tasks)
    }

    /// Truncates the file and writes the full collection back.
    #[tracing::instrument(skip(self, tasks), fields(path = %self.path.display()))]
    pub fn save(&self, tasks: &TaskRepository) -> Result<()> {
        let file = File::create(&self.path).map_err(|source| io_error(&self.path, source))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer(&mut writer, tasks)
            .map_err(|source| io_error(&self.path, source.into()))?;
        writer
            .write_all(b"\n")
            .and_then(|_| writer.flush())
            .map_err(|source| io_error(&self.path, source))?;
        debug!(count = tasks.len(), "saved tasks");
        Ok(())
    }
}

fn io_error(path: &Path, source: std::io::Error) -> TaskError {
    TaskError::Io {
        path: path.to_path_buf(),
        source,
    }
}
