use crate::error::{Result, TaskError};
use crate::task::{Status, Task};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashSet;
use std::str::FromStr;
use thiserror::Error;
use tracing::{debug, info};

/// The ordered task collection, kept in insertion order.
///
/// Serializes as a bare JSON array of tasks. Decoding rejects arrays whose
/// ids are zero or repeated.
#[derive(Serialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(transparent)]
pub struct TaskRepository {
    tasks: Vec<Task>,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidCollection {
    #[error("task id 0 is not allowed")]
    ZeroId,
    #[error("task id {0} appears more than once")]
    DuplicateId(u32),
}

impl TryFrom<Vec<Task>> for TaskRepository {
    type Error = InvalidCollection;

    fn try_from(tasks: Vec<Task>) -> std::result::Result<Self, Self::Error> {
        let mut seen = HashSet::with_capacity(tasks.len());
        for task in &tasks {
            if task.id() == 0 {
                return Err(InvalidCollection::ZeroId);
            }
            if !seen.insert(task.id()) {
                return Err(InvalidCollection::DuplicateId(task.id()));
            }
        }
        Ok(Self { tasks })
    }
}

impl<'de> Deserialize<'de> for TaskRepository {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let tasks = Vec::<Task>::deserialize(deserializer)?;
        Self::try_from(tasks).map_err(D::Error::custom)
    }
}

/// Which tasks `list` yields.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ListFilter {
    #[default]
    All,
    Status(Status),
}

impl FromStr for ListFilter {
    type Err = TaskError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "all" => Ok(ListFilter::All),
            "todo" => Ok(ListFilter::Status(Status::Todo)),
            "in-progress" => Ok(ListFilter::Status(Status::InProgress)),
            "done" => Ok(ListFilter::Status(Status::Done)),
            other => Err(TaskError::Usage(format!("unknown list filter '{other}'"))),
        }
    }
}

impl ListFilter {
    fn matches(&self, task: &Task) -> bool {
        match self {
            ListFilter::All => true,
            ListFilter::Status(status) => task.status() == *status,
        }
    }
}

impl TaskRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    #[cfg(test)]
    pub(crate) fn find_by_id(&self, id: u32) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id() == id)
    }

    /// Appends a new `todo` task and returns its id.
    ///
    /// Ids start at 1 and continue from the highest id present.
    #[tracing::instrument(skip(self))]
    pub fn add(&mut self, description: String) -> Result<u32> {
        let id = self.next_id()?;
        self.tasks.push(Task::new(id, description));
        info!(id, "task added");
        Ok(id)
    }

    #[tracing::instrument(skip(self))]
    pub fn update(&mut self, id: u32, description: String) -> Result<()> {
        self.find_mut(id)?.set_description(description);
        info!(id, "task updated");
        Ok(())
    }

    /// Removes the task whose id matches, wherever it sits in the collection.
    #[tracing::instrument(skip(self))]
    pub fn delete(&mut self, id: u32) -> Result<()> {
        self.find_mut(id)?;
        self.tasks.retain(|task| task.id() != id);
        info!(id, "task deleted");
        Ok(())
    }

    /// Overwrites the status of a task. Any status may follow any other.
    #[tracing::instrument(skip(self))]
    pub fn mark(&mut self, id: u32, status: Status) -> Result<()> {
        self.find_mut(id)?.set_status(status);
        info!(id, %status, "task marked");
        Ok(())
    }

    pub fn mark_in_progress(&mut self, id: u32) -> Result<()> {
        self.mark(id, Status::InProgress)
    }

    pub fn mark_done(&mut self, id: u32) -> Result<()> {
        self.mark(id, Status::Done)
    }

    /// Tasks matching `filter`, in collection order.
    pub fn list(&self, filter: ListFilter) -> impl Iterator<Item = &Task> + Clone + '_ {
        self.tasks.iter().filter(move |task| filter.matches(task))
    }

    fn next_id(&self) -> Result<u32> {
        match self.tasks.iter().map(Task::id).max() {
            None => Ok(1),
            Some(max) => max.checked_add(1).ok_or(TaskError::IdsExhausted(max)),
        }
    }

    fn find_mut(&mut self, id: u32) -> Result<&mut Task> {
        if self.tasks.is_empty() {
            debug!(id, "task list is empty");
            return Err(TaskError::EmptyCollection);
        }
        self.tasks
            .iter_mut()
            .find(|task| task.id() == id)
            .ok_or_else(|| {
                debug!(id, "task not found");
                TaskError::NotFound(id)
            })
    }
}
