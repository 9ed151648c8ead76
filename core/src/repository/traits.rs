use std::sync::Arc;

use crate::model::task::Task;
use anyhow::Result;
use uuid::Uuid;

/// Document-store contract for tasks. Each call is a single-document
/// operation and is atomic with respect to other calls on the same store.
pub trait TaskRepository: Send + Sync {
    fn create(&self, task: Task) -> Result<Task>;
    fn list(&self) -> Result<Vec<Task>>;
    fn find(&self, id: &Uuid) -> Result<Option<Task>>;
    /// Persists an existing record and returns it with refreshed bookkeeping.
    fn save(&self, task: &Task) -> Result<Task>;
    /// Inverts `completed` and persists it under one lock. `None` when no
    /// record has this id.
    fn toggle(&self, id: &Uuid) -> Result<Option<Task>>;
    /// Returns whether a record was removed.
    fn delete(&self, id: &Uuid) -> Result<bool>;
}

pub type SharedRepository = Arc<dyn TaskRepository>;

impl<R: TaskRepository + ?Sized> TaskRepository for Arc<R> {
    fn create(&self, task: Task) -> Result<Task> {
        (**self).create(task)
    }

    fn list(&self) -> Result<Vec<Task>> {
        (**self).list()
    }

    fn find(&self, id: &Uuid) -> Result<Option<Task>> {
        (**self).find(id)
    }

    fn save(&self, task: &Task) -> Result<Task> {
        (**self).save(task)
    }

    fn toggle(&self, id: &Uuid) -> Result<Option<Task>> {
        (**self).toggle(id)
    }

    fn delete(&self, id: &Uuid) -> Result<bool> {
        (**self).delete(id)
    }
}
