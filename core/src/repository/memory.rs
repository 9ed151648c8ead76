use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use anyhow::{anyhow, Result};
use chrono::Utc;
use uuid::Uuid;

use crate::model::task::Task;
use crate::repository::traits::TaskRepository;

/// Process-local task store. Contents are lost when the process exits.
#[derive(Default)]
pub struct InMemoryTaskRepository {
    tasks: RwLock<HashMap<Uuid, Task>>,
}

impl InMemoryTaskRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, HashMap<Uuid, Task>>> {
        self.tasks.read().map_err(|_| anyhow!("task store lock poisoned"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, HashMap<Uuid, Task>>> {
        self.tasks.write().map_err(|_| anyhow!("task store lock poisoned"))
    }
}

impl TaskRepository for InMemoryTaskRepository {
    fn create(&self, task: Task) -> Result<Task> {
        let mut tasks = self.write()?;
        if tasks.contains_key(&task.id) {
            return Err(anyhow!("Task with ID {} already exists", task.id));
        }
        tasks.insert(task.id, task.clone());
        Ok(task)
    }

    fn list(&self) -> Result<Vec<Task>> {
        Ok(self.read()?.values().cloned().collect())
    }

    fn find(&self, id: &Uuid) -> Result<Option<Task>> {
        Ok(self.read()?.get(id).cloned())
    }

    fn save(&self, task: &Task) -> Result<Task> {
        let mut tasks = self.write()?;
        let stored = tasks
            .get_mut(&task.id)
            .ok_or_else(|| anyhow!("Task with ID {} not found", task.id))?;

        let version = stored.version + 1;
        *stored = task.clone();
        stored.updated_at = Utc::now();
        stored.version = version;
        Ok(stored.clone())
    }

    fn toggle(&self, id: &Uuid) -> Result<Option<Task>> {
        let mut tasks = self.write()?;
        let Some(stored) = tasks.get_mut(id) else {
            return Ok(None);
        };

        stored.toggle();
        stored.updated_at = Utc::now();
        stored.version += 1;
        Ok(Some(stored.clone()))
    }

    fn delete(&self, id: &Uuid) -> Result<bool> {
        Ok(self.write()?.remove(id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crud_cycle() {
        let repo = InMemoryTaskRepository::new();
        let mut task = repo.create(Task::new("Buy milk".to_string())).unwrap();
        assert_eq!(repo.list().unwrap().len(), 1);

        task.toggle();
        let saved = repo.save(&task).unwrap();
        assert!(saved.completed);
        assert_eq!(saved.version, 1);

        let toggled = repo.toggle(&task.id).unwrap().unwrap();
        assert!(!toggled.completed);
        assert_eq!(toggled.version, 2);

        assert!(repo.delete(&task.id).unwrap());
        assert!(repo.find(&task.id).unwrap().is_none());
        assert!(repo.toggle(&task.id).unwrap().is_none());
        assert!(!repo.delete(&task.id).unwrap());
    }
}
