use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use anyhow::{anyhow, Context, Result};
use chrono::Utc;
use uuid::Uuid;

use crate::model::task::Task;
use crate::repository::traits::TaskRepository;

const DEFAULT_DIR_NAME: &str = ".tasklist";
const DEFAULT_FILE_NAME: &str = "tasks.json";

/// Task store kept as a single JSON document on disk.
///
/// Every operation re-reads the file. The lock makes each read-modify-write
/// cycle atomic within one process only; separate processes writing the same
/// path can overwrite each other.
pub struct FileTaskRepository {
    file_path: PathBuf,
    lock: Mutex<()>,
}

impl FileTaskRepository {
    /// Opens (creating if needed) the store at `file_path`, or at
    /// `~/.tasklist/tasks.json` when no path is given.
    pub fn open(file_path: Option<PathBuf>) -> Result<Self> {
        let path = match file_path {
            Some(path) => path,
            None => default_file_path()?,
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("creating store directory {}", parent.display()))?;
            }
        }

        if !path.exists() {
            let mut writer = BufWriter::new(File::create(&path)?);
            serde_json::to_writer_pretty(&mut writer, &Vec::<Task>::new())?;
            writer.flush()?;
            tracing::debug!(path = %path.display(), "initialized empty task store");
        }

        Ok(FileTaskRepository {
            file_path: path,
            lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    fn guard(&self) -> Result<MutexGuard<'_, ()>> {
        self.lock
            .lock()
            .map_err(|_| anyhow!("task store lock poisoned"))
    }

    fn read_tasks(&self) -> Result<Vec<Task>> {
        let file = File::open(&self.file_path)
            .with_context(|| format!("opening {}", self.file_path.display()))?;
        let reader = BufReader::new(file);
        let tasks = serde_json::from_reader(reader)
            .with_context(|| format!("parsing {}", self.file_path.display()))?;
        Ok(tasks)
    }

    fn write_tasks(&self, tasks: &[Task]) -> Result<()> {
        let file = File::create(&self.file_path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, tasks)?;
        writer.flush()?;
        Ok(())
    }
}

fn default_file_path() -> Result<PathBuf> {
    let home_dir = dirs::home_dir()
        .ok_or_else(|| anyhow!("Could not determine home directory"))?;
    Ok(home_dir.join(DEFAULT_DIR_NAME).join(DEFAULT_FILE_NAME))
}

impl TaskRepository for FileTaskRepository {
    fn create(&self, task: Task) -> Result<Task> {
        let _guard = self.guard()?;
        let mut tasks = self.read_tasks()?;
        if tasks.iter().any(|t| t.id == task.id) {
            return Err(anyhow!("Task with ID {} already exists", task.id));
        }
        tasks.push(task.clone());
        self.write_tasks(&tasks)?;
        Ok(task)
    }

    fn list(&self) -> Result<Vec<Task>> {
        let _guard = self.guard()?;
        self.read_tasks()
    }

    fn find(&self, id: &Uuid) -> Result<Option<Task>> {
        let _guard = self.guard()?;
        let tasks = self.read_tasks()?;
        Ok(tasks.into_iter().find(|t| t.id == *id))
    }

    fn save(&self, task: &Task) -> Result<Task> {
        let _guard = self.guard()?;
        let mut tasks = self.read_tasks()?;
        let pos = tasks
            .iter()
            .position(|t| t.id == task.id)
            .ok_or_else(|| anyhow!("Task with ID {} not found", task.id))?;

        let mut saved = task.clone();
        saved.updated_at = Utc::now();
        saved.version = tasks[pos].version + 1;
        tasks[pos] = saved.clone();
        self.write_tasks(&tasks)?;
        Ok(saved)
    }

    fn toggle(&self, id: &Uuid) -> Result<Option<Task>> {
        let _guard = self.guard()?;
        let mut tasks = self.read_tasks()?;
        let Some(stored) = tasks.iter_mut().find(|t| t.id == *id) else {
            return Ok(None);
        };

        stored.toggle();
        stored.updated_at = Utc::now();
        stored.version += 1;
        let toggled = stored.clone();
        self.write_tasks(&tasks)?;
        Ok(Some(toggled))
    }

    fn delete(&self, id: &Uuid) -> Result<bool> {
        let _guard = self.guard()?;
        let mut tasks = self.read_tasks()?;
        let initial_len = tasks.len();
        tasks.retain(|t| t.id != *id);

        if tasks.len() == initial_len {
            return Ok(false);
        }

        self.write_tasks(&tasks)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Barrier};
    use std::thread;
    use tempfile::TempDir;

    fn open_temp() -> (TempDir, FileTaskRepository) {
        let dir = TempDir::new().unwrap();
        let repo = FileTaskRepository::open(Some(dir.path().join("nested").join("tasks.json"))).unwrap();
        (dir, repo)
    }

    #[test]
    fn test_open_creates_empty_document() {
        let (_dir, repo) = open_temp();
        assert!(repo.path().exists());
        assert!(repo.list().unwrap().is_empty());
    }

    #[test]
    fn test_create_and_find() {
        let (_dir, repo) = open_temp();
        let task = repo.create(Task::new("Buy milk".to_string())).unwrap();

        let found = repo.find(&task.id).unwrap().unwrap();
        assert_eq!(found, task);
        assert!(repo.find(&Uuid::new_v4()).unwrap().is_none());
    }

    #[test]
    fn test_create_rejects_duplicate_id() {
        let (_dir, repo) = open_temp();
        let task = repo.create(Task::new("once".to_string())).unwrap();
        assert!(repo.create(task).is_err());
    }

    #[test]
    fn test_save_bumps_version() {
        let (_dir, repo) = open_temp();
        let mut task = repo.create(Task::new("Walk dog".to_string())).unwrap();
        task.toggle();

        let saved = repo.save(&task).unwrap();
        assert!(saved.completed);
        assert_eq!(saved.version, 1);
        assert!(saved.updated_at >= saved.created_at);
        assert_eq!(repo.find(&task.id).unwrap().unwrap(), saved);
    }

    #[test]
    fn test_save_missing_record_fails() {
        let (_dir, repo) = open_temp();
        assert!(repo.save(&Task::new("ghost".to_string())).is_err());
    }

    #[test]
    fn test_delete_reports_existence() {
        let (_dir, repo) = open_temp();
        let task = repo.create(Task::new("Read".to_string())).unwrap();

        assert!(repo.delete(&task.id).unwrap());
        assert!(!repo.delete(&task.id).unwrap());
        assert!(repo.list().unwrap().is_empty());
    }

    #[test]
    fn test_toggle_in_place() {
        let (_dir, repo) = open_temp();
        let task = repo.create(Task::new("Walk dog".to_string())).unwrap();

        let toggled = repo.toggle(&task.id).unwrap().unwrap();
        assert!(toggled.completed);
        assert_eq!(toggled.version, 1);
        assert_eq!(repo.find(&task.id).unwrap().unwrap(), toggled);
        assert!(repo.toggle(&Uuid::new_v4()).unwrap().is_none());
    }

    #[test]
    fn test_concurrent_toggles_all_apply() {
        let (_dir, repo) = open_temp();
        let id = repo.create(Task::new("flip".to_string())).unwrap().id;
        let repo = Arc::new(repo);
        let barrier = Arc::new(Barrier::new(4));

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let repo = Arc::clone(&repo);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    repo.toggle(&id).unwrap().unwrap();
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let task = repo.find(&id).unwrap().unwrap();
        assert!(!task.completed);
        assert_eq!(task.version, 4);
    }

    #[test]
    fn test_reopen_sees_previous_writes() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tasks.json");
        let task = FileTaskRepository::open(Some(path.clone()))
            .unwrap()
            .create(Task::new("persisted".to_string()))
            .unwrap();

        let reopened = FileTaskRepository::open(Some(path)).unwrap();
        assert_eq!(reopened.list().unwrap(), vec![task]);
    }
}
