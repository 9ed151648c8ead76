use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use uuid::Uuid;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Task {
    pub id: Uuid,
    pub text: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,

    // Store-managed bookkeeping. Refreshed on every save; clients never rely on it.
    pub updated_at: DateTime<Utc>,
    pub version: u64,
}

impl Task {
    pub fn new(text: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            text,
            completed: false,
            created_at: now,
            updated_at: now,
            version: 0,
        }
    }

    pub fn toggle(&mut self) {
        self.completed = !self.completed;
    }
}

/// Newest first. Ties on `created_at` fall back to the id so repeated
/// listings of the same collection are stable.
pub fn sort_newest_first(tasks: &mut [Task]) {
    tasks.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| a.id.cmp(&b.id))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_new_task_is_open() {
        let task = Task::new("Buy milk".to_string());
        assert_eq!(task.text, "Buy milk");
        assert!(!task.completed);
        assert_eq!(task.version, 0);
        assert_eq!(task.created_at, task.updated_at);
    }

    #[test]
    fn test_toggle_twice_restores_flag() {
        let mut task = Task::new("Walk dog".to_string());
        task.toggle();
        assert!(task.completed);
        task.toggle();
        assert!(!task.completed);
    }

    #[test]
    fn test_sort_newest_first() {
        let now = Utc::now();
        let mut old = Task::new("old".to_string());
        old.created_at = now - Duration::hours(2);
        let mut mid = Task::new("mid".to_string());
        mid.created_at = now - Duration::hours(1);
        let mut new = Task::new("new".to_string());
        new.created_at = now;

        let mut tasks = vec![mid, old, new];
        sort_newest_first(&mut tasks);

        let texts: Vec<&str> = tasks.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["new", "mid", "old"]);
    }
}
