use anyhow::{anyhow, Result};
use tasklist_core::TaskDto;
use uuid::Uuid;

/// Resolves a full id or a unique id prefix against the listed tasks.
pub fn resolve_id(input: &str, tasks: &[TaskDto]) -> Result<Uuid> {
    let input = input.trim().to_lowercase();
    if input.is_empty() {
        return Err(anyhow!("Task id is required"));
    }

    // 1. Exact match, even for ids the list does not contain
    if let Ok(id) = Uuid::parse_str(&input) {
        return Ok(id);
    }

    // 2. Prefix match
    let matches: Vec<Uuid> = tasks
        .iter()
        .map(|t| t.id)
        .filter(|id| id.to_string().starts_with(&input))
        .collect();

    match matches.len() {
        1 => Ok(matches[0]),
        0 => Err(anyhow!("No task matches id '{}'", input)),
        n => Err(anyhow!("Ambiguous id '{}' matches {} tasks", input, n)),
    }
}
