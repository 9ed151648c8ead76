mod client;
mod logging;
mod resolve;
mod tui;

use anyhow::{anyhow, Result};
use chrono::Local;
use clap::Parser;
use tabled::settings::Style;
use tabled::{Table, Tabled};
use uuid::Uuid;

use crate::client::{HttpTaskApi, TaskApi, DEFAULT_API_URL};
use crate::resolve::resolve_id;
use crate::tui::app::Filter;

#[derive(Parser)]
#[command(name = "tasklist")]
#[command(about = "A small task list backed by the tasklist API", long_about = None)]
struct Cli {
    /// Base URL of the task API
    #[arg(long, env = "TASKLIST_API_URL", default_value = DEFAULT_API_URL, global = true)]
    api: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// List tasks, newest first
    List {
        /// Which tasks to show
        #[arg(long, value_enum, default_value_t = Filter::All)]
        filter: Filter,
        /// Print the raw JSON returned by the API
        #[arg(long)]
        json: bool,
    },
    /// Add a new task (usage: add Buy milk)
    Add {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        text: Vec<String>,
    },
    /// Mark a task done, or open again (full id or unique prefix)
    Toggle { id: String },
    /// Delete a task (full id or unique prefix)
    Delete { id: String },
    /// Open the Terminal User Interface
    Tui,
}

#[derive(Tabled)]
struct TaskRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Done")]
    done: String,
    #[tabled(rename = "Created")]
    created: String,
    #[tabled(rename = "Task")]
    text: String,
}

impl TaskRow {
    fn from_dto(task: &tasklist_core::TaskDto) -> Self {
        Self {
            id: task.id.to_string()[..8].to_string(),
            done: if task.completed { "✓".to_string() } else { String::new() },
            created: task.created_at.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string(),
            text: task.text.clone(),
        }
    }
}

async fn lookup_id(api: &HttpTaskApi, input: &str) -> Result<Uuid> {
    if let Ok(id) = Uuid::parse_str(input.trim()) {
        return Ok(id);
    }
    let tasks = api.list_tasks().await?;
    resolve_id(input, &tasks)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    if let Err(e) = logging::init() {
        eprintln!("Warning: file logging disabled: {}", e);
    }

    let api = HttpTaskApi::new(cli.api);
    tracing::debug!(base_url = api.base_url(), "using task API");

    match cli.command {
        Some(Commands::List { filter, json }) => {
            let tasks: Vec<_> = api
                .list_tasks()
                .await?
                .into_iter()
                .filter(|t| filter.matches(t))
                .collect();

            if json {
                println!("{}", serde_json::to_string_pretty(&tasks)?);
            } else if tasks.is_empty() {
                println!("No tasks found.");
            } else {
                let completed = tasks.iter().filter(|t| t.completed).count();
                let rows: Vec<TaskRow> = tasks.iter().map(TaskRow::from_dto).collect();
                println!("{}", Table::new(rows).with(Style::rounded()));
                println!("{} / {} completed", completed, tasks.len());
            }
        },
        Some(Commands::Add { text }) => {
            let text = text.join(" ");
            if text.trim().is_empty() {
                return Err(anyhow!("Task text is required."));
            }
            let created = api.create_task(&text).await?;
            println!("Task added: {} (ID: {})", created.text, created.id);
        },
        Some(Commands::Toggle { id }) => {
            let id = lookup_id(&api, &id).await?;
            let task = api.toggle_task(id).await?;
            let state = if task.completed { "completed" } else { "open" };
            println!("Task {} is now {}: {}", task.id, state, task.text);
        },
        Some(Commands::Delete { id }) => {
            let id = lookup_id(&api, &id).await?;
            let response = api.delete_task(id).await?;
            println!("{}", response.message);
        },
        Some(Commands::Tui) | None => {
            tui::run(api).await?;
        }
    }
    Ok(())
}
