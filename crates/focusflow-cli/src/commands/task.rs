//! Task management commands for CLI.

use clap::Subcommand;
use chrono::{DateTime, Utc};
use focusflow_core::models::{EnergyLevel, TaskDraft, TaskPatch, TaskStatus};

use super::{guarded_client, parse_datetime, print_json, CmdResult};

#[derive(Subcommand)]
pub enum TaskAction {
    /// List tasks
    List {
        /// Only tasks not yet completed
        #[arg(long, conflicts_with = "completed")]
        pending: bool,
        /// Only completed tasks
        #[arg(long)]
        completed: bool,
    },
    /// Get task details
    Get {
        /// Task ID
        id: i64,
    },
    /// Create a new task
    Create {
        /// Task title
        title: String,
        /// Energy required: low, medium or high
        #[arg(long, default_value = "medium")]
        energy: EnergyLevel,
        /// Deadline (RFC 3339 or "YYYY-MM-DD HH:MM" local)
        #[arg(long, value_parser = parse_datetime)]
        deadline: Option<DateTime<Utc>>,
        /// Time-block start
        #[arg(long, value_parser = parse_datetime)]
        start: Option<DateTime<Utc>>,
        /// Time-block end
        #[arg(long, value_parser = parse_datetime)]
        end: Option<DateTime<Utc>>,
    },
    /// Update a task
    Update {
        /// Task ID
        id: i64,
        /// New title
        #[arg(long)]
        title: Option<String>,
        /// New energy level
        #[arg(long)]
        energy: Option<EnergyLevel>,
        /// New deadline
        #[arg(long, value_parser = parse_datetime)]
        deadline: Option<DateTime<Utc>>,
        /// New time-block start
        #[arg(long, value_parser = parse_datetime)]
        start: Option<DateTime<Utc>>,
        /// New time-block end
        #[arg(long, value_parser = parse_datetime)]
        end: Option<DateTime<Utc>>,
        /// New status: pending, in_progress, completed, ignored
        #[arg(long)]
        status: Option<TaskStatus>,
    },
    /// Delete a task
    Delete {
        /// Task ID
        id: i64,
    },
    /// Toggle completion
    Complete {
        /// Task ID
        id: i64,
    },
    /// Suggest tasks that fit your current energy
    Suggest {
        /// low, medium or high
        energy: EnergyLevel,
    },
    /// Completion statistics
    Stats,
}

pub async fn run(action: TaskAction) -> CmdResult {
    let (_, client) = guarded_client()?;

    match action {
        TaskAction::List { pending, completed } => {
            let tasks: Vec<_> = client
                .list_tasks()
                .await?
                .into_iter()
                .filter(|t| !(pending && t.is_completed) && !(completed && !t.is_completed))
                .collect();
            print_json(&tasks)?;
        }
        TaskAction::Get { id } => print_json(&client.get_task(id).await?)?,
        TaskAction::Create {
            title,
            energy,
            deadline,
            start,
            end,
        } => {
            let draft = TaskDraft {
                title,
                energy_required: energy,
                deadline,
                planned_start: start,
                planned_end: end,
            };
            draft.validate()?;
            let task = client.create_task(&draft).await?;
            eprintln!("Task created: {}", task.id);
            print_json(&task)?;
        }
        TaskAction::Update {
            id,
            title,
            energy,
            deadline,
            start,
            end,
            status,
        } => {
            let patch = TaskPatch {
                title,
                energy_required: energy,
                deadline,
                planned_start: start,
                planned_end: end,
                is_completed: status.map(|s| s == TaskStatus::Completed),
                status,
            };
            if patch.is_empty() {
                return Err("nothing to update".into());
            }
            print_json(&client.update_task(id, &patch).await?)?;
        }
        TaskAction::Delete { id } => {
            client.delete_task(id).await?;
            println!("Task deleted: {id}");
        }
        TaskAction::Complete { id } => print_json(&client.toggle_task(id).await?)?,
        TaskAction::Suggest { energy } => print_json(&client.task_suggestions(energy).await?)?,
        TaskAction::Stats => print_json(&client.task_stats().await?)?,
    }
    Ok(())
}
