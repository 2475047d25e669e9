//! Task management commands.

use chrono::{DateTime, Utc};
use clap::Subcommand;
use flowlist_core::tasks::{NewTask, TaskStore, TaskUpdate};
use flowlist_core::{mood, ValidationError};

#[derive(Subcommand)]
pub enum TaskAction {
    /// Create a new task
    Add {
        /// Task title
        title: String,
        /// Task description
        #[arg(long, default_value = "")]
        description: String,
        /// Priority: low, medium or high
        #[arg(long, default_value = "medium")]
        priority: String,
        /// Free-form category tag
        #[arg(long, default_value = "general")]
        category: String,
        /// Due date (RFC 3339)
        #[arg(long)]
        due: Option<String>,
    },
    /// List open tasks
    List {
        /// Include completed tasks
        #[arg(long)]
        all: bool,
    },
    /// Show one task
    Get {
        /// Task ID
        id: String,
    },
    /// Complete a task with a mood check-in
    Complete {
        /// Task ID
        id: String,
        /// Mood tag: an emoji from the vocabulary or its name (e.g. happy)
        #[arg(long)]
        mood: String,
    },
    /// Clear a task's completion state
    Uncomplete {
        /// Task ID
        id: String,
    },
    /// Update task fields
    Update {
        /// Task ID
        id: String,
        /// New title
        #[arg(long)]
        title: Option<String>,
        /// New description
        #[arg(long)]
        description: Option<String>,
        /// New priority
        #[arg(long)]
        priority: Option<String>,
        /// New category
        #[arg(long)]
        category: Option<String>,
    },
    /// Delete a task
    Delete {
        /// Task ID
        id: String,
    },
    /// Show the mood vocabulary
    Moods,
}

pub fn run(action: TaskAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = TaskStore::open(super::open_storage()?);

    match action {
        TaskAction::Add {
            title,
            description,
            priority,
            category,
            due,
        } => {
            let due_date = due
                .map(|d| {
                    DateTime::parse_from_rfc3339(&d).map(|dt| dt.with_timezone(&Utc))
                })
                .transpose()?;
            let task = store.add(NewTask {
                title,
                description,
                priority: priority.parse()?,
                category,
                due_date,
            })?;
            println!("{}", serde_json::to_string_pretty(&task)?);
        }
        TaskAction::List { all } => {
            let tasks: Vec<_> = store
                .list()
                .iter()
                .filter(|t| all || !t.completed)
                .collect();
            println!("{}", serde_json::to_string_pretty(&tasks)?);
        }
        TaskAction::Get { id } => match store.get(&id) {
            Some(task) => println!("{}", serde_json::to_string_pretty(task)?),
            None => println!("Task not found: {id}"),
        },
        TaskAction::Complete { id, mood } => {
            let tag = mood::find(&mood).ok_or_else(|| ValidationError::UnknownMood(mood.clone()))?;
            let task = store.complete(&id, tag.emoji)?;
            println!("{}", serde_json::to_string_pretty(&task)?);
        }
        TaskAction::Uncomplete { id } => {
            let task = store.uncomplete(&id)?;
            println!("{}", serde_json::to_string_pretty(&task)?);
        }
        TaskAction::Update {
            id,
            title,
            description,
            priority,
            category,
        } => {
            let priority = priority.map(|p| p.parse()).transpose()?;
            let task = store.update(
                &id,
                TaskUpdate {
                    title,
                    description,
                    priority,
                    category,
                    ..TaskUpdate::default()
                },
            )?;
            println!("{}", serde_json::to_string_pretty(&task)?);
        }
        TaskAction::Delete { id } => {
            store.delete(&id)?;
            println!("Task deleted: {id}");
        }
        TaskAction::Moods => {
            for m in &mood::MOODS {
                println!("{}  {}", m.emoji, m.name);
            }
        }
    }

    Ok(())
}
