//! Export the task collection as CSV or JSON.

use std::path::PathBuf;

use clap::Subcommand;
use flowlist_core::{export, TaskStore};

#[derive(Subcommand)]
pub enum ExportAction {
    /// CSV with one row per task
    Csv {
        /// Write to a file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Pretty-printed full-fidelity JSON
    Json {
        /// Write to a file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

pub fn run(action: ExportAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = TaskStore::open(super::open_storage()?);

    let (content, output) = match action {
        ExportAction::Csv { output } => (export::to_csv(store.list()), output),
        ExportAction::Json { output } => (export::to_json(store.list())?, output),
    };

    match output {
        Some(path) => {
            std::fs::write(&path, content)?;
            println!("Exported {} tasks to {}", store.list().len(), path.display());
        }
        None => println!("{content}"),
    }

    Ok(())
}
