//! Task export: CSV for spreadsheets, pretty JSON for full fidelity.

use crate::tasks::Task;

const CSV_HEADERS: [&str; 8] = [
    "Title",
    "Description",
    "Priority",
    "Category",
    "Completed",
    "CompletedAt",
    "Mood",
    "CreatedAt",
];

/// One row per task. Title and description are double-quote-escaped,
/// timestamps are RFC 3339, null fields become empty strings.
pub fn to_csv(tasks: &[Task]) -> String {
    let mut lines = Vec::with_capacity(tasks.len() + 1);
    lines.push(CSV_HEADERS.join(","));
    for task in tasks {
        let row = [
            quote(&task.title),
            quote(&task.description),
            task.priority.to_string(),
            task.category.clone(),
            if task.completed { "Yes" } else { "No" }.to_string(),
            task.completed_at
                .map(|at| at.to_rfc3339())
                .unwrap_or_default(),
            task.mood.clone().unwrap_or_default(),
            task.created_at.to_rfc3339(),
        ];
        lines.push(row.join(","));
    }
    lines.join("\n")
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

/// Full-fidelity dump of the collection; parsing it back yields an equal
/// collection.
pub fn to_json(tasks: &[Task]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(tasks)
}
