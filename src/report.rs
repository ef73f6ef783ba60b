use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::Path;

use crate::diagnostics::Diagnostic;

/// One line of the `--report` file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportLine {
    pub timestamp: String,
    #[serde(flatten)]
    pub diagnostic: Diagnostic,
}

/// Append every diagnostic as a JSON line, creating the file if needed.
pub fn append_diagnostics(path: &Path, diagnostics: &[Diagnostic]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
    }
    let mut file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open report {}", path.display()))?;

    let timestamp = chrono::Utc::now().to_rfc3339();
    for diagnostic in diagnostics {
        let line = serde_json::to_string(&ReportLine {
            timestamp: timestamp.clone(),
            diagnostic: diagnostic.clone(),
        })?;
        writeln!(file, "{line}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::{DiagnosticKind, Entity};

    fn read_report(path: &Path) -> Vec<ReportLine> {
        let contents = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(_) => return Vec::new(),
        };
        contents
            .lines()
            .filter(|line| !line.trim().is_empty())
            .filter_map(|line| serde_json::from_str(line).ok())
            .collect()
    }

    fn diag(kind: DiagnosticKind, entity: Entity) -> Diagnostic {
        Diagnostic::new(kind, entity, "something happened").with_id(Some("x1"))
    }

    #[test]
    fn appends_across_runs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("run.jsonl");

        append_diagnostics(&path, &[diag(DiagnosticKind::EmptyListing, Entity::List)]).unwrap();
        append_diagnostics(
            &path,
            &[
                diag(DiagnosticKind::DateParse, Entity::Card),
                diag(DiagnosticKind::SkippedSubtree, Entity::Board),
            ],
        )
        .unwrap();

        let lines = read_report(&path);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].diagnostic.kind, DiagnosticKind::EmptyListing);
        assert_eq!(lines[2].diagnostic.entity, Entity::Board);
        assert!(chrono::DateTime::parse_from_rfc3339(&lines[1].timestamp).is_ok());
    }

    #[test]
    fn lines_are_flat_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.jsonl");
        append_diagnostics(&path, &[diag(DiagnosticKind::Transport, Entity::Task)]).unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(raw.trim()).unwrap();
        assert_eq!(value["kind"], "transport");
        assert_eq!(value["entity_id"], "x1");
        assert!(value.get("timestamp").is_some());
    }

    #[test]
    fn missing_report_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read_report(&dir.path().join("none.jsonl")).is_empty());
    }
}
