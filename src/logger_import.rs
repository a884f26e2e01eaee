use crate::report::{BatchReport, FileOutcome};
use serde::Serialize;
use std::fs;
use std::path::PathBuf;
use walkdir::WalkDir;

pub const DEFAULT_IMPORT_PATH: &str = "package:expense_tracker/core/utils/logger.dart";

/// A rewrite computed during the plan phase, applied later in one write
#[derive(Debug, Clone, Serialize)]
pub struct PlannedEdit {
    pub file: PathBuf,
    #[serde(skip_serializing)]
    pub new_content: String,
}

#[derive(Debug, Default, Serialize)]
pub struct Plan {
    pub edits: Vec<PlannedEdit>,
    pub report: BatchReport,
}

pub struct ImportInserter {
    pub root: PathBuf,
    pub extension: String,
    pub markers: Vec<String>,
    pub import_path: String,
}

impl ImportInserter {
    pub fn new(root: impl Into<PathBuf>, import_path: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            extension: "dart".to_string(),
            markers: vec!["log.".to_string(), "log(".to_string()],
            import_path: import_path.into(),
        }
    }

    /// The line inserted into files that use the logger without importing it
    pub fn import_line(&self) -> String {
        format!("import '{}';", self.import_path)
    }

    /// Returns the rewritten content, or None when the file needs no edit.
    /// The import line lands right after the last existing import, or at the
    /// top of the file when there is none.
    pub fn rewrite(&self, content: &str) -> Option<String> {
        if !self.markers.iter().any(|m| content.contains(m.as_str())) {
            return None;
        }
        if content.contains(&self.import_path) {
            return None;
        }

        let mut lines: Vec<String> = content.split_inclusive('\n').map(str::to_string).collect();
        let insert_at = lines
            .iter()
            .rposition(|line| line.trim_start().starts_with("import "))
            .map(|idx| idx + 1)
            .unwrap_or(0);
        lines.insert(insert_at, format!("{}\n", self.import_line()));
        Some(lines.concat())
    }

    /// Walks the root and computes every edit without touching any file.
    /// Unreadable files are recorded and do not stop the traversal.
    pub fn plan(&self) -> Plan {
        let mut plan = Plan::default();
        for entry in WalkDir::new(&self.root).into_iter().filter_map(|e| e.ok()) {
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            if !path
                .extension()
                .map_or(false, |ext| ext == self.extension.as_str())
            {
                continue;
            }
            match fs::read_to_string(path) {
                Ok(content) => match self.rewrite(&content) {
                    Some(new_content) => plan.edits.push(PlannedEdit {
                        file: path.to_path_buf(),
                        new_content,
                    }),
                    None => plan.report.push(
                        path.to_path_buf(),
                        FileOutcome::Skipped {
                            reason: "no logger usage or import already present".to_string(),
                        },
                    ),
                },
                Err(e) => plan.report.push(
                    path.to_path_buf(),
                    FileOutcome::Failed {
                        error: e.to_string(),
                    },
                ),
            }
        }
        plan
    }

    /// Writes every planned edit in place. Write failures are recorded per
    /// file and the rest of the batch still goes through.
    pub fn apply(&self, plan: Plan) -> BatchReport {
        let mut report = plan.report;
        for edit in plan.edits {
            match fs::write(&edit.file, &edit.new_content) {
                Ok(()) => report.push(edit.file, FileOutcome::Updated),
                Err(e) => report.push(
                    edit.file,
                    FileOutcome::Failed {
                        error: e.to_string(),
                    },
                ),
            }
        }
        report
    }
}
