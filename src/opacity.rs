use crate::report::{BatchReport, FileOutcome};
use regex::{Captures, Regex};
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

lazy_static::lazy_static! {
    static ref WITH_OPACITY_RE: Regex = Regex::new(r"\.withOpacity\(([^)]+)\)").unwrap();
}

/// Rewrites every `.withOpacity(x)` call into `.withAlpha((255 * x).round())`,
/// keeping the argument expression verbatim. Already-converted content is a
/// fixed point.
pub fn rewrite_opacity(content: &str) -> String {
    WITH_OPACITY_RE
        .replace_all(content, |caps: &Captures| {
            format!(".withAlpha((255 * {}).round())", &caps[1])
        })
        .into_owned()
}

pub struct OpacityRewriter {
    pub files: Vec<PathBuf>,
}

impl OpacityRewriter {
    pub fn new(files: Vec<PathBuf>) -> Self {
        Self { files }
    }

    /// Rewrites each file in place, writing back only when the substitution
    /// changed something. Missing files and other per-file errors are
    /// recorded and never abort the batch.
    pub fn run(&self) -> BatchReport {
        let mut report = BatchReport::new();
        for file in &self.files {
            match fs::read_to_string(file) {
                Ok(content) => {
                    let new_content = rewrite_opacity(&content);
                    if new_content != content {
                        match fs::write(file, &new_content) {
                            Ok(()) => report.push(file.clone(), FileOutcome::Updated),
                            Err(e) => report.push(
                                file.clone(),
                                FileOutcome::Failed {
                                    error: e.to_string(),
                                },
                            ),
                        }
                    } else {
                        report.push(file.clone(), FileOutcome::Unchanged);
                    }
                }
                Err(e) if e.kind() == ErrorKind::NotFound => {
                    report.push(file.clone(), FileOutcome::Missing);
                }
                Err(e) => report.push(
                    file.clone(),
                    FileOutcome::Failed {
                        error: e.to_string(),
                    },
                ),
            }
        }
        report
    }
}
