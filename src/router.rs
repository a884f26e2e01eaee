use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::Path;

pub const DEFAULT_PATH_LITERAL: &str = "path: '/ui-kit',";
pub const DEFAULT_INDENT_THRESHOLD: usize = 8;

/// Opens one route entry; the matching close is the first later line at the
/// same indentation starting with `)`.
const BLOCK_OPEN: &str = "GoRoute(";

/// Line span of one route entry, with the depth of its path line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteBlock {
    pub start: usize,
    pub end: usize,
    pub depth: usize,
}

fn indent_width(line: &str) -> usize {
    line.len() - line.trim_start().len()
}

/// Locates the enclosing block of each line containing `path_literal`.
/// A line whose block bounds cannot be resolved yields no block and is
/// therefore never removed.
pub fn find_route_blocks(lines: &[String], path_literal: &str) -> Vec<RouteBlock> {
    let mut blocks = Vec::new();
    for (i, line) in lines.iter().enumerate() {
        if !line.contains(path_literal) {
            continue;
        }
        let depth = indent_width(line);
        let Some(start) = lines[..i]
            .iter()
            .rposition(|l| l.trim_start().starts_with(BLOCK_OPEN))
        else {
            continue;
        };
        let open_indent = indent_width(&lines[start]);
        let Some(close_rel) = lines[i + 1..]
            .iter()
            .position(|l| indent_width(l) == open_indent && l.trim_start().starts_with(')'))
        else {
            continue;
        };
        blocks.push(RouteBlock {
            start,
            end: i + 1 + close_rel,
            depth,
        });
    }
    blocks
}

/// Removes deeper duplicates of a route entry, keeping the shallowest one.
/// A block is dropped only when its path line sits deeper than
/// `indent_threshold` and a strictly shallower occurrence exists.
pub fn dedupe_route_blocks(
    lines: &[String],
    path_literal: &str,
    indent_threshold: usize,
) -> Vec<String> {
    let blocks = find_route_blocks(lines, path_literal);
    let min_depth = blocks.iter().map(|b| b.depth).min();

    let mut dropped = vec![false; lines.len()];
    for block in &blocks {
        let shallower_exists = min_depth.map_or(false, |min| block.depth > min);
        if block.depth > indent_threshold && shallower_exists {
            for flag in &mut dropped[block.start..=block.end] {
                *flag = true;
            }
        }
    }

    lines
        .iter()
        .enumerate()
        .filter(|(i, _)| !dropped[*i])
        .map(|(_, l)| l.clone())
        .collect()
}

/// Result of one cleaning pass over the router file
#[derive(Debug, Serialize)]
pub struct CleanOutcome {
    pub removed_lines: usize,
    pub changed: bool,
}

pub struct RouterCleaner {
    pub path_literal: String,
    pub indent_threshold: usize,
}

impl RouterCleaner {
    pub fn new() -> Self {
        Self {
            path_literal: DEFAULT_PATH_LITERAL.to_string(),
            indent_threshold: DEFAULT_INDENT_THRESHOLD,
        }
    }

    /// Computes the filtered file. Nothing is written unless `write` is set,
    /// so the default pass only reports what a write would remove.
    pub fn clean_file(&self, file: &Path, write: bool) -> Result<CleanOutcome> {
        let content = fs::read_to_string(file)
            .with_context(|| format!("failed to read {}", file.display()))?;
        let lines: Vec<String> = content.split_inclusive('\n').map(str::to_string).collect();
        let filtered = dedupe_route_blocks(&lines, &self.path_literal, self.indent_threshold);
        let removed_lines = lines.len() - filtered.len();
        let changed = removed_lines > 0;
        if write && changed {
            fs::write(file, filtered.concat())
                .with_context(|| format!("failed to write {}", file.display()))?;
        }
        Ok(CleanOutcome {
            removed_lines,
            changed,
        })
    }
}

impl Default for RouterCleaner {
    fn default() -> Self {
        Self::new()
    }
}
