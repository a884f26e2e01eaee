pub mod logger_import;
pub mod opacity;
pub mod pr_comment;
pub mod report;
pub mod router;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::*;
use std::path::PathBuf;

use crate::logger_import::ImportInserter;
use crate::missing_tests::MissingTestFinder;
use crate::opacity::OpacityRewriter;
use crate::report::FileOutcome;
use crate::router::RouterCleaner;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Output raw JSON
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Insert the logger import into files that call the logger without importing it
    AddLoggerImport {
        /// Root directory to scan
        #[arg(default_value = "lib")]
        path: PathBuf,

        /// Package URI of the logger module
        #[arg(long, default_value = logger_import::DEFAULT_IMPORT_PATH)]
        import: String,

        /// Plan the edits without writing any file
        #[arg(long)]
        dry_run: bool,
    },

    /// Remove duplicated route blocks from the generated router file
    CleanRouter {
        /// Router file to clean
        #[arg(default_value = "lib/router.dart")]
        file: PathBuf,

        /// Route path literal identifying the duplicated block
        #[arg(long, default_value = router::DEFAULT_PATH_LITERAL)]
        path_literal: String,

        /// Blocks whose path line is indented deeper than this are removal candidates
        #[arg(long, default_value_t = router::DEFAULT_INDENT_THRESHOLD)]
        indent_threshold: usize,

        /// Write the cleaned file back instead of only reporting
        #[arg(long)]
        write: bool,
    },

    /// Report library files that have no corresponding test file
    FindMissingTests {
        /// Manifest listing library files
        #[arg(default_value = missing_tests::DEFAULT_LIB_MANIFEST)]
        lib_manifest: PathBuf,

        /// Manifest listing test files
        #[arg(default_value = missing_tests::DEFAULT_TEST_MANIFEST)]
        test_manifest: PathBuf,
    },

    /// Rewrite deprecated withOpacity calls into withAlpha
    FixOpacity {
        /// Files to rewrite in place
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Write the CI pull-request comment generator script
    EmitPrComment {
        /// Output path for the generator script
        #[arg(default_value = pr_comment::DEFAULT_OUTPUT)]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::AddLoggerImport {
            path,
            import,
            dry_run,
        } => {
            if !cli.json {
                println!("Scanning path: {:?}", path);
            }
            let inserter = ImportInserter::new(path, import);
            let plan = inserter.plan();

            if dry_run {
                if cli.json {
                    println!("{}", serde_json::to_string_pretty(&plan)?);
                } else {
                    for edit in &plan.edits {
                        println!("Would update {}", edit.file.display());
                    }
                    for r in &plan.report.files {
                        if let FileOutcome::Failed { error } = &r.outcome {
                            println!("Skipping {}: {}", r.file.display(), error);
                        }
                    }
                    println!("\n{}", "Summary".bold());
                    println!(" * Planned edits: {}", plan.edits.len());
                    println!(" * Skipped: {}", plan.report.skipped());
                    println!(" * Failed: {}", plan.report.failed());
                }
            } else {
                let report = inserter.apply(plan);
                if cli.json {
                    println!("{}", serde_json::to_string_pretty(&report)?);
                } else {
                    for r in &report.files {
                        match &r.outcome {
                            FileOutcome::Updated => println!("Updated {}", r.file.display()),
                            FileOutcome::Failed { error } => {
                                println!("Skipping {}: {}", r.file.display(), error)
                            }
                            _ => {}
                        }
                    }
                    println!("\n{}", "Summary".bold());
                    println!(" * Updated: {}", report.updated());
                    println!(" * Skipped: {}", report.skipped());
                    println!(" * Failed: {}", report.failed());
                }
            }
        }

        Command::CleanRouter {
            file,
            path_literal,
            indent_threshold,
            write,
        } => {
            let cleaner = RouterCleaner {
                path_literal,
                indent_threshold,
            };
            let outcome = cleaner.clean_file(&file, write)?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&outcome)?);
            } else if !outcome.changed {
                println!("No duplicate route blocks in {}", file.display());
            } else if write {
                println!(
                    "Removed {} line(s) from {}",
                    outcome.removed_lines,
                    file.display()
                );
            } else {
                println!(
                    "Would remove {} line(s) from {} (re-run with --write to apply)",
                    outcome.removed_lines,
                    file.display()
                );
            }
        }

        Command::FindMissingTests {
            lib_manifest,
            test_manifest,
        } => {
            let finder = MissingTestFinder::new();
            let missing = finder.run(&lib_manifest, &test_manifest)?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&missing)?);
            } else {
                println!("Files without tests:");
                for file in &missing {
                    println!("{}", file);
                }
            }
        }

        Command::FixOpacity { files } => {
            let report = OpacityRewriter::new(files).run();
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                for r in &report.files {
                    match &r.outcome {
                        FileOutcome::Updated => {
                            println!("Replacing withOpacity in {}", r.file.display())
                        }
                        FileOutcome::Unchanged => {
                            println!("No changes needed for {}", r.file.display())
                        }
                        FileOutcome::Missing => {
                            eprintln!("Error: File not found at {}", r.file.display())
                        }
                        FileOutcome::Failed { error } => {
                            eprintln!("An error occurred with {}: {}", r.file.display(), error)
                        }
                        _ => {}
                    }
                }
                println!("Script finished.");
            }
        }

        Command::EmitPrComment { output } => {
            pr_comment::emit(&output)?;
            println!("Wrote {}", output.display());
        }
    }

    Ok(())
}
