//! ordo - checks and fixes the order of Ruby method definitions.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use ordo_config::OrdoConfig;
use ordo_diagnostics::Applicability;
use ordo_linter::{FixOutcome, LintError, LintMessage, LintResult, Linter, fix_source};
use ordo_source_file::{LineIndex, SourceCode};
use rayon::prelude::*;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Extensions of files treated as Ruby source.
const RUBY_EXTENSIONS: &[&str] = &["rb", "rake", "gemspec", "ru"];

/// Extensionless file names treated as Ruby source.
const RUBY_FILE_NAMES: &[&str] = &["Gemfile", "Rakefile"];

#[derive(Parser)]
#[command(name = "ordo")]
#[command(about = "Checks that Ruby methods are defined in alphabetical order", long_about = None)]
struct Cli {
    /// Log level for tracing output.
    #[arg(long, global = true, value_enum, default_value = "warn")]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check files for offenses
    Check {
        /// Paths to check
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Path to ordo.toml config
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Fix offenses in files
    Fix {
        /// Paths to fix
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Path to ordo.toml config
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Show diff without applying fixes
        #[arg(long)]
        diff: bool,

        /// Apply unsafe fixes
        #[arg(long)]
        r#unsafe: bool,
    },
}

/// Log level for tracing output.
#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    fn to_tracing_level(self) -> tracing::Level {
        match self {
            LogLevel::Trace => tracing::Level::TRACE,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_level);

    let success = match cli.command {
        Commands::Check { paths, config } => run_check(&paths, config.as_deref())?,
        Commands::Fix {
            paths,
            config,
            diff,
            r#unsafe: allow_unsafe,
        } => run_fix(&paths, config.as_deref(), diff, allow_unsafe)?,
    };

    if !success {
        std::process::exit(1);
    }
    Ok(())
}

/// Initialize tracing subscriber.
fn init_tracing(level: LogLevel) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.to_tracing_level().to_string()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

/// Run the check command. Returns false when offenses or errors were found.
fn run_check(paths: &[PathBuf], config_path: Option<&Path>) -> Result<bool> {
    let (_, linter) = load_linter(config_path)?;
    let Some(linter) = announce(linter, "Checking") else {
        return Ok(true);
    };

    let files = collect_ruby_files(paths);
    let reports: Vec<_> = files
        .par_iter()
        .map(|path| check_file(path, &linter))
        .collect();

    let mut total_offenses = 0;
    let mut total_correctable = 0;
    let mut errors = 0;

    for (path, report) in files.iter().zip(reports) {
        match report? {
            Ok((source, result)) => {
                print_offenses(path, &source, &result.messages);
                total_offenses += result.len();
                total_correctable += result.fixable().count();
            }
            Err(err) => {
                eprintln!("{}: {}", path.display(), err.to_string().red());
                errors += 1;
            }
        }
    }

    if total_offenses > 0 {
        println!(
            "\n{} file(s) inspected, {} offense(s) detected, {} offense(s) correctable",
            files.len(),
            total_offenses.to_string().red(),
            total_correctable.to_string().yellow()
        );
    } else {
        println!(
            "{}",
            format!("{} file(s) inspected, no offenses detected", files.len()).green()
        );
    }

    Ok(total_offenses == 0 && errors == 0)
}

/// A file whose fixer run finished.
struct FixedFile {
    source: String,
    outcome: FixOutcome,
}

/// Run the fix command. Returns false when a file could not be fixed.
fn run_fix(
    paths: &[PathBuf],
    config_path: Option<&Path>,
    diff_only: bool,
    allow_unsafe: bool,
) -> Result<bool> {
    let (config, linter) = load_linter(config_path)?;
    let Some(linter) = announce(linter, "Fixing") else {
        return Ok(true);
    };

    let applicability = if allow_unsafe || config.fix.unsafe_fixes {
        Applicability::Unsafe
    } else {
        Applicability::Safe
    };
    let max_iterations = config.fix.max_iterations;

    let files = collect_ruby_files(paths);
    let results: Vec<_> = files
        .par_iter()
        .map(|path| fix_file(path, &linter, applicability, max_iterations))
        .collect();

    let mut total_fixed = 0;
    let mut total_remaining = 0;
    let mut files_changed = 0;
    let mut errors = 0;

    for (path, result) in files.iter().zip(results) {
        let fixed = match result? {
            Ok(fixed) => fixed,
            Err(err) => {
                eprintln!("{}: {}", path.display(), err.to_string().red());
                errors += 1;
                continue;
            }
        };

        let outcome = &fixed.outcome;
        total_remaining += outcome.remaining.len();
        if !outcome.converged {
            eprintln!(
                "{}: {}",
                path.display(),
                format!("stopped fixing after {} iteration(s)", outcome.iterations).yellow()
            );
        }
        if !outcome.changed(&fixed.source) {
            continue;
        }

        total_fixed += outcome.fixes_applied;
        files_changed += 1;
        if diff_only {
            print_diff(path, &fixed.source, &outcome.fixed);
        } else {
            std::fs::write(path, &outcome.fixed)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!(
                "{}: {} fix(es) applied",
                path.display(),
                outcome.fixes_applied
            );
        }
    }

    if diff_only {
        println!(
            "\n{} fix(es) available in {} file(s)",
            total_fixed.to_string().green(),
            files_changed
        );
    } else if total_fixed > 0 {
        println!(
            "\n{} fix(es) applied in {} file(s)",
            total_fixed.to_string().green(),
            files_changed
        );
    } else {
        println!("{}", "No fixes to apply".green());
    }

    if total_remaining > 0 {
        eprintln!(
            "{} offense(s) could not be fixed automatically",
            total_remaining.to_string().yellow()
        );
    }

    Ok(errors == 0)
}

/// Print the rule banner, or warn and return `None` when nothing is enabled.
fn announce(linter: Linter, action: &str) -> Option<Linter> {
    if linter.is_empty() {
        eprintln!("{}", "Warning: No rules enabled".yellow());
        return None;
    }
    let rule_names: Vec<_> = linter.rule_names().collect();
    eprintln!(
        "{action} with {} rule(s): {}",
        rule_names.len(),
        rule_names.join(", ")
    );
    Some(linter)
}

/// Load the configuration and build the linter from it.
fn load_linter(config_path: Option<&Path>) -> Result<(OrdoConfig, Linter)> {
    let config = load_config(config_path)?;
    let linter = Linter::from_config(&config)?;
    Ok((config, linter))
}

/// Load `--config`, or the first config file found in the working directory.
fn load_config(config_path: Option<&Path>) -> Result<OrdoConfig> {
    let path = match config_path {
        Some(path) => Some(path.to_path_buf()),
        None => {
            let cwd = std::env::current_dir().context("Failed to read working directory")?;
            OrdoConfig::discover(&cwd)
        }
    };

    match path {
        Some(path) => {
            tracing::info!(path = %path.display(), "loading config");
            OrdoConfig::from_file(&path)
                .with_context(|| format!("Failed to load config from {}", path.display()))
        }
        None => {
            tracing::info!("no config file found, using defaults");
            Ok(OrdoConfig::default())
        }
    }
}

fn is_ruby_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| RUBY_EXTENSIONS.contains(&ext))
        || path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| RUBY_FILE_NAMES.contains(&name))
}

/// Expand `paths` into Ruby files, sorted and without duplicates.
fn collect_ruby_files(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_file() && is_ruby_file(path) {
            files.push(path.clone());
        } else if path.is_dir() {
            for entry in WalkDir::new(path)
                .into_iter()
                .filter_map(|e| e.ok())
                .filter(|e| e.file_type().is_file() && is_ruby_file(e.path()))
            {
                files.push(entry.path().to_path_buf());
            }
        }
    }
    files.sort();
    files.dedup();
    files
}

/// Lint one file. The outer error is I/O, the inner one a file that cannot be linted.
fn check_file(path: &Path, linter: &Linter) -> Result<Result<(String, LintResult), LintError>> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(linter.lint(&source).map(|result| (source, result)))
}

/// Run the fixer over one file without writing it.
fn fix_file(
    path: &Path,
    linter: &Linter,
    applicability: Applicability,
    max_iterations: usize,
) -> Result<Result<FixedFile, LintError>> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    tracing::debug!(path = %path.display(), "fixing");
    Ok(
        fix_source(&source, linter, applicability, max_iterations)
            .map(|outcome| FixedFile { source, outcome }),
    )
}

fn print_offenses(path: &Path, source: &str, messages: &[LintMessage]) {
    let line_index = LineIndex::from_source_text(source);
    let source_code = SourceCode::new(source, &line_index);

    for message in messages {
        let diagnostic = &message.diagnostic;
        let loc = source_code.line_column(diagnostic.range.start());
        let correctable = if diagnostic.fixable() {
            format!("{} ", "[Correctable]".green())
        } else {
            String::new()
        };
        println!(
            "{}:{}:{}: {}{} {}",
            path.display(),
            loc.line.get(),
            loc.column.get(),
            correctable,
            format!("[{}]", message.rule).blue(),
            diagnostic.kind.body
        );
        if let Some(note) = &diagnostic.note {
            println!("  {}", note.yellow());
        }
    }
}

/// Print a unified diff between original and fixed source.
fn print_diff(path: &Path, original: &str, fixed: &str) {
    use std::fmt::Write;

    let mut output = String::new();
    let _ = writeln!(output, "--- a/{}", path.display());
    let _ = writeln!(output, "+++ b/{}", path.display());

    let original_lines: Vec<&str> = original.lines().collect();
    let fixed_lines: Vec<&str> = fixed.lines().collect();

    let mut i = 0;
    let mut j = 0;
    let mut hunk = Hunk::default();

    while i < original_lines.len() || j < fixed_lines.len() {
        match (original_lines.get(i), fixed_lines.get(j)) {
            (Some(o), Some(f)) if o == f => {
                if hunk.is_open() {
                    hunk.lines.push((' ', *o));
                }
                i += 1;
                j += 1;
            }
            (Some(o), Some(f)) => {
                hunk.open(i, j);
                hunk.lines.push(('-', *o));
                hunk.lines.push(('+', *f));
                i += 1;
                j += 1;
            }
            (Some(o), None) => {
                hunk.open(i, j);
                hunk.lines.push(('-', *o));
                i += 1;
            }
            (None, Some(f)) => {
                hunk.open(i, j);
                hunk.lines.push(('+', *f));
                j += 1;
            }
            (None, None) => break,
        }

        // Flush once three unchanged lines follow the last change
        if hunk.lines.len() > 6 && hunk.trailing_context() >= 3 {
            hunk.flush(&mut output);
        }
    }
    hunk.flush(&mut output);

    print!("{output}");
}

/// Tagged lines of the diff hunk being built, with its 1-based start lines.
#[derive(Default)]
struct Hunk<'a> {
    start: Option<(usize, usize)>,
    lines: Vec<(char, &'a str)>,
}

impl Hunk<'_> {
    fn is_open(&self) -> bool {
        self.start.is_some()
    }

    fn open(&mut self, original: usize, fixed: usize) {
        if self.start.is_none() {
            self.start = Some((original + 1, fixed + 1));
        }
    }

    fn trailing_context(&self) -> usize {
        self.lines
            .iter()
            .rev()
            .take_while(|(tag, _)| *tag == ' ')
            .count()
    }

    fn flush(&mut self, output: &mut String) {
        use std::fmt::Write;

        let Some((original, fixed)) = self.start.take() else {
            return;
        };
        let _ = writeln!(
            output,
            "@@ -{},{} +{},{} @@",
            original,
            self.lines.iter().filter(|(tag, _)| *tag != '+').count(),
            fixed,
            self.lines.iter().filter(|(tag, _)| *tag != '-').count()
        );
        for (tag, line) in self.lines.drain(..) {
            let _ = match tag {
                '-' => writeln!(output, "{}{line}", "-".red()),
                '+' => writeln!(output, "{}{line}", "+".green()),
                _ => writeln!(output, " {line}"),
            };
        }
    }
}
