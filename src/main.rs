use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use formlift::{transform_with_report, RuleTable, TransformError};
use similar::{ChangeTag, TextDiff};
use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Parser)]
#[command(name = "formlift")]
#[command(about = "Rule-driven TSX codemod for form-item wrapper components", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rewrite files (or stdin with `-`) in place
    Apply {
        /// Files or directories to transform; `-` reads stdin, writes stdout
        paths: Vec<PathBuf>,

        /// Rule table file (.toml or .json); built-in table if omitted
        #[arg(short, long)]
        rules: Option<PathBuf>,

        /// Show what would change without writing anything
        #[arg(short = 'n', long)]
        dry_run: bool,

        /// Show unified diff of changes
        #[arg(short, long)]
        diff: bool,
    },

    /// Report which files would change, without writing
    Check {
        paths: Vec<PathBuf>,

        #[arg(short, long)]
        rules: Option<PathBuf>,
    },

    /// Print the active rule table
    Rules {
        #[arg(short, long)]
        rules: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Apply {
            paths,
            rules,
            dry_run,
            diff,
        } => cmd_apply(paths, rules, dry_run, diff),

        Commands::Check { paths, rules } => cmd_check(paths, rules),

        Commands::Rules { rules } => cmd_rules(rules),
    }
}

fn load_rules(path: Option<PathBuf>) -> Result<RuleTable> {
    match path {
        Some(path) => RuleTable::load_from_path(&path)
            .with_context(|| format!("loading rule table from {}", path.display())),
        None => Ok(RuleTable::default()),
    }
}

/// Expand files and directories into the list of source files to transform.
fn collect_source_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    const EXTENSIONS: &[&str] = &["tsx", "jsx", "ts", "js"];

    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            let mut found = Vec::new();
            for entry in WalkDir::new(path) {
                let entry = entry?;
                let is_source = entry.file_type().is_file()
                    && entry
                        .path()
                        .extension()
                        .and_then(|s| s.to_str())
                        .is_some_and(|ext| EXTENSIONS.contains(&ext));
                if is_source {
                    found.push(entry.path().to_path_buf());
                }
            }
            found.sort();
            files.extend(found);
        } else {
            files.push(path.clone());
        }
    }
    Ok(files)
}

/// Atomic file write: tempfile in the same directory + persist.
fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let parent = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let mut temp = tempfile::NamedTempFile::new_in(parent)?;
    temp.write_all(content.as_bytes())?;
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Show unified diff between original and rewritten content.
fn display_diff(label: &str, original: &str, modified: &str) {
    println!("\n{}", format!("--- {label} (original)").dimmed());
    println!("{}", format!("+++ {label} (rewritten)").dimmed());

    let diff = TextDiff::from_lines(original, modified);
    for change in diff.iter_all_changes() {
        let sign = match change.tag() {
            ChangeTag::Delete => format!("-{}", change).red(),
            ChangeTag::Insert => format!("+{}", change).green(),
            ChangeTag::Equal => format!(" {}", change).normal(),
        };
        print!("{}", sign);
    }
}

fn cmd_apply(
    paths: Vec<PathBuf>,
    rules_path: Option<PathBuf>,
    dry_run: bool,
    show_diff: bool,
) -> Result<()> {
    let rules = load_rules(rules_path)?;

    // Stdin mode: transform one unit, write to stdout, done.
    if paths.len() == 1 && paths[0] == Path::new("-") {
        let mut source = String::new();
        std::io::stdin().read_to_string(&mut source)?;
        let report = transform_with_report(&source, &rules)?;
        print!("{}", report.output);
        return Ok(());
    }

    if paths.is_empty() {
        anyhow::bail!("no input paths given (use `-` for stdin)");
    }

    let files = collect_source_files(&paths)?;
    if files.is_empty() {
        anyhow::bail!("no source files found under the given paths");
    }

    let mut rewritten = 0;
    let mut unchanged = 0;
    let mut failed = 0;

    for file in &files {
        let source = match fs::read_to_string(file) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("{} {}: {}", "✗".red(), file.display(), e);
                failed += 1;
                continue;
            }
        };

        match transform_with_report(&source, &rules) {
            Ok(report) if report.changed(&source) => {
                if dry_run {
                    println!(
                        "{} {}: would rewrite {} wrapper(s)",
                        "✓".green(),
                        file.display(),
                        report.rewrites
                    );
                } else {
                    write_atomic(file, &report.output)?;
                    println!(
                        "{} {}: rewrote {} wrapper(s)",
                        "✓".green(),
                        file.display(),
                        report.rewrites
                    );
                }
                for warning in &report.warnings {
                    eprintln!("  {} {}", "warning:".yellow(), warning);
                }
                if show_diff {
                    display_diff(&file.display().to_string(), &source, &report.output);
                }
                rewritten += 1;
            }
            Ok(_) => {
                println!("{} {}: no matches", "⊙".yellow(), file.display());
                unchanged += 1;
            }
            Err(TransformError::Parse(e)) => {
                eprintln!("{} {}: {}", "✗".red(), file.display(), e);
                failed += 1;
            }
            Err(e) => {
                eprintln!("{} {}: {}", "✗".red(), file.display(), e);
                failed += 1;
            }
        }
    }

    println!();
    println!("{}", "Summary:".bold());
    println!("  {} rewritten", format!("{rewritten}").green());
    println!("  {} unchanged", format!("{unchanged}").yellow());
    println!("  {} failed", format!("{failed}").red());

    if failed > 0 {
        std::process::exit(1);
    }
    Ok(())
}

fn cmd_check(paths: Vec<PathBuf>, rules_path: Option<PathBuf>) -> Result<()> {
    let rules = load_rules(rules_path)?;
    let files = collect_source_files(&paths)?;
    if files.is_empty() {
        anyhow::bail!("no source files found under the given paths");
    }

    let mut pending = 0;
    for file in &files {
        let source = fs::read_to_string(file)
            .with_context(|| format!("reading {}", file.display()))?;
        match transform_with_report(&source, &rules) {
            Ok(report) if report.changed(&source) => {
                println!(
                    "{} {}: {} wrapper(s) pending",
                    "⊙".yellow(),
                    file.display(),
                    report.rewrites
                );
                pending += 1;
            }
            Ok(_) => println!("{} {}: clean", "✓".green(), file.display()),
            Err(e) => {
                println!("{} {}: {}", "✗".red(), file.display(), e);
                pending += 1;
            }
        }
    }

    if pending > 0 {
        std::process::exit(1);
    }
    Ok(())
}

fn cmd_rules(rules_path: Option<PathBuf>) -> Result<()> {
    let rules = load_rules(rules_path)?;

    println!(
        "{} {} -> {}",
        "wrapper:".bold(),
        rules.wrapper,
        rules.wrapper_replacement
    );
    for rule in &rules.rules {
        println!(
            "  {} -> {} (from '{}')",
            rule.match_identity, rule.replacement_name, rule.declared_from
        );
    }
    Ok(())
}
