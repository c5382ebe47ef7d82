//! sift CLI - duplicate detection and string grouping for JSON and text files.

use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use serde::Serialize;
use sift_dedup::{
    dedupe_records, dedupe_records_by_key, find_duplicates, find_keyed_duplicates,
    group_strings_keyed, longest_common_substring, read_records, read_strings, read_values,
    write_records, DuplicateReport, GroupMode, GroupOptions, InputFormat, StringGroup, Value,
};
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// File format for input/output.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
enum Format {
    /// Auto-detect from file extension
    Auto,
    /// JSON Lines, one value per line
    Jsonl,
    /// A single JSON array
    Json,
    /// Plain text, one string per line
    Text,
}

/// Find duplicates and group similar strings in JSON and text files.
#[derive(Parser, Debug)]
#[command(name = "sift")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output results as JSON.
    #[arg(long, global = true)]
    json: bool,

    /// Verbose output (debug logging on stderr; `SIFT_LOG` or `RUST_LOG` override the filter).
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Report every value that occurs more than once, with its positions.
    Duplicates {
        /// Input file path.
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Compare records by this field instead of whole values.
        #[arg(short, long)]
        field: Option<String>,

        /// Input format (auto-detect from file extension by default).
        #[arg(long, value_enum, default_value = "auto")]
        format: Format,
    },

    /// Remove duplicate records, keeping the first occurrence.
    Dedupe {
        /// Input file path (JSONL or JSON array of objects).
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output file path.
        #[arg(short, long, value_name = "OUTPUT")]
        output: Option<PathBuf>,

        /// Only compare records by this key.
        #[arg(short, long)]
        key: Option<String>,

        /// Input/output format (auto-detect from file extension by default).
        #[arg(long, value_enum, default_value = "auto")]
        format: Format,

        /// Print statistics only, don't write output.
        #[arg(long)]
        stats_only: bool,
    },

    /// Partition strings into groups.
    Group {
        /// Input file path (text lines, JSONL or JSON array).
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Grouping mode: exact, case-insensitive, common-substring, separator or prefix.
        #[arg(short, long, default_value = "exact")]
        mode: String,

        /// Minimum shared substring length for common-substring mode.
        #[arg(short, long, default_value = "3")]
        threshold: usize,

        /// Separator for separator mode.
        #[arg(short, long, default_value = "-")]
        separator: String,

        /// Prefix length in characters for prefix mode.
        #[arg(short, long, default_value = "2")]
        length: usize,

        /// Compare case-insensitively in separator and prefix modes.
        #[arg(short = 'i', long)]
        ignore_case: bool,

        /// Read strings from this field of each JSON object.
        #[arg(short, long)]
        field: Option<String>,

        /// Input format (auto-detect from file extension by default).
        #[arg(long, value_enum, default_value = "auto")]
        format: Format,
    },

    /// Print the longest common substring of two strings.
    Lcs {
        /// First string.
        a: String,
        /// Second string.
        b: String,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// JSON output for duplicate reports.
#[derive(Serialize)]
struct DuplicatesOutput<'a> {
    input: String,
    total_items: usize,
    duplicated_values: usize,
    duplicate_positions: usize,
    duplicates: &'a DuplicateReport<Value>,
}

/// JSON output for record dedup.
#[derive(Serialize)]
struct DedupeOutput {
    input: String,
    output: Option<String>,
    total_records: usize,
    unique_records: usize,
    removed: usize,
    elapsed_secs: f64,
}

/// JSON output for grouping.
#[derive(Serialize)]
struct GroupOutput<'a> {
    input: String,
    mode: &'static str,
    total_items: usize,
    groups: &'a [StringGroup],
}

/// JSON output for the longest common substring.
#[derive(Serialize)]
struct LcsOutput<'a> {
    a: &'a str,
    b: &'a str,
    substring: &'a str,
    length: usize,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("SIFT_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Print an error and exit with status 1.
fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("Error: {message}");
    std::process::exit(1);
}

/// Determine the effective format for a file path.
fn detect_format(path: &Path, explicit_format: Format) -> Result<InputFormat, String> {
    match explicit_format {
        Format::Auto => InputFormat::from_path(path).ok_or_else(|| {
            format!(
                "Cannot detect format from file extension: {}",
                path.display()
            )
        }),
        Format::Jsonl => Ok(InputFormat::Jsonl),
        Format::Json => Ok(InputFormat::Json),
        Format::Text => Ok(InputFormat::Text),
    }
}

fn run_duplicates(
    json: bool,
    input: &Path,
    field: Option<&str>,
    format: Format,
) -> Result<(), Box<dyn std::error::Error>> {
    let input_format = detect_format(input, format).unwrap_or_else(|e| fail(e));

    let (total, report) = match field {
        Some(field) => {
            let records = read_records(input, input_format).unwrap_or_else(|e| fail(e));
            (records.len(), find_keyed_duplicates(&records, field))
        }
        None => {
            let values: Vec<Value> = read_values(input, input_format)
                .unwrap_or_else(|e| fail(e))
                .into_iter()
                .map(|(_, v)| Value::from(v))
                .collect();
            (values.len(), find_duplicates(&values))
        }
    };

    if json {
        let output = DuplicatesOutput {
            input: input.display().to_string(),
            total_items: total,
            duplicated_values: report.len(),
            duplicate_positions: report.duplicate_positions(),
            duplicates: &report,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if report.is_empty() {
        eprintln!("No duplicates found in {total} items.");
        return Ok(());
    }

    for group in &report {
        let indices: Vec<String> = group.indices.iter().map(ToString::to_string).collect();
        println!("{}\t[{}]", group.value, indices.join(", "));
    }
    eprintln!();
    eprintln!("Duplicate Report:");
    eprintln!("  Total items:         {total}");
    eprintln!("  Duplicated values:   {}", report.len());
    eprintln!("  Duplicate positions: {}", report.duplicate_positions());

    Ok(())
}

fn run_dedupe(
    json: bool,
    input: &Path,
    output: Option<&Path>,
    key: Option<&str>,
    format: Format,
    stats_only: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if !stats_only && output.is_none() {
        fail("output file required (use -o/--output or --stats-only)");
    }

    let input_format = detect_format(input, format).unwrap_or_else(|e| fail(e));
    let start = Instant::now();

    let records = read_records(input, input_format).unwrap_or_else(|e| fail(e));
    let kept = match key {
        Some(key) => dedupe_records_by_key(&records, key),
        None => dedupe_records(&records),
    };
    let elapsed = start.elapsed();

    if !stats_only {
        if let Some(output_path) = output {
            // Output format follows the output extension, else the input's.
            let output_format = detect_format(output_path, format).unwrap_or(input_format);
            write_records(output_path, &kept, output_format).unwrap_or_else(|e| fail(e));
            info!(
                records = kept.len(),
                path = %output_path.display(),
                "wrote deduplicated records"
            );
        }
    }

    if json {
        let output = DedupeOutput {
            input: input.display().to_string(),
            output: if stats_only {
                None
            } else {
                output.map(|p| p.display().to_string())
            },
            total_records: records.len(),
            unique_records: kept.len(),
            removed: records.len() - kept.len(),
            elapsed_secs: elapsed.as_secs_f64(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        eprintln!("Deduplication Results:");
        eprintln!("  Total records:     {}", records.len());
        eprintln!("  Unique records:    {}", kept.len());
        eprintln!("  Removed:           {}", records.len() - kept.len());
        eprintln!("  Processing time:   {:.3}s", elapsed.as_secs_f64());

        if stats_only {
            eprintln!();
            eprintln!("(Output not written: --stats-only mode)");
        }
    }

    Ok(())
}

fn run_group(
    json: bool,
    input: &Path,
    mode: &str,
    options: &GroupOptions,
    field: Option<&str>,
    format: Format,
) -> Result<(), Box<dyn std::error::Error>> {
    let mode = GroupMode::parse(mode, options).unwrap_or_else(|e| fail(e));
    let input_format = detect_format(input, format).unwrap_or_else(|e| fail(e));

    let strings = read_strings(input, input_format, field).unwrap_or_else(|e| fail(e));
    let groups = group_strings_keyed(&strings, &mode).unwrap_or_else(|e| fail(e));

    if json {
        let output = GroupOutput {
            input: input.display().to_string(),
            mode: mode.name(),
            total_items: strings.len(),
            groups: &groups,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    for group in &groups {
        println!("{}\t{}", group.key, group.members.join(", "));
    }
    eprintln!();
    eprintln!("Grouping Results ({}):", mode.name());
    eprintln!("  Total strings: {}", strings.len());
    eprintln!("  Groups:        {}", groups.len());

    Ok(())
}

fn run_lcs(json: bool, a: &str, b: &str) -> Result<(), Box<dyn std::error::Error>> {
    let substring = longest_common_substring(a, b);

    if json {
        let output = LcsOutput {
            a,
            b,
            substring: &substring,
            length: substring.chars().count(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{substring}");
    }

    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Cli::parse();
    init_logging(args.verbose);

    match args.command {
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "sift", &mut io::stdout());
            Ok(())
        }
        Commands::Duplicates {
            input,
            field,
            format,
        } => run_duplicates(args.json, &input, field.as_deref(), format),
        Commands::Dedupe {
            input,
            output,
            key,
            format,
            stats_only,
        } => run_dedupe(
            args.json,
            &input,
            output.as_deref(),
            key.as_deref(),
            format,
            stats_only,
        ),
        Commands::Group {
            input,
            mode,
            threshold,
            separator,
            length,
            ignore_case,
            field,
            format,
        } => {
            let options = GroupOptions::default()
                .with_threshold(threshold)
                .with_separator(separator)
                .with_length(length)
                .with_case_insensitive(ignore_case);
            run_group(args.json, &input, &mode, &options, field.as_deref(), format)
        }
        Commands::Lcs { a, b } => run_lcs(args.json, &a, &b),
    }
}
