use std::collections::HashSet;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::Result;
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tracing::info;

use carve::reader::{DocumentReader, ReaderConfig};
use carve::{
    extract_section_with_min, extract_topic_with_context, normalize, search_keywords,
    search_pattern, SectionKind, TopicKind, WindowConfig, DEFAULT_CONTEXT_SENTENCES,
    DEFAULT_KEYWORD_WINDOW, DEFAULT_MIN_SECTION_CHARS, DEFAULT_MIN_SNIPPET_WORDS,
    DEFAULT_PATTERN_WINDOW, SNIPPET_DELIMITER,
};

#[derive(Parser, Debug)]
#[command(name = "carve")]
#[command(about = "Section extraction and context-window search for SEC filing texts")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Emit results as JSON lines instead of tagged text
    #[arg(long, global = true)]
    json: bool,

    /// Suppress the console progress bar
    #[arg(long, global = true)]
    no_progress: bool,

    /// Use memory-mapped I/O instead of async buffered reads
    #[arg(long, global = true)]
    use_mmap: bool,

    /// Abort on first unreadable file
    #[arg(long, global = true)]
    fail_fast: bool,

    /// Write run statistics to this JSON file
    #[arg(long, global = true)]
    stats_out: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract a contiguous numbered section from each filing
    Section {
        /// Section name: business, risk_factors, mda, financial_statements
        #[arg(value_parser = SectionKind::from_str)]
        name: SectionKind,

        /// Skip candidate spans at or under this many characters
        #[arg(long, default_value_t = DEFAULT_MIN_SECTION_CHARS)]
        min_chars: usize,

        /// Filing text files
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Extract scattered topic content with sentence-level context
    Topic {
        /// Topic name: ai_content, rd_content
        #[arg(value_parser = TopicKind::from_str)]
        name: TopicKind,

        /// Sentences of context on each side of a hit
        #[arg(long, default_value_t = DEFAULT_CONTEXT_SENTENCES)]
        context: usize,

        /// Filing text files
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Search literal phrases and print merged context windows
    Keywords {
        /// Phrase to match exactly (repeatable)
        #[arg(long = "phrase", required = true)]
        phrases: Vec<String>,

        /// Words of context before each match
        #[arg(long, default_value_t = DEFAULT_KEYWORD_WINDOW)]
        pre: usize,

        /// Words of context after each match
        #[arg(long, default_value_t = DEFAULT_KEYWORD_WINDOW)]
        post: usize,

        /// Filing text files
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Search a regular expression, one snippet per merged window
    Pattern {
        /// Case-insensitive regular expression
        pattern: String,

        /// Words of context before each match
        #[arg(long, default_value_t = DEFAULT_PATTERN_WINDOW)]
        pre: usize,

        /// Words of context after each match
        #[arg(long, default_value_t = DEFAULT_PATTERN_WINDOW)]
        post: usize,

        /// Drop merged snippets under this many words
        #[arg(long, default_value_t = DEFAULT_MIN_SNIPPET_WORDS)]
        min_words: usize,

        /// Keep identical snippets that repeat across files
        #[arg(long)]
        no_dedupe: bool,

        /// Filing text files
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

impl Command {
    fn files(&self) -> &[PathBuf] {
        match self {
            Command::Section { files, .. }
            | Command::Topic { files, .. }
            | Command::Keywords { files, .. }
            | Command::Pattern { files, .. } => files,
        }
    }
}

/// Run statistics written with `--stats-out`.
#[derive(Serialize, Debug, Default)]
struct RunStats {
    files_processed: u64,
    files_with_matches: u64,
    total_snippets: u64,
    read_errors: u64,
    elapsed_ms: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Structured JSON logging on stderr keeps stdout clean for results
    tracing_subscriber::fmt()
        .with_target(false)
        .json()
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    info!(?args, "Parsed CLI arguments");

    let start_time = std::time::Instant::now();
    let reader = DocumentReader::new(ReaderConfig {
        fail_fast: args.fail_fast,
        use_mmap: args.use_mmap,
    });

    let files = args.command.files().to_vec();
    let progress = if files.len() > 1 && !args.no_progress {
        let bar = ProgressBar::new(files.len() as u64);
        bar.set_style(ProgressStyle::with_template("{bar:40} {pos}/{len} {msg}")?);
        Some(bar)
    } else {
        None
    };

    let mut stats = RunStats::default();
    // One dedupe set threaded across the whole batch; identical pattern
    // snippets repeating across filings are reported once.
    let mut seen: HashSet<String> = HashSet::new();

    for file in &files {
        if let Some(bar) = &progress {
            bar.set_message(file.display().to_string());
        }

        let (raw, read_stats) = reader.read_document(file).await?;
        stats.files_processed += 1;
        if read_stats.read_error.is_some() {
            stats.read_errors += 1;
            if let Some(bar) = &progress {
                bar.inc(1);
            }
            continue;
        }

        let text = normalize(&raw);
        process_document(&args, file, &text, &mut seen, &mut stats)?;

        if let Some(bar) = &progress {
            bar.inc(1);
        }
    }

    if let Some(bar) = progress {
        bar.finish_and_clear();
    }

    stats.elapsed_ms = start_time.elapsed().as_millis() as u64;
    info!(?stats, "Run complete");

    if let Some(stats_path) = &args.stats_out {
        tokio::fs::write(stats_path, serde_json::to_string_pretty(&stats)?).await?;
        info!("Wrote run stats to {}", stats_path.display());
    }

    Ok(())
}

fn process_document(
    args: &Args,
    file: &PathBuf,
    text: &str,
    seen: &mut HashSet<String>,
    stats: &mut RunStats,
) -> Result<()> {
    match &args.command {
        Command::Section { name, min_chars, .. } => {
            let section = extract_section_with_min(text, *name, *min_chars);
            report_optional(args, file, section, stats, name.name())
        }
        Command::Topic { name, context, .. } => {
            let section = extract_topic_with_context(text, *name, *context);
            report_optional(args, file, section, stats, name.name())
        }
        Command::Keywords { phrases, pre, post, .. } => {
            let joined = search_keywords(text, phrases, WindowConfig::new(*pre, *post))?;
            if !joined.is_empty() {
                stats.files_with_matches += 1;
                stats.total_snippets += joined.split(SNIPPET_DELIMITER).count() as u64;
            }
            if args.json {
                println!(
                    "{}",
                    serde_json::json!({ "file": file.display().to_string(), "context": joined })
                );
            } else if !joined.is_empty() {
                println!("=== {} ===", file.display());
                println!("{joined}");
            }
            Ok(())
        }
        Command::Pattern {
            pattern,
            pre,
            post,
            min_words,
            no_dedupe,
            ..
        } => {
            let dedupe = (!no_dedupe).then_some(&mut *seen);
            let snippets =
                search_pattern(text, pattern, WindowConfig::new(*pre, *post), *min_words, dedupe)?;
            if !snippets.is_empty() {
                stats.files_with_matches += 1;
                stats.total_snippets += snippets.len() as u64;
            }
            if args.json {
                println!(
                    "{}",
                    serde_json::json!({ "file": file.display().to_string(), "snippets": snippets })
                );
            } else {
                for snippet in &snippets {
                    println!("=== {} ===", file.display());
                    println!("{snippet}");
                }
            }
            Ok(())
        }
    }
}

fn report_optional(
    args: &Args,
    file: &PathBuf,
    section: Option<String>,
    stats: &mut RunStats,
    name: &str,
) -> Result<()> {
    if section.is_some() {
        stats.files_with_matches += 1;
        stats.total_snippets += 1;
    }
    if args.json {
        println!(
            "{}",
            serde_json::json!({
                "file": file.display().to_string(),
                "section": name,
                "content": section,
            })
        );
    } else {
        match section {
            Some(content) => {
                println!("=== {} ===", file.display());
                println!("{content}");
            }
            None => info!("No {} section found in {}", name, file.display()),
        }
    }
    Ok(())
}
