use anyhow::{Context, Result, bail};
use clap::{CommandFactory, Parser, ValueEnum};
use clap_complete::Shell;
use colored::Colorize;
use convsearch::{
    ChatMessage, ConversationStore, ExportStore, HeadlessSearch, InteractiveSearch,
    LocalExportBackend, MessageRef, SearchOptions, SearchRequest, SenderId,
    chat_search::ui::events::Message,
    logging::{self, LogFormat, LogTarget},
};
use serde::Serialize;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

#[derive(Parser)]
#[command(
    name = "convsearch",
    version,
    about = "Search the messages of an exported conversation and its migrated history",
    long_about = None
)]
struct Cli {
    /// Conversation export (JSON Lines)
    #[arg(required_unless_present = "completions")]
    export: Option<PathBuf>,

    /// Search query (case-insensitive literal)
    query: Option<String>,

    /// Export of the conversation this one was migrated from
    #[arg(short, long, env = "CONVSEARCH_MIGRATED")]
    migrated: Option<PathBuf>,

    /// Only messages from this sender
    #[arg(long)]
    from: Option<String>,

    /// Interactive search mode
    #[arg(short = 'i', long)]
    interactive: bool,

    /// Results requested per page
    #[arg(long, env = "CONVSEARCH_PAGE_SIZE", default_value_t = SearchOptions::default().page_size)]
    page_size: usize,

    /// Delay before a typed query is searched
    #[arg(long, env = "CONVSEARCH_DEBOUNCE_MS", default_value_t = SearchOptions::default().debounce_ms)]
    debounce_ms: u64,

    /// Artificial delay per page, to behave like a remote service
    #[arg(long, env = "CONVSEARCH_LATENCY_MS", default_value_t = 0)]
    latency_ms: u64,

    /// Navigate to the N-th result (1-based) and report it
    #[arg(long)]
    jump: Option<usize>,

    /// Maximum number of results to print
    #[arg(short = 'n', long, default_value = "50")]
    max_results: usize,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Write logs to this file instead of stderr
    #[arg(long, env = "CONVSEARCH_LOG_FILE")]
    log_file: Option<PathBuf>,

    /// Log record format
    #[arg(long, value_enum, default_value = "text")]
    log_format: LogFormatArg,

    /// Print shell completions and exit
    #[arg(long, value_enum)]
    completions: Option<Shell>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
    JsonL,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogFormatArg {
    Text,
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(value: LogFormatArg) -> Self {
        match value {
            LogFormatArg::Text => LogFormat::Text,
            LogFormatArg::Json => LogFormat::Json,
        }
    }
}

#[derive(Serialize)]
struct ResultEntry<'a> {
    conversation: i64,
    id: i64,
    from: &'a str,
    date: &'a str,
    text: &'a str,
}

impl<'a> ResultEntry<'a> {
    fn new(id: MessageRef, message: &'a ChatMessage) -> Self {
        Self {
            conversation: id.conversation,
            id: id.id,
            from: &message.from,
            date: &message.date,
            text: &message.text,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(shell) = cli.completions {
        clap_complete::generate(shell, &mut Cli::command(), "convsearch", &mut io::stdout());
        return Ok(());
    }

    if cli.no_color {
        colored::control::set_override(false);
    }

    let target = match (&cli.log_file, cli.interactive) {
        (Some(path), _) => LogTarget::File(path.clone()),
        (None, true) => LogTarget::default_file(),
        (None, false) => LogTarget::Stderr,
    };
    logging::init_tracing(target, cli.log_format.into(), cli.verbose)?;

    let Some(export) = cli.export.as_deref() else {
        bail!("An export file is required");
    };
    let started = Instant::now();
    let store = ExportStore::load(export, cli.migrated.as_deref())
        .with_context(|| format!("Failed to load {}", export.display()))?;
    let store: Arc<dyn ConversationStore> = Arc::new(store);

    if cli.verbose {
        eprintln!(
            "Loaded {} in {}ms",
            store.primary().title,
            started.elapsed().as_millis()
        );
        if let Some(migrated) = store.migrated_from() {
            eprintln!("Migrated history: conversation {migrated}");
        }
    }

    let options = SearchOptions {
        page_size: cli.page_size.max(1),
        debounce_ms: cli.debounce_ms,
        latency_ms: cli.latency_ms,
        verbose: cli.verbose,
        ..SearchOptions::default()
    };
    let backend = Arc::new(
        LocalExportBackend::new(store.clone())
            .with_latency(Duration::from_millis(options.latency_ms)),
    );

    let from = cli.from.clone().map(SenderId::new);
    let initial = match (&cli.query, &from) {
        (None, None) => None,
        (query, from) => Some(SearchRequest::new(
            query.clone().unwrap_or_default(),
            from.clone(),
        )),
    };

    if cli.interactive {
        let mut interactive = InteractiveSearch::new(store, backend, &options);
        return interactive.run(initial);
    }

    let Some(request) = initial else {
        bail!("A query or --from is required (use --interactive for interactive mode)");
    };

    let mut search = HeadlessSearch::new(store, backend, &options);
    search.search(request.clone());
    search.load_more_until(Some(cli.max_results));

    if let Some(jump) = cli.jump {
        if jump == 0 {
            bail!("--jump is 1-based");
        }
        search.dispatch(Message::JumpToIndex(jump - 1));
    }

    print_results(&cli, &search, &request, started.elapsed())
}

fn print_results(
    cli: &Cli,
    search: &HeadlessSearch,
    request: &SearchRequest,
    duration: Duration,
) -> Result<()> {
    let total = search.state().merger.total().unwrap_or(0);
    let results: Vec<ResultEntry> = search
        .results()
        .into_iter()
        .take(cli.max_results)
        .filter_map(|(id, message)| message.map(|message| ResultEntry::new(id, message)))
        .collect();
    let jump = cli
        .jump
        .and(search.state().ui.focused_message)
        .and_then(|id| search.message(id).map(|message| ResultEntry::new(id, message)));

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    match cli.format {
        OutputFormat::Text => {
            if results.is_empty() {
                writeln!(handle, "No results found.")?;
            } else {
                writeln!(handle, "Found {total} results:\n")?;
                for (index, entry) in results.iter().enumerate() {
                    writeln!(handle, "{}", format_entry(index + 1, entry))?;
                }
            }
            if let Some(entry) = &jump {
                writeln!(
                    handle,
                    "\n{} {}",
                    "Jumped to:".bold(),
                    format_entry(search.state().navigator.current(), entry)
                )?;
            }

            eprintln!("\nSearch completed in {}ms", duration.as_millis());
            if total > results.len() {
                eprintln!("(Showing {} of {} total results)", results.len(), total);
            }
        }
        OutputFormat::Json => {
            let output = serde_json::json!({
                "query": request.query,
                "from": request.from,
                "results": results,
                "jump": jump,
                "duration_ms": duration.as_millis(),
                "total_count": total,
                "returned_count": results.len()
            });
            serde_json::to_writer_pretty(&mut handle, &output)?;
            writeln!(&mut handle)?;
        }
        OutputFormat::JsonL => {
            for entry in &results {
                serde_json::to_writer(&mut handle, entry)?;
                writeln!(&mut handle)?;
            }
            let metadata = serde_json::json!({
                "_metadata": {
                    "jump": jump,
                    "duration_ms": duration.as_millis(),
                    "total_count": total,
                    "returned_count": results.len()
                }
            });
            serde_json::to_writer(&mut handle, &metadata)?;
            writeln!(&mut handle)?;
        }
    }

    Ok(())
}

fn format_entry(position: usize, entry: &ResultEntry) -> String {
    let date = chrono::DateTime::parse_from_rfc3339(entry.date)
        .map(|date| date.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|_| entry.date.to_string());
    format!(
        "{} {} {} {}",
        format!("[{position}]").dimmed(),
        date.cyan(),
        format!("{}:", entry.from).yellow().bold(),
        entry.text.replace('\n', " ")
    )
}
