//! fadebin - A File-Backed Pastebin Engine With Automatic Expiration
//!
//! This is the command-line entry point. It is deliberately thin glue: it
//! validates user input the way any caller of the engine must (size limits,
//! identifier shape, default TTL) and then calls the two repository
//! operations, or runs the background sweeper as a foreground process.

use std::io::{self, Read, Write};
use std::process;
use std::time::Duration;

use fadebin::paste::{id, Ttl};
use fadebin::storage::{PasteStore, StoreError, SweepConfig, SweeperHandle};
use tokio::signal;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

/// Upstream validation limits. The repository itself enforces neither; they
/// are the boundary contract every caller applies before saving.
const MAX_TITLE_LEN: usize = 200;
const MAX_BODY_LEN: usize = 1024 * 1024;

/// Seconds between sweep passes when `--interval` is not given.
const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 30 * 60;

/// CLI configuration
struct Config {
    /// Storage root directory
    root: String,
    /// Subcommand to run
    command: Command,
}

enum Command {
    /// Store a paste read from stdin
    Save { title: String, ttl: String },
    /// Print a paste by identifier
    Get { paste_id: String },
    /// Run the background sweeper until Ctrl+C
    Sweep { interval_secs: u64 },
}

impl Config {
    /// Parse configuration from command-line arguments
    fn from_args() -> Self {
        let args: Vec<String> = std::env::args().collect();

        let mut root = fadebin::DEFAULT_STORAGE_ROOT.to_string();
        let mut title = String::new();
        let mut ttl = Ttl::default().label().to_string();
        let mut interval_secs = DEFAULT_SWEEP_INTERVAL_SECS;
        let mut command: Option<String> = None;
        let mut positional: Vec<String> = Vec::new();

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--root" | "-r" => {
                    root = Self::value(&args, i, "--root");
                    i += 2;
                }
                "--title" | "-t" => {
                    title = Self::value(&args, i, "--title");
                    i += 2;
                }
                "--ttl" => {
                    ttl = Self::value(&args, i, "--ttl");
                    i += 2;
                }
                "--interval" => {
                    interval_secs = Self::value(&args, i, "--interval")
                        .parse()
                        .unwrap_or_else(|_| {
                            eprintln!("Error: invalid interval");
                            process::exit(1);
                        });
                    i += 2;
                }
                "--help" => {
                    print_help();
                    process::exit(0);
                }
                "--version" | "-v" => {
                    println!("fadebin version {}", fadebin::VERSION);
                    process::exit(0);
                }
                arg if arg.starts_with('-') => {
                    eprintln!("Unknown argument: {}", arg);
                    print_help();
                    process::exit(1);
                }
                arg => {
                    if command.is_none() {
                        command = Some(arg.to_string());
                    } else {
                        positional.push(arg.to_string());
                    }
                    i += 1;
                }
            }
        }

        let command = match command.as_deref() {
            Some("save") => Command::Save { title, ttl },
            Some("get") => {
                let paste_id = positional.first().cloned().unwrap_or_else(|| {
                    eprintln!("Error: get requires a paste identifier");
                    process::exit(1);
                });
                Command::Get { paste_id }
            }
            Some("sweep") => Command::Sweep { interval_secs },
            Some(other) => {
                eprintln!("Unknown command: {}", other);
                print_help();
                process::exit(1);
            }
            None => {
                print_help();
                process::exit(1);
            }
        };

        Config { root, command }
    }

    /// Returns the value following a flag, or exits with an error.
    fn value(args: &[String], i: usize, flag: &str) -> String {
        match args.get(i + 1) {
            Some(value) => value.clone(),
            None => {
                eprintln!("Error: {} requires a value", flag);
                process::exit(1);
            }
        }
    }
}

fn print_help() {
    println!(
        r#"
fadebin - A File-Backed Pastebin Engine With Automatic Expiration

USAGE:
    fadebin [OPTIONS] <COMMAND>

COMMANDS:
    save     Store a paste read from stdin and print its identifier
    get      Print a paste by identifier
    sweep    Run the background expiration sweeper until Ctrl+C

OPTIONS:
    -r, --root <PATH>        Storage root directory (default: pastes)
    -t, --title <TITLE>      Paste title (save)
        --ttl <LABEL>        Time-to-live: 1h 3h 6h 12h 24h 3d 7d (default: 6h)
        --interval <SECS>    Seconds between sweep passes (default: 1800)
    -v, --version            Print version information
        --help               Print this help message

EXAMPLES:
    echo "hello from the terminal" | fadebin save --title test --ttl 1h
    fadebin get a1b2c3d4e5f60718
    fadebin sweep --root /var/lib/fadebin
"#
    );
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse command-line arguments
    let config = Config::from_args();

    // Set up logging
    let _subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();

    let store = PasteStore::new(&config.root);

    match config.command {
        Command::Save { title, ttl } => save(&store, &title, &ttl),
        Command::Get { paste_id } => get(&store, &paste_id),
        Command::Sweep { interval_secs } => sweep(&store, interval_secs).await,
    }
}

/// Stores a paste read from stdin and prints the fresh identifier.
fn save(store: &PasteStore, title: &str, ttl: &str) -> anyhow::Result<()> {
    // Upstream validation the engine assumes has already happened.
    if title.is_empty() {
        anyhow::bail!("title required (--title)");
    }
    if title.len() > MAX_TITLE_LEN {
        anyhow::bail!("title too long (max {} chars)", MAX_TITLE_LEN);
    }
    if title.contains('\n') {
        anyhow::bail!("title must be a single line");
    }

    let mut body = Vec::new();
    io::stdin().read_to_end(&mut body)?;
    if body.is_empty() {
        anyhow::bail!("content required on stdin");
    }
    if body.len() > MAX_BODY_LEN {
        anyhow::bail!("content too large (max {} bytes)", MAX_BODY_LEN);
    }

    let paste_id = store.save(title, &body, ttl)?;
    println!("{}", paste_id);
    Ok(())
}

/// Prints a paste, collapsing every kind of miss into "paste not found".
fn get(store: &PasteStore, paste_id: &str) -> anyhow::Result<()> {
    // Syntactic gate: malformed identifiers never reach the repository.
    if !id::is_valid(paste_id) {
        eprintln!("paste not found");
        process::exit(1);
    }

    match store.load(paste_id) {
        Ok(paste) => {
            println!("{}", paste.title);
            io::stdout().write_all(&paste.body)?;
            Ok(())
        }
        Err(StoreError::NotFound | StoreError::Expired) => {
            eprintln!("paste not found");
            process::exit(1);
        }
        Err(e) => {
            error!(error = %e, "Failed to load paste");
            Err(e.into())
        }
    }
}

/// Runs the background sweeper as a foreground process.
async fn sweep(store: &PasteStore, interval_secs: u64) -> anyhow::Result<()> {
    let config = SweepConfig {
        interval: Duration::from_secs(interval_secs),
        ..Default::default()
    };

    info!(
        root = %store.layout().root().display(),
        interval_secs,
        "Starting expiration sweeper"
    );
    let sweeper = SweeperHandle::start(store.layout().clone(), config);

    // Set up graceful shutdown
    signal::ctrl_c().await?;
    info!("Shutdown signal received, stopping sweeper...");
    sweeper.stop();

    Ok(())
}
