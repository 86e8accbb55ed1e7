//! CLI frontend for browsing and checking virtual story corpora.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use vstory_core::config::{DEFAULT_ROOT, ROOT_ENV_VAR};

#[derive(Parser)]
#[command(
    name = "vstory",
    about = "Browse and validate scripted dialogue corpora",
    version,
    propagate_version = true
)]
struct Cli {
    /// Corpus root directory (holds the domain directories)
    #[arg(short, long, global = true, env = ROOT_ENV_VAR, default_value = DEFAULT_ROOT)]
    root: PathBuf,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List domains that contain at least one valid topic
    Domains,

    /// List topics of a domain that contain at least one valid story
    Topics {
        /// Domain name (e.g. automotive)
        domain: String,
    },

    /// List the stories of a topic
    Dialogues {
        /// Domain name
        domain: String,

        /// Topic name (e.g. after_sales_service)
        topic: String,
    },

    /// Resolve one story by sequence number and/or dialogue name
    Show {
        /// Domain name
        domain: String,

        /// Topic name
        topic: String,

        /// Sequence number
        #[arg(short, long)]
        seq: Option<u64>,

        /// Dialogue name
        #[arg(short, long)]
        name: Option<String>,

        /// Print the story record as JSON
        #[arg(long)]
        json: bool,

        /// Print only the metadata, not the raw text
        #[arg(short, long, conflicts_with = "json")]
        meta_only: bool,
    },

    /// Check every story in the corpus for naming, content, and ambiguity issues
    Check,

    /// Decompose a story file name without touching the corpus
    Parse {
        /// File name or stem (e.g. 1_warranty_repair_request_en.txt)
        file_name: String,
    },
}

fn configure_logging(verbose: bool, quiet: bool) {
    use tracing::Level;
    use tracing_subscriber::{EnvFilter, fmt, prelude::*, registry};

    let log_level = if quiet {
        Level::ERROR
    } else if verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.to_string()));

    registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    let cli = Cli::parse();
    configure_logging(cli.verbose, cli.quiet);

    let root = cli.root;
    let result = match cli.command {
        Commands::Domains => commands::domains::run(&root),
        Commands::Topics { domain } => commands::topics::run(&root, &domain),
        Commands::Dialogues { domain, topic } => commands::dialogues::run(&root, &domain, &topic),
        Commands::Show {
            domain,
            topic,
            seq,
            name,
            json,
            meta_only,
        } => commands::show::run(&root, &domain, &topic, seq, name, json, meta_only),
        Commands::Check => commands::check::run(&root),
        Commands::Parse { file_name } => commands::parse::run(&file_name),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
