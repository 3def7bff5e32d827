mod diagram;

use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "mermaider")]
#[command(version)]
#[command(about = "Crawl a database schema and print it as a Mermaid ER diagram", long_about = None)]
pub struct Cli {
    /// Connection string to the target database; the driver is inferred when possible
    #[arg(short, long)]
    pub connection_string: String,

    /// Schema to crawl (default: public for postgres, dbo for sqlserver, main for duckdb)
    #[arg(short, long)]
    pub schema: Option<String>,

    /// Database type when it cannot be guessed from the connection string: postgres, sqlserver, duckdb
    #[arg(short, long, default_value = "postgres")]
    pub db_type: String,

    /// Output file (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format: mermaid, json (default: from output extension, else mermaid)
    #[arg(short, long)]
    pub format: Option<String>,

    /// Log crawl phases and catalog queries to stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress the summary on stderr
    #[arg(short, long)]
    pub quiet: bool,
}

pub fn run(cli: Cli) -> anyhow::Result<()> {
    init_tracing(cli.verbose);
    diagram::run(cli)
}

/// Install the stderr log subscriber. `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("mermaider=debug")
        } else {
            EnvFilter::new("warn")
        }
    });

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
