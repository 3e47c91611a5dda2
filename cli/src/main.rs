mod commands;
mod config;
mod output;

use clap::{ArgAction, Parser, Subcommand};
use getcomments::Lookback;
use output::OutputFormat;
use tracing::Level;

#[derive(Parser)]
#[command(
    name = "getcomments",
    version,
    about = "Attach Go comments to the declarations and statements they document"
)]
struct Cli {
    /// Config profile to use
    #[arg(long, global = true, default_value = "default")]
    profile: String,

    /// Output format (overrides config; defaults to json)
    #[arg(long, global = true, value_enum)]
    format: Option<OutputFormat>,

    /// Doc lookback for functions and methods: a line count or "unbounded"
    #[arg(long, global = true, value_name = "LINES")]
    func_lookback: Option<Lookback>,

    /// Doc lookback for type, const and var declarations
    #[arg(long, global = true, value_name = "LINES")]
    decl_lookback: Option<Lookback>,

    /// Take whole doc blocks regardless of length
    #[arg(long, global = true, conflicts_with_all = ["func_lookback", "decl_lookback"])]
    unbounded: bool,

    /// Log more (repeat for debug and trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Log errors only
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Subcommand)]
enum CliCommand {
    /// Extract comments from Go files or Go source text
    Extract {
        /// Path to a .go file, or Go source text
        #[arg(required = true, value_name = "INPUT")]
        inputs: Vec<String>,

        /// Parse every input fresh instead of going through the parse cache
        #[arg(long)]
        no_cache: bool,
    },

    /// Extract comments from every .go file under a directory
    Scan {
        /// Directory to walk (defaults to current directory)
        #[arg(default_value = ".")]
        dir: String,
    },
}

fn log_level(verbose: u8, quiet: bool) -> Level {
    if quiet {
        return Level::ERROR;
    }
    match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(log_level(cli.verbose, cli.quiet))
        .with_target(false)
        .init();

    let command = match cli.command {
        CliCommand::Extract { inputs, no_cache } => commands::Command::Extract { inputs, no_cache },
        CliCommand::Scan { dir } => commands::Command::Scan { dir },
    };
    let overrides = commands::Overrides {
        func_lookback: cli.func_lookback,
        decl_lookback: cli.decl_lookback,
        unbounded: cli.unbounded,
        format: cli.format,
    };

    if let Err(e) = commands::run(command, &cli.profile, &overrides) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
