use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tokio::runtime::Runtime;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use code_year_summary::cli::Output;
use code_year_summary::cli::commands::{config, summary};
use code_year_summary::config::{BackendKind, CliOverrides};

/// Parse backend type from string
fn parse_backend(s: &str) -> Result<BackendKind, String> {
    s.parse()
}

#[derive(Parser)]
#[command(name = "code-year-summary")]
#[command(
    version,
    about = "Summarize a year of your git commits with an LLM"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[arg(long, short, global = true, help = "Project path (default: current directory)")]
    path: Option<PathBuf>,

    #[command(flatten)]
    run: RunArgs,

    #[arg(long, global = true)]
    verbose: bool,

    #[arg(long, short, global = true)]
    quiet: bool,
}

#[derive(Args)]
struct RunArgs {
    #[arg(long, short, help = "Commit author (default: git config user.name)")]
    author: Option<String>,
    #[arg(long, short, help = "Model to use (required for ollama)")]
    model: Option<String>,
    #[arg(long = "type", short = 't', value_parser = parse_backend, help = "AI service: ollama, openai, claude (default: ollama)")]
    backend: Option<BackendKind>,
    #[arg(long, short = 'k', help = "API key for openai/claude")]
    api_key: Option<String>,
    #[arg(long, short, help = "Backend base URL")]
    base_url: Option<String>,
    #[arg(long, short, help = "Summary style: crazy, encourage (default: crazy)")]
    style: Option<String>,
    #[arg(long, short, help = "Only scan files matching this regex")]
    include: Option<String>,
    #[arg(long, short, help = "Skip files matching this regex")]
    exclude: Option<String>,
    #[arg(long, short, help = "Output directory (default: <path>/report)")]
    output: Option<PathBuf>,
}

impl From<RunArgs> for CliOverrides {
    fn from(args: RunArgs) -> Self {
        Self {
            author: args.author,
            model: args.model,
            backend: args.backend,
            api_key: args.api_key,
            base_url: args.base_url,
            style: args.style,
            include: args.include,
            exclude: args.exclude,
            output: args.output,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current configuration (merged from all sources)
    Show {
        #[arg(
            short = 'f',
            long,
            default_value = "toml",
            help = "Output format: toml, json"
        )]
        format: String,
    },
    /// Show configuration file paths
    Path,
    /// Write the default global configuration
    Init {
        #[arg(long, help = "Overwrite existing config")]
        force: bool,
    },
}

/// Set up panic handler for graceful error reporting
fn setup_panic_handler() {
    let default_hook = std::panic::take_hook();

    std::panic::set_hook(Box::new(move |panic_info| {
        let message = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };

        eprintln!("\n\x1b[1;31m━━━ PANIC ━━━\x1b[0m");
        eprintln!("\x1b[31mcode-year-summary encountered an unexpected error:\x1b[0m");
        eprintln!("  {}", message);

        if let Some(location) = panic_info.location() {
            eprintln!(
                "\x1b[90mLocation: {}:{}:{}\x1b[0m",
                location.file(),
                location.line(),
                location.column()
            );
        }
        eprintln!();

        // Call default hook for backtrace (if RUST_BACKTRACE=1)
        default_hook(panic_info);
    }));
}

fn main() -> ExitCode {
    setup_panic_handler();

    match run_cli() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\x1b[31mError:\x1b[0m {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let project_root = summary::project_root(cli.path)?;

    match cli.command {
        Some(Commands::Config { action }) => match action {
            ConfigAction::Show { format } => config::show(&project_root, &format)?,
            ConfigAction::Path => config::path(&project_root)?,
            ConfigAction::Init { force } => config::init_global(force)?,
        },
        None => {
            let settings = summary::prepare(&project_root, cli.run.into())?;
            let output = Output::quiet(cli.quiet);
            let rt = Runtime::new()?;
            rt.block_on(summary::run(&settings, &output))?;
        }
    }

    Ok(())
}
