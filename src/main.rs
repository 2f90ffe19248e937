use anyhow::Result;
use clap::{Parser, Subcommand};
use cqlmt::commands::{self, TreeInput};
use cqlmt::compile::ScriptContext;
use cqlmt::config::{self, ScriptArgs};
use cqlmt::constants::CONFIG_FILENAME;
use dotenv::dotenv;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(long, default_value = CONFIG_FILENAME, global = true)]
    config_file: String,

    /// Enable verbose output (info level)
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    /// Suppress all non-essential output (error level only)
    #[arg(long, short = 'q', global = true)]
    quiet: bool,

    /// Enable debug output (debug level)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a change tree into an alter script
    Compile {
        #[command(flatten)]
        input: TreeInput,

        #[command(flatten)]
        script_args: ScriptArgs,

        /// Write the script to a file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Exit with status 1 when the migration would drop anything
    CheckDrops {
        #[command(flatten)]
        input: TreeInput,

        /// Generate for the legacy dialect
        #[arg(long)]
        old_model: bool,
    },
}

fn main() -> Result<()> {
    dotenv().ok();
    let cli = Cli::parse();
    initialize_logging(&cli);
    run_main(cli)
}

fn initialize_logging(cli: &Cli) {
    let level = if cli.debug {
        "debug"
    } else if cli.verbose {
        "info"
    } else if cli.quiet {
        "error"
    } else {
        "warn" // default level
    };

    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::new(level)
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn resolve_context(config_file: &str, script_args: ScriptArgs) -> Result<ScriptContext> {
    let file_config = config::load_config(config_file)?;
    let cli_config = config::ConfigInput {
        script: Some(script_args.into()),
    };

    let config = config::ConfigBuilder::new()
        .with_file(file_config)
        .with_cli_args(cli_config)
        .resolve()?;

    Ok(ScriptContext::from(&config))
}

fn run_main(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Compile {
            input,
            script_args,
            output,
        } => {
            let context = resolve_context(&cli.config_file, script_args)?;
            commands::cmd_compile(&context, &input, output.as_deref())
        }
        Commands::CheckDrops { input, old_model } => {
            let script_args = ScriptArgs {
                old_model,
                ..ScriptArgs::default()
            };
            let context = resolve_context(&cli.config_file, script_args)?;
            if commands::cmd_check_drops(&context, &input)? {
                std::process::exit(1);
            }
            Ok(())
        }
    }
}
