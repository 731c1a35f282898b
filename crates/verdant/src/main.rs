mod cli;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_log::LogTracer;
use tracing_subscriber::EnvFilter;
use verdant_core::kernel::constants::LOG_ENV_VAR;

/// Verdant: construct, render and mount components from declarative options
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct CliArgs {
    /// Print `pong` and exit
    #[arg(long)]
    ping: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Mount a component into an HTML document and print the result
    Render {
        /// Component options file (.json, .yaml, .yml, .toml)
        #[arg(long)]
        options: PathBuf,
        /// HTML document to mount into
        #[arg(long)]
        document: PathBuf,
        /// Mount target selector; defaults to the options' `el`
        #[arg(long)]
        target: Option<String>,
        /// Runtime configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Compile every template in an options file and report syntax errors
    Check {
        /// Component options file (.json, .yaml, .yml, .toml)
        #[arg(long)]
        options: PathBuf,
    },
}

fn init_logging() -> Result<(), Box<dyn std::error::Error>> {
    LogTracer::init()?;
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();

    if args.ping {
        println!("pong");
        return ExitCode::SUCCESS;
    }

    if let Err(e) = init_logging() {
        eprintln!("Warning: failed to initialize logging: {}", e);
    }

    let result = match args.command {
        Some(Commands::Render {
            options,
            document,
            target,
            config,
        }) => cli::render(&options, &document, target, config.as_deref())
            .await
            .map(|html| println!("{}", html)),
        Some(Commands::Check { options }) => cli::check(&options).await.map(|report| {
            for line in report {
                println!("{}", line);
            }
        }),
        None => {
            println!(
                "{} v{}: nothing to do, see --help",
                verdant_core::kernel::constants::FRAMEWORK_NAME,
                verdant_core::kernel::constants::FRAMEWORK_VERSION
            );
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
