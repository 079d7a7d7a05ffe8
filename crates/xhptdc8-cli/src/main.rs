//! Command-line utility for xHPTDC8 configuration documents.

mod commands;

use clap::{Parser, Subcommand};
use commands::OutputFormat;
use log::info;
use std::process::ExitCode;

/// Validate, apply and inspect xHPTDC8 configuration documents.
#[derive(Parser)]
#[command(name = "xhptdc8-util", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Apply documents in order onto the default configuration
    Apply {
        /// YAML or JSON documents; `-` reads standard input
        #[arg(required = true)]
        files: Vec<String>,
        /// Print the resulting configuration
        #[arg(long, value_enum)]
        print: Option<OutputFormat>,
    },
    /// List every error code with its message
    Errors {
        /// Include the success code
        #[arg(long)]
        include_ok: bool,
        /// Pad codes to a fixed width
        #[arg(long)]
        fixed_length: bool,
    },
    /// Print the default configuration document
    Defaults {
        /// Output syntax
        #[arg(long, value_enum, default_value_t = OutputFormat::Yaml)]
        format: OutputFormat,
    },
}

fn main() -> ExitCode {
    let _ = env_logger::builder()
        .format_timestamp_millis()
        .parse_default_env()
        .try_init();

    let cli = Cli::parse();
    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Apply { files, print } => {
            info!("applying config documents (sources={})", files.len());
            let outcome = commands::apply_sources(&files)?;
            for (source, touched) in files.iter().zip(&outcome.touched) {
                println!("{source}: {touched} device(s) configured");
            }
            if let Some(format) = print {
                print!("{}", commands::render(&outcome.config, format)?);
            }
        }
        Command::Errors {
            include_ok,
            fixed_length,
        } => print!("{}", commands::error_table(include_ok, fixed_length)),
        Command::Defaults { format } => {
            print!(
                "{}",
                commands::render(&xhptdc8_config::ManagerConfig::default(), format)?
            );
        }
    }
    Ok(())
}
