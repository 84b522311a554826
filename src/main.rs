//! Audio Tensor CLI
//!
//! Command-line interface for loading, inspecting and re-saving audio files.

use anyhow::Context;
use clap::Parser;
use env_logger::Env;
use log::{debug, error, info};

use audio_tensor::cli::{commands, Cli, Commands};
use audio_tensor::{AudioSession, AudioTensorError, ReadOptions};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logger
    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_level)).init();

    debug!("Audio Tensor v{}", env!("CARGO_PKG_VERSION"));

    let options = if cli.strict {
        ReadOptions::strict()
    } else {
        ReadOptions::default()
    };
    let mut session = AudioSession::with_options(options);

    match cli.command {
        Some(cmd) => handle_command(&mut session, cmd).map_err(|err| {
            if let Some(e) = err.downcast_ref::<AudioTensorError>() {
                error!("[{}] {}", e.error_code(), e.recovery_hint());
            }
            err
        }),
        None => {
            println!("Audio Tensor v{}", env!("CARGO_PKG_VERSION"));
            println!("Use --help for available commands");
            Ok(())
        }
    }
}

fn handle_command(session: &mut AudioSession, cmd: Commands) -> anyhow::Result<()> {
    match cmd {
        Commands::Info { path, json } => {
            let report = commands::info(session, &path)
                .with_context(|| format!("Failed to inspect {}", path.display()))?;
            if json {
                println!("{}", commands::to_json(&report, true)?);
            } else {
                println!("{}", report);
            }
        }
        Commands::Copy { input, output } => {
            let report = commands::copy(session, &input, &output).with_context(|| {
                format!("Failed to copy {} to {}", input.display(), output.display())
            })?;
            info!(
                "Wrote {} ({} x {})",
                report.path, report.shape[0], report.shape[1]
            );
        }
        Commands::Dump { path, frames } => {
            let report = commands::dump(session, &path, frames)
                .with_context(|| format!("Failed to dump {}", path.display()))?;
            println!("{}", commands::to_json(&report, false)?);
        }
    }

    Ok(())
}
