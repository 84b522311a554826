//! CLI Module
//!
//! Command-line interface over the load/save session.

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Audio Tensor - load audio files as channel-major sample matrices
#[derive(Parser, Debug)]
#[command(name = "audio-tensor")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Reject files whose sample count is not a multiple of the channel count
    #[arg(long, global = true)]
    pub strict: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print signal parameters and matrix shape of an audio file
    #[command(name = "info")]
    Info {
        /// Audio file to inspect
        path: PathBuf,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Load a file and save it again in the same format
    #[command(name = "copy")]
    Copy {
        /// Source audio file
        input: PathBuf,

        /// Destination audio file
        output: PathBuf,
    },

    /// Print the [channels, frames] sample matrix as JSON
    #[command(name = "dump")]
    Dump {
        /// Audio file to dump
        path: PathBuf,

        /// Only print the first N frames
        #[arg(short, long)]
        frames: Option<usize>,
    },
}
