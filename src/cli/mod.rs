//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for Clinsight using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// Clinsight - Clinical Decision-Support Console
#[derive(Parser, Debug)]
#[command(name = "clinsight")]
#[command(version, about, long_about = None)]
#[command(author = "Clinsight Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "clinsight.toml", env = "CLINSIGHT_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "CLINSIGHT_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Submit a clinical payload and print the resulting record
    Submit(commands::submit::SubmitArgs),

    /// Sign in and keep the dashboard refreshing until interrupted
    Watch(commands::watch::WatchArgs),

    /// Talk to the clinical assistant
    Chat(commands::chat::ChatArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}
