//! Command-line interface for portfolio.
//!
//! This module provides the CLI structure for the `folio` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    CardArgs, ConfigCommand, DeleteCommand, FetchCommand, ListCommand, OutputFormat,
    RenderCommand, ShowCommand, StatusCommand, UpsertCommand,
};

/// folio - Manage and render portfolio project cards
///
/// Keeps an ordered list of projects in a local slot, edits it through an
/// admin form, and renders it (or a remote feed) as `<project-card>` markup.
#[derive(Debug, Parser)]
#[command(name = "folio")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the local projects (seeding defaults on first use)
    List(ListCommand),

    /// Show projects from the remote API (never stored)
    Fetch(FetchCommand),

    /// Create a project or update the non-empty fields of an existing one
    Upsert(UpsertCommand),

    /// Delete a project by id
    Delete(DeleteCommand),

    /// Load a project into the edit form and print it
    Show(ShowCommand),

    /// Render a single card from attributes
    Render(RenderCommand),

    /// Seed the default projects if the store is empty
    Seed,

    /// Show store status
    Status(StatusCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        if self.quiet {
            crate::logging::Verbosity::Quiet
        } else {
            match self.verbose {
                0 => crate::logging::Verbosity::Normal,
                1 => crate::logging::Verbosity::Verbose,
                _ => crate::logging::Verbosity::Trace,
            }
        }
    }
}
