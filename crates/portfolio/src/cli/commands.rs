//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

use crate::card::CardProps;
use crate::record::ProjectForm;

/// Card attributes as flags. Flag names match the element's attribute names.
#[derive(Debug, Clone, Default, Args)]
pub struct CardArgs {
    /// Card heading
    #[arg(long)]
    pub title: Option<String>,

    /// Body paragraph
    #[arg(long)]
    pub description: Option<String>,

    /// Image URL
    #[arg(long)]
    pub image_src: Option<String>,

    /// Image alternative text
    #[arg(long)]
    pub image_alt: Option<String>,

    /// Technologies used
    #[arg(long)]
    pub tech: Option<String>,

    /// Action link target
    #[arg(long)]
    pub link_href: Option<String>,

    /// Action link text
    #[arg(long)]
    pub link_label: Option<String>,

    /// Date or date range
    #[arg(long)]
    pub date: Option<String>,

    /// Role on the project
    #[arg(long)]
    pub role: Option<String>,

    /// Comma separated keywords
    #[arg(long)]
    pub keywords: Option<String>,
}

impl From<&CardArgs> for CardProps {
    fn from(args: &CardArgs) -> Self {
        let text = |value: &Option<String>| value.clone().unwrap_or_default();
        Self {
            title: text(&args.title),
            image_src: text(&args.image_src),
            image_alt: text(&args.image_alt),
            description: text(&args.description),
            tech: text(&args.tech),
            link_href: text(&args.link_href),
            link_label: text(&args.link_label),
            date: text(&args.date),
            role: text(&args.role),
            keywords: text(&args.keywords),
        }
    }
}

/// List command arguments.
#[derive(Debug, Args)]
pub struct ListCommand {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

/// Fetch command arguments.
#[derive(Debug, Args)]
pub struct FetchCommand {
    /// Endpoint to fetch instead of the configured one
    #[arg(short, long)]
    pub url: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

/// Upsert command arguments.
#[derive(Debug, Args)]
pub struct UpsertCommand {
    /// Project id (inserts when new, merges non-empty fields when present)
    #[arg(long, default_value = "")]
    pub id: String,

    #[command(flatten)]
    pub fields: CardArgs,
}

impl From<UpsertCommand> for ProjectForm {
    fn from(cmd: UpsertCommand) -> Self {
        let CardArgs {
            title,
            description,
            image_src,
            image_alt,
            tech,
            link_href,
            link_label,
            date,
            role,
            keywords,
        } = cmd.fields;
        Self {
            id: cmd.id,
            title: title.unwrap_or_default(),
            description: description.unwrap_or_default(),
            image_src: image_src.unwrap_or_default(),
            image_alt: image_alt.unwrap_or_default(),
            tech: tech.unwrap_or_default(),
            link_href: link_href.unwrap_or_default(),
            link_label: link_label.unwrap_or_default(),
            date: date.unwrap_or_default(),
            role: role.unwrap_or_default(),
            keywords: keywords.unwrap_or_default(),
        }
    }
}

/// Delete command arguments.
#[derive(Debug, Args)]
pub struct DeleteCommand {
    /// Project id to delete
    #[arg(default_value = "")]
    pub id: String,
}

/// Show command arguments.
#[derive(Debug, Args)]
pub struct ShowCommand {
    /// Project id to load into the edit form
    pub id: String,

    /// Output as JSON (form field names)
    #[arg(short, long)]
    pub json: bool,
}

/// Render command arguments.
#[derive(Debug, Args)]
pub struct RenderCommand {
    #[command(flatten)]
    pub card: CardArgs,

    /// Print only the shadow markup, without the host element
    #[arg(long)]
    pub shadow_only: bool,
}

/// Status command arguments.
#[derive(Debug, Args)]
pub struct StatusCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Output format for commands that print projects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// One line per project
    Plain,
    /// Formatted table
    #[default]
    Table,
    /// JSON array of records
    Json,
    /// `<project-card>` elements
    Html,
}
