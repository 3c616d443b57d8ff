//! `portfolio` - Project cards for a personal portfolio site
//!
//! This library keeps an ordered list of portfolio projects in a local
//! key-value slot, edits it through an admin form with partial-update
//! semantics, and renders it (or a remote JSON feed) as `<project-card>`
//! markup.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod admin;
pub mod card;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod record;
pub mod remote;
pub mod storage;
pub mod store;
pub mod viewer;

pub use admin::{ProjectsAdmin, Status, StatusKind};
pub use card::{render, CardContainer, CardProps, ProjectCard};
pub use config::Config;
pub use error::{Error, Result};
pub use logging::init_logging;
pub use record::{ProjectForm, ProjectRecord};
pub use remote::{HttpSource, RemoteSource};
pub use storage::{MemorySlots, SlotStore, SqliteSlots};
pub use store::{ProjectStore, StoreStats, UpsertOutcome};
pub use viewer::{ProjectsViewer, TriggerControl};
