//! `SQLite` schema definitions for the slot database.
//!
//! The database emulates a browser-local key-value store: every slot is one
//! row holding an opaque string value.

/// SQL statement to create the slots table (layout version 1).
pub const CREATE_SLOTS_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS slots (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL,
    updated_at TEXT NOT NULL
)
";

/// SQL statement to create the metadata table that records the layout
/// version. It exists before any migration runs.
pub const CREATE_METADATA_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS metadata (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
)
";
