//! Create/update/delete form bound to the project store.
//!
//! Every submission follows the same path: validate the id, apply the
//! mutation, persist, re-render the preview, report. A rejected submission
//! changes nothing. There are no retries.

use serde::Serialize;
use tracing::debug;

use crate::card::{CardContainer, ProjectCard};
use crate::error::Error;
use crate::record::ProjectForm;
use crate::storage::SlotStore;
use crate::store::{ProjectStore, UpsertOutcome};

/// Reported when a save or edit has no usable id.
const MISSING_ID: &str = "Please provide a non-empty project ID.";

/// Host attribute identifying which record a preview card shows.
pub const PROJECT_ID_ATTRIBUTE: &str = "data-project-id";

/// Severity of a status message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusKind {
    /// Neutral information.
    Info,
    /// A mutation or load went through.
    Success,
    /// The action was rejected or its target is missing.
    Error,
}

/// A short human-readable outcome of the last action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Status {
    /// Severity.
    pub kind: StatusKind,
    /// Message text.
    pub message: String,
}

impl Status {
    fn new(kind: StatusKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Whether this status reports a rejection or a missing target.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.kind == StatusKind::Error
    }
}

/// Admin surface: a preview of the whole store plus the edit form.
#[derive(Debug)]
pub struct ProjectsAdmin<'a, S> {
    store: &'a ProjectStore<S>,
    preview: CardContainer,
    form: ProjectForm,
    status: Status,
}

impl<'a, S: SlotStore> ProjectsAdmin<'a, S> {
    /// Create the admin and render the current store.
    ///
    /// The admin never seeds the store.
    pub fn new(store: &'a ProjectStore<S>) -> Self {
        let mut admin = Self {
            store,
            preview: CardContainer::new(),
            form: ProjectForm::default(),
            status: Status::new(StatusKind::Info, String::new()),
        };
        admin.render_preview();
        admin
    }

    /// Re-render the preview from the store and report what it shows.
    /// Returns the card count.
    pub fn render_preview(&mut self) -> usize {
        let cards = self
            .store
            .read_all()
            .iter()
            .map(|record| {
                let mut card = ProjectCard::from_record(record);
                card.set_attribute(PROJECT_ID_ATTRIBUTE, &record.id);
                card
            })
            .collect();
        self.preview.replace(cards);

        let count = self.preview.len();
        debug!("Admin preview shows {} project(s)", count);
        let message = if count == 0 {
            "No projects stored in localStorage yet. Create one with the form above.".to_string()
        } else {
            format!(
                "Showing {count} project(s) from localStorage (key: {}).",
                self.store.key()
            )
        };
        self.status = Status::new(StatusKind::Info, message);
        count
    }

    /// Load the record behind a clicked preview card into the form.
    pub fn select_card(&mut self, id: &str) -> &Status {
        self.status = match self.store.get(id) {
            Ok(record) => {
                self.form = ProjectForm::from_record(&record);
                Status::new(
                    StatusKind::Info,
                    format!(
                        "Loaded project \"{}\" into the form. Edit fields and click Save.",
                        record.id
                    ),
                )
            }
            Err(Error::NotFound { id }) => Status::new(
                StatusKind::Error,
                format!("No project found with ID \"{id}\" to edit."),
            ),
            Err(Error::MissingId { .. }) => Status::new(StatusKind::Error, MISSING_ID),
            Err(e) => Status::new(StatusKind::Error, e.to_string()),
        };
        &self.status
    }

    /// Create or merge-update a record from the submitted form.
    ///
    /// The mutation's message replaces the preview summary.
    pub fn submit_upsert(&mut self, form: ProjectForm) -> &Status {
        let id = form.trimmed_id().to_string();
        let status = match self.store.upsert(&form) {
            Ok(outcome) => {
                self.render_preview();
                let message = match outcome {
                    UpsertOutcome::Inserted => format!("Created new project \"{id}\"."),
                    UpsertOutcome::Updated => format!("Updated project \"{id}\"."),
                };
                Status::new(StatusKind::Success, message)
            }
            Err(Error::MissingId { .. }) => Status::new(StatusKind::Error, MISSING_ID),
            Err(e) => Status::new(StatusKind::Error, e.to_string()),
        };
        self.status = status;
        self.form = form;
        &self.status
    }

    /// Delete the record with `id`.
    ///
    /// The mutation's message replaces the preview summary.
    pub fn submit_delete(&mut self, id: &str) -> &Status {
        let id = id.trim();
        let status = match self.store.delete_by_id(id) {
            Ok(true) => {
                self.render_preview();
                Status::new(StatusKind::Success, format!("Deleted project \"{id}\"."))
            }
            Ok(false) => {
                self.render_preview();
                Status::new(
                    StatusKind::Error,
                    format!("No project found with ID \"{id}\"."),
                )
            }
            Err(Error::MissingId { .. }) => {
                Status::new(StatusKind::Error, "Please enter an ID to delete.")
            }
            Err(e) => Status::new(StatusKind::Error, e.to_string()),
        };
        self.status = status;
        &self.status
    }

    /// Re-render the preview without touching the store.
    pub fn refresh(&mut self) -> &Status {
        self.render_preview();
        &self.status
    }

    /// The preview cards.
    #[must_use]
    pub fn preview(&self) -> &CardContainer {
        &self.preview
    }

    /// The form as last loaded or submitted.
    #[must_use]
    pub fn form(&self) -> &ProjectForm {
        &self.form
    }

    /// The last status.
    #[must_use]
    pub fn status(&self) -> &Status {
        &self.status
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_SLOT_KEY;
    use crate::storage::MemorySlots;

    fn store() -> ProjectStore<MemorySlots> {
        ProjectStore::new(MemorySlots::new(), DEFAULT_SLOT_KEY)
    }

    fn form(id: &str, title: &str) -> ProjectForm {
        ProjectForm {
            id: id.to_string(),
            title: title.to_string(),
            ..ProjectForm::default()
        }
    }

    #[test]
    fn test_new_does_not_seed() {
        let store = store();
        let admin = ProjectsAdmin::new(&store);
        assert!(admin.preview().is_empty());
        assert!(store.slots().get(DEFAULT_SLOT_KEY).unwrap().is_none());
        assert_eq!(
            admin.status().message,
            "No projects stored in localStorage yet. Create one with the form above."
        );
    }

    #[test]
    fn test_preview_cards_carry_ids() {
        let store = store();
        store.ensure_seeded();
        let admin = ProjectsAdmin::new(&store);

        let ids: Vec<_> = admin
            .preview()
            .cards()
            .iter()
            .filter_map(|card| card.get_attribute(PROJECT_ID_ATTRIBUTE))
            .collect();
        assert_eq!(
            ids,
            ["foodflip", "podcaist", "qa-testing-system", "slide-generator"]
        );
        assert!(admin.preview().to_html().contains("data-project-id=\"podcaist\""));
        assert_eq!(
            admin.status().message,
            "Showing 4 project(s) from localStorage (key: portfolio-projects-local-v1)."
        );
    }

    #[test]
    fn test_submit_upsert_create_then_update() {
        let store = store();
        let mut admin = ProjectsAdmin::new(&store);

        let status = admin.submit_upsert(form("x", "A")).clone();
        assert_eq!(
            status,
            Status::new(StatusKind::Success, "Created new project \"x\".")
        );
        assert_eq!(admin.preview().len(), 1);

        let status = admin
            .submit_upsert(ProjectForm {
                tech: "Go".to_string(),
                ..form(" x ", "")
            })
            .clone();
        assert_eq!(status.message, "Updated project \"x\".");
        assert_eq!(admin.preview().len(), 1);

        let shadow = admin.preview().cards()[0].shadow_html();
        assert!(shadow.contains(">A</h2>"));
        assert!(shadow.contains("Tech: Go"));
    }

    #[test]
    fn test_submit_upsert_rejects_empty_id() {
        let store = store();
        let mut admin = ProjectsAdmin::new(&store);

        let status = admin.submit_upsert(form("  ", "A")).clone();
        assert!(status.is_error());
        assert_eq!(status.message, "Please provide a non-empty project ID.");
        assert!(store.read_all().is_empty());
    }

    #[test]
    fn test_submit_delete_outcomes() {
        let store = store();
        let mut admin = ProjectsAdmin::new(&store);
        admin.submit_upsert(form("x", "A"));

        assert_eq!(
            admin.submit_delete("missing").message,
            "No project found with ID \"missing\"."
        );
        assert_eq!(admin.preview().len(), 1);

        let status = admin.submit_delete("x").clone();
        assert_eq!(status, Status::new(StatusKind::Success, "Deleted project \"x\"."));
        assert!(admin.preview().is_empty());

        assert_eq!(
            admin.submit_delete(" ").message,
            "Please enter an ID to delete."
        );
    }

    #[test]
    fn test_select_card_loads_form() {
        let store = store();
        store.ensure_seeded();
        let mut admin = ProjectsAdmin::new(&store);

        let status = admin.select_card("podcaist").clone();
        assert!(!status.is_error());
        assert_eq!(
            status.message,
            "Loaded project \"podcaist\" into the form. Edit fields and click Save."
        );
        assert_eq!(
            admin.form().title,
            "Podcaist - AI\u{2011}Generated Podcast Platform"
        );
        assert_eq!(admin.form().link_href, "https://podcaist.vercel.app/");
    }

    #[test]
    fn test_select_card_after_external_delete() {
        let store = store();
        store.ensure_seeded();
        let mut admin = ProjectsAdmin::new(&store);

        // Another writer removes the record behind a visible card.
        store.delete_by_id("podcaist").unwrap();

        let status = admin.select_card("podcaist").clone();
        assert!(status.is_error());
        assert_eq!(status.message, "No project found with ID \"podcaist\" to edit.");
        assert_eq!(admin.preview().len(), 4);
        assert!(admin.form().id.is_empty());
    }

    #[test]
    fn test_select_card_empty_id() {
        let store = store();
        let mut admin = ProjectsAdmin::new(&store);

        let status = admin.select_card(" ").clone();
        assert!(status.is_error());
        assert_eq!(status.message, "Please provide a non-empty project ID.");
    }

    #[test]
    fn test_write_failure_still_reports_mutation() {
        let store = ProjectStore::new(MemorySlots::read_only(), DEFAULT_SLOT_KEY);
        let mut admin = ProjectsAdmin::new(&store);

        let status = admin.submit_upsert(form("x", "A")).clone();
        assert_eq!(status.kind, StatusKind::Success);
        assert_eq!(status.message, "Created new project \"x\".");
        assert!(admin.preview().is_empty());
    }

    #[test]
    fn test_refresh_picks_up_external_changes() {
        let store = store();
        let mut admin = ProjectsAdmin::new(&store);
        store.ensure_seeded();

        assert_eq!(
            admin.refresh().message,
            "Showing 4 project(s) from localStorage (key: portfolio-projects-local-v1)."
        );
        assert_eq!(admin.preview().len(), 4);

        store.write_all(&[]);
        assert_eq!(
            admin.refresh().message,
            "No projects stored in localStorage yet. Create one with the form above."
        );
    }
}
