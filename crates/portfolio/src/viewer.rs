//! Read-only project gallery.
//!
//! The viewer renders either the local collection or a remote feed into a
//! [`CardContainer`] and keeps a one-line status. Remote data is shown only;
//! it is never written to the store.

use tokio::sync::watch;
use tracing::{info, warn};

use crate::card::{CardContainer, ProjectCard};
use crate::config::ViewerConfig;
use crate::record::{records_from_payload, ProjectRecord};
use crate::remote::RemoteSource;
use crate::storage::SlotStore;
use crate::store::ProjectStore;

/// Status reported when a remote load fails for any reason.
pub const REMOTE_FAILURE_STATUS: &str =
    "Could not load remote data. Check remote.endpoint and the server configuration.";

const LOCAL_SOURCE: &str = "localStorage";
const REMOTE_SOURCE: &str = "remote API";

/// State of the control that triggers a remote load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerControl {
    /// Whether the control accepts clicks.
    pub enabled: bool,
    /// Text shown on the control.
    pub label: String,
}

/// Restores the trigger when a remote load ends, including when the load
/// future is dropped mid-flight.
struct TriggerGuard<'a> {
    trigger: &'a watch::Sender<TriggerControl>,
    idle_label: &'a str,
}

impl Drop for TriggerGuard<'_> {
    fn drop(&mut self) {
        self.trigger.send_replace(TriggerControl {
            enabled: true,
            label: self.idle_label.to_string(),
        });
    }
}

/// Gallery over a project store and a remote source.
#[derive(Debug)]
pub struct ProjectsViewer<'a, S, R> {
    store: &'a ProjectStore<S>,
    remote: R,
    container: CardContainer,
    shown: Vec<ProjectRecord>,
    trigger: watch::Sender<TriggerControl>,
    idle_label: String,
    loading_label: String,
    status: String,
}

impl<'a, S: SlotStore, R: RemoteSource> ProjectsViewer<'a, S, R> {
    /// Create a viewer with an empty container and an enabled trigger.
    pub fn new(store: &'a ProjectStore<S>, remote: R, config: &ViewerConfig) -> Self {
        let (trigger, _) = watch::channel(TriggerControl {
            enabled: true,
            label: config.trigger_label.clone(),
        });
        Self {
            store,
            remote,
            container: CardContainer::new(),
            shown: Vec::new(),
            trigger,
            idle_label: config.trigger_label.clone(),
            loading_label: config.loading_label.clone(),
            status: String::new(),
        }
    }

    /// Seed the store if needed and render every stored record.
    ///
    /// A slot that cannot be parsed renders the default projects. Returns the
    /// number of cards rendered.
    pub fn load_local(&mut self) -> usize {
        self.store.ensure_seeded();
        let count = self.show(self.store.read_for_display(), LOCAL_SOURCE);
        info!("Rendered {} local project(s)", count);
        count
    }

    /// Fetch the remote feed and render it.
    ///
    /// The trigger is disabled and relabeled while the request is in flight
    /// and restored afterwards whatever the outcome. On failure the container
    /// keeps its previous cards. Returns the number of cards rendered, or
    /// `None` if the load failed or the trigger was already disabled.
    pub async fn load_remote(&mut self) -> Option<usize> {
        if !self.trigger.borrow().enabled {
            return None;
        }

        self.trigger.send_replace(TriggerControl {
            enabled: false,
            label: self.loading_label.clone(),
        });
        let guard = TriggerGuard {
            trigger: &self.trigger,
            idle_label: &self.idle_label,
        };
        let result = self.remote.fetch().await;
        drop(guard);

        match result {
            Ok(payload) => {
                let count = self.show(records_from_payload(payload), REMOTE_SOURCE);
                info!("Rendered {} remote project(s)", count);
                Some(count)
            }
            Err(e) => {
                warn!("Remote project load failed: {}", e);
                REMOTE_FAILURE_STATUS.clone_into(&mut self.status);
                None
            }
        }
    }

    fn show(&mut self, records: Vec<ProjectRecord>, source: &str) -> usize {
        self.container
            .replace(records.iter().map(ProjectCard::from_record).collect());
        self.shown = records;

        let count = self.shown.len();
        self.status = if count == 0 {
            format!("No projects found in {source} data.")
        } else {
            format!("Loaded {count} project card(s) from {source}.")
        };
        count
    }

    /// The records behind the rendered cards.
    #[must_use]
    pub fn records(&self) -> &[ProjectRecord] {
        &self.shown
    }

    /// The rendered cards.
    #[must_use]
    pub fn container(&self) -> &CardContainer {
        &self.container
    }

    /// The last status message.
    #[must_use]
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Current state of the remote trigger.
    #[must_use]
    pub fn trigger(&self) -> TriggerControl {
        self.trigger.borrow().clone()
    }

    /// Watch the remote trigger for changes.
    #[must_use]
    pub fn subscribe_trigger(&self) -> watch::Receiver<TriggerControl> {
        self.trigger.subscribe()
    }
}
