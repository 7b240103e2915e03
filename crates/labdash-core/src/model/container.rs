// ── Container status domain type ──

use serde::{Deserialize, Serialize};

use labdash_api::StatusRecord;

/// Substring of the status text that marks a running container
/// (`docker ps` prints `Up 5 minutes`, `Exited (0) ...`, etc.).
pub const RUNNING_MARKER: &str = "Up";

/// Length of the container id prefix used in action endpoints.
pub const SHORT_ID_LEN: usize = 12;

/// One container as reported by the commander.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerStatus {
    /// Unique key; matches the row's `data-container` attribute.
    pub name: String,
    pub id: String,
    /// Free-text runtime status.
    pub status: String,
}

/// Derived run state of a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RunState {
    Running,
    Stopped,
}

impl ContainerStatus {
    pub fn run_state(&self) -> RunState {
        if self.status.contains(RUNNING_MARKER) {
            RunState::Running
        } else {
            RunState::Stopped
        }
    }

    /// First 12 characters of the id (the whole id when shorter).
    pub fn short_id(&self) -> &str {
        match self.id.char_indices().nth(SHORT_ID_LEN) {
            Some((end, _)) => &self.id[..end],
            None => &self.id,
        }
    }
}

impl From<StatusRecord> for ContainerStatus {
    fn from(r: StatusRecord) -> Self {
        Self {
            name: r.name,
            id: r.id,
            status: r.status,
        }
    }
}

impl RunState {
    pub fn is_running(self) -> bool {
        self == Self::Running
    }

    /// Row class applied to the container's `<tr>`.
    pub fn row_class(self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Stopped => "stopped",
        }
    }

    /// Text of the status indicator span.
    pub fn indicator_text(self) -> &'static str {
        match self {
            Self::Running => "● Running",
            Self::Stopped => "○ Stopped",
        }
    }

    /// The action the row's primary button performs from this state.
    pub fn toggle_action(self) -> ContainerAction {
        match self {
            Self::Running => ContainerAction::Stop,
            Self::Stopped => ContainerAction::Start,
        }
    }
}

/// Action endpoint reachable from a container row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::AsRefStr, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum ContainerAction {
    Start,
    Stop,
}

impl ContainerAction {
    /// Button label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Start => "Start",
            Self::Stop => "Stop",
        }
    }

    /// `POST` endpoint for a container: `/{action}/{short_id}`.
    pub fn endpoint(self, short_id: &str) -> String {
        format!("/{}/{short_id}", self.as_ref())
    }
}
