//! Run lifecycle: status and terminal geomorphic states.

use std::fmt;

/// Geomorphic end state that stops a run early.
///
/// These are outcomes of the model, not engine failures. The
/// [`Display`](fmt::Display) strings are stable and intended for logs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TerminationReason {
    /// Bay fetch fell to 10 cells or fewer.
    BasinFilled,
    /// No cell on the transect reaches the forest-establishment elevation.
    BarrierDrowned,
    /// Marsh edge moved to within 10 cells of the bay side of the domain.
    MarshExpanded,
    /// Marsh edge moved to within 10 cells of the upland end of the domain.
    MarshRetreated,
    /// Bay depth fell below 0.2 m.
    BayFilled,
}

impl fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BasinFilled => write!(f, "basin filled by marsh"),
            Self::BarrierDrowned => write!(f, "barrier drowned"),
            Self::MarshExpanded => write!(f, "marsh expanded to fill basin"),
            Self::MarshRetreated => write!(f, "marsh retreated; basin flooded"),
            Self::BayFilled => write!(f, "bay filled in to form marsh"),
        }
    }
}

/// Lifecycle state of a transect run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunStatus {
    /// The run accepts further annual steps.
    Running,
    /// The run reached its configured duration.
    Completed,
    /// The run stopped early in a terminal geomorphic state.
    Terminated(TerminationReason),
    /// A collaborator failed mid-step; the current year row is partial.
    Disabled,
}

impl RunStatus {
    /// Whether further steps may execute.
    pub fn is_running(self) -> bool {
        matches!(self, Self::Running)
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Running => write!(f, "running"),
            Self::Completed => write!(f, "completed"),
            Self::Terminated(reason) => write!(f, "terminated: {reason}"),
            Self::Disabled => write!(f, "disabled"),
        }
    }
}
