//! Backend commands queued from UI to backend worker.

use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCommand {
    /// Wait `delay`, then fetch the directory and every avatar.
    LoadProfiles { delay: Duration },
    /// Cancels a load still waiting out its delay. Requests already in flight continue.
    CancelPendingLoad,
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::LoadProfiles { .. } => "load_profiles",
            BackendCommand::CancelPendingLoad => "cancel_pending_load",
        }
    }
}
