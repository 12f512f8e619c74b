//! Runtime bridge between UI command queue and backend event intake.

use std::{collections::HashMap, sync::Arc, thread, time::Duration};

use client_core::{LoadedProfile, ProfileSource};
use crossbeam_channel::{Receiver, Sender};
use shared::domain::{UserId, UserProfile};
use tokio::{runtime::Handle, sync::oneshot};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::media::{decode_avatar_image, AvatarImage};

/// Owns the pending-delay handle of the current load and spawns load tasks onto `runtime`.
pub struct BackendWorker {
    runtime: Handle,
    source: Arc<dyn ProfileSource>,
    ui_tx: Sender<UiEvent>,
    pending_delay: Option<oneshot::Sender<()>>,
}

impl BackendWorker {
    pub fn new(runtime: Handle, source: Arc<dyn ProfileSource>, ui_tx: Sender<UiEvent>) -> Self {
        Self {
            runtime,
            source,
            ui_tx,
            pending_delay: None,
        }
    }

    pub fn handle(&mut self, cmd: BackendCommand) {
        match cmd {
            BackendCommand::LoadProfiles { delay } => {
                self.cancel_pending_delay();
                let (cancel_tx, cancel_rx) = oneshot::channel();
                self.pending_delay = Some(cancel_tx);
                tracing::info!(delay_ms = delay.as_millis() as u64, "scheduling profile load");
                self.runtime.spawn(load_after_delay(
                    Arc::clone(&self.source),
                    self.ui_tx.clone(),
                    delay,
                    cancel_rx,
                ));
            }
            BackendCommand::CancelPendingLoad => self.cancel_pending_delay(),
        }
    }

    fn cancel_pending_delay(&mut self) {
        if let Some(cancel_tx) = self.pending_delay.take() {
            // Err means the delay already elapsed and the receiver is gone.
            let _ = cancel_tx.send(());
        }
    }
}

async fn load_after_delay(
    source: Arc<dyn ProfileSource>,
    ui_tx: Sender<UiEvent>,
    delay: Duration,
    cancel_rx: oneshot::Receiver<()>,
) {
    tokio::select! {
        _ = tokio::time::sleep(delay) => {}
        _ = cancel_rx => {
            tracing::info!("pending profile load cancelled before fetching");
            return;
        }
    }

    let _ = ui_tx.try_send(UiEvent::Info("Fetching profiles...".to_string()));
    let loaded = match source.load_profiles().await {
        Ok(loaded) => loaded,
        Err(err) => {
            tracing::error!(error = %err, "error fetching user data");
            return;
        }
    };

    let count = loaded.len();
    let (profiles, avatars) = split_loaded_profiles(loaded);
    tracing::info!(
        count,
        decoded_avatars = avatars.len(),
        "profiles ready for display"
    );
    if ui_tx
        .try_send(UiEvent::ProfilesLoaded { profiles, avatars })
        .is_err()
    {
        tracing::warn!("ui event queue unavailable; dropping loaded profiles");
    }
}

fn split_loaded_profiles(
    loaded: Vec<LoadedProfile>,
) -> (Vec<UserProfile>, HashMap<UserId, AvatarImage>) {
    let mut profiles = Vec::with_capacity(loaded.len());
    let mut avatars = HashMap::with_capacity(loaded.len());
    for item in loaded {
        match decode_avatar_image(&item.avatar_bytes) {
            Ok(image) => {
                avatars.insert(item.profile.id, image);
            }
            Err(err) => {
                tracing::warn!(
                    user_id = item.profile.id.0,
                    content_type = item.avatar_content_type.as_deref().unwrap_or("unknown"),
                    "avatar not decodable, using placeholder: {err}"
                );
            }
        }
        profiles.push(item.profile);
    }
    (profiles, avatars)
}

pub fn start_backend_bridge(
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
    source: Arc<dyn ProfileSource>,
) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("profile-fetch")
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::BackendFailed(format!(
                    "backend worker startup failure: failed to build runtime: {err}"
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        let mut worker = BackendWorker::new(runtime.handle().clone(), source, ui_tx);
        while let Ok(cmd) = cmd_rx.recv() {
            tracing::debug!(command = cmd.name(), "backend received command");
            worker.handle(cmd);
        }

        // UI is gone; dropping the worker releases any pending delay.
        drop(worker);
        runtime.shutdown_timeout(Duration::from_secs(1));
        tracing::debug!("backend worker stopped");
    });
}

#[cfg(test)]
#[path = "tests/runtime_tests.rs"]
mod tests;
