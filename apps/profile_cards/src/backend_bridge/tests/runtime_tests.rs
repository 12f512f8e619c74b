use super::*;

use std::{
    io::Cursor,
    sync::atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;
use client_core::ProfileFetchError;
use crossbeam_channel::{bounded, RecvTimeoutError};
use shared::protocol::RemoteUser;

struct FakeSource {
    calls: Arc<AtomicUsize>,
    fail: bool,
}

fn png_bytes() -> Vec<u8> {
    let image = image::RgbaImage::from_pixel(3, 3, image::Rgba([10, 120, 240, 255]));
    let mut bytes = Vec::new();
    image::DynamicImage::ImageRgba8(image)
        .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .expect("encode png");
    bytes
}

fn loaded(id: i64, username: &str, bytes: Vec<u8>, content_type: &str) -> LoadedProfile {
    let user = RemoteUser {
        id: UserId(id),
        username: username.to_string(),
        email: format!("{username}@example.com"),
        phone: "555".to_string(),
        website: format!("{username}.org"),
    };
    LoadedProfile {
        profile: user.into_profile(format!("https://avatars.example/png?seed={username}")),
        avatar_content_type: Some(content_type.to_string()),
        avatar_bytes: bytes,
    }
}

#[async_trait]
impl ProfileSource for FakeSource {
    async fn load_profiles(&self) -> Result<Vec<LoadedProfile>, ProfileFetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(ProfileFetchError::Status {
                url: "http://directory.test/users".to_string(),
                status: 503,
            });
        }
        Ok(vec![
            loaded(1, "Bret", png_bytes(), "image/png"),
            loaded(2, "Antonette", b"<svg></svg>".to_vec(), "image/svg+xml"),
        ])
    }
}

struct Harness {
    runtime: tokio::runtime::Runtime,
    calls: Arc<AtomicUsize>,
    ui_rx: Receiver<UiEvent>,
    worker: BackendWorker,
}

fn harness(fail: bool) -> Harness {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_all()
        .build()
        .expect("runtime");
    let calls = Arc::new(AtomicUsize::new(0));
    let source = Arc::new(FakeSource {
        calls: Arc::clone(&calls),
        fail,
    });
    let (ui_tx, ui_rx) = bounded(16);
    let worker = BackendWorker::new(runtime.handle().clone(), source, ui_tx);
    Harness {
        runtime,
        calls,
        ui_rx,
        worker,
    }
}

/// Drains events until profiles arrive or `timeout` passes without any event.
fn wait_for_profiles(
    ui_rx: &Receiver<UiEvent>,
    timeout: Duration,
) -> Option<(Vec<UserProfile>, HashMap<UserId, AvatarImage>)> {
    loop {
        match ui_rx.recv_timeout(timeout) {
            Ok(UiEvent::ProfilesLoaded { profiles, avatars }) => return Some((profiles, avatars)),
            Ok(_) => continue,
            Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => return None,
        }
    }
}

#[test]
fn load_delivers_profiles_in_order_with_decoded_avatars() {
    let mut h = harness(false);
    h.worker.handle(BackendCommand::LoadProfiles {
        delay: Duration::ZERO,
    });

    let (profiles, avatars) =
        wait_for_profiles(&h.ui_rx, Duration::from_secs(5)).expect("profiles loaded");
    let ids: Vec<UserId> = profiles.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![UserId(1), UserId(2)]);
    assert!(profiles.iter().all(|p| !p.liked));

    let bret = avatars.get(&UserId(1)).expect("decoded png");
    assert_eq!((bret.width, bret.height), (3, 3));
    assert!(!avatars.contains_key(&UserId(2)));
    assert_eq!(h.calls.load(Ordering::SeqCst), 1);
    drop(h.runtime);
}

#[test]
fn cancelled_delay_never_fetches() {
    let mut h = harness(false);
    h.worker.handle(BackendCommand::LoadProfiles {
        delay: Duration::from_millis(300),
    });
    h.worker.handle(BackendCommand::CancelPendingLoad);

    assert!(wait_for_profiles(&h.ui_rx, Duration::from_millis(600)).is_none());
    assert_eq!(h.calls.load(Ordering::SeqCst), 0);
}

#[test]
fn dropping_the_worker_cancels_the_pending_delay() {
    let h = harness(false);
    let Harness {
        runtime,
        calls,
        ui_rx,
        mut worker,
    } = h;
    worker.handle(BackendCommand::LoadProfiles {
        delay: Duration::from_millis(300),
    });
    drop(worker);

    assert!(wait_for_profiles(&ui_rx, Duration::from_millis(600)).is_none());
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    drop(runtime);
}

#[test]
fn failed_load_is_logged_and_swallowed() {
    let mut h = harness(true);
    h.worker.handle(BackendCommand::LoadProfiles {
        delay: Duration::ZERO,
    });

    assert!(wait_for_profiles(&h.ui_rx, Duration::from_millis(500)).is_none());
    assert_eq!(h.calls.load(Ordering::SeqCst), 1);
}

#[test]
fn reloading_replaces_the_pending_delay() {
    let mut h = harness(false);
    h.worker.handle(BackendCommand::LoadProfiles {
        delay: Duration::from_secs(30),
    });
    h.worker.handle(BackendCommand::LoadProfiles {
        delay: Duration::ZERO,
    });

    assert!(wait_for_profiles(&h.ui_rx, Duration::from_secs(5)).is_some());
    assert_eq!(h.calls.load(Ordering::SeqCst), 1);
}
