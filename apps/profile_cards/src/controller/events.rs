//! Events flowing from the backend worker to the UI thread.

use std::collections::HashMap;

use shared::domain::{UserId, UserProfile};

use crate::media::AvatarImage;

pub enum UiEvent {
    Info(String),
    /// The worker could not start; the list will never load.
    BackendFailed(String),
    ProfilesLoaded {
        profiles: Vec<UserProfile>,
        avatars: HashMap<UserId, AvatarImage>,
    },
}
