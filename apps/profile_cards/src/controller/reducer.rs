//! Profile board state and the actions that mutate it.

use shared::{
    domain::{ProfileDetails, ProfileField, UserId, UserProfile},
    error::ProfileFieldError,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPhase {
    Loading,
    Ready,
}

/// The open edit modal: which profile, and the form buffers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSession {
    pub user_id: UserId,
    pub draft: ProfileDetails,
    /// Fields flagged by the last rejected save.
    pub missing: Vec<ProfileField>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileAction {
    Loaded(Vec<UserProfile>),
    ToggleLike(UserId),
    Delete(UserId),
    BeginEdit(UserId),
    SaveEdit,
    CancelEdit,
}

impl ProfileAction {
    pub fn name(&self) -> &'static str {
        match self {
            ProfileAction::Loaded(_) => "loaded",
            ProfileAction::ToggleLike(_) => "toggle_like",
            ProfileAction::Delete(_) => "delete",
            ProfileAction::BeginEdit(_) => "begin_edit",
            ProfileAction::SaveEdit => "save_edit",
            ProfileAction::CancelEdit => "cancel_edit",
        }
    }

    pub fn target(&self) -> Option<UserId> {
        match self {
            ProfileAction::ToggleLike(id)
            | ProfileAction::Delete(id)
            | ProfileAction::BeginEdit(id) => Some(*id),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReduceOutcome {
    Applied,
    Ignored,
    Invalid(ProfileFieldError),
}

#[derive(Debug, Clone)]
pub struct ProfileBoard {
    phase: LoadPhase,
    profiles: Vec<UserProfile>,
    editing: Option<EditSession>,
}

impl Default for ProfileBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl ProfileBoard {
    pub fn new() -> Self {
        Self {
            phase: LoadPhase::Loading,
            profiles: Vec::new(),
            editing: None,
        }
    }

    pub fn phase(&self) -> LoadPhase {
        self.phase
    }

    pub fn profiles(&self) -> &[UserProfile] {
        &self.profiles
    }

    pub fn profile(&self, user_id: UserId) -> Option<&UserProfile> {
        self.profiles.iter().find(|profile| profile.id == user_id)
    }

    pub fn edit_session(&self) -> Option<&EditSession> {
        self.editing.as_ref()
    }

    pub fn edit_session_mut(&mut self) -> Option<&mut EditSession> {
        self.editing.as_mut()
    }

    pub fn reduce(&mut self, action: ProfileAction) -> ReduceOutcome {
        match action {
            ProfileAction::Loaded(profiles) => {
                // The list is built once per run.
                if self.phase == LoadPhase::Ready {
                    return ReduceOutcome::Ignored;
                }
                self.profiles = profiles;
                self.phase = LoadPhase::Ready;
                ReduceOutcome::Applied
            }
            ProfileAction::ToggleLike(user_id) => match self.profile_mut(user_id) {
                Some(profile) => {
                    profile.toggle_like();
                    ReduceOutcome::Applied
                }
                None => ReduceOutcome::Ignored,
            },
            ProfileAction::Delete(user_id) => {
                let before = self.profiles.len();
                self.profiles.retain(|profile| profile.id != user_id);
                if self.profiles.len() == before {
                    return ReduceOutcome::Ignored;
                }
                if self
                    .editing
                    .as_ref()
                    .is_some_and(|session| session.user_id == user_id)
                {
                    self.editing = None;
                }
                ReduceOutcome::Applied
            }
            ProfileAction::BeginEdit(user_id) => match self.profile(user_id) {
                Some(profile) => {
                    self.editing = Some(EditSession {
                        user_id,
                        draft: profile.details(),
                        missing: Vec::new(),
                    });
                    ReduceOutcome::Applied
                }
                None => ReduceOutcome::Ignored,
            },
            ProfileAction::SaveEdit => self.save_edit(),
            ProfileAction::CancelEdit => match self.editing.take() {
                Some(_) => ReduceOutcome::Applied,
                None => ReduceOutcome::Ignored,
            },
        }
    }

    fn save_edit(&mut self) -> ReduceOutcome {
        let Some(session) = self.editing.as_mut() else {
            return ReduceOutcome::Ignored;
        };

        if let Err(err) = session.draft.validate() {
            session.missing = session.draft.missing_fields();
            return ReduceOutcome::Invalid(err);
        }

        let Some(session) = self.editing.take() else {
            return ReduceOutcome::Ignored;
        };
        match self.profile_mut(session.user_id) {
            Some(profile) => {
                profile.apply_details(session.draft);
                ReduceOutcome::Applied
            }
            None => ReduceOutcome::Ignored,
        }
    }

    fn profile_mut(&mut self, user_id: UserId) -> Option<&mut UserProfile> {
        self.profiles.iter_mut().find(|profile| profile.id == user_id)
    }
}

#[cfg(test)]
#[path = "tests/reducer_tests.rs"]
mod tests;
