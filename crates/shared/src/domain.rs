use serde::{Deserialize, Serialize};

use crate::error::ProfileFieldError;

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);
    };
}

id_newtype!(UserId);

/// A profile card as held in the in-memory list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub phone: String,
    pub website: String,
    /// URL the avatar was requested from.
    pub avatar: String,
    pub liked: bool,
}

impl UserProfile {
    pub fn details(&self) -> ProfileDetails {
        ProfileDetails {
            username: self.username.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            website: self.website.clone(),
        }
    }

    /// Replaces the editable fields. Identity, avatar and like state are kept.
    pub fn apply_details(&mut self, details: ProfileDetails) {
        self.username = details.username;
        self.email = details.email;
        self.phone = details.phone;
        self.website = details.website;
    }

    pub fn toggle_like(&mut self) {
        self.liked = !self.liked;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileField {
    Username,
    Email,
    Phone,
    Website,
}

impl ProfileField {
    pub const ALL: [ProfileField; 4] = [
        ProfileField::Username,
        ProfileField::Email,
        ProfileField::Phone,
        ProfileField::Website,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ProfileField::Username => "Username",
            ProfileField::Email => "Email",
            ProfileField::Phone => "Phone",
            ProfileField::Website => "Website",
        }
    }
}

/// The user-editable subset of a [`UserProfile`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileDetails {
    pub username: String,
    pub email: String,
    pub phone: String,
    pub website: String,
}

impl ProfileDetails {
    pub fn field(&self, field: ProfileField) -> &str {
        match field {
            ProfileField::Username => &self.username,
            ProfileField::Email => &self.email,
            ProfileField::Phone => &self.phone,
            ProfileField::Website => &self.website,
        }
    }

    pub fn field_mut(&mut self, field: ProfileField) -> &mut String {
        match field {
            ProfileField::Username => &mut self.username,
            ProfileField::Email => &mut self.email,
            ProfileField::Phone => &mut self.phone,
            ProfileField::Website => &mut self.website,
        }
    }

    pub fn missing_fields(&self) -> Vec<ProfileField> {
        ProfileField::ALL
            .into_iter()
            .filter(|field| self.field(*field).trim().is_empty())
            .collect()
    }

    /// Every field is required; reports the first empty one.
    pub fn validate(&self) -> Result<(), ProfileFieldError> {
        match self.missing_fields().first() {
            Some(field) => Err(ProfileFieldError::Required { field: *field }),
            None => Ok(()),
        }
    }
}
