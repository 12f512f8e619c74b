//! Wire shapes of the remote user directory.

use serde::{Deserialize, Serialize};

use crate::domain::{UserId, UserProfile};

/// One element of the user-list JSON array. Fields the client does not use
/// (address, company, ...) are ignored on decode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteUser {
    pub id: UserId,
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub website: String,
}

impl RemoteUser {
    pub fn into_profile(self, avatar: impl Into<String>) -> UserProfile {
        UserProfile {
            id: self.id,
            username: self.username,
            email: self.email,
            phone: self.phone,
            website: self.website,
            avatar: avatar.into(),
            liked: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_directory_entry_and_ignores_extra_fields() {
        let raw = r#"{
            "id": 1,
            "name": "Leanne Graham",
            "username": "Bret",
            "email": "Sincere@april.biz",
            "address": { "city": "Gwenborough" },
            "phone": "1-770-736-8031 x56442",
            "website": "hildegard.org",
            "company": { "name": "Romaguera-Crona" }
        }"#;

        let user: RemoteUser = serde_json::from_str(raw).expect("decode");
        assert_eq!(user.id, UserId(1));
        assert_eq!(user.username, "Bret");
        assert_eq!(user.website, "hildegard.org");
    }

    #[test]
    fn new_profiles_start_unliked() {
        let user = RemoteUser {
            id: UserId(2),
            username: "Antonette".to_string(),
            email: "Shanna@melissa.tv".to_string(),
            phone: "010-692-6593 x09125".to_string(),
            website: "anastasia.net".to_string(),
        };

        let profile = user.into_profile("https://avatars.example/Antonette.png");
        assert!(!profile.liked);
        assert_eq!(profile.avatar, "https://avatars.example/Antonette.png");
    }
}
