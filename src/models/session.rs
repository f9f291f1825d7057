use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::{UserId, UserRecord};

/// The signed-in actor, persisted client-side between runs
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub token: String,
    pub user_id: UserId,
    pub display_name: String,
    pub email: String,
}

impl Session {
    /// Creates a session for a freshly authenticated user
    pub fn for_user(user: &UserRecord) -> Self {
        Self {
            token: format!("token_{}_{}", user.id, Utc::now().timestamp_millis()),
            user_id: user.id,
            display_name: user.full_name.clone(),
            email: user.email.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_for_user_copies_identity() {
        let user = UserRecord {
            id: UserId(7),
            full_name: "Lan".to_string(),
            email: "lan@example.com".to_string(),
            password: "pw".to_string(),
            favorites: vec![],
            created_at: None,
        };

        let session = Session::for_user(&user);
        assert_eq!(session.user_id, UserId(7));
        assert_eq!(session.display_name, "Lan");
        assert_eq!(session.email, "lan@example.com");
        assert!(session.token.starts_with("token_7_"));
    }
}
