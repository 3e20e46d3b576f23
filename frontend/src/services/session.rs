use anyhow::Context;
use gloo::storage::{LocalStorage, Storage};
use serde::{Deserialize, Serialize};
use shared::{Access, LoginResponse, User};

use crate::services::config::SESSION_STORAGE_KEY;
use crate::services::Logger;

/// The signed-in user and the bearer token sent with every request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub user: User,
}

impl Session {
    pub fn access(&self) -> Access {
        Access::new(self.user.role)
    }

    /// Session persisted by a previous visit, if any
    pub fn restore() -> Option<Session> {
        match LocalStorage::get::<Session>(SESSION_STORAGE_KEY) {
            Ok(session) if !session.access_token.is_empty() => Some(session),
            Ok(_) => None,
            Err(err) => {
                Logger::debug_with_component("session", &format!("no stored session: {}", err));
                None
            }
        }
    }

    pub fn persist(&self) -> anyhow::Result<()> {
        LocalStorage::set(SESSION_STORAGE_KEY, self).context("failed to store session")
    }

    pub fn clear() {
        LocalStorage::delete(SESSION_STORAGE_KEY);
    }
}

impl From<LoginResponse> for Session {
    fn from(response: LoginResponse) -> Self {
        Self {
            access_token: response.access_token,
            user: response.user,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{Page, Role};

    #[test]
    fn test_session_access_follows_role() {
        let session = Session::from(LoginResponse {
            access_token: "token".to_string(),
            user: User {
                id: 2,
                username: "coach".to_string(),
                role: Role::Trainer,
                trainer_id: Some(4),
            },
        });
        assert_eq!(session.access().home(), Page::Calendar);
        assert!(!session.access().can_edit_bookings());
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use shared::Role;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_session_survives_storage_round_trip() {
        let session = Session {
            access_token: "abc".to_string(),
            user: User {
                id: 1,
                username: "admin".to_string(),
                role: Role::Admin,
                trainer_id: None,
            },
        };
        session.persist().unwrap();
        assert_eq!(Session::restore(), Some(session));
        Session::clear();
        assert_eq!(Session::restore(), None);
    }
}
