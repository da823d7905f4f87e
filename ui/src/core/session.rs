//! Page session state.
//!
//! The token, role, and cached admin password live in one explicit object
//! handed to views through context instead of module-level globals. Token,
//! role, and user info survive reloads via `sessionStorage`; the admin
//! password never leaves memory.

use api::ApiClient;

const TOKEN_KEY: &str = "rollcall.token";
const ROLE_KEY: &str = "rollcall.role";
const USER_INFO_KEY: &str = "rollcall.userInfo";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub token: Option<String>,
    pub role: Option<String>,
    pub user_info: Option<String>,
    /// Cached for repeated admin edits within one page session; not persisted.
    pub admin_password: Option<String>,
}

impl Session {
    /// Restores whatever the previous page load stored.
    pub fn load() -> Self {
        #[cfg(target_arch = "wasm32")]
        {
            Self {
                token: storage_get(TOKEN_KEY),
                role: storage_get(ROLE_KEY),
                user_info: storage_get(USER_INFO_KEY),
                admin_password: None,
            }
        }

        #[cfg(not(target_arch = "wasm32"))]
        Self::default()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.role.as_deref() == Some("admin")
    }

    /// Records a successful login and persists the durable fields.
    pub fn sign_in(&mut self, token: String, role: String, user_info: Option<String>) {
        self.token = Some(token);
        self.role = Some(role);
        self.user_info = user_info;
        self.persist();
    }

    pub fn persist(&self) {
        #[cfg(target_arch = "wasm32")]
        {
            storage_set(TOKEN_KEY, self.token.as_deref());
            storage_set(ROLE_KEY, self.role.as_deref());
            storage_set(USER_INFO_KEY, self.user_info.as_deref());
        }
    }

    /// Logout: wipe every field, including the cached admin password.
    pub fn clear(&mut self) {
        *self = Self::default();
        self.persist();
    }

    /// A backend client carrying this session's bearer token.
    pub fn client(&self) -> ApiClient {
        ApiClient::from_window().with_bearer(self.token.clone())
    }

    /// The chat relay endpoint for the signed-in role.
    pub fn chat_endpoint(&self) -> &'static str {
        if self.is_admin() {
            "admin"
        } else {
            "student"
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|window| window.session_storage().ok().flatten())
}

#[cfg(target_arch = "wasm32")]
fn storage_get(key: &str) -> Option<String> {
    storage().and_then(|store| store.get_item(key).ok().flatten())
}

#[cfg(target_arch = "wasm32")]
fn storage_set(key: &str, value: Option<&str>) {
    if let Some(store) = storage() {
        let result = match value {
            Some(value) => store.set_item(key, value),
            None => store.remove_item(key),
        };
        if result.is_err() {
            super::platform::log_warn("session storage unavailable");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_in_then_clear_round_trips() {
        let mut session = Session::default();
        assert!(!session.is_authenticated());

        session.sign_in("jwt".into(), "admin".into(), None);
        assert!(session.is_authenticated());
        assert!(session.is_admin());
        assert_eq!(session.chat_endpoint(), "admin");

        session.admin_password = Some("hunter2".into());
        session.clear();
        assert_eq!(session, Session::default());
    }

    #[test]
    fn student_sessions_use_student_chat() {
        let mut session = Session::default();
        session.sign_in("jwt".into(), "student".into(), None);
        assert!(!session.is_admin());
        assert_eq!(session.chat_endpoint(), "student");
    }
}
