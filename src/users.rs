use crate::models::user::{PasswordCredentials, UserInfo};

/// User directory derived from the statically configured credentials.
/// Display names fall back to the user id; there is no profile store.
pub struct UserDirectory {
    credentials: Vec<PasswordCredentials>,
}

impl UserDirectory {
    pub fn new(credentials: Vec<PasswordCredentials>) -> Self {
        Self { credentials }
    }

    /// Constant-shape check against the configured list. Plaintext
    /// comparison is acceptable here: these are throwaway test
    /// credentials, not real accounts.
    pub fn verify(&self, username: &str, password: &str) -> bool {
        self.credentials
            .iter()
            .any(|c| c.username == username && c.password == password)
    }

    pub fn get(&self, user_id: &str) -> Option<UserInfo> {
        self.credentials
            .iter()
            .find(|c| c.username == user_id)
            .map(|c| UserInfo {
                user_id: c.username.clone(),
                display_name: c.username.clone(),
            })
    }

    pub fn list(&self) -> Vec<UserInfo> {
        self.credentials
            .iter()
            .map(|c| UserInfo {
                user_id: c.username.clone(),
                display_name: c.username.clone(),
            })
            .collect()
    }
}
