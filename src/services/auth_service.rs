use std::collections::BTreeMap;

/// Decides whether a basic-auth credential pair may act on the store.
pub trait Authenticator: Send + Sync {
    /// Returns the authorized user name, or `None` to reject.
    fn authenticate(&self, user: &str, password: &str) -> Option<String>;
}

/// Fixed username/password table loaded at startup.
pub struct StaticAccounts {
    accounts: BTreeMap<String, String>,
}

impl StaticAccounts {
    pub fn new(accounts: BTreeMap<String, String>) -> Self {
        Self { accounts }
    }
}

impl Authenticator for StaticAccounts {
    fn authenticate(&self, user: &str, password: &str) -> Option<String> {
        match self.accounts.get(user) {
            Some(expected) if expected == password => Some(user.to_string()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    fn accounts() -> StaticAccounts {
        StaticAccounts::new(AppConfig::default().accounts)
    }

    #[test]
    fn known_pairs_are_accepted() {
        let accounts = accounts();

        assert_eq!(accounts.authenticate("foo", "bar").as_deref(), Some("foo"));
        assert_eq!(accounts.authenticate("manu", "123").as_deref(), Some("manu"));
    }

    #[test]
    fn wrong_password_or_unknown_user_is_rejected() {
        let accounts = accounts();

        assert_eq!(accounts.authenticate("foo", "123"), None);
        assert_eq!(accounts.authenticate("manu", "bar"), None);
        assert_eq!(accounts.authenticate("root", "bar"), None);
        assert_eq!(accounts.authenticate("", ""), None);
    }
}
