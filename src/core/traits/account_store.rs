use crate::core::models::account::Account;

/// Port for holding registered accounts, keyed by email.
///
/// Stores do no validation; `AccountRegistry` checks format and
/// uniqueness before calling `insert`.
pub trait AccountStore: Send + Sync {
    /// Add an account whose email is not yet present.
    fn insert(&mut self, account: Account);

    /// Look up an account by exact email.
    fn find(&self, email: &str) -> Option<&Account>;

    /// Number of registered accounts.
    fn len(&self) -> usize;

    fn contains(&self, email: &str) -> bool {
        self.find(email).is_some()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
