use std::collections::HashMap;

use crate::core::models::account::Account;
use crate::core::traits::account_store::AccountStore;

/// Account store held in process memory for the lifetime of the server.
#[derive(Debug, Default)]
pub struct MemoryAccountStore {
    accounts: HashMap<String, Account>,
}

impl MemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AccountStore for MemoryAccountStore {
    fn insert(&mut self, account: Account) {
        self.accounts.insert(account.email.clone(), account);
    }

    fn find(&self, email: &str) -> Option<&Account> {
        self.accounts.get(email)
    }

    fn len(&self) -> usize {
        self.accounts.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(email: &str) -> Account {
        Account {
            email: email.to_string(),
            password: "password1".to_string(),
            phone: "5551234567".to_string(),
        }
    }

    #[test]
    fn insert_then_find() {
        let mut store = MemoryAccountStore::new();
        assert!(store.is_empty());

        store.insert(account("a@b.co"));

        assert_eq!(store.len(), 1);
        assert!(store.contains("a@b.co"));
        assert_eq!(store.find("a@b.co").unwrap().phone, "5551234567");
    }

    #[test]
    fn lookup_is_exact() {
        let mut store = MemoryAccountStore::new();
        store.insert(account("a@b.co"));

        assert!(!store.contains("A@B.CO"));
        assert!(!store.contains("a@b.co "));
        assert!(store.find("x@y.co").is_none());
    }
}
