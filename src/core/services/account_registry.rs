use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};

use crate::core::errors::{AuthError, RegistrationError};
use crate::core::models::account::Account;
use crate::core::traits::account_store::AccountStore;

/// Keys a registration body must carry, no more and no less.
const REGISTRATION_KEYS: [&str; 3] = ["email", "password", "phone"];

pub const MIN_PASSWORD_LEN: usize = 8;
pub const PHONE_DIGITS: usize = 10;

/// Local part `@` domain, ending in at least one 2-3 character label.
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\w+([.-]?\w+)*@\w+([.-]?\w+)*(\.\w{2,3})+$")
        .expect("email pattern is valid")
});

/// Registers and authenticates accounts through an `AccountStore` backend.
pub struct AccountRegistry<S: AccountStore> {
    store: S,
}

impl<S: AccountStore> AccountRegistry<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Validate a registration body and insert the account.
    ///
    /// Checks run in order and stop at the first failure: key set,
    /// email format, password length, phone format, then uniqueness.
    /// Returns the email of the new account.
    pub fn register(&mut self, candidate: &Value) -> Result<String, RegistrationError> {
        let fields = candidate
            .as_object()
            .filter(|map| has_exact_keys(map, &REGISTRATION_KEYS))
            .ok_or(RegistrationError::MalformedInput)?;

        let email = fields
            .get("email")
            .and_then(Value::as_str)
            .filter(|e| is_valid_email(e))
            .ok_or(RegistrationError::InvalidEmailFormat)?;

        let password = fields
            .get("password")
            .and_then(Value::as_str)
            .filter(|p| p.chars().count() >= MIN_PASSWORD_LEN)
            .ok_or(RegistrationError::WeakPassword)?;

        let phone = fields
            .get("phone")
            .and_then(Value::as_str)
            .filter(|p| is_valid_phone(p))
            .ok_or(RegistrationError::InvalidPhoneFormat)?;

        if self.store.contains(email) {
            return Err(RegistrationError::DuplicateEmail);
        }

        self.store.insert(Account {
            email: email.to_string(),
            password: password.to_string(),
            phone: phone.to_string(),
        });

        Ok(email.to_string())
    }

    /// Check credentials. Email existence is checked before the password.
    pub fn authenticate(&self, email: &str, password: &str) -> Result<&Account, AuthError> {
        let account = self.store.find(email).ok_or(AuthError::UnknownEmail)?;
        if !account.password_matches(password) {
            return Err(AuthError::WrongPassword);
        }
        Ok(account)
    }

    pub fn contains(&self, email: &str) -> bool {
        self.store.contains(email)
    }

    /// Number of registered accounts.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}

/// True when `map` has exactly `keys` and nothing else.
pub fn has_exact_keys(map: &Map<String, Value>, keys: &[&str]) -> bool {
    map.len() == keys.len() && keys.iter().all(|key| map.contains_key(*key))
}

pub fn is_valid_email(email: &str) -> bool {
    email.is_ascii() && EMAIL_PATTERN.is_match(email)
}

pub fn is_valid_phone(phone: &str) -> bool {
    phone.len() == PHONE_DIGITS && phone.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::account_stores::memory_account_store::MemoryAccountStore;
    use serde_json::json;

    fn registry() -> AccountRegistry<MemoryAccountStore> {
        AccountRegistry::new(MemoryAccountStore::new())
    }

    fn candidate(email: &str, password: &str, phone: &str) -> Value {
        json!({ "email": email, "password": password, "phone": phone })
    }

    #[test]
    fn registers_valid_account() {
        let mut reg = registry();
        let email = reg
            .register(&candidate("a@b.co", "password1", "5551234567"))
            .unwrap();

        assert_eq!(email, "a@b.co");
        assert!(reg.contains("a@b.co"));
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn registered_account_authenticates() {
        let mut reg = registry();
        reg.register(&candidate("first.last@mail-host.org", "longenough", "0123456789"))
            .unwrap();

        let account = reg
            .authenticate("first.last@mail-host.org", "longenough")
            .unwrap();
        assert_eq!(account.phone, "0123456789");
    }

    #[test]
    fn rejects_wrong_key_set() {
        let mut reg = registry();
        for bad in [
            json!({"email": "a@b.co", "password": "password1"}),
            json!({"email": "a@b.co", "password": "password1", "phone": "5551234567", "x": 1}),
            json!({"email": "a@b.co", "pass": "password1", "phone": "5551234567"}),
            json!(["a@b.co", "password1", "5551234567"]),
            json!(null),
        ] {
            assert_eq!(reg.register(&bad), Err(RegistrationError::MalformedInput), "{bad}");
        }
        assert!(reg.is_empty());
    }

    #[test]
    fn rejects_bad_email() {
        let mut reg = registry();
        for bad in ["plainaddress", "a@b", "a@b.c", "a@b.comm", "@b.co", "a b@c.co", "é@b.co"] {
            assert_eq!(
                reg.register(&candidate(bad, "password1", "5551234567")),
                Err(RegistrationError::InvalidEmailFormat),
                "{bad}"
            );
        }

        let numeric = json!({"email": 12, "password": "password1", "phone": "5551234567"});
        assert_eq!(reg.register(&numeric), Err(RegistrationError::InvalidEmailFormat));
    }

    #[test]
    fn accepts_common_email_shapes() {
        for good in ["a@b.co", "a.b-c@d-e.fg.hij", "user_1@example.com", "x@mail.co.uk"] {
            assert!(is_valid_email(good), "{good}");
        }
    }

    #[test]
    fn rejects_short_password() {
        let mut reg = registry();
        assert_eq!(
            reg.register(&candidate("a@b.co", "1234567", "5551234567")),
            Err(RegistrationError::WeakPassword)
        );

        let numeric = json!({"email": "a@b.co", "password": 123456789, "phone": "5551234567"});
        assert_eq!(reg.register(&numeric), Err(RegistrationError::WeakPassword));

        assert!(reg.register(&candidate("a@b.co", "12345678", "5551234567")).is_ok());
    }

    #[test]
    fn rejects_bad_phone() {
        let mut reg = registry();
        for bad in ["555123456", "55512345678", "555-123-4567", "555123456a", ""] {
            assert_eq!(
                reg.register(&candidate("a@b.co", "password1", bad)),
                Err(RegistrationError::InvalidPhoneFormat),
                "{bad}"
            );
        }

        let numeric = json!({"email": "a@b.co", "password": "password1", "phone": 5551234567u64});
        assert_eq!(reg.register(&numeric), Err(RegistrationError::InvalidPhoneFormat));
    }

    #[test]
    fn format_checks_run_before_uniqueness() {
        let mut reg = registry();
        reg.register(&candidate("a@b.co", "password1", "5551234567"))
            .unwrap();

        assert_eq!(
            reg.register(&candidate("a@b.co", "short", "5551234567")),
            Err(RegistrationError::WeakPassword)
        );
    }

    #[test]
    fn duplicate_email_rejected_regardless_of_other_fields() {
        let mut reg = registry();
        reg.register(&candidate("a@b.co", "password1", "5551234567"))
            .unwrap();

        assert_eq!(
            reg.register(&candidate("a@b.co", "different1", "9999999999")),
            Err(RegistrationError::DuplicateEmail)
        );
        assert_eq!(reg.len(), 1);
        assert!(reg.authenticate("a@b.co", "password1").is_ok());
    }

    #[test]
    fn authenticate_distinguishes_failures() {
        let mut reg = registry();
        reg.register(&candidate("a@b.co", "password1", "5551234567"))
            .unwrap();

        assert_eq!(
            reg.authenticate("x@y.co", "password1").unwrap_err(),
            AuthError::UnknownEmail
        );
        assert_eq!(
            reg.authenticate("a@b.co", "wrong").unwrap_err(),
            AuthError::WrongPassword
        );
    }
}
