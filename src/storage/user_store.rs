use std::collections::BTreeMap;

use chrono::Utc;

use crate::common::validation::{validate_email, validate_username};
use crate::common::{AccountError, ChatMessage, UserRecord};

/// All registered accounts keyed by email (case-sensitive, as typed).
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct UserStore {
    users: BTreeMap<String, UserRecord>,
}

impl UserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    pub fn contains(&self, email: &str) -> bool {
        self.users.contains_key(email)
    }

    pub fn get(&self, email: &str) -> Option<&UserRecord> {
        self.users.get(email)
    }

    /// Accounts ordered by email.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &UserRecord)> {
        self.users.iter().map(|(email, record)| (email.as_str(), record))
    }

    /// Create an account stamped with the current time.
    pub fn register(&mut self, email: &str, username: &str) -> Result<&UserRecord, AccountError> {
        if !validate_email(email) {
            return Err(AccountError::InvalidEmailFormat);
        }
        if self.contains(email) {
            return Err(AccountError::DuplicateEmail);
        }
        if !validate_username(username) {
            return Err(AccountError::InvalidUsernameFormat);
        }

        let record = UserRecord::new(username, Utc::now());
        Ok(self.users.entry(email.to_string()).or_insert(record))
    }

    /// Look up `email` and check the username matches exactly.
    pub fn authenticate(&self, email: &str, username: &str) -> Result<&UserRecord, AccountError> {
        let record = self.users.get(email).ok_or(AccountError::UnknownEmail)?;
        if record.username() != username {
            return Err(AccountError::UsernameMismatch);
        }
        Ok(record)
    }

    /// Returns the message displaced by a timestamp collision, if any.
    pub fn append_message(
        &mut self,
        email: &str,
        message: ChatMessage,
    ) -> Result<Option<ChatMessage>, AccountError> {
        let record = self.users.get_mut(email).ok_or(AccountError::UnknownEmail)?;
        Ok(record.add_message(message))
    }

    /// Used when rebuilding the store from disk; replaces any existing entry.
    pub(crate) fn insert_record(&mut self, email: String, record: UserRecord) {
        self.users.insert(email, record);
    }
}
