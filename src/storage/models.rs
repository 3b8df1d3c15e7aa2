use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::common::ChatMessage;

/// Bump whenever the on-disk layout changes.
pub const SCHEMA_VERSION: u32 = 1;

/// Whole contents of the user data file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub version: u32,
    pub saved_at: DateTime<Utc>,
    pub users: Vec<StoredUser>,
}

/// One registered account as written to disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredUser {
    pub email: String,
    pub username: String,
    pub registered_at: DateTime<Utc>,
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
}

/// Only used to read the version before committing to a full decode.
#[derive(Debug, Deserialize)]
pub(crate) struct VersionProbe {
    pub version: u32,
}
