use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::Utc;
use tempfile::NamedTempFile;

use crate::common::{LoadFailure, PersistenceError, UserRecord};

use super::models::{SCHEMA_VERSION, Snapshot, StoredUser, VersionProbe};
use super::user_store::UserStore;

/// The single file holding every account, read at startup and written at exit.
#[derive(Debug, Clone)]
pub struct SnapshotFile {
    path: PathBuf,
}

impl SnapshotFile {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<UserStore, PersistenceError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Err(PersistenceError::NotFound {
                    path: self.path.clone(),
                });
            }
            Err(err) => return Err(self.load_error(err.into())),
        };

        decode(&bytes).map_err(|source| self.load_error(source))
    }

    /// Never fails: a missing or unreadable file yields an empty store and a
    /// warning.
    pub fn load_or_empty(&self) -> UserStore {
        match self.load() {
            Ok(store) => {
                let messages: usize = store.iter().map(|(_, r)| r.message_count()).sum();
                log::debug!(
                    "Loaded {} users ({messages} messages) from {}",
                    store.len(),
                    self.path.display()
                );
                store
            }
            Err(err) => {
                log::warn!("{err}");
                UserStore::new()
            }
        }
    }

    /// Replace the file with the full contents of `store`. The old file stays
    /// intact unless the new one was completely written.
    pub fn save(&self, store: &UserStore) -> Result<(), PersistenceError> {
        self.write_atomically(store)
            .map_err(|source| PersistenceError::Save {
                path: self.path.clone(),
                source,
            })
    }

    fn write_atomically(&self, store: &UserStore) -> io::Result<()> {
        let parent = self
            .path
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty());

        if let Some(dir) = parent {
            fs::create_dir_all(dir)?;
        }

        let contents = serde_json::to_vec_pretty(&encode(store))?;
        let mut temp_file = match parent {
            Some(dir) => NamedTempFile::new_in(dir)?,
            None => NamedTempFile::new_in(".")?,
        };

        temp_file.write_all(&contents)?;
        temp_file.as_file_mut().sync_all()?;
        temp_file.persist(&self.path)?;
        Ok(())
    }

    fn load_error(&self, source: LoadFailure) -> PersistenceError {
        PersistenceError::Load {
            path: self.path.clone(),
            source,
        }
    }
}

fn encode(store: &UserStore) -> Snapshot {
    let users = store
        .iter()
        .map(|(email, record)| StoredUser {
            email: email.to_string(),
            username: record.username().to_string(),
            registered_at: record.registered_at(),
            messages: record.messages().cloned().collect(),
        })
        .collect();

    Snapshot {
        version: SCHEMA_VERSION,
        saved_at: Utc::now(),
        users,
    }
}

fn decode(bytes: &[u8]) -> Result<UserStore, LoadFailure> {
    let probe: VersionProbe = serde_json::from_slice(bytes)?;
    if probe.version != SCHEMA_VERSION {
        return Err(LoadFailure::UnsupportedVersion {
            found: probe.version,
            expected: SCHEMA_VERSION,
        });
    }

    let snapshot: Snapshot = serde_json::from_slice(bytes)?;
    let mut store = UserStore::new();
    for user in snapshot.users {
        let mut record = UserRecord::new(user.username, user.registered_at);
        for message in user.messages {
            record.add_message(message);
        }
        store.insert_record(user.email, record);
    }
    Ok(store)
}
