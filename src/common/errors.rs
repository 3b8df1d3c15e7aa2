use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures of register/login. All are recoverable: the session logs the
/// message and goes back to the menu (or re-prompts).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AccountError {
    #[error("Invalid email format. Please enter a valid email address.")]
    InvalidEmailFormat,

    #[error("Invalid username format. Please enter a valid username.")]
    InvalidUsernameFormat,

    #[error("User with this email already exists. Please choose another email.")]
    DuplicateEmail,

    #[error("User with this email does not exist. Please register first.")]
    UnknownEmail,

    #[error("Incorrect username. Please try again.")]
    UsernameMismatch,
}

/// Failures reading or writing the user data file.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("User data file {} not found. Starting with an empty user list.", path.display())]
    NotFound { path: PathBuf },

    #[error("Failed to load user data from {}: {source}", path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: LoadFailure,
    },

    #[error("Failed to save user data to {}: {source}", path.display())]
    Save {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Error)]
pub enum LoadFailure {
    #[error("read error: {0}")]
    Io(#[from] io::Error),

    #[error("corrupt or truncated data: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("unsupported data version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },
}

/// The only failures that end a session abnormally.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("input stream closed")]
    InputClosed,

    #[error("failed to read input: {0}")]
    Input(#[from] io::Error),
}
