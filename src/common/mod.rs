pub mod commands;
pub mod errors;
pub mod types;
pub mod validation;

pub use commands::MenuChoice;
pub use errors::{AccountError, LoadFailure, PersistenceError, SessionError};
pub use types::{ChatMessage, UserRecord};
