pub mod models;
pub mod snapshot;
pub mod user_store;

pub use snapshot::SnapshotFile;
pub use user_store::UserStore;
