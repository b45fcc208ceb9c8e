mod models;

pub use models::{SessionUser, StoredSession};
