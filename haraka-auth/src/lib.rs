// Session types shared with the client crate
pub mod common;

mod client;
mod error;

pub use client::{authenticate, load_settings, logout, SessionStore, Settings, SupabaseAuthClient};
pub use client::auth_client::AuthClientError;
pub use common::{SessionUser, StoredSession};
pub use error::AuthError;
