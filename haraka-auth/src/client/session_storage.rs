use crate::common::StoredSession;
use crate::error::AuthError;
use chrono::{DateTime, Duration, Utc};
use std::fs;
use std::path::PathBuf;

const EXPIRY_BUFFER: Duration = Duration::minutes(5);

pub struct SessionStore {
    session_path: PathBuf,
}

impl SessionStore {
    pub fn new() -> Result<Self, AuthError> {
        let cache_dir = dirs::cache_dir()
            .ok_or_else(|| AuthError::Configuration("Could not find cache directory".to_string()))?
            .join("haraka");

        Self::in_dir(cache_dir)
    }

    /// Store the session file inside `dir`, creating it if needed.
    pub fn in_dir(dir: PathBuf) -> Result<Self, AuthError> {
        if !dir.exists() {
            fs::create_dir_all(&dir).map_err(|e| {
                AuthError::SessionStorage(format!("Failed to create cache directory: {}", e))
            })?;
        }

        Ok(Self {
            session_path: dir.join("session.json"),
        })
    }

    pub fn save_session(&self, session: &StoredSession) -> Result<(), AuthError> {
        let json = serde_json::to_string_pretty(session)?;

        fs::write(&self.session_path, json)
            .map_err(|e| AuthError::SessionStorage(format!("Failed to save session: {}", e)))?;

        // Owner read/write only
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = fs::metadata(&self.session_path)
                .map_err(|e| {
                    AuthError::SessionStorage(format!("Failed to get file permissions: {}", e))
                })?
                .permissions();
            perms.set_mode(0o600);
            fs::set_permissions(&self.session_path, perms).map_err(|e| {
                AuthError::SessionStorage(format!("Failed to set file permissions: {}", e))
            })?;
        }

        Ok(())
    }

    pub fn load_session(&self) -> Result<Option<StoredSession>, AuthError> {
        if !self.session_path.exists() {
            return Ok(None);
        }

        let json = fs::read_to_string(&self.session_path)
            .map_err(|e| AuthError::SessionStorage(format!("Failed to read session: {}", e)))?;

        let session: StoredSession = serde_json::from_str(&json)?;
        Ok(Some(session))
    }

    pub fn delete_session(&self) -> Result<(), AuthError> {
        if self.session_path.exists() {
            fs::remove_file(&self.session_path).map_err(|e| {
                AuthError::SessionStorage(format!("Failed to delete session: {}", e))
            })?;
        }
        Ok(())
    }

    pub fn is_session_expired(&self, session: &StoredSession) -> bool {
        is_expired_at(session, Utc::now())
    }
}

fn is_expired_at(session: &StoredSession, now: DateTime<Utc>) -> bool {
    // Treat sessions as expired 5 minutes early
    session.expires_at <= now + EXPIRY_BUFFER
}
