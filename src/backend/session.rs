//! Admin session persistence. The bearer token returned by the login endpoint
//! is kept in data/session.json so the console and the CLI share one session.

use std::fs;
use std::path::Path;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

pub const DEFAULT_SESSION_PATH: &str = "data/session.json";

static SESSION_MTX: Mutex<()> = Mutex::new(());

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub saved_at_iso: Option<String>,
}

/// Read the stored session, or None when no one has logged in yet or the file
/// is unreadable.
pub fn load_session(path: impl AsRef<Path>) -> Option<Session> {
    let _guard = SESSION_MTX.lock().ok()?;
    let raw = fs::read_to_string(path).ok()?;
    serde_json::from_str(&raw).ok()
}

/// Persist the session after a successful login.
pub fn store_session(path: impl AsRef<Path>, token: &str, email: Option<&str>) -> std::io::Result<()> {
    let _guard = SESSION_MTX
        .lock()
        .map_err(|e| std::io::Error::other(format!("session lock poisoned: {e}")))?;
    let session = Session {
        token: token.to_string(),
        email: email.map(str::to_string),
        saved_at_iso: Some(chrono::Utc::now().to_rfc3339()),
    };
    if let Some(parent) = path.as_ref().parent() {
        fs::create_dir_all(parent)?;
    }
    let raw = serde_json::to_string_pretty(&session).map_err(std::io::Error::other)?;
    fs::write(path, raw)
}

/// Drop the stored session; a missing file is not an error.
pub fn clear_session(path: impl AsRef<Path>) -> std::io::Result<()> {
    let _guard = SESSION_MTX
        .lock()
        .map_err(|e| std::io::Error::other(format!("session lock poisoned: {e}")))?;
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(err) => Err(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_session_path() -> std::path::PathBuf {
        let stamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock should be after unix epoch")
            .as_nanos();
        std::env::temp_dir().join(format!("podium-session-{stamp}.json"))
    }

    #[test]
    fn stored_session_round_trips() {
        let path = temp_session_path();
        store_session(&path, "tok-123", Some("admin@example.com")).expect("store");
        let session = load_session(&path).expect("session should load");
        assert_eq!(session.token, "tok-123");
        assert_eq!(session.email.as_deref(), Some("admin@example.com"));
        assert!(session.saved_at_iso.is_some());
        clear_session(&path).expect("clear");
        assert!(load_session(&path).is_none());
    }

    #[test]
    fn clearing_a_missing_session_is_fine() {
        let path = temp_session_path();
        clear_session(&path).expect("clear should tolerate missing file");
    }
}
