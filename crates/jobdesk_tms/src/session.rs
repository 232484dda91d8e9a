use std::fs;
use std::path::PathBuf;

use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session store not readable at {path}: {reason}")]
    StoreUnavailable { path: String, reason: String },
    #[error("session origin {found:?} is not {expected}; open the TMS, log in, then export the session again")]
    OriginMismatch { expected: String, found: String },
    #[error("auth token missing from the session store; are you logged in to the TMS?")]
    TokenMissing,
    #[error("user info missing or unparseable in the session store")]
    UserInfoMissing,
    #[error("user info has no numeric id; check that the TMS login completed")]
    UserIdMissing,
}

/// Identity of the logged-in TMS user, taken from the session's user-info
/// blob. Only the numeric id is required.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UserInfo {
    pub id: Option<u64>,
    pub email: Option<String>,
    pub username: Option<String>,
    pub user_name: Option<String>,
    pub user_email: Option<String>,
}

impl UserInfo {
    /// Lenient projection from the raw blob: a non-numeric id is treated as
    /// missing rather than a parse error.
    pub fn from_value(value: &Value) -> Self {
        let text = |key: &str| value.get(key).and_then(Value::as_str).map(str::to_owned);
        Self {
            id: value.get("id").and_then(Value::as_u64),
            email: text("email"),
            username: text("username"),
            user_name: text("userName"),
            user_email: text("user_email"),
        }
    }

    /// Address for the optional x-user-email header, trying each of the
    /// field spellings the TMS has used over time.
    pub fn contact_email(&self) -> Option<&str> {
        self.email
            .as_deref()
            .or(self.username.as_deref())
            .or(self.user_name.as_deref())
            .or(self.user_email.as_deref())
    }
}

/// Capability for reading credentials out of an already-authenticated TMS
/// session. The client never performs a login of its own.
#[async_trait::async_trait]
pub trait SessionSource: Send + Sync {
    async fn auth_token(&self) -> Result<String, SessionError>;
    async fn user_info(&self) -> Result<UserInfo, SessionError>;
}

/// Session source backed by a JSON file exported from the browser session:
/// `{ "origin": ..., "auth_token": ..., "user_info": ... }`, where
/// `user_info` may be inline JSON or the raw string the web app keeps in
/// local storage.
///
/// The file is re-read on every call so a re-login is picked up without a
/// restart.
pub struct StoredSessionSource {
    path: PathBuf,
    expected_origin: String,
}

impl StoredSessionSource {
    pub fn new(path: impl Into<PathBuf>, expected_origin: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            expected_origin: expected_origin.into(),
        }
    }

    fn read_store(&self) -> Result<Value, SessionError> {
        let unavailable = |reason: String| SessionError::StoreUnavailable {
            path: self.path.display().to_string(),
            reason,
        };
        let content = fs::read_to_string(&self.path).map_err(|err| unavailable(err.to_string()))?;
        let store: Value =
            serde_json::from_str(&content).map_err(|err| unavailable(err.to_string()))?;

        let expected = self.expected_origin.trim_end_matches('/');
        let found = store.get("origin").and_then(Value::as_str).unwrap_or("");
        if !found.starts_with(expected) {
            return Err(SessionError::OriginMismatch {
                expected: expected.to_string(),
                found: found.to_string(),
            });
        }
        Ok(store)
    }
}

#[async_trait::async_trait]
impl SessionSource for StoredSessionSource {
    async fn auth_token(&self) -> Result<String, SessionError> {
        let store = self.read_store()?;
        store
            .get("auth_token")
            .and_then(Value::as_str)
            .filter(|token| !token.is_empty())
            .map(str::to_owned)
            .ok_or(SessionError::TokenMissing)
    }

    async fn user_info(&self) -> Result<UserInfo, SessionError> {
        let store = self.read_store()?;
        let raw = store.get("user_info").ok_or(SessionError::UserInfoMissing)?;
        let info = match raw {
            // Local storage keeps the blob as a string; accept both forms.
            Value::String(text) => {
                let value: Value =
                    serde_json::from_str(text).map_err(|_| SessionError::UserInfoMissing)?;
                UserInfo::from_value(&value)
            }
            Value::Object(_) => UserInfo::from_value(raw),
            _ => return Err(SessionError::UserInfoMissing),
        };
        if info.id.is_none() {
            return Err(SessionError::UserIdMissing);
        }
        Ok(info)
    }
}
