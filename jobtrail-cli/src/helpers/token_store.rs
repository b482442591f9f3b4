use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use std::path::Path;

/// Authorized user token as saved by Google's client libraries.
///
/// Both `token` and `access_token` spellings are accepted for the access token.
#[derive(Debug, Clone, Deserialize)]
pub struct StoredToken {
    #[serde(alias = "token")]
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub expiry: Option<DateTime<Utc>>,
}

impl StoredToken {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read token file {:?}", path))?;
        let token: StoredToken = serde_json::from_str(&content)
            .with_context(|| format!("Invalid token file {:?}", path))?;
        Ok(token)
    }

    /// Access token that stays valid for at least five more minutes
    pub fn usable_access_token(&self, now: DateTime<Utc>) -> Option<&str> {
        let access_token = self.access_token.as_deref()?;
        match self.expiry {
            Some(expiry) if now >= expiry - Duration::minutes(5) => None,
            _ => Some(access_token),
        }
    }
}
