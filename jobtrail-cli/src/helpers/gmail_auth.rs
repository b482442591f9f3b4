use crate::config::GmailConfig;
use crate::helpers::google_oauth::GoogleOAuthClient;
use crate::helpers::token_store::StoredToken;
use chrono::Utc;
use oauth2::TokenResponse;
use shared_types::TrackerError;

/// Resolve a Gmail access token from the configured token file.
///
/// A still-valid stored token is used as is. Otherwise the refresh token is exchanged once
/// through the client credentials; the result is not written back.
pub fn get_access_token_for_gmail(config: &GmailConfig) -> Result<String, TrackerError> {
    let stored = StoredToken::load(&config.token_file).map_err(auth_error)?;

    if let Some(access_token) = stored.usable_access_token(Utc::now()) {
        tracing::debug!("Using stored access token from {:?}", config.token_file);
        return Ok(access_token.to_string());
    }

    let refresh_token = stored.refresh_token.as_deref().ok_or_else(|| {
        TrackerError::Auth(format!(
            "Token in {:?} is expired and has no refresh token",
            config.token_file
        ))
    })?;

    tracing::info!("Refreshing Gmail access token");
    let oauth_client =
        GoogleOAuthClient::from_credentials_file(&config.credentials_file).map_err(auth_error)?;
    let token_response = oauth_client
        .refresh_token(refresh_token)
        .map_err(auth_error)?;

    Ok(token_response.access_token().secret().to_string())
}

fn auth_error(e: anyhow::Error) -> TrackerError {
    let error = TrackerError::Auth(format!("{:#}", e));
    tracing::error!("Error during Gmail authentication: {}", error);
    error
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn config_with(dir: &Path, token_json: Option<&str>) -> GmailConfig {
        let token_file = dir.join("token.json");
        if let Some(json) = token_json {
            std::fs::write(&token_file, json).unwrap();
        }
        GmailConfig {
            credentials_file: dir.join("credentials.json"),
            token_file,
            ..GmailConfig::default()
        }
    }

    #[test]
    fn test_valid_stored_token() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_with(dir.path(), Some(r#"{"token": "ya29.stored"}"#));
        assert_eq!(get_access_token_for_gmail(&config).unwrap(), "ya29.stored");
    }

    #[test]
    fn test_missing_token_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_with(dir.path(), None);
        match get_access_token_for_gmail(&config) {
            Err(TrackerError::Auth(_)) => {}
            other => panic!("Expected Auth error, got {:?}", other),
        }
    }

    #[test]
    fn test_expired_without_refresh_token() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_with(
            dir.path(),
            Some(r#"{"token": "ya29.old", "expiry": "2020-01-01T00:00:00Z"}"#),
        );
        let err = get_access_token_for_gmail(&config).unwrap_err();
        assert!(err.to_string().contains("no refresh token"));
    }

    #[test]
    fn test_refresh_needs_credentials_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config_with(dir.path(), Some(r#"{"refresh_token": "1//refresh"}"#));
        config.credentials_file = dir.path().join("missing.json");
        match get_access_token_for_gmail(&config) {
            Err(TrackerError::Auth(message)) => assert!(message.contains("credentials")),
            other => panic!("Expected Auth error, got {:?}", other),
        }
    }
}
