use anyhow::{Context, Result};
use oauth2::basic::{BasicClient, BasicTokenType};
use oauth2::{
    AuthUrl, ClientId, ClientSecret, EmptyExtraTokenFields, StandardTokenResponse, TokenUrl,
};
use serde::Deserialize;
use std::path::Path;

const GOOGLE_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";

/// Client secret file as downloaded from Google Cloud Console
#[derive(Debug, Deserialize)]
struct ClientSecretFile {
    installed: Option<ClientSecretEntry>,
    web: Option<ClientSecretEntry>,
}

#[derive(Debug, Deserialize)]
struct ClientSecretEntry {
    client_id: String,
    client_secret: Option<String>,
    auth_uri: Option<String>,
    token_uri: Option<String>,
}

pub struct GoogleOAuthClient {
    client: BasicClient,
}

impl GoogleOAuthClient {
    pub fn new(
        client_id: &str,
        client_secret: Option<&str>,
        auth_url: Option<&str>,
        token_url: Option<&str>,
    ) -> Result<Self> {
        let client = BasicClient::new(
            ClientId::new(client_id.to_string()),
            client_secret.map(|s| ClientSecret::new(s.to_string())),
            AuthUrl::new(auth_url.unwrap_or(GOOGLE_AUTH_URL).to_string())?,
            Some(TokenUrl::new(
                token_url.unwrap_or(GOOGLE_TOKEN_URL).to_string(),
            )?),
        );

        Ok(Self { client })
    }

    pub fn from_credentials_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read credentials file {:?}", path))?;
        Self::from_credentials_json(&content)
            .with_context(|| format!("Invalid credentials file {:?}", path))
    }

    fn from_credentials_json(content: &str) -> Result<Self> {
        let file: ClientSecretFile = serde_json::from_str(content)?;
        let secret = file
            .installed
            .or(file.web)
            .ok_or_else(|| anyhow::anyhow!("Expected an \"installed\" or \"web\" client entry"))?;

        Self::new(
            &secret.client_id,
            secret.client_secret.as_deref(),
            secret.auth_uri.as_deref(),
            secret.token_uri.as_deref(),
        )
    }

    pub fn refresh_token(
        &self,
        refresh_token: &str,
    ) -> Result<StandardTokenResponse<EmptyExtraTokenFields, BasicTokenType>> {
        let token = self
            .client
            .exchange_refresh_token(&oauth2::RefreshToken::new(refresh_token.to_string()))
            .request(oauth2::reqwest::http_client)?;

        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_installed_app_credentials() {
        let json = r#"{
            "installed": {
                "client_id": "1234.apps.googleusercontent.com",
                "project_id": "jobtrail",
                "auth_uri": "https://accounts.google.com/o/oauth2/auth",
                "token_uri": "https://oauth2.googleapis.com/token",
                "client_secret": "shh",
                "redirect_uris": ["http://localhost"]
            }
        }"#;
        assert!(GoogleOAuthClient::from_credentials_json(json).is_ok());
    }

    #[test]
    fn test_web_credentials_without_uris() {
        let json = r#"{"web": {"client_id": "1234.apps.googleusercontent.com"}}"#;
        assert!(GoogleOAuthClient::from_credentials_json(json).is_ok());
    }

    #[test]
    fn test_credentials_without_client_entry() {
        assert!(GoogleOAuthClient::from_credentials_json(r#"{"other": {}}"#).is_err());
    }
}
