use anyhow::Context;
use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::Deserialize;
use shared_types::{
    Header, MessageRecord, MessageRef, MessageSearch, MessageSource, TrackerError,
};

const GMAIL_API_BASE: &str = "https://gmail.googleapis.com/gmail/v1/users";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListMessagesResponse {
    #[serde(default)]
    messages: Vec<MessageRef>,
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GmailMessage {
    id: String,
    #[serde(default)]
    snippet: String,
    #[serde(default)]
    payload: Option<GmailPayload>,
}

#[derive(Debug, Deserialize)]
struct GmailPayload {
    #[serde(default)]
    headers: Vec<Header>,
}

impl From<GmailMessage> for MessageRecord {
    fn from(message: GmailMessage) -> Self {
        let headers = message.payload.map(|p| p.headers).unwrap_or_default();
        MessageRecord::new(headers, message.snippet)
    }
}

/// Blocking Gmail REST client, one request at a time
pub struct GmailClient {
    http: Client,
    access_token: String,
    user_id: String,
}

impl GmailClient {
    pub fn new(access_token: String, user_id: &str) -> anyhow::Result<Self> {
        let http = Client::builder()
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            access_token,
            user_id: user_id.to_string(),
        })
    }
}

impl MessageSearch for GmailClient {
    /// Follows pagination until the results or `max_messages` run out
    fn search(
        &self,
        query: &str,
        max_messages: Option<usize>,
    ) -> Result<Vec<MessageRef>, TrackerError> {
        let url = format!("{}/{}/messages", GMAIL_API_BASE, self.user_id);
        let mut messages = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut request = self
                .http
                .get(&url)
                .bearer_auth(&self.access_token)
                .query(&[("q", query)]);
            if let Some(token) = &page_token {
                request = request.query(&[("pageToken", token.as_str())]);
            }

            let page: ListMessagesResponse = request
                .send()
                .and_then(|response| response.error_for_status())
                .and_then(|response| response.json())
                .map_err(|e| {
                    tracing::error!("Error during email search: {}", e);
                    TrackerError::Search(e.to_string())
                })?;

            messages.extend(page.messages);

            if reached_limit(messages.len(), max_messages) {
                break;
            }
            match page.next_page_token {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        if let Some(limit) = max_messages {
            messages.truncate(limit);
        }

        tracing::info!("Found {} messages matching the search query", messages.len());
        Ok(messages)
    }
}

fn reached_limit(count: usize, max_messages: Option<usize>) -> bool {
    max_messages.map_or(false, |limit| count >= limit)
}

/// Rejected credentials end the run; anything else only loses this message
fn fetch_error(message_id: &str, e: reqwest::Error) -> TrackerError {
    classify_fetch_failure(message_id, e.status(), e.to_string())
}

fn classify_fetch_failure(
    message_id: &str,
    status: Option<StatusCode>,
    reason: String,
) -> TrackerError {
    match status {
        Some(StatusCode::UNAUTHORIZED) => TrackerError::Auth(reason),
        _ => TrackerError::MessageProcessing {
            message_id: message_id.to_string(),
            reason,
        },
    }
}

impl MessageSource for GmailClient {
    fn fetch(&self, message: &MessageRef) -> Result<MessageRecord, TrackerError> {
        let url = format!(
            "{}/{}/messages/{}",
            GMAIL_API_BASE, self.user_id, message.id
        );

        let fetched: GmailMessage = self
            .http
            .get(&url)
            .bearer_auth(&self.access_token)
            .send()
            .and_then(|response| response.error_for_status())
            .and_then(|response| response.json())
            .map_err(|e| fetch_error(&message.id, e))?;

        tracing::debug!("Fetched message {}", fetched.id);
        Ok(fetched.into())
    }
}
