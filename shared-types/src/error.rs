/// Errors raised across a tracker run.
///
/// `MessageProcessing` and `DateParse` are recoverable: the batch loop skips the message or the
/// report excludes the record. The rest abort the run.
#[derive(Debug, thiserror::Error)]
pub enum TrackerError {
    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Email search failed: {0}")]
    Search(String),

    #[error("Error processing message {message_id}: {reason}")]
    MessageProcessing { message_id: String, reason: String },

    #[error("Error parsing date: {input} -> {reason}")]
    DateParse { input: String, reason: String },

    #[error("Error saving report: {0}")]
    Write(String),
}

impl TrackerError {
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            TrackerError::MessageProcessing { .. } | TrackerError::DateParse { .. }
        )
    }
}
