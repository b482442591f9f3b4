pub mod application;
pub mod error;
pub mod message;

pub use application::{ApplicationRecord, ExtractedMetadata};
pub use error::TrackerError;
pub use message::{Header, MessageRecord, MessageRef};

/// Mail provider seen from the extraction pipeline: resolves a search hit to its content
pub trait MessageSource {
    /// Fetch headers and snippet for a single message
    fn fetch(&self, message: &MessageRef) -> Result<MessageRecord, TrackerError>;
}

/// Mail provider seen from a tracker run: finds the messages worth looking at
pub trait MessageSearch {
    /// Ids of messages matching `query`, at most `max_messages` when given
    fn search(
        &self,
        query: &str,
        max_messages: Option<usize>,
    ) -> Result<Vec<MessageRef>, TrackerError>;
}
