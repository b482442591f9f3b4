use crate::metadata::MetadataExtractor;
use shared_types::{ApplicationRecord, MessageRecord, MessageRef, MessageSource, TrackerError};
use std::collections::HashSet;

/// Result of a consolidation pass
#[derive(Debug, Default)]
pub struct Consolidation {
    pub records: HashSet<ApplicationRecord>,
    /// Messages that could not be fetched or processed
    pub skipped: usize,
    /// Messages where no company could be identified
    pub unidentified: usize,
}

pub struct RecordConsolidator {
    metadata_extractor: MetadataExtractor,
}

impl RecordConsolidator {
    pub fn new(metadata_extractor: MetadataExtractor) -> Self {
        Self { metadata_extractor }
    }

    /// Fetch each message from `source` in turn and collect the distinct application records.
    ///
    /// A message failing with a recoverable error is logged and skipped. A fatal error, such as
    /// the provider rejecting the credentials mid-batch, aborts the pass.
    pub fn consolidate<S: MessageSource>(
        &self,
        source: &S,
        messages: &[MessageRef],
    ) -> Result<Consolidation, TrackerError> {
        let mut consolidation = Consolidation::default();

        for message in messages {
            match source.fetch(message) {
                Ok(record) => self.absorb(&mut consolidation, &record),
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) => {
                    tracing::error!("{}", e);
                    consolidation.skipped += 1;
                }
            }
        }

        tracing::info!(
            "Consolidated {} messages into {} application records ({} skipped, {} without company)",
            messages.len(),
            consolidation.records.len(),
            consolidation.skipped,
            consolidation.unidentified
        );

        Ok(consolidation)
    }

    /// Same as [`consolidate`](Self::consolidate) for messages that are already fetched
    pub fn consolidate_records<'a, I>(&self, records: I) -> Consolidation
    where
        I: IntoIterator<Item = &'a MessageRecord>,
    {
        let mut consolidation = Consolidation::default();
        for record in records {
            self.absorb(&mut consolidation, record);
        }
        consolidation
    }

    fn absorb(&self, consolidation: &mut Consolidation, message: &MessageRecord) {
        let metadata = self
            .metadata_extractor
            .extract(&message.headers, &message.snippet);

        match metadata.into_record() {
            Some(record) => {
                consolidation.records.insert(record);
            }
            None => consolidation.unidentified += 1,
        }
    }
}

impl Default for RecordConsolidator {
    fn default() -> Self {
        Self::new(MetadataExtractor::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::Header;
    use std::collections::HashMap;

    struct InMemorySource {
        messages: HashMap<String, MessageRecord>,
        revoked: Option<String>,
    }

    impl MessageSource for InMemorySource {
        fn fetch(&self, message: &MessageRef) -> Result<MessageRecord, TrackerError> {
            if self.revoked.as_deref() == Some(message.id.as_str()) {
                return Err(TrackerError::Auth("token revoked".to_string()));
            }
            self.messages
                .get(&message.id)
                .cloned()
                .ok_or_else(|| TrackerError::MessageProcessing {
                    message_id: message.id.clone(),
                    reason: "not found".to_string(),
                })
        }
    }

    fn message(from: &str, subject: &str, date: &str) -> MessageRecord {
        MessageRecord::new(
            vec![
                Header::new("From", from),
                Header::new("Subject", subject),
                Header::new("Date", date),
            ],
            "",
        )
    }

    #[test]
    fn test_identical_triples_collapse() {
        let consolidator = RecordConsolidator::default();
        let duplicate = message("hr@acme.io", "Application received", "Mon, 02 Jan 2023 15:04:05 -0700");
        let records = vec![duplicate.clone(), duplicate];

        let consolidation = consolidator.consolidate_records(&records);
        assert_eq!(consolidation.records.len(), 1);
        assert!(consolidation.records.contains(&ApplicationRecord::new(
            "Acme",
            "Application received",
            "Mon, 02 Jan 2023 15:04:05 -0700"
        )));
    }

    #[test]
    fn test_triples_differing_in_any_field_stay_distinct() {
        let consolidator = RecordConsolidator::default();
        let date = "Mon, 02 Jan 2023 15:04:05 -0700";
        let records = vec![
            message("hr@acme.io", "Application received", date),
            message("hr@globex.com", "Application received", date),
            message("hr@acme.io", "Interview invitation", date),
            message("hr@acme.io", "Application received", "Mon, 02 Jan 2023 15:04:05  -0700"),
        ];

        let consolidation = consolidator.consolidate_records(&records);
        assert_eq!(consolidation.records.len(), 4);
    }

    #[test]
    fn test_messages_without_company_dropped() {
        let consolidator = RecordConsolidator::default();
        let records = vec![
            MessageRecord::new(vec![Header::new("Subject", "Newsletter")], "weekly roundup"),
            message("hr@acme.io", "Application received", "No Date"),
        ];

        let consolidation = consolidator.consolidate_records(&records);
        assert_eq!(consolidation.records.len(), 1);
        assert_eq!(consolidation.unidentified, 1);
        assert!(consolidation.records.iter().all(|r| !r.company.is_empty()));
    }

    #[test]
    fn test_fetch_failure_is_isolated() {
        let mut messages = HashMap::new();
        messages.insert(
            "1".to_string(),
            message("hr@acme.io", "Application received", "Mon, 02 Jan 2023 15:04:05 -0700"),
        );
        messages.insert(
            "3".to_string(),
            message("jobs@initech.com", "Thanks for applying", "Wed, 01 Feb 2023 09:00:00 +0000"),
        );
        let source = InMemorySource {
            messages,
            revoked: None,
        };

        let refs = vec![MessageRef::new("1"), MessageRef::new("2"), MessageRef::new("3")];
        let consolidation = RecordConsolidator::default()
            .consolidate(&source, &refs)
            .unwrap();

        assert_eq!(consolidation.skipped, 1);
        assert_eq!(consolidation.records.len(), 2);
    }

    #[test]
    fn test_fatal_fetch_error_aborts() {
        let mut messages = HashMap::new();
        messages.insert(
            "1".to_string(),
            message("hr@acme.io", "Application received", "Mon, 02 Jan 2023 15:04:05 -0700"),
        );
        let source = InMemorySource {
            messages,
            revoked: Some("2".to_string()),
        };

        let refs = vec![MessageRef::new("1"), MessageRef::new("2"), MessageRef::new("3")];
        match RecordConsolidator::default().consolidate(&source, &refs) {
            Err(TrackerError::Auth(reason)) => assert_eq!(reason, "token revoked"),
            other => panic!("Expected Auth error, got {:?}", other),
        }
    }

    #[test]
    fn test_skip_log_line_names_message_once() {
        let err = TrackerError::MessageProcessing {
            message_id: "2".to_string(),
            reason: "not found".to_string(),
        };
        assert_eq!(err.to_string(), "Error processing message 2: not found");
    }
}
