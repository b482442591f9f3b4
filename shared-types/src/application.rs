use serde::{Deserialize, Serialize};

/// One job application identified in the inbox.
///
/// `raw_date` keeps the provider's date string untouched; it is normalized only when the
/// report is built. Equality and hashing cover all three fields, which is what deduplication
/// relies on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApplicationRecord {
    pub company: String,
    pub subject: String,
    pub raw_date: String,
}

impl ApplicationRecord {
    pub fn new(
        company: impl Into<String>,
        subject: impl Into<String>,
        raw_date: impl Into<String>,
    ) -> Self {
        Self {
            company: company.into(),
            subject: subject.into(),
            raw_date: raw_date.into(),
        }
    }
}

/// Output of the metadata step for a single message, before records without a company are dropped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedMetadata {
    pub company: Option<String>,
    pub subject: String,
    pub raw_date: String,
}

impl ExtractedMetadata {
    /// Converts into an [`ApplicationRecord`] when a non-empty company was found
    pub fn into_record(self) -> Option<ApplicationRecord> {
        match self.company {
            Some(company) if !company.is_empty() => Some(ApplicationRecord {
                company,
                subject: self.subject,
                raw_date: self.raw_date,
            }),
            _ => None,
        }
    }
}
