use crate::company::CompanyExtractor;
use crate::headers::{find_header, get_header};
use shared_types::{ExtractedMetadata, Header};

pub const DEFAULT_SUBJECT: &str = "No Subject";
pub const DEFAULT_DATE: &str = "No Date";

/// Turns one message's headers and snippet into company, subject and raw date
pub struct MetadataExtractor {
    company_extractor: CompanyExtractor,
}

impl MetadataExtractor {
    pub fn new(company_extractor: CompanyExtractor) -> Self {
        Self { company_extractor }
    }

    pub fn extract(&self, headers: &[Header], snippet: &str) -> ExtractedMetadata {
        let subject = get_header(headers, "Subject", DEFAULT_SUBJECT);
        let raw_date = get_header(headers, "Date", DEFAULT_DATE);
        let from_address = find_header(headers, "From");

        ExtractedMetadata {
            company: self.company_extractor.extract(from_address, snippet),
            subject: subject.to_string(),
            raw_date: raw_date.to_string(),
        }
    }
}

impl Default for MetadataExtractor {
    fn default() -> Self {
        Self::new(CompanyExtractor::new())
    }
}
