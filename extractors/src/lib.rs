//! Extractors Crate
//!
//! Turns raw application emails into a sorted report of the companies applied to.
//!
//! # Pipeline
//!
//! - `headers`: first-match header lookup with defaults
//! - `company`: sender-domain and snippet-pattern company name guessing
//! - `metadata`: company, subject and raw date for one message
//! - `consolidator`: fetches messages through a [`MessageSource`] and deduplicates records
//! - `date_parser`: provider Date header to `YYYY-MM-DD HH:MM:SS`
//! - `report`: date filtering, ordering and CSV/console output
//!
//! # Example
//!
//! ```rust,ignore
//! use extractors::{RecordConsolidator, ReportWriter};
//!
//! let consolidation = RecordConsolidator::default().consolidate(&gmail, &message_refs)?;
//! let report = ReportWriter::new("job_applications.csv").write(&consolidation.records)?;
//! println!("{report}");
//! ```

pub mod company;
pub mod consolidator;
pub mod date_parser;
pub mod headers;
pub mod metadata;
pub mod report;

// Re-export commonly used types
pub use company::{CompanyExtractor, PatternDefinition};
pub use consolidator::{Consolidation, RecordConsolidator};
pub use date_parser::{normalize_date, NormalizedDate};
pub use headers::{find_header, get_header};
pub use metadata::MetadataExtractor;
pub use report::{Report, ReportRow, ReportWriter};

// Re-export the mail provider traits from shared-types for convenience
pub use shared_types::{MessageSearch, MessageSource};
