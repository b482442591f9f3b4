use extractors::{RecordConsolidator, Report, ReportWriter};
use shared_types::{MessageSearch, MessageSource, TrackerError};
use std::path::Path;

/// One tracker run against an authenticated mailbox.
///
/// Returns `None` without touching `output` when the search finds nothing.
pub fn track_applications<C>(
    mailbox: &C,
    consolidator: &RecordConsolidator,
    query: &str,
    max_messages: Option<usize>,
    output: &Path,
) -> Result<Option<Report>, TrackerError>
where
    C: MessageSearch + MessageSource,
{
    let messages = mailbox.search(query, max_messages)?;
    if messages.is_empty() {
        tracing::info!("No job application emails found.");
        return Ok(None);
    }

    let consolidation = consolidator.consolidate(mailbox, &messages)?;
    let report = ReportWriter::new(output).write(&consolidation.records)?;

    Ok(Some(report))
}
