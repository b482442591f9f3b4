use crate::date_parser::{normalize_date, NormalizedDate};
use csv::WriterBuilder;
use shared_types::{ApplicationRecord, TrackerError};
use std::fmt;
use std::fs;
use std::io;
use std::path::PathBuf;

pub const REPORT_HEADER: [&str; 3] = ["Company Name", "Email Subject", "Date"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    pub company: String,
    pub subject: String,
    pub date: NormalizedDate,
}

/// Rows ready for output, most recent first
#[derive(Debug, Clone, Default)]
pub struct Report {
    pub rows: Vec<ReportRow>,
    /// Records left out because their date could not be normalized
    pub excluded: usize,
}

impl Report {
    /// Drops records with unparseable dates and orders the rest by date, newest first.
    ///
    /// Rows sharing a date are ordered by company, then subject.
    pub fn build<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a ApplicationRecord>,
    {
        let mut report = Report::default();

        for record in records {
            match normalize_date(&record.raw_date) {
                Ok(date) => report.rows.push(ReportRow {
                    company: record.company.clone(),
                    subject: record.subject.clone(),
                    date,
                }),
                Err(_) => report.excluded += 1,
            }
        }

        report.rows.sort_by(|a, b| {
            b.date
                .cmp(&a.date)
                .then_with(|| a.company.cmp(&b.company))
                .then_with(|| a.subject.cmp(&b.subject))
        });

        report
    }

    pub fn write_csv<W: io::Write>(&self, writer: W) -> Result<(), csv::Error> {
        let mut writer = WriterBuilder::new().delimiter(b',').from_writer(writer);

        writer.write_record(REPORT_HEADER)?;
        for row in &self.rows {
            let date = row.date.to_string();
            writer.write_record([row.company.as_str(), row.subject.as_str(), date.as_str()])?;
        }

        writer.flush()?;
        Ok(())
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Companies applied to (most recent first):")?;
        for row in &self.rows {
            writeln!(
                f,
                "Company: {}, Subject: {}, Date: {}",
                row.company, row.subject, row.date
            )?;
        }
        Ok(())
    }
}

/// Writes the consolidated records to a CSV file, replacing any previous report
pub struct ReportWriter {
    output_path: PathBuf,
}

impl ReportWriter {
    pub fn new(output_path: impl Into<PathBuf>) -> Self {
        Self {
            output_path: output_path.into(),
        }
    }

    pub fn write<'a, I>(&self, records: I) -> Result<Report, TrackerError>
    where
        I: IntoIterator<Item = &'a ApplicationRecord>,
    {
        let report = Report::build(records);
        if report.excluded > 0 {
            tracing::warn!(
                "{} records excluded from the report because of unparseable dates",
                report.excluded
            );
        }

        self.save(&report).map_err(|e| {
            tracing::error!("Error saving data to CSV: {}", e);
            e
        })?;

        tracing::info!("Data successfully saved to {}.", self.output_path.display());
        Ok(report)
    }

    fn save(&self, report: &Report) -> Result<(), TrackerError> {
        if let Some(parent) = self.output_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| {
                    TrackerError::Write(format!("Failed to create {}: {}", parent.display(), e))
                })?;
            }
        }

        let file = fs::File::create(&self.output_path).map_err(|e| {
            TrackerError::Write(format!(
                "Failed to create {}: {}",
                self.output_path.display(),
                e
            ))
        })?;

        report
            .write_csv(file)
            .map_err(|e| TrackerError::Write(e.to_string()))
    }
}
