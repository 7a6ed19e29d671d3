//! Import orchestration - drive spreadsheet rows through mapping, building
//! and submission
//!
//! Rows are processed strictly in order, one API round-trip at a time. A row
//! that fails (insufficient data or a rejected submission) is recorded and
//! the run moves on; nothing at row level aborts the import.

use serde::Serialize;

use crate::contacts::{build_contact, normalize_header, FieldDictionary, HeaderLookup};
use crate::contacts::{ContactResource, InsufficientData};
use crate::core::directory::{DirectoryClient, DirectoryError};
use crate::core::source::Grid;

/// Where built contacts go
#[derive(Clone, Copy)]
pub enum Submission<'a> {
    /// Build and validate only; nothing is sent
    DryRun,
    /// Create each contact through the directory API
    Live(&'a dyn DirectoryClient),
}

/// What happened to one data row
#[derive(Debug)]
pub enum RowOutcome {
    /// Contact created; carries the new resource identifier
    Created {
        resource_name: String,
        label: String,
    },
    /// Dry run: contact would have been created
    Planned(ContactResource),
    /// Row lacks a usable name
    Skipped {
        reason: InsufficientData,
        fields: FieldDictionary,
    },
    /// The directory API rejected the contact
    Rejected {
        error: DirectoryError,
        fields: FieldDictionary,
        resource: ContactResource,
    },
}

impl RowOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, RowOutcome::Created { .. } | RowOutcome::Planned(_))
    }
}

/// Outcome of a row, tagged with its 1-based sheet row number
#[derive(Debug)]
pub struct RowReport {
    pub row: usize,
    pub outcome: RowOutcome,
}

/// Run-scoped tallies, folded from each row's outcome
#[derive(Debug, Default)]
pub struct ImportReport {
    pub added: usize,
    pub failed: usize,
    pub rows: Vec<RowReport>,
}

impl ImportReport {
    pub fn record(&mut self, report: RowReport) {
        if report.outcome.is_success() {
            self.added += 1;
        } else {
            self.failed += 1;
        }
        self.rows.push(report);
    }

    pub fn rows_processed(&self) -> usize {
        self.rows.len()
    }

    /// Reports for rows that were skipped or rejected
    pub fn failures(&self) -> impl Iterator<Item = &RowReport> {
        self.rows.iter().filter(|r| !r.outcome.is_success())
    }
}

/// Drives every data row of a grid through the pipeline
pub struct Importer<'a> {
    lookup: &'a HeaderLookup,
    submission: Submission<'a>,
}

impl<'a> Importer<'a> {
    pub fn new(lookup: &'a HeaderLookup, submission: Submission<'a>) -> Self {
        Self { lookup, submission }
    }

    /// Import all data rows, calling `on_row` as each one completes
    pub fn run<F>(&self, grid: &Grid, mut on_row: F) -> ImportReport
    where
        F: FnMut(&RowReport),
    {
        let headers: Vec<String> = grid.headers().iter().map(|h| normalize_header(h)).collect();
        tracing::info!(
            rows = grid.data_rows().len(),
            dry_run = matches!(self.submission, Submission::DryRun),
            "starting contact import"
        );

        let mut report = ImportReport::default();
        for (idx, cells) in grid.data_rows().iter().enumerate() {
            let row = grid.display_row(idx);
            let fields = FieldDictionary::from_row(&headers, cells, self.lookup);
            let outcome = self.process(row, fields);
            let row_report = RowReport { row, outcome };
            on_row(&row_report);
            report.record(row_report);
        }

        tracing::info!(added = report.added, failed = report.failed, "contact import finished");
        report
    }

    fn process(&self, row: usize, fields: FieldDictionary) -> RowOutcome {
        let resource = match build_contact(&fields) {
            Ok(resource) => resource,
            Err(reason) => {
                tracing::warn!(row, %reason, fields = %to_json(&fields), "skipping row");
                return RowOutcome::Skipped { reason, fields };
            }
        };

        let client = match self.submission {
            Submission::DryRun => return RowOutcome::Planned(resource),
            Submission::Live(client) => client,
        };

        match client.create_contact(&resource) {
            Ok(created) => {
                tracing::info!(row, resource_name = %created.resource_name, "created contact");
                RowOutcome::Created {
                    resource_name: created.resource_name,
                    label: resource.label(),
                }
            }
            Err(error) => {
                tracing::error!(
                    row,
                    %error,
                    fields = %to_json(&fields),
                    resource = %to_json(&resource),
                    "failed to create contact"
                );
                RowOutcome::Rejected {
                    error,
                    fields,
                    resource,
                }
            }
        }
    }
}

/// Compact JSON for diagnostics
pub fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| format!("<unserializable: {}>", e))
}
