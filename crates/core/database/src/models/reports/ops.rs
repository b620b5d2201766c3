use beacon_result::Result;

use crate::{PartialReport, Report, ReportStatus};

#[cfg(feature = "mongodb")]
mod mongodb;
mod reference;

#[async_trait]
pub trait AbstractReports: Sync + Send {
    /// Insert a new report into the database
    async fn insert_report(&self, report: &Report) -> Result<()>;

    /// Fetch a report by its id
    async fn fetch_report(&self, id: &str) -> Result<Report>;

    /// Fetch all reports, optionally filtered by status, newest first
    async fn list_reports(&self, status: Option<ReportStatus>) -> Result<Vec<Report>>;

    /// Update a report with new information
    async fn update_report(&self, id: &str, partial: &PartialReport) -> Result<()>;

    /// Delete a report by its id
    async fn delete_report(&self, id: &str) -> Result<()>;
}
