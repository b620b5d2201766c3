use beacon_result::Result;

use crate::ReferenceDb;
use crate::{PartialReport, Report, ReportStatus};

use super::AbstractReports;

#[async_trait]
impl AbstractReports for ReferenceDb {
    /// Insert a new report into the database
    async fn insert_report(&self, report: &Report) -> Result<()> {
        let mut reports = self.reports.lock().await;
        if reports.contains_key(&report.id) {
            Err(create_database_error!("insert", "report"))
        } else {
            reports.insert(report.id.to_string(), report.clone());
            Ok(())
        }
    }

    /// Fetch a report by its id
    async fn fetch_report(&self, id: &str) -> Result<Report> {
        let reports = self.reports.lock().await;
        reports
            .get(id)
            .cloned()
            .ok_or_else(|| create_error!(UnknownReport))
    }

    /// Fetch all reports, optionally filtered by status, newest first
    async fn list_reports(&self, status: Option<ReportStatus>) -> Result<Vec<Report>> {
        let reports = self.reports.lock().await;
        let mut result: Vec<Report> = reports
            .values()
            .filter(|report| status.map(|status| report.status == status).unwrap_or(true))
            .cloned()
            .collect();

        result.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(result)
    }

    /// Update a report with new information
    async fn update_report(&self, id: &str, partial: &PartialReport) -> Result<()> {
        let mut reports = self.reports.lock().await;
        if let Some(report) = reports.get_mut(id) {
            report.apply_options(partial.clone());
            Ok(())
        } else {
            Err(create_error!(UnknownReport))
        }
    }

    /// Delete a report by its id
    async fn delete_report(&self, id: &str) -> Result<()> {
        let mut reports = self.reports.lock().await;
        if reports.remove(id).is_some() {
            Ok(())
        } else {
            Err(create_error!(UnknownReport))
        }
    }
}
