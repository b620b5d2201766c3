use mongodb::options::FindOptions;

use beacon_result::Result;

use crate::MongoDb;
use crate::{PartialReport, Report, ReportStatus};

use super::AbstractReports;

static COL: &str = "reports";

#[async_trait]
impl AbstractReports for MongoDb {
    /// Insert a new report into the database
    async fn insert_report(&self, report: &Report) -> Result<()> {
        query!(self, insert_one, COL, report).map(|_| ())
    }

    /// Fetch a report by its id
    async fn fetch_report(&self, id: &str) -> Result<Report> {
        query!(self, find_one_by_id, COL, id)?.ok_or_else(|| create_error!(UnknownReport))
    }

    /// Fetch all reports, optionally filtered by status, newest first
    async fn list_reports(&self, status: Option<ReportStatus>) -> Result<Vec<Report>> {
        let mut filter = doc! {};
        if let Some(status) = status {
            filter.insert(
                "status",
                bson::to_bson(&status).map_err(|_| create_database_error!("to_bson", COL))?,
            );
        }

        query!(
            self,
            find_with_options,
            COL,
            filter,
            FindOptions::builder()
                .sort(doc! {
                    "_id": -1_i32
                })
                .build()
        )
    }

    /// Update a report with new information
    async fn update_report(&self, id: &str, partial: &PartialReport) -> Result<()> {
        query!(self, update_one_by_id, COL, id, partial, vec![], None).map(|_| ())
    }

    /// Delete a report by its id
    async fn delete_report(&self, id: &str) -> Result<()> {
        query!(self, delete_one_by_id, COL, id).map(|_| ())
    }
}
