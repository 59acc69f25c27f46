use tats_domain::pagination::DateRange;

use crate::domain::repository::BackendPort;
use crate::domain::types::ReportSummary;
use crate::error::StationServiceError;

pub struct StationReportUseCase<B: BackendPort> {
    pub backend: B,
}

impl<B: BackendPort> StationReportUseCase<B> {
    /// Fetch a station's aggregated report and total it for the charts.
    pub async fn execute(
        &self,
        station_id: i64,
        range: DateRange,
    ) -> Result<ReportSummary, StationServiceError> {
        if !range.is_valid() {
            return Err(StationServiceError::InvalidDateRange);
        }
        let rows = self
            .backend
            .fetch_report(station_id, &range)
            .await?
            .ok_or(StationServiceError::StationNotFound)?;
        Ok(ReportSummary::from_rows(rows))
    }
}
