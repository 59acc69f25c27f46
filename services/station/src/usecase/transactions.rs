use crate::domain::repository::BackendPort;
use crate::domain::types::{Transaction, TransactionFilter};
use crate::error::StationServiceError;

pub struct ListTransactionsUseCase<B: BackendPort> {
    pub backend: B,
}

impl<B: BackendPort> ListTransactionsUseCase<B> {
    pub async fn execute(
        &self,
        mut filter: TransactionFilter,
    ) -> Result<Vec<Transaction>, StationServiceError> {
        if !filter.range.is_valid() {
            return Err(StationServiceError::InvalidDateRange);
        }
        filter.page = filter.page.clamped();
        self.backend.list_transactions(&filter).await
    }
}
