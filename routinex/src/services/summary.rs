//! Daily summary service
//!
//! Read access to cached completion percentages, plus manual recompute.
//! Task toggles already recompute their own day.

use crate::database::{DailySummary, Repository};
use crate::error::{AppError, Result};
use chrono::NaiveDate;

#[derive(Clone)]
pub struct SummaryService {
    repo: Repository,
}

impl SummaryService {
    pub fn new(repo: Repository) -> Self {
        Self { repo }
    }

    /// Recompute one day's completion percentage from current task state
    pub async fn recompute_summary(&self, date: NaiveDate) -> Result<DailySummary> {
        self.repo.recompute_summary(date).await
    }

    pub async fn get_summary(&self, date: NaiveDate) -> Result<Option<DailySummary>> {
        self.repo.get_summary(date).await
    }

    /// Summaries for a calendar range, inclusive
    pub async fn calendar(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<DailySummary>> {
        if start > end {
            return Err(AppError::validation(format!(
                "Calendar range starts after it ends: {} > {}",
                start, end
            )));
        }

        self.repo.list_summaries_between(start, end).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::create_memory_pool;

    #[tokio::test]
    async fn test_reversed_range_rejected() {
        let pool = create_memory_pool().await.unwrap();
        let service = SummaryService::new(Repository::new(pool));

        let start = NaiveDate::from_ymd_opt(2024, 3, 31).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();

        assert!(service.calendar(start, end).await.is_err());
        assert!(service.calendar(end, start).await.unwrap().is_empty());
    }
}
