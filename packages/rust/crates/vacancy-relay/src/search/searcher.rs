use async_trait::async_trait;
use vacancy_store::Query;

use super::types::Vacancy;

/// Looks up vacancies matching one saved query.
///
/// Errors are logged by the worker and count as zero results for that tick.
#[async_trait]
pub trait VacancySearcher: Send + Sync {
    /// Vacancies for `query` published within the last `period_days` days.
    async fn search(&self, query: &Query, period_days: u32) -> anyhow::Result<Vec<Vacancy>>;
}
