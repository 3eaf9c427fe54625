//! Report commands
//!
//! Monthly report, calendar heatmap data and dashboard totals.

use super::parse_date;
use crate::app::AppState;
use crate::database::{DailySummary, DashboardStats};
use crate::error::Result;
use crate::services::MonthlyReport;

/// Build the report for one month (1-12)
pub async fn get_monthly_report(state: &AppState, month: u32, year: i32) -> Result<MonthlyReport> {
    state
        .reports_service
        .build_monthly_report(month, year)
        .await
}

/// Daily summaries between two dates, inclusive
pub async fn get_calendar_summaries(
    state: &AppState,
    start: String,
    end: String,
) -> Result<Vec<DailySummary>> {
    let start = parse_date(&start)?;
    let end = parse_date(&end)?;
    state.summary_service.calendar(start, end).await
}

/// Recompute one day's summary from current task state
pub async fn recompute_summary(state: &AppState, date: String) -> Result<DailySummary> {
    let date = parse_date(&date)?;
    state.summary_service.recompute_summary(date).await
}

/// Lifetime totals
pub async fn get_dashboard_stats(state: &AppState) -> Result<DashboardStats> {
    state.reports_service.dashboard_stats().await
}
