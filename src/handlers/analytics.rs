//! Dashboard aggregates. Counters come from the store; groupings over payments and
//! bookings are computed here by pure functions.

use std::collections::{BTreeMap, HashMap};

use axum::{Json, extract::State};
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use futures::future::try_join_all;
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    AppState,
    auth::AuthAdmin,
    dto::{
        BookingAnalyticsResponse, DashboardStatsResponse, PopularWorkspace,
        PopularWorkspacesResponse, RevenuePoint, RevenueResponse,
    },
    error::ApiError,
    extract::ApiQuery,
    models::{Booking, Payment, PaymentStatus},
};

const POPULAR_LIMIT: usize = 10;
const UNKNOWN_WORKSPACE: &str = "Unknown";

/// Grouping of the revenue chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Period {
    #[default]
    Month,
    Quarter,
    Year,
}

impl Period {
    pub fn parse(raw: Option<&str>) -> Result<Self, ApiError> {
        match raw.map(str::trim) {
            None | Some("") | Some("month") => Ok(Period::Month),
            Some("quarter") => Ok(Period::Quarter),
            Some("year") => Ok(Period::Year),
            Some(other) => Err(ApiError::bad_request(format!("Invalid period '{other}'"))),
        }
    }

    /// Chart bucket of a timestamp: `2024-03`, `2024-Q1` or `2024`.
    pub fn bucket(&self, at: DateTime<Utc>) -> String {
        match self {
            Period::Month => format!("{}-{:02}", at.year(), at.month()),
            Period::Quarter => format!("{}-Q{}", at.year(), (at.month() - 1) / 3 + 1),
            Period::Year => at.year().to_string(),
        }
    }
}

#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
pub struct RevenueQuery {
    /// `month` (default), `quarter` or `year`.
    pub period: Option<String>,
}

/// Revenue of completed payments per bucket, in chronological order.
pub fn revenue_by_period(payments: &[Payment], period: Period) -> Vec<RevenuePoint> {
    let mut buckets: BTreeMap<String, f64> = BTreeMap::new();
    for payment in payments
        .iter()
        .filter(|p| p.status == PaymentStatus::Completed)
    {
        *buckets.entry(period.bucket(payment.created_at)).or_default() += payment.amount;
    }
    buckets
        .into_iter()
        .map(|(period, amount)| RevenuePoint { period, amount })
        .collect()
}

/// Booking counts keyed by status and by plan.
pub fn booking_distributions(
    bookings: &[Booking],
) -> (BTreeMap<String, u64>, BTreeMap<String, u64>) {
    let mut by_status = BTreeMap::new();
    let mut by_plan = BTreeMap::new();
    for booking in bookings {
        *by_status.entry(booking.status.to_string()).or_default() += 1;
        *by_plan.entry(booking.booking_plan.clone()).or_default() += 1;
    }
    (by_status, by_plan)
}

/// Workspaces with the most active bookings, busiest first. Ties break on the id so the
/// ranking is stable between calls.
pub fn rank_workspaces(bookings: &[Booking], limit: usize) -> Vec<(Uuid, u64)> {
    let mut counts: HashMap<Uuid, u64> = HashMap::new();
    for booking in bookings.iter().filter(|b| b.status.is_active()) {
        *counts.entry(booking.workspace_id).or_default() += 1;
    }
    let mut ranked: Vec<_> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    ranked.truncate(limit);
    ranked
}

fn start_of_month(now: DateTime<Utc>) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(now.year(), now.month(), 1)
        .and_then(|day| day.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc())
        .unwrap_or(now)
}

/// dashboard_stats
///
/// [Authenticated Route] Headline counters of the dashboard home page.
#[utoipa::path(
    get,
    path = "/api/analytics/dashboard-stats",
    responses((status = 200, description = "Counters", body = DashboardStatsResponse))
)]
pub async fn dashboard_stats(
    _admin: AuthAdmin,
    State(state): State<AppState>,
) -> Result<Json<DashboardStatsResponse>, ApiError> {
    let counts = state
        .repo
        .dashboard_counts(start_of_month(Utc::now()))
        .await?;
    Ok(Json(DashboardStatsResponse {
        success: true,
        total_users: counts.total_users,
        total_providers: counts.total_providers,
        active_providers: counts.active_providers,
        total_workspaces: counts.total_workspaces,
        active_workspaces: counts.active_workspaces,
        new_users_this_month: counts.new_users_since,
        total_revenue: counts.total_revenue,
        monthly_revenue: counts.revenue_since,
    }))
}

/// revenue
///
/// [Authenticated Route] Completed-payment revenue grouped by month, quarter or year.
#[utoipa::path(
    get,
    path = "/api/analytics/revenue",
    params(RevenueQuery),
    responses(
        (status = 200, description = "Chart data", body = RevenueResponse),
        (status = 400, description = "Unknown period")
    )
)]
pub async fn revenue(
    _admin: AuthAdmin,
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<RevenueQuery>,
) -> Result<Json<RevenueResponse>, ApiError> {
    let period = Period::parse(query.period.as_deref())?;
    let payments = state.repo.all_payments().await?;
    let chart_data = revenue_by_period(&payments, period);
    Ok(Json(RevenueResponse {
        success: true,
        total_revenue: chart_data.iter().map(|point| point.amount).sum(),
        chart_data,
    }))
}

#[utoipa::path(
    get,
    path = "/api/analytics/bookings",
    responses((status = 200, description = "Distributions", body = BookingAnalyticsResponse))
)]
pub async fn booking_analytics(
    _admin: AuthAdmin,
    State(state): State<AppState>,
) -> Result<Json<BookingAnalyticsResponse>, ApiError> {
    let bookings = state.repo.all_bookings().await?;
    let (status_distribution, plan_distribution) = booking_distributions(&bookings);
    Ok(Json(BookingAnalyticsResponse {
        success: true,
        status_distribution,
        plan_distribution,
    }))
}

/// popular_workspaces
///
/// [Authenticated Route] Top ten workspaces by upcoming, in-progress and completed
/// bookings. Workspaces that no longer exist are listed as `Unknown`.
#[utoipa::path(
    get,
    path = "/api/analytics/popular-workspaces",
    responses((status = 200, description = "Ranking", body = PopularWorkspacesResponse))
)]
pub async fn popular_workspaces(
    _admin: AuthAdmin,
    State(state): State<AppState>,
) -> Result<Json<PopularWorkspacesResponse>, ApiError> {
    let bookings = state.repo.all_bookings().await?;
    let ranked = rank_workspaces(&bookings, POPULAR_LIMIT);

    let workspaces = try_join_all(ranked.iter().map(|(id, count)| {
        let repo = state.repo.clone();
        let (id, count) = (*id, *count);
        async move {
            let workspace = repo.get_workspace(id).await?;
            Ok::<_, ApiError>(match workspace {
                Some(workspace) => PopularWorkspace {
                    id,
                    space_name: workspace.space_name,
                    location: workspace.location,
                    booking_count: count,
                },
                None => PopularWorkspace {
                    id,
                    space_name: UNKNOWN_WORKSPACE.to_string(),
                    location: String::new(),
                    booking_count: count,
                },
            })
        }
    }))
    .await?;

    Ok(Json(PopularWorkspacesResponse {
        success: true,
        workspaces,
    }))
}
