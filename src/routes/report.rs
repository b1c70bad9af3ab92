//! Route handlers for the aggregate spending reports.

use axum::{
    Extension, Json,
    extract::{Query, State},
};
use serde::{Deserialize, Serialize};
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

use crate::{
    AppState, Error,
    models::{Spending, SpendingCategory, SpendingPriority, User},
    stores::{ReportRange, Store},
};

/// The raw query parameters shared by the report endpoints.
///
/// The values are taken as strings and validated by [parse_report_params]
/// before any store access happens.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ReportParams {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub negative: Option<String>,
}

/// The per-day totals wrapped for JSON responses.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct DailySpendingResponse {
    pub spending: Vec<Spending>,
}

/// The per-category totals wrapped for JSON responses.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct CategorySpendingResponse {
    pub spending: Vec<SpendingCategory>,
}

/// The per-priority totals wrapped for JSON responses.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct PrioritySpendingResponse {
    pub spending: Vec<SpendingPriority>,
}

fn parse_date_param(value: Option<String>, name: &str) -> Result<OffsetDateTime, Error> {
    let raw = value.ok_or_else(|| Error::InvalidQuery(format!("{name} is required")))?;

    OffsetDateTime::parse(&raw, &Rfc3339)
        .map_err(|_| Error::InvalidQuery(format!("{name} must be an RFC 3339 timestamp")))
}

/// Parse and validate the report query parameters.
///
/// All three parameters are required. `negative` accepts only the literals
/// `true` and `false`.
fn parse_report_params(params: ReportParams) -> Result<ReportRange, Error> {
    let start = parse_date_param(params.start_date, "start_date")?;
    let end = parse_date_param(params.end_date, "end_date")?;

    let negative = params
        .negative
        .ok_or_else(|| Error::InvalidQuery("negative is required".to_owned()))?
        .parse::<bool>()
        .map_err(|_| Error::InvalidQuery("negative must be 'true' or 'false'".to_owned()))?;

    Ok(ReportRange {
        start,
        end,
        negative,
    })
}

/// A route handler for per-day spending totals over a date range.
pub(crate) async fn daily_values<S>(
    State(state): State<AppState<S>>,
    Extension(user): Extension<User>,
    Query(params): Query<ReportParams>,
) -> Result<Json<DailySpendingResponse>, Error>
where
    S: Store + Clone + Send + Sync + 'static,
{
    let range = parse_report_params(params)?;
    let spending = state.store().daily_spending(user.id, range)?;

    Ok(Json(DailySpendingResponse { spending }))
}

/// A route handler for per-category spending totals over a date range,
/// largest spender first.
pub(crate) async fn highest_category<S>(
    State(state): State<AppState<S>>,
    Extension(user): Extension<User>,
    Query(params): Query<ReportParams>,
) -> Result<Json<CategorySpendingResponse>, Error>
where
    S: Store + Clone + Send + Sync + 'static,
{
    let range = parse_report_params(params)?;
    let spending = state.store().spending_by_category(user.id, range)?;

    Ok(Json(CategorySpendingResponse { spending }))
}

/// A route handler for per-priority spending totals over a date range,
/// largest spender first.
pub(crate) async fn highest_priority<S>(
    State(state): State<AppState<S>>,
    Extension(user): Extension<User>,
    Query(params): Query<ReportParams>,
) -> Result<Json<PrioritySpendingResponse>, Error>
where
    S: Store + Clone + Send + Sync + 'static,
{
    let range = parse_report_params(params)?;
    let spending = state.store().spending_by_priority(user.id, range)?;

    Ok(Json(PrioritySpendingResponse { spending }))
}

#[cfg(test)]
mod parse_report_params_tests {
    use time::macros::datetime;

    use crate::Error;

    use super::{ReportParams, parse_report_params};

    fn valid_params() -> ReportParams {
        ReportParams {
            start_date: Some("2024-08-01T00:00:00Z".to_owned()),
            end_date: Some("2024-08-31T23:59:59Z".to_owned()),
            negative: Some("true".to_owned()),
        }
    }

    #[test]
    fn parses_valid_params() {
        let range = parse_report_params(valid_params()).unwrap();

        assert_eq!(range.start, datetime!(2024-08-01 00:00 UTC));
        assert_eq!(range.end, datetime!(2024-08-31 23:59:59 UTC));
        assert!(range.negative);
    }

    #[test]
    fn rejects_missing_start_date() {
        let params = ReportParams {
            start_date: None,
            ..valid_params()
        };

        assert_eq!(
            parse_report_params(params),
            Err(Error::InvalidQuery("start_date is required".to_owned()))
        );
    }

    #[test]
    fn rejects_malformed_end_date() {
        let params = ReportParams {
            end_date: Some("31-08-2024".to_owned()),
            ..valid_params()
        };

        assert_eq!(
            parse_report_params(params),
            Err(Error::InvalidQuery(
                "end_date must be an RFC 3339 timestamp".to_owned()
            ))
        );
    }

    #[test]
    fn rejects_non_boolean_negative() {
        let params = ReportParams {
            negative: Some("notabool".to_owned()),
            ..valid_params()
        };

        assert_eq!(
            parse_report_params(params),
            Err(Error::InvalidQuery(
                "negative must be 'true' or 'false'".to_owned()
            ))
        );
    }
}
