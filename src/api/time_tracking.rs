use crate::{
    auth::auth::AuthUser,
    error::ApiError,
    model::time_tracking::TimeTracking,
    utils::db_utils::employee_exists,
};
use actix_web::{HttpResponse, web};
use serde::Deserialize;
use serde_json::json;
use sqlx::SqlitePool;
use tracing::info;
use utoipa::ToSchema;

#[derive(Deserialize, ToSchema)]
pub struct ClockIn {
    #[schema(example = 1)]
    pub employee_id: i64,
}

#[derive(Deserialize, ToSchema)]
pub struct ClockOut {
    #[schema(example = 8.0)]
    pub hours_worked: Option<f64>,
    #[schema(example = 1.5)]
    pub overtime_hours: Option<f64>,
}

/// List all time-tracking records
#[utoipa::path(
    get,
    path = "/time-tracking",
    responses(
        (status = 200, description = "All time-tracking records", body = [TimeTracking]),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "TimeTracking"
)]
pub async fn list_time_tracking(pool: web::Data<SqlitePool>) -> Result<HttpResponse, ApiError> {
    let records = sqlx::query_as::<_, TimeTracking>(
        "SELECT id, employee_id, hours_worked, overtime_hours FROM time_tracking ORDER BY id",
    )
    .fetch_all(pool.get_ref())
    .await?;

    Ok(HttpResponse::Ok().json(records))
}

/// Clock in: opens a zero-initialized time entry and returns its id
#[utoipa::path(
    post,
    path = "/time-tracking/clock-in",
    request_body = ClockIn,
    responses(
        (status = 200, description = "Clock-in recorded", body = Object, example = json!({
            "message": "Clock-in recorded",
            "id": 1
        })),
        (status = 404, description = "Employee not found"),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "TimeTracking"
)]
pub async fn clock_in(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
    payload: web::Json<ClockIn>,
) -> Result<HttpResponse, ApiError> {
    if !employee_exists(pool.get_ref(), payload.employee_id).await? {
        return Err(ApiError::NotFound("Employee not found".to_string()));
    }

    let result = sqlx::query(
        "INSERT INTO time_tracking (employee_id, hours_worked, overtime_hours) VALUES (?, 0, 0)",
    )
    .bind(payload.employee_id)
    .execute(pool.get_ref())
    .await?;

    let entry_id = result.last_insert_rowid();

    info!(
        actor = auth.employee_id,
        employee_id = payload.employee_id,
        entry_id,
        "clock-in recorded"
    );

    Ok(HttpResponse::Ok().json(json!({
        "message": "Clock-in recorded",
        "id": entry_id
    })))
}

/// Clock out: ADDS the supplied hours to the stored counters. A single
/// UPDATE performs the increment, so concurrent clock-outs never lose an
/// addition.
#[utoipa::path(
    put,
    path = "/time-tracking/clock-out/{id}",
    params(("id", Path, description = "Time entry ID")),
    request_body = ClockOut,
    responses(
        (status = 200, description = "Clock-out recorded"),
        (status = 404, description = "Time entry not found"),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "TimeTracking"
)]
pub async fn clock_out(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
    payload: web::Json<ClockOut>,
) -> Result<HttpResponse, ApiError> {
    let entry_id = path.into_inner();
    let hours_worked = payload.hours_worked.unwrap_or(0.0);
    let overtime_hours = payload.overtime_hours.unwrap_or(0.0);

    let result = sqlx::query(
        r#"
        UPDATE time_tracking
        SET hours_worked = hours_worked + ?,
            overtime_hours = overtime_hours + ?
        WHERE id = ?
        "#,
    )
    .bind(hours_worked)
    .bind(overtime_hours)
    .bind(entry_id)
    .execute(pool.get_ref())
    .await?;

    if result.rows_affected() == 0 {
        return Err(ApiError::NotFound("Time entry not found".to_string()));
    }

    info!(
        actor = auth.employee_id,
        entry_id, hours_worked, overtime_hours, "clock-out recorded"
    );

    Ok(HttpResponse::Ok().json(json!({
        "message": "Clock-out recorded"
    })))
}
