use crate::{
    auth::auth::AuthUser,
    error::ApiError,
    model::leave_request::{LeaveRequest, LeaveStatus},
    utils::db_utils::{SqlValue, build_update, employee_exists, execute_update},
};
use actix_web::{HttpResponse, web};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;
use sqlx::SqlitePool;
use tracing::info;
use utoipa::ToSchema;

#[derive(Deserialize, ToSchema)]
pub struct CreateLeave {
    #[schema(example = 1)]
    pub employee_id: i64,
    #[schema(example = "Sick")]
    pub leave_type: String,
    #[schema(example = "2024-01-05", format = "date", value_type = String)]
    pub start_date: String,
    #[schema(example = "2024-01-07", format = "date", value_type = String)]
    pub end_date: String,
}

#[derive(Deserialize, ToSchema)]
pub struct UpdateLeave {
    pub leave_type: Option<String>,
    #[schema(example = "2024-01-05", format = "date", value_type = String)]
    pub start_date: Option<String>,
    #[schema(example = "2024-01-07", format = "date", value_type = String)]
    pub end_date: Option<String>,
    #[schema(example = "Approved")]
    pub status: Option<String>,
}

/// Dates arrive as strings and must be exactly `YYYY-MM-DD`
fn parse_date(value: &str) -> Result<NaiveDate, ApiError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        ApiError::Validation(format!("invalid date '{}', expected YYYY-MM-DD", value))
    })
}

fn parse_status(value: &str) -> Result<LeaveStatus, ApiError> {
    LeaveStatus::parse(value).ok_or_else(|| {
        ApiError::Validation(format!(
            "invalid status '{}', expected Pending, Approved or Denied",
            value
        ))
    })
}

const LEAVE_COLUMNS: &str = "id, employee_id, leave_type, start_date, end_date, status";

/// List all leave requests
#[utoipa::path(
    get,
    path = "/leave-requests",
    responses(
        (status = 200, description = "All leave requests", body = [LeaveRequest]),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Leave"
)]
pub async fn list_leave_requests(pool: web::Data<SqlitePool>) -> Result<HttpResponse, ApiError> {
    let requests = sqlx::query_as::<_, LeaveRequest>(&format!(
        "SELECT {} FROM leave_requests ORDER BY id",
        LEAVE_COLUMNS
    ))
    .fetch_all(pool.get_ref())
    .await?;

    Ok(HttpResponse::Ok().json(requests))
}

/// List leave requests for one employee
#[utoipa::path(
    get,
    path = "/leave-requests/{employee_id}",
    params(("employee_id", Path, description = "Employee ID")),
    responses(
        (status = 200, description = "Leave requests for the employee", body = [LeaveRequest]),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Leave"
)]
pub async fn list_leave_requests_by_employee(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let employee_id = path.into_inner();

    let requests = sqlx::query_as::<_, LeaveRequest>(&format!(
        "SELECT {} FROM leave_requests WHERE employee_id = ? ORDER BY id",
        LEAVE_COLUMNS
    ))
    .bind(employee_id)
    .fetch_all(pool.get_ref())
    .await?;

    Ok(HttpResponse::Ok().json(requests))
}

/// Submit a leave request (status defaults to Pending)
#[utoipa::path(
    post,
    path = "/leave-request",
    request_body = CreateLeave,
    responses(
        (status = 200, description = "Leave request submitted", body = Object, example = json!({
            "message": "Leave request submitted",
            "status": "Pending"
        })),
        (status = 400, description = "Malformed date or date range"),
        (status = 404, description = "Employee not found"),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Leave"
)]
pub async fn create_leave_request(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
    payload: web::Json<CreateLeave>,
) -> Result<HttpResponse, ApiError> {
    let start_date = parse_date(&payload.start_date)?;
    let end_date = parse_date(&payload.end_date)?;

    if start_date > end_date {
        return Err(ApiError::Validation(
            "start_date cannot be after end_date".to_string(),
        ));
    }

    if !employee_exists(pool.get_ref(), payload.employee_id).await? {
        return Err(ApiError::NotFound("Employee not found".to_string()));
    }

    let result = sqlx::query(
        r#"
        INSERT INTO leave_requests (employee_id, leave_type, start_date, end_date, status)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(payload.employee_id)
    .bind(&payload.leave_type)
    .bind(start_date)
    .bind(end_date)
    .bind(LeaveStatus::Pending.as_str())
    .execute(pool.get_ref())
    .await?;

    info!(
        actor = auth.employee_id,
        employee_id = payload.employee_id,
        leave_id = result.last_insert_rowid(),
        "leave request submitted"
    );

    Ok(HttpResponse::Ok().json(json!({
        "message": "Leave request submitted",
        "id": result.last_insert_rowid(),
        "status": LeaveStatus::Pending.as_str()
    })))
}

/// Update a leave request (partial)
#[utoipa::path(
    put,
    path = "/leave-request/{id}",
    params(("id", Path, description = "Leave request ID")),
    request_body = UpdateLeave,
    responses(
        (status = 200, description = "Leave request updated successfully"),
        (status = 400, description = "Malformed date, date range or status"),
        (status = 404, description = "Leave request not found"),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Leave"
)]
pub async fn update_leave_request(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
    body: web::Json<UpdateLeave>,
) -> Result<HttpResponse, ApiError> {
    let leave_id = path.into_inner();
    let body = body.into_inner();

    let current = sqlx::query_as::<_, LeaveRequest>(&format!(
        "SELECT {} FROM leave_requests WHERE id = ?",
        LEAVE_COLUMNS
    ))
    .bind(leave_id)
    .fetch_optional(pool.get_ref())
    .await?
    .ok_or_else(|| ApiError::NotFound("Leave request not found".to_string()))?;

    let start_date = body.start_date.as_deref().map(parse_date).transpose()?;
    let end_date = body.end_date.as_deref().map(parse_date).transpose()?;
    let status = body.status.as_deref().map(parse_status).transpose()?;

    // the date-order invariant holds over the effective values, mixing
    // stored and updated fields
    let effective_start = start_date.unwrap_or(current.start_date);
    let effective_end = end_date.unwrap_or(current.end_date);
    if effective_start > effective_end {
        return Err(ApiError::Validation(
            "start_date cannot be after end_date".to_string(),
        ));
    }

    let mut fields = Vec::new();
    if let Some(leave_type) = body.leave_type {
        fields.push(("leave_type", SqlValue::Text(leave_type)));
    }
    if let Some(date) = start_date {
        fields.push(("start_date", SqlValue::Date(date)));
    }
    if let Some(date) = end_date {
        fields.push(("end_date", SqlValue::Date(date)));
    }
    if let Some(status) = status {
        fields.push(("status", SqlValue::Text(status.as_str().to_string())));
    }

    let update = build_update("leave_requests", fields, "id", leave_id)?;
    execute_update(pool.get_ref(), update).await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Leave request updated successfully"
    })))
}

/// Delete a leave request
#[utoipa::path(
    delete,
    path = "/leave-request/{id}",
    params(("id", Path, description = "Leave request ID")),
    responses(
        (status = 200, description = "Leave request deleted successfully"),
        (status = 404, description = "Leave request not found"),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Leave"
)]
pub async fn delete_leave_request(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let leave_id = path.into_inner();

    let result = sqlx::query("DELETE FROM leave_requests WHERE id = ?")
        .bind(leave_id)
        .execute(pool.get_ref())
        .await?;

    if result.rows_affected() == 0 {
        return Err(ApiError::NotFound("Leave request not found".to_string()));
    }

    Ok(HttpResponse::Ok().json(json!({
        "message": "Leave request deleted successfully"
    })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iso_dates_parse() {
        assert_eq!(
            parse_date("2024-01-05").unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 5).unwrap()
        );
    }

    #[test]
    fn non_iso_dates_are_validation_errors() {
        for bad in ["01/05/2024", "2024-13-01", "2024-1-5x", "yesterday", ""] {
            assert!(matches!(parse_date(bad), Err(ApiError::Validation(_))), "{bad}");
        }
    }

    #[test]
    fn status_strings_are_validated() {
        assert!(parse_status("Approved").is_ok());
        assert!(matches!(parse_status("approved"), Err(ApiError::Validation(_))));
    }
}
