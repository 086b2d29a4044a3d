use crate::{
    auth::auth::AuthUser,
    error::ApiError,
    model::payroll::Payroll,
    utils::db_utils::employee_exists,
};
use actix_web::{HttpResponse, web};
use serde::Deserialize;
use serde_json::json;
use sqlx::SqlitePool;
use tracing::info;
use utoipa::ToSchema;

#[derive(Deserialize, ToSchema)]
pub struct CreatePayroll {
    #[schema(example = 1)]
    pub employee_id: i64,
    #[schema(example = 5000.0)]
    pub gross_salary: f64,
    #[schema(example = 750.0)]
    pub tax_deductions: f64,
}

#[derive(Deserialize, ToSchema)]
pub struct UpdatePayroll {
    #[schema(example = 5200.0)]
    pub gross_salary: Option<f64>,
    #[schema(example = 1000.0)]
    pub tax_deductions: Option<f64>,
}

#[derive(Deserialize, ToSchema)]
pub struct ProcessPayroll {
    #[schema(example = 1)]
    pub employee_id: i64,
}

const PAYROLL_COLUMNS: &str = "id, employee_id, gross_salary, tax_deductions, net_salary";

/// Payroll rows are addressed per employee; the first matching row is the
/// record.
async fn fetch_payroll_for_employee(
    pool: &SqlitePool,
    employee_id: i64,
) -> Result<Option<Payroll>, sqlx::Error> {
    sqlx::query_as::<_, Payroll>(&format!(
        "SELECT {} FROM payroll WHERE employee_id = ? ORDER BY id LIMIT 1",
        PAYROLL_COLUMNS
    ))
    .bind(employee_id)
    .fetch_optional(pool)
    .await
}

/// List all payroll records
#[utoipa::path(
    get,
    path = "/payroll",
    responses(
        (status = 200, description = "All payroll records", body = [Payroll]),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Payroll"
)]
pub async fn list_payroll(pool: web::Data<SqlitePool>) -> Result<HttpResponse, ApiError> {
    let records = sqlx::query_as::<_, Payroll>(&format!(
        "SELECT {} FROM payroll ORDER BY id",
        PAYROLL_COLUMNS
    ))
    .fetch_all(pool.get_ref())
    .await?;

    Ok(HttpResponse::Ok().json(records))
}

/// Get the payroll record for one employee
#[utoipa::path(
    get,
    path = "/payroll/{employee_id}",
    params(("employee_id", Path, description = "Employee ID")),
    responses(
        (status = 200, description = "Payroll record found", body = Payroll),
        (status = 404, description = "Payroll record not found"),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Payroll"
)]
pub async fn get_payroll(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let employee_id = path.into_inner();

    match fetch_payroll_for_employee(pool.get_ref(), employee_id).await? {
        Some(p) => Ok(HttpResponse::Ok().json(p)),
        None => Err(ApiError::NotFound("Payroll record not found".to_string())),
    }
}

/// Create a payroll record; net salary is derived, never submitted
#[utoipa::path(
    post,
    path = "/payroll",
    request_body = CreatePayroll,
    responses(
        (status = 200, description = "Payroll record created", body = Object, example = json!({
            "message": "Payroll record created",
            "net_salary": 4250.0
        })),
        (status = 404, description = "Employee not found"),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Payroll"
)]
pub async fn create_payroll(
    pool: web::Data<SqlitePool>,
    payload: web::Json<CreatePayroll>,
) -> Result<HttpResponse, ApiError> {
    if !employee_exists(pool.get_ref(), payload.employee_id).await? {
        return Err(ApiError::NotFound("Employee not found".to_string()));
    }

    let net_salary = payload.gross_salary - payload.tax_deductions;

    sqlx::query(
        r#"
        INSERT INTO payroll (employee_id, gross_salary, tax_deductions, net_salary)
        VALUES (?, ?, ?, ?)
        "#,
    )
    .bind(payload.employee_id)
    .bind(payload.gross_salary)
    .bind(payload.tax_deductions)
    .bind(net_salary)
    .execute(pool.get_ref())
    .await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Payroll record created",
        "net_salary": net_salary
    })))
}

/// Update payroll (partial); net salary recomputed from the effective values
#[utoipa::path(
    put,
    path = "/payroll/{employee_id}",
    params(("employee_id", Path, description = "Employee ID")),
    request_body = UpdatePayroll,
    responses(
        (status = 200, description = "Payroll updated successfully"),
        (status = 404, description = "Payroll record not found"),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Payroll"
)]
pub async fn update_payroll(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
    body: web::Json<UpdatePayroll>,
) -> Result<HttpResponse, ApiError> {
    let employee_id = path.into_inner();

    let current = fetch_payroll_for_employee(pool.get_ref(), employee_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Payroll record not found".to_string()))?;

    let gross_salary = body.gross_salary.unwrap_or(current.gross_salary);
    let tax_deductions = body.tax_deductions.unwrap_or(current.tax_deductions);
    let net_salary = gross_salary - tax_deductions;

    sqlx::query(
        r#"
        UPDATE payroll
        SET gross_salary = ?, tax_deductions = ?, net_salary = ?
        WHERE id = ?
        "#,
    )
    .bind(gross_salary)
    .bind(tax_deductions)
    .bind(net_salary)
    .bind(current.id)
    .execute(pool.get_ref())
    .await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Payroll updated successfully",
        "net_salary": net_salary
    })))
}

/// Recompute net salary from the stored gross/deductions
#[utoipa::path(
    post,
    path = "/process-payroll",
    request_body = ProcessPayroll,
    responses(
        (status = 200, description = "Payroll processed"),
        (status = 404, description = "Payroll record not found"),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Payroll"
)]
pub async fn process_payroll(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
    payload: web::Json<ProcessPayroll>,
) -> Result<HttpResponse, ApiError> {
    let current = fetch_payroll_for_employee(pool.get_ref(), payload.employee_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Payroll record not found".to_string()))?;

    let net_salary = current.gross_salary - current.tax_deductions;

    sqlx::query("UPDATE payroll SET net_salary = ? WHERE id = ?")
        .bind(net_salary)
        .bind(current.id)
        .execute(pool.get_ref())
        .await?;

    info!(
        actor = auth.employee_id,
        employee_id = payload.employee_id,
        "payroll processed"
    );

    Ok(HttpResponse::Ok().json(json!({
        "message": "Payroll processed",
        "net_salary": net_salary
    })))
}

/// Delete the payroll record for one employee
#[utoipa::path(
    delete,
    path = "/payroll/{employee_id}",
    params(("employee_id", Path, description = "Employee ID")),
    responses(
        (status = 200, description = "Payroll record deleted successfully"),
        (status = 404, description = "Payroll record not found"),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Payroll"
)]
pub async fn delete_payroll(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let employee_id = path.into_inner();

    let current = fetch_payroll_for_employee(pool.get_ref(), employee_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Payroll record not found".to_string()))?;

    sqlx::query("DELETE FROM payroll WHERE id = ?")
        .bind(current.id)
        .execute(pool.get_ref())
        .await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Payroll record deleted successfully"
    })))
}
