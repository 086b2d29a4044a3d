use crate::{
    error::ApiError,
    model::benefits::Benefits,
    utils::db_utils::{SqlValue, build_update, employee_exists, execute_update},
};
use actix_web::{HttpResponse, web};
use serde::Deserialize;
use serde_json::json;
use sqlx::SqlitePool;
use utoipa::ToSchema;

#[derive(Deserialize, ToSchema)]
pub struct CreateBenefits {
    #[schema(example = 1)]
    pub employee_id: i64,
    #[schema(example = true)]
    pub health_insurance: Option<bool>,
    #[schema(example = false)]
    pub retirement_plan: Option<bool>,
    #[schema(example = 20)]
    pub vacation_days: Option<i64>,
}

#[derive(Deserialize, ToSchema)]
pub struct UpdateBenefits {
    pub health_insurance: Option<bool>,
    pub retirement_plan: Option<bool>,
    #[schema(example = 25)]
    pub vacation_days: Option<i64>,
}

const BENEFITS_COLUMNS: &str = "id, employee_id, health_insurance, retirement_plan, vacation_days";

/// Benefits rows are addressed per employee; the first matching row is the
/// enrollment.
async fn fetch_benefits_for_employee(
    pool: &SqlitePool,
    employee_id: i64,
) -> Result<Option<Benefits>, sqlx::Error> {
    sqlx::query_as::<_, Benefits>(&format!(
        "SELECT {} FROM benefits WHERE employee_id = ? ORDER BY id LIMIT 1",
        BENEFITS_COLUMNS
    ))
    .bind(employee_id)
    .fetch_optional(pool)
    .await
}

/// List all benefits enrollments
#[utoipa::path(
    get,
    path = "/benefits",
    responses(
        (status = 200, description = "All benefits enrollments", body = [Benefits]),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Benefits"
)]
pub async fn list_benefits(pool: web::Data<SqlitePool>) -> Result<HttpResponse, ApiError> {
    let records = sqlx::query_as::<_, Benefits>(&format!(
        "SELECT {} FROM benefits ORDER BY id",
        BENEFITS_COLUMNS
    ))
    .fetch_all(pool.get_ref())
    .await?;

    Ok(HttpResponse::Ok().json(records))
}

/// Get the benefits enrollment for one employee
#[utoipa::path(
    get,
    path = "/benefits/{employee_id}",
    params(("employee_id", Path, description = "Employee ID")),
    responses(
        (status = 200, description = "Benefits enrollment found", body = Benefits),
        (status = 404, description = "Benefits record not found"),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Benefits"
)]
pub async fn get_benefits(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let employee_id = path.into_inner();

    match fetch_benefits_for_employee(pool.get_ref(), employee_id).await? {
        Some(b) => Ok(HttpResponse::Ok().json(b)),
        None => Err(ApiError::NotFound("Benefits record not found".to_string())),
    }
}

/// Enroll an employee in benefits (unspecified flags default to false/0)
#[utoipa::path(
    post,
    path = "/benefits",
    request_body = CreateBenefits,
    responses(
        (status = 200, description = "Benefits enrollment created"),
        (status = 404, description = "Employee not found"),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Benefits"
)]
pub async fn create_benefits(
    pool: web::Data<SqlitePool>,
    payload: web::Json<CreateBenefits>,
) -> Result<HttpResponse, ApiError> {
    if !employee_exists(pool.get_ref(), payload.employee_id).await? {
        return Err(ApiError::NotFound("Employee not found".to_string()));
    }

    sqlx::query(
        r#"
        INSERT INTO benefits (employee_id, health_insurance, retirement_plan, vacation_days)
        VALUES (?, ?, ?, ?)
        "#,
    )
    .bind(payload.employee_id)
    .bind(payload.health_insurance.unwrap_or(false))
    .bind(payload.retirement_plan.unwrap_or(false))
    .bind(payload.vacation_days.unwrap_or(0))
    .execute(pool.get_ref())
    .await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Benefits enrollment successful"
    })))
}

/// Update benefits (partial; unspecified fields keep their prior value)
#[utoipa::path(
    put,
    path = "/benefits/{employee_id}",
    params(("employee_id", Path, description = "Employee ID")),
    request_body = UpdateBenefits,
    responses(
        (status = 200, description = "Benefits updated successfully"),
        (status = 400, description = "No fields provided"),
        (status = 404, description = "Benefits record not found"),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Benefits"
)]
pub async fn update_benefits(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
    body: web::Json<UpdateBenefits>,
) -> Result<HttpResponse, ApiError> {
    let employee_id = path.into_inner();
    let body = body.into_inner();

    let current = fetch_benefits_for_employee(pool.get_ref(), employee_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Benefits record not found".to_string()))?;

    let mut fields = Vec::new();
    if let Some(health_insurance) = body.health_insurance {
        fields.push(("health_insurance", SqlValue::Bool(health_insurance)));
    }
    if let Some(retirement_plan) = body.retirement_plan {
        fields.push(("retirement_plan", SqlValue::Bool(retirement_plan)));
    }
    if let Some(vacation_days) = body.vacation_days {
        fields.push(("vacation_days", SqlValue::I64(vacation_days)));
    }

    let update = build_update("benefits", fields, "id", current.id)?;
    execute_update(pool.get_ref(), update).await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Benefits updated successfully"
    })))
}

/// Remove the benefits enrollment for one employee
#[utoipa::path(
    delete,
    path = "/benefits/{employee_id}",
    params(("employee_id", Path, description = "Employee ID")),
    responses(
        (status = 200, description = "Benefits removed successfully"),
        (status = 404, description = "Benefits record not found"),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Benefits"
)]
pub async fn delete_benefits(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let employee_id = path.into_inner();

    let current = fetch_benefits_for_employee(pool.get_ref(), employee_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Benefits record not found".to_string()))?;

    sqlx::query("DELETE FROM benefits WHERE id = ?")
        .bind(current.id)
        .execute(pool.get_ref())
        .await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Benefits removed successfully"
    })))
}
