use crate::{
    auth::auth::AuthUser,
    error::ApiError,
    model::employee::Employee,
    utils::{
        db_utils::{SqlValue, build_update, execute_update},
        email_cache, email_filter,
    },
};
use actix_web::{HttpResponse, web};
use serde::Deserialize;
use serde_json::json;
use sqlx::SqlitePool;
use tracing::info;
use utoipa::ToSchema;

/// Partial update payload. Email and password hash are deliberately not
/// updatable through this route.
#[derive(Deserialize, ToSchema)]
pub struct UpdateEmployee {
    #[schema(example = "Jane Doe")]
    pub name: Option<String>,
    #[schema(example = "Senior Engineer")]
    pub job_title: Option<String>,
    #[schema(example = 5500.0)]
    pub salary: Option<f64>,
    #[schema(example = "Engineering")]
    pub department: Option<String>,
}

const EMPLOYEE_COLUMNS: &str = "id, name, email, job_title, department, salary";

async fn fetch_employee(pool: &SqlitePool, id: i64) -> Result<Option<Employee>, sqlx::Error> {
    sqlx::query_as::<_, Employee>(&format!(
        "SELECT {} FROM employees WHERE id = ?",
        EMPLOYEE_COLUMNS
    ))
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// List all employees
#[utoipa::path(
    get,
    path = "/employees",
    responses(
        (status = 200, description = "All employee records", body = [Employee]),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Employee"
)]
pub async fn list_employees(pool: web::Data<SqlitePool>) -> Result<HttpResponse, ApiError> {
    let employees = sqlx::query_as::<_, Employee>(&format!(
        "SELECT {} FROM employees ORDER BY id",
        EMPLOYEE_COLUMNS
    ))
    .fetch_all(pool.get_ref())
    .await?;

    Ok(HttpResponse::Ok().json(employees))
}

/// Get a single employee
#[utoipa::path(
    get,
    path = "/employees/{id}",
    params(("id", Path, description = "Employee ID")),
    responses(
        (status = 200, description = "Employee found", body = Employee),
        (status = 404, description = "Employee not found"),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Employee"
)]
pub async fn get_employee(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let employee_id = path.into_inner();

    match fetch_employee(pool.get_ref(), employee_id).await? {
        Some(emp) => Ok(HttpResponse::Ok().json(emp)),
        None => Err(ApiError::NotFound("Employee not found".to_string())),
    }
}

/// Update an employee (partial; unspecified fields keep their prior value)
#[utoipa::path(
    put,
    path = "/employees/{id}",
    params(("id", Path, description = "Employee ID")),
    request_body = UpdateEmployee,
    responses(
        (status = 200, description = "Employee updated successfully"),
        (status = 400, description = "No fields provided"),
        (status = 404, description = "Employee not found"),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Employee"
)]
pub async fn update_employee(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
    body: web::Json<UpdateEmployee>,
) -> Result<HttpResponse, ApiError> {
    let employee_id = path.into_inner();
    let body = body.into_inner();

    let mut fields = Vec::new();
    if let Some(name) = body.name {
        fields.push(("name", SqlValue::Text(name)));
    }
    if let Some(job_title) = body.job_title {
        fields.push(("job_title", SqlValue::Text(job_title)));
    }
    if let Some(salary) = body.salary {
        fields.push(("salary", SqlValue::F64(salary)));
    }
    if let Some(department) = body.department {
        fields.push(("department", SqlValue::Text(department)));
    }

    let update = build_update("employees", fields, "id", employee_id)?;

    let affected = execute_update(pool.get_ref(), update).await?;
    if affected == 0 {
        return Err(ApiError::NotFound("Employee not found".to_string()));
    }

    let updated = fetch_employee(pool.get_ref(), employee_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Employee not found".to_string()))?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Employee updated successfully",
        "updated_employee": updated
    })))
}

/// Delete an employee
#[utoipa::path(
    delete,
    path = "/employees/{id}",
    params(("id", Path, description = "Employee ID")),
    responses(
        (status = 200, description = "Employee deleted successfully"),
        (status = 404, description = "Employee not found"),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Employee"
)]
pub async fn delete_employee(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let employee_id = path.into_inner();

    // fetch the email first so the availability filter/cache can be updated
    let email = sqlx::query_scalar::<_, String>("SELECT email FROM employees WHERE id = ?")
        .bind(employee_id)
        .fetch_optional(pool.get_ref())
        .await?
        .ok_or_else(|| ApiError::NotFound("Employee not found".to_string()))?;

    let result = sqlx::query("DELETE FROM employees WHERE id = ?")
        .bind(employee_id)
        .execute(pool.get_ref())
        .await?;

    if result.rows_affected() == 0 {
        return Err(ApiError::NotFound("Employee not found".to_string()));
    }

    email_filter::remove(&email);
    email_cache::mark_available(&email).await;

    info!(actor = auth.employee_id, employee_id, "employee deleted");

    Ok(HttpResponse::Ok().json(json!({
        "message": "Employee deleted successfully"
    })))
}
