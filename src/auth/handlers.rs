use crate::{
    auth::{
        jwt::generate_access_token,
        password::{hash_password, verify_password},
    },
    config::Config,
    error::{ApiError, is_unique_violation},
    models::{EmployeeAuthSql, LoginReq, LoginResponse, RegisterReq},
    utils::{email_cache, email_filter},
};
use actix_web::{HttpResponse, web};
use serde_json::json;
use sqlx::SqlitePool;
use tracing::{debug, info, instrument};

/// Inserts a new employee row and keeps the email filter/cache populated
async fn insert_employee(req: &RegisterReq, pool: &SqlitePool) -> Result<(), ApiError> {
    let hashed = hash_password(&req.password)?;

    let result = sqlx::query(
        r#"
        INSERT INTO employees (name, email, job_title, department, salary, password_hash)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(req.name.trim())
    .bind(req.email.trim().to_lowercase())
    .bind(&req.job_title)
    .bind(&req.department)
    .bind(req.salary)
    .bind(hashed)
    .execute(pool)
    .await;

    match result {
        Ok(_) => {
            // if insert succeeds, populate filter and cache for fast lookups
            email_filter::insert(&req.email);
            email_cache::mark_taken(&req.email).await;
            Ok(())
        }
        Err(e) if is_unique_violation(&e) => {
            Err(ApiError::Conflict("Email already registered".to_string()))
        }
        Err(e) => Err(ApiError::Database(e)),
    }
}

/// true  => email AVAILABLE
/// false => email TAKEN
pub async fn is_email_available(email: &str, pool: &SqlitePool) -> bool {
    let email = email.to_lowercase();

    // 1. Cuckoo filter - fast negative
    // if the filter says not present, the email was never registered
    if !email_filter::might_exist(&email) {
        return true;
    }

    // 2. Moka cache - fast positive
    if email_cache::is_taken(&email).await {
        return false;
    }

    // 3. Database fallback
    let exists = sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS(SELECT 1 FROM employees WHERE email = ? LIMIT 1)",
    )
    .bind(&email)
    .fetch_one(pool)
    .await
    .unwrap_or(true); // fail-safe

    !exists
}

/// Employee registration handler
#[utoipa::path(
    post,
    path = "/register",
    request_body = RegisterReq,
    responses(
        (status = 200, description = "Employee registered successfully", body = Object, example = json!({
            "message": "Employee registered successfully"
        })),
        (status = 400, description = "Missing or empty required fields"),
        (status = 409, description = "Email already registered")
    ),
    tag = "Auth"
)]
pub async fn register(
    req: web::Json<RegisterReq>,
    pool: web::Data<SqlitePool>,
) -> Result<HttpResponse, ApiError> {
    let name = req.name.trim();
    let email = req.email.trim();

    if name.is_empty() || email.is_empty() || req.password.is_empty() {
        return Err(ApiError::Validation(
            "name, email and password must not be empty".to_string(),
        ));
    }

    if !is_email_available(email, pool.get_ref()).await {
        return Err(ApiError::Conflict("Email already registered".to_string()));
    }

    // Safe to insert after the availability check; the UNIQUE constraint
    // still backstops a losing race
    insert_employee(&req, pool.get_ref()).await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Employee registered successfully"
    })))
}

/// Login handler, issues a bearer token bound to the employee's real id
#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginReq,
    responses(
        (status = 200, description = "Token issued", body = LoginResponse),
        (status = 401, description = "Invalid credentials")
    ),
    tag = "Auth"
)]
#[instrument(
    name = "auth_login",
    skip(pool, config, req),
    fields(email = %req.email)
)]
pub async fn login(
    req: web::Json<LoginReq>,
    pool: web::Data<SqlitePool>,
    config: web::Data<Config>,
) -> Result<HttpResponse, ApiError> {
    info!("Login request received");

    if req.email.trim().is_empty() || req.password.is_empty() {
        info!("Validation failed: empty email or password");
        return Err(ApiError::Validation("email and password required".to_string()));
    }

    debug!("Fetching employee from database");

    let employee = sqlx::query_as::<_, EmployeeAuthSql>(
        r#"
        SELECT id, email, password_hash
        FROM employees
        WHERE email = ?
        "#,
    )
    .bind(req.email.trim().to_lowercase())
    .fetch_optional(pool.get_ref())
    .await?;

    // Single undifferentiated failure message: no hint on which of
    // email/password was wrong
    let employee = match employee {
        Some(e) => e,
        None => {
            info!("Invalid credentials: employee not found");
            return Err(ApiError::Auth("Invalid credentials".to_string()));
        }
    };

    debug!(employee_id = employee.id, "Verifying password");

    if verify_password(&req.password, &employee.password_hash).is_err() {
        info!("Invalid credentials: password mismatch");
        return Err(ApiError::Auth("Invalid credentials".to_string()));
    }

    debug!("Generating access token");

    let access_token = generate_access_token(
        employee.id,
        employee.email,
        &config.jwt_secret,
        config.access_token_ttl,
    )
    .map_err(|e| ApiError::Internal(anyhow::anyhow!("token generation failed: {e}")))?;

    info!("Login successful");

    Ok(HttpResponse::Ok().json(LoginResponse { access_token }))
}
