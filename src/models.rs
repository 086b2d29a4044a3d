use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Deserialize, ToSchema)]
pub struct RegisterReq {
    #[schema(example = "John Doe")]
    pub name: String,
    #[schema(example = "john@email.com", format = "email", value_type = String)]
    pub email: String,
    #[schema(example = "Engineer")]
    pub job_title: String,
    #[schema(example = "Engineering")]
    pub department: String,
    #[schema(example = 5000.0)]
    pub salary: f64,
    pub password: String,
}

#[derive(Deserialize, ToSchema)]
pub struct LoginReq {
    #[schema(example = "john@email.com", format = "email", value_type = String)]
    pub email: String,
    pub password: String,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub access_token: String,
}

/// Credential row fetched at login. Never serialized.
#[derive(FromRow)]
pub struct EmployeeAuthSql {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Id of the authenticated employee (the real row id, not a placeholder)
    pub employee_id: i64,
    /// Employee email
    pub sub: String,
    pub exp: usize,
    pub jti: String,
}
