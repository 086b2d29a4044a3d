use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Benefits {
    pub id: i64,
    pub employee_id: i64,
    pub health_insurance: bool,
    pub retirement_plan: bool,
    pub vacation_days: i64,
}
