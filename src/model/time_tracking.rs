use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct TimeTracking {
    pub id: i64,
    pub employee_id: i64,
    /// Additive counter, incremented by clock-out
    pub hours_worked: f64,
    /// Additive counter, incremented by clock-out
    pub overtime_hours: f64,
}
