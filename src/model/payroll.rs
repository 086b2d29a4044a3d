use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Payroll {
    pub id: i64,
    pub employee_id: i64,
    pub gross_salary: f64,
    pub tax_deductions: f64,
    /// Always `gross_salary - tax_deductions`, recomputed on every write
    pub net_salary: f64,
}
