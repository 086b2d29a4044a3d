use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// API-visible employee record. The password hash lives only in the
/// credential row used by login and is never serialized.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "id": 1,
        "name": "John Doe",
        "email": "john.doe@company.com",
        "job_title": "Engineer",
        "department": "Engineering",
        "salary": 5000.0
    })
)]
pub struct Employee {
    #[schema(example = 1)]
    pub id: i64,

    #[schema(example = "John Doe")]
    pub name: String,

    #[schema(example = "john.doe@company.com")]
    pub email: String,

    #[schema(example = "Engineer")]
    pub job_title: String,

    #[schema(example = "Engineering")]
    pub department: String,

    #[schema(example = 5000.0)]
    pub salary: f64,
}
