use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct LeaveRequest {
    pub id: i64,
    pub employee_id: i64,
    #[schema(example = "Sick")]
    pub leave_type: String,
    #[schema(example = "2024-01-05", format = "date", value_type = String)]
    pub start_date: NaiveDate,
    #[schema(example = "2024-01-07", format = "date", value_type = String)]
    pub end_date: NaiveDate,
    #[schema(example = "Pending")]
    pub status: String,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum LeaveStatus {
    Pending,
    Approved,
    Denied,
}

impl LeaveStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LeaveStatus::Pending => "Pending",
            LeaveStatus::Approved => "Approved",
            LeaveStatus::Denied => "Denied",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Pending" => Some(LeaveStatus::Pending),
            "Approved" => Some(LeaveStatus::Approved),
            "Denied" => Some(LeaveStatus::Denied),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_its_string_form() {
        for status in [LeaveStatus::Pending, LeaveStatus::Approved, LeaveStatus::Denied] {
            assert_eq!(LeaveStatus::parse(status.as_str()), Some(status));
        }
    }

    #[test]
    fn unknown_and_lowercase_statuses_are_rejected() {
        assert_eq!(LeaveStatus::parse("Cancelled"), None);
        assert_eq!(LeaveStatus::parse("pending"), None);
    }
}
