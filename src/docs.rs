use crate::api::benefits::{CreateBenefits, UpdateBenefits};
use crate::api::employee::UpdateEmployee;
use crate::api::leave_request::{CreateLeave, UpdateLeave};
use crate::api::payroll::{CreatePayroll, ProcessPayroll, UpdatePayroll};
use crate::api::time_tracking::{ClockIn, ClockOut};
use crate::model::benefits::Benefits;
use crate::model::employee::Employee;
use crate::model::leave_request::LeaveRequest;
use crate::model::payroll::Payroll;
use crate::model::time_tracking::TimeTracking;
use crate::models::{LoginReq, LoginResponse, RegisterReq};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi, openapi};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "HR Records API",
        version = "1.0.0",
        description = r#"
## HR Records System

This API manages core HR record keeping for an organization.

### Key Features
- **Employee Management**
  - Register, list, view, update and delete employee records
- **Leave Management**
  - Submit leave requests, track their status, list per employee
- **Payroll Management**
  - Per-employee payroll records with derived net salary
- **Time Tracking**
  - Clock-in entries with additive clock-out counters
- **Benefits**
  - Per-employee benefits enrollment

### Security
All endpoints except `/register` and `/login` require **JWT Bearer authentication**.

### Response Format
JSON-based RESTful responses; dates are ISO 8601 strings.
"#,
    ),
    paths(
        crate::auth::handlers::register,
        crate::auth::handlers::login,

        crate::api::employee::list_employees,
        crate::api::employee::get_employee,
        crate::api::employee::update_employee,
        crate::api::employee::delete_employee,

        crate::api::leave_request::list_leave_requests,
        crate::api::leave_request::list_leave_requests_by_employee,
        crate::api::leave_request::create_leave_request,
        crate::api::leave_request::update_leave_request,
        crate::api::leave_request::delete_leave_request,

        crate::api::payroll::list_payroll,
        crate::api::payroll::get_payroll,
        crate::api::payroll::create_payroll,
        crate::api::payroll::update_payroll,
        crate::api::payroll::process_payroll,
        crate::api::payroll::delete_payroll,

        crate::api::time_tracking::list_time_tracking,
        crate::api::time_tracking::clock_in,
        crate::api::time_tracking::clock_out,

        crate::api::benefits::list_benefits,
        crate::api::benefits::get_benefits,
        crate::api::benefits::create_benefits,
        crate::api::benefits::update_benefits,
        crate::api::benefits::delete_benefits,
    ),
    components(
        schemas(
            RegisterReq,
            LoginReq,
            LoginResponse,
            Employee,
            UpdateEmployee,
            LeaveRequest,
            CreateLeave,
            UpdateLeave,
            Payroll,
            CreatePayroll,
            UpdatePayroll,
            ProcessPayroll,
            TimeTracking,
            ClockIn,
            ClockOut,
            Benefits,
            CreateBenefits,
            UpdateBenefits
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Registration and login APIs"),
        (name = "Employee", description = "Employee management APIs"),
        (name = "Leave", description = "Leave request APIs"),
        (name = "Payroll", description = "Payroll management APIs"),
        (name = "TimeTracking", description = "Time tracking APIs"),
        (name = "Benefits", description = "Benefits enrollment APIs"),
    )
)]
pub struct ApiDoc;

pub struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
