use crate::api::employee::EmployeeResponse;
use crate::api::meeting::{MeetingListResponse, MeetingSummary, Pagination};
use crate::model::meeting::Meeting;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "MeetHub API",
        version = "1.0.0",
        description = r#"
## MeetHub

Backend for admin/user authentication, employee records, and meeting
scheduling.

### Key Features
- **Credential Accounts**
  - Register and log in as admin or user (no token issuance)
- **Employee Management**
  - Create, update, list, view, and delete employee records
- **Meeting Scheduling**
  - Full meeting lifecycle with pagination and ISO-8601 datetimes

### Response Format
- JSON-based RESTful responses
- Error bodies carry an `error` key; 500s add `details`

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::auth::handlers::register_admin,
        crate::auth::handlers::login_admin,
        crate::auth::handlers::register_user,
        crate::auth::handlers::login_user,

        crate::api::employee::create_employee,
        crate::api::employee::get_employee,
        crate::api::employee::list_employees,
        crate::api::employee::update_employee,
        crate::api::employee::delete_employee,

        crate::api::meeting::create_meeting,
        crate::api::meeting::list_meetings,
        crate::api::meeting::get_meeting,
        crate::api::meeting::update_meeting,
        crate::api::meeting::delete_meeting
    ),
    components(
        schemas(
            EmployeeResponse,
            Meeting,
            MeetingSummary,
            MeetingListResponse,
            Pagination
        )
    ),
    tags(
        (name = "Auth", description = "Admin and user credential APIs"),
        (name = "Employee", description = "Employee management APIs"),
        (name = "Meeting", description = "Meeting scheduling APIs"),
    )
)]
pub struct ApiDoc;
