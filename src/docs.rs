use crate::api::employee::{EmployeeIndexModel, FormRedisplay, IndexQuery};
use crate::model::employee::{Employee, EmployeeForm, FieldError};
use crate::models::LoginForm;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Employee Management API",
        version = "1.0.0",
        description = r#"
## Employee Management

Data-entry service for employee records.

### Key Features
- **Employee Records**
  - List with free-text search, column sorting and pagination
  - Details, create, edit and delete with confirmation
- **Login**
  - Session-based login gate on the create form

### Response Format
- Handlers return JSON view models for the display layer
- Successful mutations answer with a redirect to the employee list

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::employee::index,
        crate::api::employee::details,
        crate::api::employee::create_form,
        crate::api::employee::create,
        crate::api::employee::edit_form,
        crate::api::employee::edit,
        crate::api::employee::delete_form,
        crate::api::employee::delete_confirmed,

        crate::auth::handlers::login_form,
        crate::auth::handlers::login,
        crate::auth::handlers::logout,
    ),
    components(
        schemas(
            Employee,
            EmployeeForm,
            FieldError,
            IndexQuery,
            EmployeeIndexModel,
            FormRedisplay,
            LoginForm
        )
    ),
    tags(
        (name = "Employees", description = "Employee record pages"),
        (name = "EmployeesLogin", description = "Login entry point"),
    )
)]
pub struct ApiDoc;
