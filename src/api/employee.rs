use crate::{
    config::Config,
    model::employee::{Employee, EmployeeForm, FieldError},
    session::SessionContext,
    utils::{
        pagination::{PageWindow, PaginatedList},
        query::{SortField, search_filter},
    },
};
use actix_web::{HttpResponse, Responder, error::ErrorInternalServerError, http::header, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::MySqlPool;
use tracing::{debug, error, info};
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IndexQuery {
    pub search_string: Option<String>,
    pub order_by_string: Option<String>,
    /// 1-based. Absent or non-numeric falls back to page 1; out-of-range
    /// values clamp to the nearest boundary page.
    pub page_index: Option<String>,
    /// Echoed for the display layer; no reverse ordering is wired.
    pub sort_type: Option<String>,
}

/// View model for the list page: the page slice plus everything the display
/// layer needs to rebuild the search box, column headers and pager.
#[derive(Serialize, ToSchema)]
pub struct EmployeeIndexModel {
    pub username: Option<String>,
    pub page_size: i64,
    pub search_string: Option<String>,
    pub order_by_string: Option<String>,
    pub sort_type: Option<String>,
    pub employees: Vec<Employee>,
    #[schema(example = 1)]
    pub page_index: i64,
    #[schema(example = 3)]
    pub total_pages: i64,
    pub has_previous_page: bool,
    pub has_next_page: bool,
}

/// Redisplay payload when Create/Edit validation fails: the submitted values
/// come back with the errors so the form can be re-rendered filled in.
#[derive(Serialize, ToSchema)]
pub struct FormRedisplay {
    pub values: EmployeeForm,
    pub errors: Vec<FieldError>,
}

fn redirect_to_index() -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, "/Employees"))
        .finish()
}

fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(json!({ "message": "Employee not found" }))
}

fn redisplay(values: EmployeeForm, errors: Vec<FieldError>) -> HttpResponse {
    HttpResponse::UnprocessableEntity().json(FormRedisplay { values, errors })
}

async fn fetch_employee(pool: &MySqlPool, id: i32) -> Result<Option<Employee>, sqlx::Error> {
    sqlx::query_as::<_, Employee>(
        r#"
        SELECT id, first_name, last_name, gender, birth, address, phone, email, department
        FROM employees
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Existence predicate; only used to tell a concurrent delete apart from a
/// concurrent modification when an update writes zero rows.
async fn employee_exists(pool: &MySqlPool, id: i32) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM employees WHERE id = ? LIMIT 1)")
        .bind(id)
        .fetch_one(pool)
        .await
}

/// Outcome of the full-row overwrite on Edit. The caller decides how each
/// case surfaces; nothing is retried or merged here.
#[derive(Debug, PartialEq, Eq)]
pub enum UpdateOutcome {
    Updated,
    NotFound,
    Conflict,
}

async fn update_employee_row(
    pool: &MySqlPool,
    employee: &Employee,
) -> Result<UpdateOutcome, sqlx::Error> {
    let affected = sqlx::query(
        r#"
        UPDATE employees
        SET first_name = ?, last_name = ?, gender = ?, birth = ?,
            address = ?, phone = ?, email = ?, department = ?
        WHERE id = ?
        "#,
    )
    .bind(&employee.first_name)
    .bind(&employee.last_name)
    .bind(&employee.gender)
    .bind(employee.birth)
    .bind(&employee.address)
    .bind(&employee.phone)
    .bind(&employee.email)
    .bind(&employee.department)
    .bind(employee.id)
    .execute(pool)
    .await?
    .rows_affected();

    if affected > 0 {
        Ok(UpdateOutcome::Updated)
    } else if !employee_exists(pool, employee.id).await? {
        Ok(UpdateOutcome::NotFound)
    } else {
        Ok(UpdateOutcome::Conflict)
    }
}

/// List employees: search, sort, paginate
#[utoipa::path(
    get,
    path = "/Employees",
    params(
        ("searchString" = Option<String>, Query, description = "Exact id or name substring"),
        ("orderByString" = Option<String>, Query, description = "Sortable column name (Id, FirstName, LastName, Gender, Birth, Address, Phone, Email, Department)"),
        ("pageIndex" = Option<String>, Query, description = "1-based page number"),
        ("sortType" = Option<String>, Query, description = "Echoed back unchanged")
    ),
    responses(
        (status = 200, description = "One page of the filtered list", body = EmployeeIndexModel)
    ),
    tag = "Employees"
)]
pub async fn index(
    pool: web::Data<MySqlPool>,
    config: web::Data<Config>,
    query: web::Query<IndexQuery>,
    ctx: SessionContext,
) -> actix_web::Result<impl Responder> {
    let page_size = config.page_size;

    let search_term = query
        .search_string
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());

    let (where_clause, binds) = match search_term {
        Some(term) => {
            let filter = search_filter(term);
            (format!("WHERE {}", filter.clause), filter.binds)
        }
        None => (String::new(), Vec::new()),
    };

    // ---------- total count ----------
    let count_sql = format!("SELECT COUNT(*) FROM employees {}", where_clause);
    debug!(sql = %count_sql, binds = ?binds, "Counting employees");

    let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
    for b in &binds {
        count_query = count_query.bind(b);
    }

    let total = count_query.fetch_one(pool.get_ref()).await.map_err(|e| {
        error!(error = %e, sql = %count_sql, "Failed to count employees");
        ErrorInternalServerError("Database error")
    })?;

    let requested_page = query
        .page_index
        .as_deref()
        .and_then(|s| s.trim().parse::<i64>().ok())
        .unwrap_or(1);
    let window = PageWindow::resolve(total, requested_page, page_size);

    let order_clause = SortField::parse(query.order_by_string.as_deref())
        .map(SortField::order_clause)
        .unwrap_or("");

    // ---------- page slice ----------
    let data_sql = format!(
        "SELECT id, first_name, last_name, gender, birth, address, phone, email, department \
         FROM employees {} {} LIMIT ? OFFSET ?",
        where_clause, order_clause
    );
    debug!(sql = %data_sql, page_index = window.page_index, total, "Fetching employee page");

    let mut data_query = sqlx::query_as::<_, Employee>(&data_sql);
    for b in &binds {
        data_query = data_query.bind(b);
    }
    data_query = data_query.bind(window.limit).bind(window.offset);

    let employees = data_query.fetch_all(pool.get_ref()).await.map_err(|e| {
        error!(error = %e, sql = %data_sql, "Failed to fetch employees");
        ErrorInternalServerError("Database error")
    })?;

    let page = PaginatedList::new(employees, &window);
    let query = query.into_inner();

    Ok(HttpResponse::Ok().json(EmployeeIndexModel {
        username: ctx.username,
        page_size,
        search_string: query.search_string,
        order_by_string: query.order_by_string,
        sort_type: query.sort_type,
        has_previous_page: page.has_previous_page(),
        has_next_page: page.has_next_page(),
        employees: page.items,
        page_index: page.page_index,
        total_pages: page.total_pages,
    }))
}

/// Employee details
#[utoipa::path(
    get,
    path = "/Employees/Details/{id}",
    params(("id" = i32, Path, description = "Employee id")),
    responses(
        (status = 200, description = "Employee found", body = Employee),
        (status = 404, description = "Employee not found")
    ),
    tag = "Employees"
)]
pub async fn details(
    pool: web::Data<MySqlPool>,
    path: web::Path<i32>,
) -> actix_web::Result<impl Responder> {
    let id = path.into_inner();

    let employee = fetch_employee(pool.get_ref(), id).await.map_err(|e| {
        error!(error = %e, id, "Failed to fetch employee");
        ErrorInternalServerError("Database error")
    })?;

    match employee {
        Some(emp) => Ok(HttpResponse::Ok().json(emp)),
        None => Ok(not_found()),
    }
}

/// Create form; only shown to logged-in users
#[utoipa::path(
    get,
    path = "/Employees/Create",
    responses(
        (status = 200, description = "Blank create form"),
        (status = 303, description = "Not logged in, redirect to login")
    ),
    tag = "Employees"
)]
pub async fn create_form(ctx: SessionContext) -> impl Responder {
    if ctx.is_not_login() {
        info!("Create form requested without login, redirecting");
        return HttpResponse::SeeOther()
            .insert_header((header::LOCATION, "/EmployeesLogin/Login"))
            .finish();
    }
    HttpResponse::Ok().json(json!({
        "username": ctx.username,
        "employee": null
    }))
}

/// Create employee
#[utoipa::path(
    post,
    path = "/Employees/Create",
    request_body(content = EmployeeForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Created, redirect to list"),
        (status = 422, description = "Validation failed, form redisplayed", body = FormRedisplay)
    ),
    tag = "Employees"
)]
pub async fn create(
    pool: web::Data<MySqlPool>,
    form: web::Form<EmployeeForm>,
) -> actix_web::Result<impl Responder> {
    let form = form.into_inner();

    let birth = match form.validate() {
        Ok(birth) => birth,
        Err(errors) => return Ok(redisplay(form, errors)),
    };

    // The store assigns the id; a submitted one is ignored.
    sqlx::query(
        r#"
        INSERT INTO employees
        (first_name, last_name, gender, birth, address, phone, email, department)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&form.first_name)
    .bind(&form.last_name)
    .bind(&form.gender)
    .bind(birth)
    .bind(&form.address)
    .bind(&form.phone)
    .bind(&form.email)
    .bind(&form.department)
    .execute(pool.get_ref())
    .await
    .map_err(|e| {
        error!(error = %e, "Failed to create employee");
        ErrorInternalServerError("Database error")
    })?;

    Ok(redirect_to_index())
}

/// Edit form
#[utoipa::path(
    get,
    path = "/Employees/Edit/{id}",
    params(("id" = i32, Path, description = "Employee id")),
    responses(
        (status = 200, description = "Employee to edit", body = Employee),
        (status = 404, description = "Employee not found")
    ),
    tag = "Employees"
)]
pub async fn edit_form(
    pool: web::Data<MySqlPool>,
    path: web::Path<i32>,
) -> actix_web::Result<impl Responder> {
    let id = path.into_inner();

    let employee = fetch_employee(pool.get_ref(), id).await.map_err(|e| {
        error!(error = %e, id, "Failed to fetch employee");
        ErrorInternalServerError("Database error")
    })?;

    match employee {
        Some(emp) => Ok(HttpResponse::Ok().json(emp)),
        None => Ok(not_found()),
    }
}

/// Edit employee (full-row replace)
#[utoipa::path(
    post,
    path = "/Employees/Edit/{id}",
    params(("id" = i32, Path, description = "Employee id, must match the payload id")),
    request_body(content = EmployeeForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Updated, redirect to list"),
        (status = 404, description = "Id mismatch or employee gone"),
        (status = 422, description = "Validation failed, form redisplayed", body = FormRedisplay),
        (status = 500, description = "Concurrent modification conflict")
    ),
    tag = "Employees"
)]
pub async fn edit(
    pool: web::Data<MySqlPool>,
    path: web::Path<i32>,
    form: web::Form<EmployeeForm>,
) -> actix_web::Result<impl Responder> {
    let id = path.into_inner();
    let form = form.into_inner();

    // The path id is authoritative; a payload disagreeing with it is rejected
    // before the store is touched.
    if form.id != Some(id) {
        info!(path_id = id, form_id = ?form.id, "Edit id mismatch");
        return Ok(not_found());
    }

    let birth = match form.validate() {
        Ok(birth) => birth,
        Err(errors) => return Ok(redisplay(form, errors)),
    };

    let employee = form.into_employee(id, birth);

    let outcome = update_employee_row(pool.get_ref(), &employee)
        .await
        .map_err(|e| {
            error!(error = %e, id, "Failed to update employee");
            ErrorInternalServerError("Database error")
        })?;

    match outcome {
        UpdateOutcome::Updated => Ok(redirect_to_index()),
        UpdateOutcome::NotFound => Ok(not_found()),
        UpdateOutcome::Conflict => {
            // No merge/retry policy exists; surface the conflict as fatal.
            error!(id, "Concurrent modification detected while updating employee");
            Err(ErrorInternalServerError("Concurrent modification conflict"))
        }
    }
}

/// Delete confirmation view; no mutation happens on GET
#[utoipa::path(
    get,
    path = "/Employees/Delete/{id}",
    params(("id" = i32, Path, description = "Employee id")),
    responses(
        (status = 200, description = "Employee pending confirmation", body = Employee),
        (status = 404, description = "Employee not found")
    ),
    tag = "Employees"
)]
pub async fn delete_form(
    pool: web::Data<MySqlPool>,
    path: web::Path<i32>,
) -> actix_web::Result<impl Responder> {
    let id = path.into_inner();

    let employee = fetch_employee(pool.get_ref(), id).await.map_err(|e| {
        error!(error = %e, id, "Failed to fetch employee");
        ErrorInternalServerError("Database error")
    })?;

    match employee {
        Some(emp) => Ok(HttpResponse::Ok().json(emp)),
        None => Ok(not_found()),
    }
}

/// Delete employee (confirmed)
#[utoipa::path(
    post,
    path = "/Employees/Delete/{id}",
    params(("id" = i32, Path, description = "Employee id")),
    responses(
        (status = 303, description = "Deleted, redirect to list"),
        (status = 404, description = "Employee already gone")
    ),
    tag = "Employees"
)]
pub async fn delete_confirmed(
    pool: web::Data<MySqlPool>,
    path: web::Path<i32>,
) -> actix_web::Result<impl Responder> {
    let id = path.into_inner();

    let affected = sqlx::query("DELETE FROM employees WHERE id = ?")
        .bind(id)
        .execute(pool.get_ref())
        .await
        .map_err(|e| {
            error!(error = %e, id, "Failed to delete employee");
            ErrorInternalServerError("Database error")
        })?
        .rows_affected();

    // A row removed between the confirmation view and this request is treated
    // as already deleted rather than a fault.
    if affected == 0 {
        return Ok(not_found());
    }

    info!(id, "Employee deleted");
    Ok(redirect_to_index())
}
