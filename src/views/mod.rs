//! Askama page models. Each struct maps to one file under `templates/`.

use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use askama::Template;

use crate::errors::AppError;
use crate::handlers::employee::EmployeeForm;
use crate::models::employee::Employee;
use crate::utils::session::Flash;

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexPage {
    pub flash: Option<Flash>,
    pub admin_name: Option<String>,
}

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginPage {
    pub flash: Option<Flash>,
    pub username: String,
}

#[derive(Template)]
#[template(path = "employees.html")]
pub struct EmployeesPage {
    pub flash: Option<Flash>,
    pub admin_name: String,
    pub employees: Vec<Employee>,
}

#[derive(Template)]
#[template(path = "employee_new.html")]
pub struct NewEmployeePage {
    pub flash: Option<Flash>,
    pub form: EmployeeForm,
}

#[derive(Template)]
#[template(path = "submitted.html")]
pub struct SubmittedPage {
    pub flash: Option<Flash>,
}

pub fn render<T: Template>(status: StatusCode, page: &T) -> Result<HttpResponse, AppError> {
    let html = page.render()?;
    Ok(HttpResponse::build(status)
        .content_type("text/html; charset=utf-8")
        .body(html))
}
