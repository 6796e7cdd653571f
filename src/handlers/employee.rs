use actix_web::http::{header, StatusCode};
use actix_web::{web, HttpResponse};
use log::{info, warn};
use serde::{Deserialize, Deserializer};
use validator::Validate;

use crate::db::RecordStore;
use crate::errors::AppError;
use crate::models::employee::NewEmployee;
use crate::utils::session::{Flash, SessionContext};
use crate::utils::validation::{validate_payload, validate_web_url};
use crate::views::{render, EmployeesPage, NewEmployeePage, SubmittedPage};

/// Raw submission form. Every field arrives as text and missing fields
/// deserialize as empty so they can be reported alongside the others.
#[derive(Deserialize, Validate, Default, Debug, Clone)]
pub struct EmployeeForm {
    #[serde(default)]
    #[validate(length(min = 1))]
    pub name: String,
    #[serde(default)]
    #[validate(length(min = 1))]
    pub age: String,
    #[serde(default)]
    #[validate(length(min = 1))]
    pub department: String,
    #[serde(default)]
    pub city: String,
    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(url, custom = "validate_web_url")]
    pub works_url: Option<String>,
    #[serde(default)]
    pub contact: String,
}

impl EmployeeForm {
    fn trimmed(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            age: self.age.trim().to_string(),
            department: self.department.trim().to_string(),
            city: self.city.trim().to_string(),
            works_url: self
                .works_url
                .map(|url| url.trim().to_string())
                .filter(|url| !url.is_empty()),
            contact: self.contact.trim().to_string(),
        }
    }

    /// Value echoed back into the form's works_url input.
    pub fn works_url_value(&self) -> &str {
        self.works_url.as_deref().unwrap_or_default()
    }

    /// Presence checks first, then the age must be a positive whole number.
    pub fn to_new_employee(&self) -> Result<NewEmployee, AppError> {
        validate_payload(self)?;
        let age = parse_age(&self.age)?;
        Ok(NewEmployee {
            name: self.name.clone(),
            age,
            department: self.department.clone(),
            city: optional(&self.city),
            works_url: self.works_url.clone(),
            contact: optional(&self.contact),
        })
    }
}

fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty()))
}

fn parse_age(raw: &str) -> Result<i32, AppError> {
    match raw.parse::<i32>() {
        Ok(age) if age > 0 => Ok(age),
        _ => Err(AppError::Validation("Age must be a positive whole number.".to_string())),
    }
}

fn optional(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

pub async fn get_employees(
    session: SessionContext,
    store: web::Data<dyn RecordStore>,
) -> Result<HttpResponse, AppError> {
    let admin_name = session.require_admin()?;
    let employees = store.list_employees().await?;
    render(
        StatusCode::OK,
        &EmployeesPage {
            flash: session.take_flash(),
            admin_name,
            employees,
        },
    )
}

/// JSON listing. Unlike [`get_employees`] this route is not admin-gated.
pub async fn api_employees(store: web::Data<dyn RecordStore>) -> Result<HttpResponse, AppError> {
    let employees = store.list_employees().await?;
    Ok(HttpResponse::Ok().json(employees))
}

pub async fn new_employee(session: SessionContext) -> Result<HttpResponse, AppError> {
    render(
        StatusCode::OK,
        &NewEmployeePage {
            flash: session.take_flash(),
            form: EmployeeForm::default(),
        },
    )
}

pub async fn create_employee(
    store: web::Data<dyn RecordStore>,
    form: web::Form<EmployeeForm>,
) -> Result<HttpResponse, AppError> {
    let form = form.into_inner().trimmed();

    let new_employee = match form.to_new_employee() {
        Ok(new_employee) => new_employee,
        Err(AppError::Validation(msg)) => {
            return render(
                StatusCode::BAD_REQUEST,
                &NewEmployeePage {
                    flash: Some(Flash::warning(msg)),
                    form,
                },
            );
        }
        Err(err) => return Err(err),
    };

    let id = store.create_employee(&new_employee).await?;
    info!("Employee {} created", id);

    Ok(see_other("/employees/submitted"))
}

pub async fn employee_submitted(session: SessionContext) -> Result<HttpResponse, AppError> {
    render(
        StatusCode::OK,
        &SubmittedPage {
            flash: session.take_flash(),
        },
    )
}

pub async fn delete_employee(
    session: SessionContext,
    store: web::Data<dyn RecordStore>,
    employee_id: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let admin_name = session.require_admin()?;
    let employee_id = employee_id.into_inner();

    store.delete_employee(employee_id).await?;
    info!("Employee {} deleted by {}", employee_id, admin_name);

    session.flash(Flash::info("Employee record deleted."))?;
    Ok(see_other("/employees"))
}

/// Startup notice for the unauthenticated JSON listing.
pub fn warn_public_api() {
    warn!("/api/employees is served without an admin session check");
}
