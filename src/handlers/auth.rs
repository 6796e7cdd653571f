use actix_web::http::{header, StatusCode};
use actix_web::{web, HttpResponse};
use log::{info, warn};
use serde::Deserialize;

use crate::db::RecordStore;
use crate::errors::AppError;
use crate::utils::password::{verify_against_dummy, verify_password};
use crate::utils::session::{Flash, SessionContext};
use crate::views::{render, IndexPage, LoginPage};

/// Shown for both unknown usernames and wrong passwords.
const INVALID_CREDENTIALS: &str = "Invalid username or password.";

#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    username: String,
    #[serde(default)]
    password: String,
}

pub async fn index(session: SessionContext) -> Result<HttpResponse, AppError> {
    render(
        StatusCode::OK,
        &IndexPage {
            flash: session.take_flash(),
            admin_name: session.admin_name()?,
        },
    )
}

pub async fn login_form(session: SessionContext) -> Result<HttpResponse, AppError> {
    render(
        StatusCode::OK,
        &LoginPage {
            flash: session.take_flash(),
            username: String::new(),
        },
    )
}

pub async fn login(
    session: SessionContext,
    store: web::Data<dyn RecordStore>,
    req: web::Form<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    let req = req.into_inner();
    let username = req.username.trim();

    match authenticate(store.get_ref(), username, &req.password).await {
        Ok(()) => {
            session.login(username)?;
            info!("Admin {} logged in", username);
            Ok(HttpResponse::SeeOther()
                .insert_header((header::LOCATION, "/employees"))
                .finish())
        }
        Err(AppError::Authentication(msg)) => {
            warn!("Failed login attempt for {:?}", username);
            render(
                StatusCode::UNAUTHORIZED,
                &LoginPage {
                    flash: Some(Flash::danger(msg)),
                    username: username.to_string(),
                },
            )
        }
        Err(err) => Err(err),
    }
}

pub async fn logout(session: SessionContext) -> Result<HttpResponse, AppError> {
    session.logout();
    session.flash(Flash::info("You have been logged out."))?;
    Ok(HttpResponse::SeeOther()
        .insert_header((header::LOCATION, "/"))
        .finish())
}

/// Unknown usernames still pay for a hash verification, and both failure
/// modes return the same error.
async fn authenticate(store: &dyn RecordStore, username: &str, password: &str) -> Result<(), AppError> {
    let verified = match store.find_admin_by_username(username).await? {
        Some(admin) => verify_password(password, &admin.password_hash),
        None => {
            verify_against_dummy(password);
            false
        }
    };

    if verified {
        Ok(())
    } else {
        Err(AppError::Authentication(INVALID_CREDENTIALS.to_string()))
    }
}
