//! Session helpers so handlers deal in admin state and flash messages rather
//! than raw cookie keys.

use actix_session::config::{CookieContentSecurity, PersistentSession};
use actix_session::storage::CookieSessionStore;
use actix_session::{Session, SessionExt, SessionMiddleware};
use actix_web::cookie::{time, SameSite};
use actix_web::{dev::Payload, FromRequest, HttpRequest};
use log::warn;
use serde::{Deserialize, Serialize};
use std::future::{ready, Ready};

use crate::config::SessionSettings;
use crate::errors::AppError;

pub const SESSION_COOKIE: &str = "session";
const IS_ADMIN_KEY: &str = "is_admin";
const ADMIN_NAME_KEY: &str = "admin_name";
const FLASH_KEY: &str = "flash";

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FlashLevel {
    Info,
    Warning,
    Danger,
}

impl FlashLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlashLevel::Info => "info",
            FlashLevel::Warning => "warning",
            FlashLevel::Danger => "danger",
        }
    }
}

/// One-shot message shown on the next rendered page.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Flash {
    pub level: FlashLevel,
    pub message: String,
}

impl Flash {
    pub fn info(message: impl Into<String>) -> Self {
        Self { level: FlashLevel::Info, message: message.into() }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self { level: FlashLevel::Warning, message: message.into() }
    }

    pub fn danger(message: impl Into<String>) -> Self {
        Self { level: FlashLevel::Danger, message: message.into() }
    }
}

/// Per-request view of the browser session, passed into each handler.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    pub fn is_admin(&self) -> Result<bool, AppError> {
        let flag = self
            .0
            .get::<bool>(IS_ADMIN_KEY)
            .map_err(|err| AppError::InternalServerError(format!("failed to read session: {}", err)))?;
        Ok(flag.unwrap_or(false))
    }

    pub fn admin_name(&self) -> Result<Option<String>, AppError> {
        if !self.is_admin()? {
            return Ok(None);
        }
        self.0
            .get::<String>(ADMIN_NAME_KEY)
            .map_err(|err| AppError::InternalServerError(format!("failed to read session: {}", err)))
    }

    /// Return the admin's display name, or queue a warning and fail with
    /// [`AppError::Unauthorized`] so the caller is redirected to login.
    pub fn require_admin(&self) -> Result<String, AppError> {
        match self.admin_name()? {
            Some(name) => Ok(name),
            None => {
                self.flash(Flash::warning("Please log in as an administrator to continue."))?;
                Err(AppError::Unauthorized("admin session required".to_string()))
            }
        }
    }

    pub fn login(&self, username: &str) -> Result<(), AppError> {
        self.0.renew();
        self.insert(IS_ADMIN_KEY, true)?;
        self.insert(ADMIN_NAME_KEY, username)
    }

    /// Drop all session state. The cookie is kept so a flash can follow.
    pub fn logout(&self) {
        self.0.clear();
        self.0.renew();
    }

    pub fn flash(&self, flash: Flash) -> Result<(), AppError> {
        self.insert(FLASH_KEY, flash)
    }

    pub fn take_flash(&self) -> Option<Flash> {
        match self.0.remove_as::<Flash>(FLASH_KEY)? {
            Ok(flash) => Some(flash),
            Err(raw) => {
                warn!("discarding unreadable flash message: {}", raw);
                None
            }
        }
    }

    fn insert<T: Serialize>(&self, key: &str, value: T) -> Result<(), AppError> {
        self.0
            .insert(key, value)
            .map_err(|err| AppError::InternalServerError(format!("failed to persist session: {}", err)))
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(Ok(SessionContext::new(req.get_session())))
    }
}

/// Cookie-backed session middleware; the cookie is signed and encrypted with
/// the configured key.
pub fn session_middleware(settings: &SessionSettings) -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), settings.key.clone())
        .cookie_name(SESSION_COOKIE.to_string())
        .cookie_path("/".to_string())
        .cookie_secure(settings.cookie_secure)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(SameSite::Lax)
        .session_lifecycle(
            PersistentSession::default().session_ttl(time::Duration::minutes(settings.ttl_minutes)),
        )
        .build()
}
