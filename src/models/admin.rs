use serde::Deserialize;

/// One administrator row. `password_hash` is an argon2 PHC string.
#[derive(sqlx::FromRow, Deserialize, Debug, Clone)]
pub struct AdminCredential {
    pub username: String,
    pub password_hash: String,
}
