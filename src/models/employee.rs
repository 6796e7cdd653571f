use serde::{Deserialize, Serialize};

use crate::utils::validation::is_web_url;

#[derive(sqlx::FromRow, Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Employee {
    pub id: i64,
    pub name: String,
    pub age: i32,
    pub department: String,
    pub city: Option<String>,
    pub works_url: Option<String>,
    pub contact: Option<String>,
}

impl Employee {
    /// works_url when it is safe to use as an `href`.
    pub fn works_link(&self) -> Option<&str> {
        self.works_url.as_deref().filter(|url| is_web_url(url))
    }

    /// works_url when it must be shown as plain text instead of a link.
    pub fn works_text(&self) -> Option<&str> {
        self.works_url.as_deref().filter(|url| !is_web_url(url))
    }
}

/// A submission that passed validation and is ready to be inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEmployee {
    pub name: String,
    pub age: i32,
    pub department: String,
    pub city: Option<String>,
    pub works_url: Option<String>,
    pub contact: Option<String>,
}
