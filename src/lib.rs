//! Employee directory: a public submission form and an admin-gated listing
//! over a single Postgres table.

pub mod config;
pub mod db;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod utils;
pub mod views;
