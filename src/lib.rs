pub mod auth;
pub mod config;
pub mod error;
pub mod identity;
pub mod models;
pub mod routes;
pub mod upstream;
