pub mod auth_service;
pub mod errors;
pub mod models;
pub mod ports;
pub mod profile_service;
