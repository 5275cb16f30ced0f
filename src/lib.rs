pub mod admin_manager;
pub mod admin_server;
pub mod authorization;
pub mod config;
pub mod error;
pub mod new_users;
pub mod organization;
pub mod platform;
pub mod routes;
pub mod user;
pub mod views;
