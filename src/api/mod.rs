//! HTTP front end for trajectory computation

pub mod handlers;
pub mod models;
pub mod routes;

pub use routes::create_router;
