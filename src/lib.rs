#![doc = "The `tasktally` library crate."]
#![doc = ""]
#![doc = "Domain models, authentication, persistence, routing, error handling and the"]
#![doc = "task statistics aggregator for the tasktally REST backend. The binary"]
#![doc = "(`main.rs`) wires these together into an actix-web server."]

pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod stats;
pub mod store;

pub use error::AppError;
pub use stats::{compute_stats, TaskStats};
