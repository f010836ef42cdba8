pub mod config;
pub mod dtos;
pub mod graphql;
pub mod handlers;
pub mod models;
pub mod services;
pub mod startup;

pub use startup::{AppState, Application};
