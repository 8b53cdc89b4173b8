pub mod commands;
pub mod config;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;

pub use config::Config;
pub use state::AppState;
