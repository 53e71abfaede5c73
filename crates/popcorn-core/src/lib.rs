pub mod config;
pub mod connectivity;
pub mod controller;
pub mod error;
pub mod loader;
pub mod locale;
pub mod models;
pub mod saved_state;
pub mod session;
