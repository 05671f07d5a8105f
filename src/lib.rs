pub mod api;
pub mod config;
pub mod error;
pub mod export;
pub mod listing;
pub mod models;
pub mod render;
pub mod services;
pub mod session;
