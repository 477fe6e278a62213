//! Core translation engine module

pub mod client;
pub mod config;
pub mod dispatcher;
pub mod errors;
pub mod models;
pub mod pool;
pub mod segment;
pub mod timeout;
pub mod wire;
