//! Request echo server library.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod render;
pub mod security;

pub use config::schema::EchoConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
