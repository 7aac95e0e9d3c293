//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, mount per route, middleware)
//!     → request.rs (request ID, adapt parts to RequestView)
//!     → render (echo or hello page)
//!     → response.rs (HTML content type, error mapping)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{AxumRequestView, UuidRequestId, X_REQUEST_ID};
pub use response::{HtmlPage, HTML_CONTENT_TYPE};
pub use server::HttpServer;
