//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request:
//!     → limits.rs (request timeout, body size)
//!     → handler
//! Outgoing response:
//!     → headers.rs (nosniff, frame denial)
//! ```
//!
//! # Design Decisions
//! - Fail closed: oversized bodies never reach a handler
//! - Security headers are on unless disabled in config

pub mod headers;
pub mod limits;

pub use headers::apply_security_headers;
pub use limits::apply_limits;
