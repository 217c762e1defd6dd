//! # Middleware Stack
//!
//! Tower middleware for the API layer:
//! - [`tracing_layer`]: request/response tracing with `TraceLayer`, mounted
//!   when `LOGGING=ON`.

pub mod tracing_layer;
