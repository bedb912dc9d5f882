//! Middleware wrapped around every page and probe.
//!
//! [`Trace`] assigns each request a fresh [`crate::TraceId`], scopes it for
//! handlers and logging, and echoes it in the response header.

pub mod trace;

pub use trace::Trace;
