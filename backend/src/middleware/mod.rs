//! Request middleware.
//!
//! Purpose: cross-cutting request lifecycle concerns. Per-resource guards
//! such as the permission check live with the HTTP adapter.

pub mod trace;

pub use trace::Trace;
