//! Outbound adapters implementing the domain ports.
//!
//! - [`persistence`]: community catalogue and authorization policy.
//! - [`storage`]: byte storage for bitstream content.

pub mod persistence;
pub mod storage;
