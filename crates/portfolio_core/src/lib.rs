//! Shared portfolio backend domain primitives.
//!
//! This crate owns request/response contracts, stored record shapes, and the
//! metric datums each handler emits. It intentionally excludes AWS SDK and
//! Lambda runtime concerns.

pub mod contract;
pub mod metrics;
pub mod response;
