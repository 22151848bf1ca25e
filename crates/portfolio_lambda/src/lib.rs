//! AWS-oriented adapters and handlers for the portfolio backend.
//!
//! This crate owns runtime integration details (Lambda handlers, DynamoDB and
//! CloudWatch adapters, configuration, log setup) and exposes a single runtime
//! module boundary for the contract, metric, and response primitives.

pub mod adapters;
pub mod config;
pub mod error;
pub mod handlers;
pub mod runtime;
pub mod telemetry;
