pub use portfolio_core::{contract, metrics, response};
