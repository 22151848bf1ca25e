use crate::runtime::contract::{CONTACT_TABLE_NAME, VISITOR_TABLE_NAME};
use crate::runtime::metrics::METRICS_NAMESPACE;

pub const CONTACT_TABLE_ENV: &str = "CONTACT_TABLE_NAME";
pub const VISITOR_TABLE_ENV: &str = "VISITOR_TABLE_NAME";
pub const METRICS_NAMESPACE_ENV: &str = "METRICS_NAMESPACE";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactHandlerConfig {
    pub table_name: String,
    pub metrics_namespace: String,
}

impl Default for ContactHandlerConfig {
    fn default() -> Self {
        Self {
            table_name: CONTACT_TABLE_NAME.to_string(),
            metrics_namespace: METRICS_NAMESPACE.to_string(),
        }
    }
}

impl ContactHandlerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            table_name: setting(&lookup, CONTACT_TABLE_ENV, CONTACT_TABLE_NAME),
            metrics_namespace: setting(&lookup, METRICS_NAMESPACE_ENV, METRICS_NAMESPACE),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisitorHandlerConfig {
    pub table_name: String,
    pub metrics_namespace: String,
}

impl Default for VisitorHandlerConfig {
    fn default() -> Self {
        Self {
            table_name: VISITOR_TABLE_NAME.to_string(),
            metrics_namespace: METRICS_NAMESPACE.to_string(),
        }
    }
}

impl VisitorHandlerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            table_name: setting(&lookup, VISITOR_TABLE_ENV, VISITOR_TABLE_NAME),
            metrics_namespace: setting(&lookup, METRICS_NAMESPACE_ENV, METRICS_NAMESPACE),
        }
    }
}

// Blank values fall back to the default.
fn setting(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: &str) -> String {
    lookup(key)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| default.to_string())
}
