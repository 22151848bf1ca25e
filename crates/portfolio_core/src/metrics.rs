use serde::{Deserialize, Serialize};

pub const METRICS_NAMESPACE: &str = "Portfolio/Metrics";

pub const CONTACT_SUBMISSIONS_METRIC: &str = "ContactSubmissions";
pub const REFERRAL_HITS_METRIC: &str = "ReferralHits";
pub const PAGE_VISITS_METRIC: &str = "PageVisits";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum MetricUnit {
    Count,
}

impl MetricUnit {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Count => "Count",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MetricDimension {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MetricDatum {
    pub name: String,
    pub dimensions: Vec<MetricDimension>,
    pub unit: MetricUnit,
    pub value: f64,
}

impl MetricDatum {
    /// A single-dimension counter increment of 1.
    pub fn count(
        name: impl Into<String>,
        dimension_name: impl Into<String>,
        dimension_value: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            dimensions: vec![MetricDimension {
                name: dimension_name.into(),
                value: dimension_value.into(),
            }],
            unit: MetricUnit::Count,
            value: 1.0,
        }
    }

    pub fn dimension(&self, name: &str) -> Option<&str> {
        self.dimensions
            .iter()
            .find(|dimension| dimension.name == name)
            .map(|dimension| dimension.value.as_str())
    }
}

pub fn contact_submission_metrics(referral_code: &str) -> Vec<MetricDatum> {
    vec![
        MetricDatum::count(CONTACT_SUBMISSIONS_METRIC, "Page", "Contact"),
        MetricDatum::count(REFERRAL_HITS_METRIC, "Source", referral_code),
    ]
}

pub fn page_visit_metrics(page: &str) -> Vec<MetricDatum> {
    vec![MetricDatum::count(PAGE_VISITS_METRIC, "Page", page)]
}
