//! Analytics Model

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Reporting period
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum AnalyticsPeriod {
    #[default]
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl AnalyticsPeriod {
    /// Unknown or missing values fall back to `Daily`
    pub fn parse_or_default(value: Option<&str>) -> Self {
        match value {
            Some("weekly") => Self::Weekly,
            Some("monthly") => Self::Monthly,
            Some("yearly") => Self::Yearly,
            _ => Self::Daily,
        }
    }
}

/// Order counts per status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusBreakdown {
    pub pending: u64,
    pub preparing: u64,
    pub ready: u64,
    pub served: u64,
    pub paid: u64,
    pub cancelled: u64,
}

/// Best-selling item by quantity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopItem {
    pub name: String,
    pub quantity: i64,
    pub revenue: f64,
}

/// Analytics summary for a period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsSummary {
    pub period: AnalyticsPeriod,
    /// Window start (Unix millis)
    pub start_date: i64,
    /// Window end (Unix millis)
    pub end_date: i64,
    pub total_orders: u64,
    pub total_revenue: f64,
    pub average_order_value: f64,
    pub orders_by_status: StatusBreakdown,
    pub top_items: Vec<TopItem>,
    /// `YYYY-MM-DD` (business time zone) -> revenue
    pub revenue_by_day: BTreeMap<String, f64>,
}

/// Query string for the analytics endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalyticsQuery {
    pub period: Option<String>,
}
