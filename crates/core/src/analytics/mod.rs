pub mod analytics_model;
pub mod analytics_service;

#[cfg(test)]
mod analytics_service_tests;

pub use analytics_model::*;
pub use analytics_service::{
    AnalyticsService, AnalyticsServiceTrait, CATEGORY_BREAKDOWN_LIMIT, DEFAULT_TREND_MONTHS,
};
