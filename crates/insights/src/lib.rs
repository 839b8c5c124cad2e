//! Insights facade
//!
//! One interface over flavor extraction, pattern mining and parameter
//! suggestion, with a baseline tier that always works and an optional
//! language model tier that falls back to it.

#![warn(missing_docs)]

pub mod advanced;
pub mod baseline;
pub mod factory;
pub mod service;

pub use advanced::AdvancedInsightsService;
pub use baseline::BaselineInsightsService;
pub use factory::InsightsServiceFactory;
pub use service::{InsightsService, InsightsTier};
