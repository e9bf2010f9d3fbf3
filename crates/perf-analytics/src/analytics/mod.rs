//! Evaluation analytics: normalize raw documents, filter, aggregate and shape
//! the results into dashboard views.

pub mod aggregation;
pub mod domain;
pub mod filter;
pub mod matching;
pub mod normalizer;
pub mod report;
pub mod router;

mod engine;

pub use aggregation::BehavioralScope;
pub use domain::{
    DiscType, DiscVector, EmployeeRecord, EmployeeRef, EvaluationKind, EvaluationRecord,
};
pub use engine::AnalyticsEngine;
pub use filter::FilterSpec;
pub use normalizer::ScorePolicy;
pub use report::views::{BehavioralView, DashboardView};
pub use report::AnalyticsReport;
pub use router::analytics_router;
