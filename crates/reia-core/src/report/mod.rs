//! Analysis report domain model.

pub mod model;

pub use model::{
    Analysis, AnalysisReport, AnalyzeRequest, Conditions, Division, FinancialMetrics,
    Investment, MetricSet, PropertyInfo, RehabCosts, RentEstimate,
};
