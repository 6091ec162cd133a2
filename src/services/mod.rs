pub mod analytics;
pub mod attempt_evaluator;
pub mod attempt_service;
pub mod dashboard_service;
pub mod mastery_tracker;
pub mod revision_selector;

pub use analytics::AnalyticsAggregator;
pub use attempt_evaluator::AttemptEvaluator;
pub use attempt_service::AttemptService;
pub use dashboard_service::DashboardService;
pub use mastery_tracker::MasteryTracker;
pub use revision_selector::RevisionSelector;
