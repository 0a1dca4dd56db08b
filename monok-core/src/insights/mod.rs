//! User insights and self-improvement learnings
//!
//! Two category-keyed logs kept per identity. Repeated observations reinforce
//! an existing entry instead of piling up near-duplicates.

pub mod category;
pub mod learning;
pub mod store;
pub mod user;

pub use category::{allowed, parse_category, same_observation, Category, CategoryLog, RecordOutcome};
pub use learning::{
    record_learning, LearningCategory, LearningConfidence, LearningEntry, LearningsLog, NewLearning,
};
pub use store::InsightStore;
pub use user::{
    insights_context, record_insight, InsightCategory, InsightConfidence, InsightEntry, InsightsLog,
};
