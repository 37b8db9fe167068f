pub mod alerts;
pub mod classifier;

pub use alerts::ExtraAccountingAlert;
pub use classifier::{classify_counts, classify_crisis, evaluate_crisis, CrisisAssessment, CrisisRating};
