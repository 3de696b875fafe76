pub mod analyzer;
pub mod rate_limit;
pub mod tables;

pub use analyzer::{Detection, DetectionAnalyzer, DetectionReason};
pub use rate_limit::RateLimitInfo;
pub use tables::DetectionTables;
