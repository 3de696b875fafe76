pub mod candidate;
pub mod config;
pub mod outcome;
pub mod result;
pub mod signals;

pub use candidate::{Candidate, Provenance};
pub use config::EngineConfig;
pub use outcome::{Advisory, AttemptOutcome, ErrorRecord};
pub use result::{EngineResult, StopReason};
pub use signals::{DetectionSignal, ErrorKind, ResponseSignals, TargetDescriptor};
