pub mod coordination;
pub mod orchestrator;
pub mod pool;
pub mod probe;

pub use coordination::{Coordination, StopHandle};
pub use orchestrator::{AttemptOrchestrator, RunPhase};
pub use pool::CandidatePool;
pub use probe::{AttemptContext, AuthProbe, ProbeError, ProbeResponse};
