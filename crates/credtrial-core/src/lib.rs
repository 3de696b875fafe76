pub mod error;
pub mod protocol;
pub mod registry;
pub mod report;
pub mod session;
pub mod wordlist;

pub use error::{ConfigError, ReportError};
pub use protocol::Protocol;
pub use registry::ProbeRegistry;
pub use report::SessionReport;
pub use session::{Session, SessionConfig};
