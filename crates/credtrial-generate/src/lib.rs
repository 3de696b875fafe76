pub mod clock;
pub mod combinations;
pub mod enhance;
pub mod generator;
pub mod leet;
pub mod mutations;
pub mod patterns;
pub mod rng;
pub mod text;

pub use clock::{Clock, FixedClock, SystemClock};
pub use combinations::{combinations, DEFAULT_AFFIXES};
pub use enhance::enhance_wordlist;
pub use generator::CandidateGenerator;
pub use mutations::mutations;
pub use patterns::common_patterns;
