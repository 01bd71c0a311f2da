pub mod batch;
pub mod engine;

pub use batch::{BatchMatcher, BatchSummary};
pub use engine::{MatchOutcome, MatchStats, StableMatcher};
