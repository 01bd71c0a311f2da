pub mod stability;
pub mod verdict;

pub use stability::StabilityVerifier;
pub use verdict::{InvalidReason, Verdict};
