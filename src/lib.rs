pub mod error;
pub mod instance;
pub mod matching;
pub mod pairing;
pub mod preferences;
pub mod sampling;
pub mod scaling;
pub mod verify;

pub use error::{MatchError, PermutationError, Side};
pub use instance::{Instance, InstanceLoader, InstanceWriter};
pub use matching::{BatchMatcher, BatchSummary, MatchOutcome, MatchStats, StableMatcher};
pub use pairing::{Pairing, PairingLoader, PairingWriter};
pub use preferences::{HospitalId, Permutation, PreferenceTable, StudentId, UNMATCHED};
pub use sampling::{GeneratorConfig, InstanceGenerator};
pub use scaling::{ScalingBenchmark, ScalingConfig, ScalingReport, ScalingSample};
pub use verify::{InvalidReason, StabilityVerifier, Verdict};
