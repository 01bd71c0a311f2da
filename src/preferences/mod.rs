pub mod permutation;
pub mod table;

pub use permutation::Permutation;
pub use table::PreferenceTable;

pub type HospitalId = usize;
pub type StudentId = usize;

// Never a valid agent id.
pub const UNMATCHED: usize = 0;
