use std::fmt;

use serde::Serialize;

use crate::preferences::{HospitalId, StudentId};

/// Structural defects that keep a pairing from being a perfect matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InvalidReason {
    /// Fewer than `n` hospitals have an entry.
    MissingHospital,
    MissingStudent(HospitalId),
    DuplicateStudent(StudentId),
    UnknownHospital(HospitalId),
    UnknownStudent {
        hospital: HospitalId,
        student: StudentId,
    },
}

impl fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidReason::MissingHospital => write!(f, "missing hospital"),
            InvalidReason::MissingStudent(hospital) => {
                write!(f, "missing student for hospital {hospital}")
            }
            InvalidReason::DuplicateStudent(_) => write!(f, "duplicate student"),
            InvalidReason::UnknownHospital(hospital) => write!(f, "unknown hospital {hospital}"),
            InvalidReason::UnknownStudent { hospital, student } => {
                write!(f, "unknown student {student} for hospital {hospital}")
            }
        }
    }
}

/// Outcome of checking a pairing against an instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "verdict", content = "detail", rename_all = "snake_case")]
pub enum Verdict {
    Valid,
    Invalid(InvalidReason),
    Unstable {
        hospital: HospitalId,
        student: StudentId,
    },
}

impl Verdict {
    pub fn is_valid(&self) -> bool {
        matches!(self, Verdict::Valid)
    }

    pub fn blocking_pair(&self) -> Option<(HospitalId, StudentId)> {
        match *self {
            Verdict::Unstable { hospital, student } => Some((hospital, student)),
            _ => None,
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Valid => write!(f, "VALID STABLE"),
            Verdict::Invalid(reason) => write!(f, "INVALID ({reason})"),
            Verdict::Unstable { hospital, student } => {
                write!(f, "UNSTABLE [{hospital}, {student}]")
            }
        }
    }
}
