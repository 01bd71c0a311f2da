use indexmap::IndexMap;
use log::debug;

use crate::error::MatchError;
use crate::instance::Instance;
use crate::pairing::Pairing;
use crate::preferences::{HospitalId, StudentId, UNMATCHED};
use crate::verify::verdict::{InvalidReason, Verdict};

/// Checks that a pairing is a perfect matching without blocking pairs.
pub struct StabilityVerifier;

impl StabilityVerifier {
    pub fn verify(instance: &Instance, pairing: &Pairing) -> Verdict {
        let verdict = match build_reverse(instance.size(), pairing) {
            Ok(reverse) => find_blocking_pair(instance, pairing, &reverse),
            Err(reason) => Verdict::Invalid(reason),
        };
        debug!("Verified pairing of size {}: {}", pairing.len(), verdict);
        verdict
    }

    pub fn verify_preferences(
        n: usize,
        hospital_prefs: &[Vec<usize>],
        student_prefs: &[Vec<usize>],
        pairing: &Pairing,
    ) -> Result<Verdict, MatchError> {
        let instance = Instance::from_rows(n, hospital_prefs.to_vec(), student_prefs.to_vec())?;
        Ok(Self::verify(&instance, pairing))
    }
}

fn build_reverse(
    n: usize,
    pairing: &Pairing,
) -> Result<IndexMap<StudentId, HospitalId>, InvalidReason> {
    if pairing.len() < n {
        return Err(InvalidReason::MissingHospital);
    }

    let mut reverse = IndexMap::with_capacity(n);
    for (hospital, student) in pairing.iter() {
        if hospital == UNMATCHED || hospital > n {
            return Err(InvalidReason::UnknownHospital(hospital));
        }
        if student == UNMATCHED {
            return Err(InvalidReason::MissingStudent(hospital));
        }
        if student > n {
            return Err(InvalidReason::UnknownStudent { hospital, student });
        }
        if reverse.insert(student, hospital).is_some() {
            return Err(InvalidReason::DuplicateStudent(student));
        }
    }
    // n in-range hospitals with n distinct in-range students: a bijection.
    Ok(reverse)
}

fn find_blocking_pair(
    instance: &Instance,
    pairing: &Pairing,
    reverse: &IndexMap<StudentId, HospitalId>,
) -> Verdict {
    let n = instance.size();
    let hospitals = instance.hospitals();
    let students = instance.students();

    for (hospital, current_student) in pairing.iter() {
        let hospital_ranking = hospitals.ranking(hospital);
        for student in 1..=n {
            if !hospital_ranking.prefers(student, current_student) {
                continue;
            }
            let current_hospital = reverse[&student];
            if students.ranking(student).prefers(hospital, current_hospital) {
                return Verdict::Unstable { hospital, student };
            }
        }
    }

    Verdict::Valid
}
