use std::collections::VecDeque;

use log::{debug, trace};
use serde::Serialize;

use crate::error::MatchError;
use crate::instance::Instance;
use crate::pairing::Pairing;
use crate::preferences::{HospitalId, UNMATCHED};

/// Counters collected over one matcher run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MatchStats {
    pub proposals: usize,
    pub rejections: usize,
    pub displacements: usize,
}

#[derive(Debug, Clone)]
pub struct MatchOutcome {
    pub pairing: Pairing,
    pub stats: MatchStats,
}

pub struct StableMatcher;

impl StableMatcher {
    /// Hospital-optimal stable matching for raw preference rows.
    pub fn match_preferences(
        n: usize,
        hospital_prefs: &[Vec<usize>],
        student_prefs: &[Vec<usize>],
    ) -> Result<Pairing, MatchError> {
        let instance = Instance::from_rows(n, hospital_prefs.to_vec(), student_prefs.to_vec())?;
        Ok(Self::run(&instance).pairing)
    }

    pub fn run(instance: &Instance) -> MatchOutcome {
        let n = instance.size();
        let hospitals = instance.hospitals();
        let students = instance.students();

        let mut free: VecDeque<HospitalId> = (1..=n).collect();
        // next_choice[h - 1] is the position in h's list of its next proposal.
        let mut next_choice = vec![0usize; n];
        // held_by[s - 1] is the hospital student s currently holds.
        let mut held_by = vec![UNMATCHED; n];
        let mut stats = MatchStats::default();

        while let Some(hospital) = free.pop_front() {
            let ranking = hospitals.ranking(hospital);
            loop {
                let cursor = &mut next_choice[hospital - 1];
                let Some(student) = ranking.at(*cursor) else {
                    unreachable!(
                        "hospital {hospital} exhausted its preferences in a complete instance"
                    );
                };
                *cursor += 1;
                stats.proposals += 1;

                let current = held_by[student - 1];
                if current == UNMATCHED {
                    trace!("hospital {hospital} -> student {student}: accepted");
                    held_by[student - 1] = hospital;
                    break;
                }

                if students.ranking(student).prefers(hospital, current) {
                    trace!(
                        "hospital {hospital} -> student {student}: accepted, hospital {current} displaced"
                    );
                    held_by[student - 1] = hospital;
                    free.push_front(current);
                    stats.displacements += 1;
                    break;
                }

                trace!("hospital {hospital} -> student {student}: rejected");
                stats.rejections += 1;
            }
        }

        let pairing = held_by
            .iter()
            .enumerate()
            .map(|(idx, &hospital)| (hospital, idx + 1))
            .collect();

        debug!(
            "Matched {n} hospitals (proposals {}, rejections {}, displacements {})",
            stats.proposals, stats.rejections, stats.displacements
        );

        MatchOutcome { pairing, stats }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_agent_pairs_with_itself() {
        let pairing = StableMatcher::match_preferences(1, &[vec![1]], &[vec![1]]).expect("match");
        assert_eq!(pairing.to_vec(), vec![(1, 1)]);
    }

    #[test]
    fn hospitals_get_first_choices_when_uncontested() {
        let outcome = StableMatcher::run(
            &Instance::from_rows(
                3,
                vec![vec![2, 1, 3], vec![3, 2, 1], vec![1, 3, 2]],
                vec![vec![1, 2, 3], vec![1, 2, 3], vec![1, 2, 3]],
            )
            .expect("instance"),
        );
        assert_eq!(outcome.pairing.to_vec(), vec![(1, 2), (2, 3), (3, 1)]);
        assert_eq!(
            outcome.stats,
            MatchStats {
                proposals: 3,
                rejections: 0,
                displacements: 0
            }
        );
    }

    #[test]
    fn displaced_hospital_retries_first() {
        // Both hospitals want student 1, who prefers hospital 2.
        let outcome = StableMatcher::run(
            &Instance::from_rows(
                2,
                vec![vec![1, 2], vec![1, 2]],
                vec![vec![2, 1], vec![1, 2]],
            )
            .expect("instance"),
        );
        assert_eq!(outcome.pairing.to_vec(), vec![(1, 2), (2, 1)]);
        assert_eq!(outcome.stats.proposals, 3);
        assert_eq!(outcome.stats.displacements, 1);
        assert_eq!(outcome.stats.rejections, 0);
    }

    #[test]
    fn rejected_hospital_keeps_proposing() {
        // Student 1 already holds hospital 1 and turns hospital 2 away.
        let outcome = StableMatcher::run(
            &Instance::from_rows(
                2,
                vec![vec![1, 2], vec![1, 2]],
                vec![vec![1, 2], vec![1, 2]],
            )
            .expect("instance"),
        );
        assert_eq!(outcome.pairing.to_vec(), vec![(1, 1), (2, 2)]);
        assert_eq!(outcome.stats.rejections, 1);
        assert_eq!(outcome.stats.displacements, 0);
    }

    #[test]
    fn caller_rows_are_left_untouched() {
        let hospitals = vec![vec![1, 2], vec![1, 2]];
        let students = vec![vec![2, 1], vec![1, 2]];
        let before = (hospitals.clone(), students.clone());
        StableMatcher::match_preferences(2, &hospitals, &students).expect("match");
        assert_eq!((hospitals, students), before);
    }

    #[test]
    fn malformed_rows_fail_before_matching() {
        let err = StableMatcher::match_preferences(2, &[vec![1, 1], vec![1, 2]], &[
            vec![1, 2],
            vec![1, 2],
        ])
        .unwrap_err();
        assert!(matches!(err, MatchError::InvalidInput { agent: 1, .. }));
    }
}
