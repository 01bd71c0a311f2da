use crate::error::{MatchError, Side};
use crate::preferences::PreferenceTable;

/// A complete two-sided matching problem of size `n`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instance {
    hospitals: PreferenceTable,
    students: PreferenceTable,
}

impl Instance {
    pub fn new(hospitals: PreferenceTable, students: PreferenceTable) -> Result<Self, MatchError> {
        if hospitals.side() != Side::Hospital || students.side() != Side::Student {
            return Err(MatchError::SideMismatch {
                hospitals: hospitals.side(),
                students: students.side(),
            });
        }
        if hospitals.size() != students.size() {
            return Err(MatchError::SizeMismatch {
                hospitals: hospitals.size(),
                students: students.size(),
            });
        }
        Ok(Self {
            hospitals,
            students,
        })
    }

    pub fn from_rows(
        n: usize,
        hospital_prefs: Vec<Vec<usize>>,
        student_prefs: Vec<Vec<usize>>,
    ) -> Result<Self, MatchError> {
        let hospitals = PreferenceTable::new(Side::Hospital, n, hospital_prefs)?;
        let students = PreferenceTable::new(Side::Student, n, student_prefs)?;
        Self::new(hospitals, students)
    }

    pub fn size(&self) -> usize {
        self.hospitals.size()
    }

    pub fn hospitals(&self) -> &PreferenceTable {
        &self.hospitals
    }

    pub fn students(&self) -> &PreferenceTable {
        &self.students
    }
}
