use crate::error::{MatchError, PermutationError, Side};
use crate::preferences::permutation::Permutation;

/// One validated preference list per agent on a single side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreferenceTable {
    side: Side,
    rows: Vec<Permutation>,
}

impl PreferenceTable {
    pub fn new(side: Side, n: usize, rows: Vec<Vec<usize>>) -> Result<Self, MatchError> {
        if n == 0 {
            return Err(MatchError::EmptyInstance);
        }
        if rows.len() != n {
            return Err(MatchError::TableSize {
                side,
                expected: n,
                found: rows.len(),
            });
        }

        let rows = rows
            .into_iter()
            .enumerate()
            .map(|(idx, row)| {
                Permutation::new(n, row).map_err(|reason| MatchError::InvalidInput {
                    side,
                    agent: idx + 1,
                    reason,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { side, rows })
    }

    pub fn from_permutations(side: Side, rows: Vec<Permutation>) -> Result<Self, MatchError> {
        let n = rows.len();
        if n == 0 {
            return Err(MatchError::EmptyInstance);
        }
        if let Some((idx, row)) = rows.iter().enumerate().find(|(_, row)| row.len() != n) {
            return Err(MatchError::InvalidInput {
                side,
                agent: idx + 1,
                reason: PermutationError::WrongLength {
                    expected: n,
                    found: row.len(),
                },
            });
        }
        Ok(Self { side, rows })
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn size(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    pub fn ranking(&self, agent: usize) -> &Permutation {
        &self.rows[agent - 1]
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &Permutation)> {
        self.rows.iter().enumerate().map(|(idx, row)| (idx + 1, row))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_valid_table() {
        let table = PreferenceTable::new(Side::Student, 2, vec![vec![2, 1], vec![1, 2]])
            .expect("valid table");
        assert_eq!(table.size(), 2);
        assert_eq!(table.side(), Side::Student);
        assert_eq!(table.ranking(1).order(), &[2, 1]);
        let agents: Vec<usize> = table.iter().map(|(agent, _)| agent).collect();
        assert_eq!(agents, vec![1, 2]);
    }

    #[test]
    fn reports_offending_agent() {
        let err = PreferenceTable::new(
            Side::Hospital,
            3,
            vec![vec![1, 2, 3], vec![3, 3, 1], vec![2, 1, 3]],
        )
        .unwrap_err();
        assert_eq!(
            err,
            MatchError::InvalidInput {
                side: Side::Hospital,
                agent: 2,
                reason: PermutationError::Duplicate { id: 3 },
            }
        );
    }

    #[test]
    fn rejects_wrong_row_count() {
        let err = PreferenceTable::new(Side::Hospital, 3, vec![vec![1, 2, 3]]).unwrap_err();
        assert_eq!(
            err,
            MatchError::TableSize {
                side: Side::Hospital,
                expected: 3,
                found: 1,
            }
        );
        assert_eq!(
            PreferenceTable::new(Side::Student, 0, Vec::new()),
            Err(MatchError::EmptyInstance)
        );
    }
}
