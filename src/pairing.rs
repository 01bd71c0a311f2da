use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::fs::{self, File};
use std::io::{BufReader, Read, Write};
use std::path::Path;

use anyhow::{Context, Result, anyhow, bail};
use serde::Serialize;

use crate::preferences::{HospitalId, StudentId};

/// Hospital to student assignment, not assumed to be a bijection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Pairing {
    pairs: BTreeMap<HospitalId, StudentId>,
}

impl Pairing {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (HospitalId, StudentId)>,
    {
        Self {
            pairs: pairs.into_iter().collect(),
        }
    }

    pub fn insert(&mut self, hospital: HospitalId, student: StudentId) -> Option<StudentId> {
        self.pairs.insert(hospital, student)
    }

    pub fn student_of(&self, hospital: HospitalId) -> Option<StudentId> {
        self.pairs.get(&hospital).copied()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (HospitalId, StudentId)> + '_ {
        self.pairs.iter().map(|(&h, &s)| (h, s))
    }

    pub fn to_vec(&self) -> Vec<(HospitalId, StudentId)> {
        self.iter().collect()
    }
}

impl FromIterator<(HospitalId, StudentId)> for Pairing {
    fn from_iter<I: IntoIterator<Item = (HospitalId, StudentId)>>(iter: I) -> Self {
        Self::from_pairs(iter)
    }
}

/// Loader for pairing files: one `"<hospital> <student>"` line per hospital.
#[derive(Debug, Default)]
pub struct PairingLoader;

impl PairingLoader {
    pub fn from_text(text: &str) -> Result<Pairing> {
        let mut pairing = Pairing::new();
        for (idx, line) in text.lines().enumerate() {
            let line_no = idx + 1;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let mut tokens = line.split_whitespace();
            let hospital = parse_id(line_no, tokens.next(), "hospital")?;
            let student = parse_id(line_no, tokens.next(), "student")?;
            if tokens.next().is_some() {
                bail!("line {line_no}: expected exactly two ids, found '{line}'");
            }
            if pairing.insert(hospital, student).is_some() {
                bail!("line {line_no}: hospital {hospital} is paired more than once");
            }
        }
        Ok(pairing)
    }

    pub fn from_reader<R: Read>(mut reader: R) -> Result<Pairing> {
        let mut buf = String::new();
        reader.read_to_string(&mut buf)?;
        Self::from_text(&buf)
    }

    pub fn from_path(path: &Path) -> Result<Pairing> {
        let file = File::open(path).with_context(|| format!("open pairing file {:?}", path))?;
        Self::from_reader(BufReader::new(file))
            .with_context(|| format!("load pairing from {:?}", path))
    }
}

fn parse_id(line_no: usize, token: Option<&str>, what: &str) -> Result<usize> {
    let token = token.ok_or_else(|| anyhow!("line {line_no}: missing {what} id"))?;
    token
        .parse()
        .with_context(|| format!("line {line_no}: parse {what} id '{token}'"))
}

/// Helper for exporting pairings in the format read by [`PairingLoader`].
pub struct PairingWriter;

impl PairingWriter {
    pub fn to_text(pairing: &Pairing) -> String {
        let mut out = String::new();
        for (hospital, student) in pairing.iter() {
            let _ = writeln!(out, "{hospital} {student}");
        }
        out
    }

    pub fn to_json_string(pairing: &Pairing) -> Result<String> {
        Ok(serde_json::to_string_pretty(pairing)?)
    }

    pub fn write_to_path(pairing: &Pairing, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("create pairing directory {:?}", parent))?;
        }
        let mut file =
            File::create(path).with_context(|| format!("create pairing file {:?}", path))?;
        file.write_all(Self::to_text(pairing).as_bytes())
            .with_context(|| format!("write pairing file {:?}", path))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iterates_in_hospital_order() {
        let pairing = Pairing::from_pairs([(3, 1), (1, 2), (2, 3)]);
        assert_eq!(pairing.to_vec(), vec![(1, 2), (2, 3), (3, 1)]);
        assert_eq!(pairing.student_of(3), Some(1));
        assert_eq!(pairing.student_of(4), None);
    }

    #[test]
    fn writes_output_format() {
        let pairing = Pairing::from_pairs([(2, 3), (1, 2), (3, 1)]);
        assert_eq!(PairingWriter::to_text(&pairing), "1 2\n2 3\n3 1\n");
    }

    #[test]
    fn loads_output_format() {
        let pairing = PairingLoader::from_text("1 2\n\n2 3\n3 1\n").expect("load pairing");
        assert_eq!(pairing, Pairing::from_pairs([(1, 2), (2, 3), (3, 1)]));
    }

    #[test]
    fn repeated_hospital_is_rejected() {
        let err = PairingLoader::from_text("1 2\n1 3\n").unwrap_err();
        assert!(err.to_string().contains("hospital 1 is paired more than once"));
    }

    #[test]
    fn malformed_lines_are_rejected() {
        assert!(PairingLoader::from_text("1\n").is_err());
        assert!(PairingLoader::from_text("1 2 3\n").is_err());
        assert!(PairingLoader::from_text("a 2\n").is_err());
    }

    #[test]
    fn json_uses_hospital_keys() {
        let pairing = Pairing::from_pairs([(1, 2), (2, 1)]);
        let json = PairingWriter::to_json_string(&pairing).expect("serialize");
        let value: serde_json::Value = serde_json::from_str(&json).expect("parse");
        assert_eq!(value["1"], 2);
        assert_eq!(value["2"], 1);
    }
}
