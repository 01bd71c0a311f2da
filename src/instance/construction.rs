use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use anyhow::{Context, Result, anyhow, bail};

use crate::instance::model::Instance;

/// Reads `n` followed by `n` hospital rows and `n` student rows.
#[derive(Debug, Default)]
pub struct InstanceLoader;

impl InstanceLoader {
    pub fn from_text(text: &str) -> Result<Instance> {
        let mut lines = text
            .lines()
            .enumerate()
            .map(|(idx, line)| (idx + 1, line.trim()))
            .filter(|(_, line)| !line.is_empty());

        let (size_line, header) = lines
            .next()
            .ok_or_else(|| anyhow!("Instance text is empty"))?;
        let n: usize = header
            .parse()
            .with_context(|| format!("line {size_line}: parse instance size '{header}'"))?;
        if n == 0 {
            bail!("line {size_line}: instance size must be greater than zero");
        }

        let Some(expected) = n.checked_mul(2) else {
            bail!("line {size_line}: instance size {n} is too large");
        };

        let mut rows = Vec::new();
        for (line_no, line) in lines.by_ref().take(expected) {
            rows.push(parse_row(line_no, line)?);
        }
        if rows.len() < expected {
            bail!(
                "Expected {} preference lines for n = {}, found {}",
                expected,
                n,
                rows.len()
            );
        }
        if let Some((line_no, _)) = lines.next() {
            bail!("line {line_no}: unexpected content after the student preferences");
        }

        let students = rows.split_off(n);
        let instance = Instance::from_rows(n, rows, students)?;
        Ok(instance)
    }

    pub fn from_reader<R: Read>(mut reader: R) -> Result<Instance> {
        let mut buf = String::new();
        reader.read_to_string(&mut buf)?;
        Self::from_text(&buf)
    }

    pub fn from_path(path: &Path) -> Result<Instance> {
        let file = File::open(path).with_context(|| format!("open instance file {:?}", path))?;
        Self::from_reader(BufReader::new(file))
            .with_context(|| format!("load instance from {:?}", path))
    }
}

fn parse_row(line_no: usize, line: &str) -> Result<Vec<usize>> {
    line.split_whitespace()
        .map(|token| {
            token
                .parse::<usize>()
                .with_context(|| format!("line {line_no}: parse id '{token}'"))
        })
        .collect()
}
