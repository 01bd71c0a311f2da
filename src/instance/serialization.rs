use std::fmt::Write as _;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use crate::instance::model::Instance;
use crate::preferences::PreferenceTable;

/// Helper for exporting instances in the loader's text format.
pub struct InstanceWriter;

impl InstanceWriter {
    pub fn to_text(instance: &Instance) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", instance.size());
        write_table(&mut out, instance.hospitals());
        write_table(&mut out, instance.students());
        out
    }

    pub fn write_to_path(instance: &Instance, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("create instance directory {:?}", parent))?;
        }
        let mut file =
            File::create(path).with_context(|| format!("create instance file {:?}", path))?;
        file.write_all(Self::to_text(instance).as_bytes())
            .with_context(|| format!("write instance file {:?}", path))?;
        Ok(())
    }
}

fn write_table(out: &mut String, table: &PreferenceTable) {
    for (_, ranking) in table.iter() {
        let line = ranking
            .order()
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(" ");
        let _ = writeln!(out, "{line}");
    }
}
