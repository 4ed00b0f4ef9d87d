//! YAML export of a fiscal year

use std::io::Write;

use crate::error::{HoaError, HoaResult};
use crate::export::json::YearExport;
use crate::storage::Storage;

pub fn export_year_yaml<W: Write>(storage: &Storage, year: &str, writer: &mut W) -> HoaResult<()> {
    let export = YearExport::from_storage(storage, year)?;
    let export_err = |e: std::io::Error| HoaError::Export(e.to_string());

    writeln!(writer, "# HOA year export: {}", export.year).map_err(export_err)?;
    writeln!(writer, "# Generated: {}", export.exported_at).map_err(export_err)?;
    writeln!(writer, "# App Version: {}", export.app_version).map_err(export_err)?;
    writeln!(writer).map_err(export_err)?;

    serde_yaml::to_writer(writer, &export).map_err(|e| HoaError::Export(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yaml_export() {
        let storage = Storage::in_memory();
        let mut out = Vec::new();
        export_year_yaml(&storage, "2024", &mut out).unwrap();

        let yaml = String::from_utf8(out).unwrap();
        assert!(yaml.starts_with("# HOA year export: 2024\n"));
        assert!(yaml.contains("schema_version:"));
        assert!(yaml.contains("Mi Residencial"));

        let body: String = yaml
            .lines()
            .filter(|l| !l.starts_with('#'))
            .collect::<Vec<_>>()
            .join("\n");
        let parsed: YearExport = serde_yaml::from_str(&body).unwrap();
        assert_eq!(parsed.houses.len(), 45);
    }
}
