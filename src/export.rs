//! Impression / export des rapports
//!
//! HTML imprimable (équivalent de l'impression native) et registre Excel.

use std::path::{Path, PathBuf};

use chrono::{Local, TimeZone};

use crate::error::{DiagError, Result};
use diagelec_common::export::excel_core::generate_excel_buffer;
use diagelec_common::{render_html_document, AnalysisResult};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExportFormat {
    Html,
    Excel,
    #[default]
    Both,
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "html" | "print" => Ok(ExportFormat::Html),
            "excel" | "xlsx" => Ok(ExportFormat::Excel),
            "both" => Ok(ExportFormat::Both),
            _ => Err(format!("Format inconnu : {}. Utilisez html, excel ou both", s)),
        }
    }
}

/// Horodatage (ms) en date locale lisible
pub fn format_timestamp(timestamp_ms: i64) -> String {
    Local
        .timestamp_millis_opt(timestamp_ms)
        .single()
        .map(|dt| dt.format("%d/%m/%Y %H:%M").to_string())
        .unwrap_or_default()
}

fn output_path_for(output: &Path, title: &str, extension: &str) -> PathBuf {
    if output.is_dir() || output.extension().is_none() {
        output.join(format!("{}.{}", title, extension))
    } else if output.extension().map(|e| e == extension).unwrap_or(false) {
        output.to_path_buf()
    } else {
        // `both` avec un nom de fichier : même radical, autre extension
        output.with_extension(extension)
    }
}

pub fn write_html(results: &[AnalysisResult], path: &Path) -> Result<()> {
    let generated_on = Local::now().format("%d/%m/%Y").to_string();
    let document = render_html_document(results, &generated_on);
    std::fs::write(path, document)?;
    Ok(())
}

pub fn write_excel(results: &[AnalysisResult], path: &Path) -> Result<()> {
    let buffer = generate_excel_buffer(results, format_timestamp).map_err(DiagError::Export)?;
    std::fs::write(path, buffer)?;
    Ok(())
}

/// Écrit les fichiers demandés et renvoie leurs chemins
pub fn export_reports(
    results: &[AnalysisResult],
    format: ExportFormat,
    output: &Path,
    title: &str,
) -> Result<Vec<PathBuf>> {
    if results.is_empty() {
        return Err(DiagError::Export("aucun rapport à exporter".into()));
    }
    if output.extension().is_none() {
        std::fs::create_dir_all(output)?;
    }

    let mut written = Vec::new();
    if matches!(format, ExportFormat::Html | ExportFormat::Both) {
        let path = output_path_for(output, title, "html");
        write_html(results, &path)?;
        written.push(path);
    }
    if matches!(format, ExportFormat::Excel | ExportFormat::Both) {
        let path = output_path_for(output, title, "xlsx");
        write_excel(results, &path)?;
        written.push(path);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_format_from_str() {
        assert_eq!("HTML".parse::<ExportFormat>().unwrap(), ExportFormat::Html);
        assert_eq!("xlsx".parse::<ExportFormat>().unwrap(), ExportFormat::Excel);
        assert_eq!("both".parse::<ExportFormat>().unwrap(), ExportFormat::Both);
        assert!("pdf".parse::<ExportFormat>().is_err());
    }

    #[test]
    fn test_output_path_for() {
        let dir = Path::new("/tmp/rapports");
        assert_eq!(output_path_for(dir, "diag", "html"), dir.join("diag.html"));

        let file = Path::new("/tmp/visite.html");
        assert_eq!(output_path_for(file, "diag", "html"), PathBuf::from("/tmp/visite.html"));
        assert_eq!(output_path_for(file, "diag", "xlsx"), PathBuf::from("/tmp/visite.xlsx"));
    }

    #[test]
    fn test_format_timestamp_not_empty() {
        assert!(!format_timestamp(1_700_000_000_000).is_empty());
    }
}
