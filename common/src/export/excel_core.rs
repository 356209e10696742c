//! Registre Excel des rapports
//!
//! Deux feuilles :
//! - "Rapports" : une ligne par rapport
//! - "Anomalies" : une ligne par anomalie, colorée selon la gravité

use crate::types::{AnalysisResult, Severity};
use rust_xlsxwriter::*;

const REPORT_HEADERS: &[(&str, f64)] = &[
    ("Identifiant", 22.0),
    ("Date", 18.0),
    ("Conformité", 22.0),
    ("Équipements", 40.0),
    ("Anomalies", 11.0),
    ("Résumé", 60.0),
    ("Notes techniques", 50.0),
];

const ANOMALY_HEADERS: &[(&str, f64)] = &[
    ("Rapport", 22.0),
    ("Code", 14.0),
    ("Gravité", 16.0),
    ("Description", 60.0),
    ("Recommandation", 50.0),
];

fn severity_fill(severity: Severity) -> Color {
    match severity {
        Severity::Danger => Color::RGB(0xFEE2E2),
        Severity::Avertissement => Color::RGB(0xFFEDD5),
        Severity::Info => Color::RGB(0xF3F4F6),
    }
}

fn write_headers(
    worksheet: &mut Worksheet,
    headers: &[(&str, f64)],
    format: &Format,
) -> Result<(), String> {
    for (col, (label, width)) in headers.iter().enumerate() {
        let col = col as u16;
        worksheet
            .set_column_width(col, *width)
            .map_err(|e| format!("Erreur de largeur de colonne: {}", e))?;
        worksheet
            .write_string_with_format(0, col, *label, format)
            .map_err(|e| format!("Erreur d'en-tête: {}", e))?;
    }
    Ok(())
}

/// Génère le classeur en mémoire
///
/// # Arguments
/// * `results` - rapports, dans l'ordre de la session
/// * `format_date` - conversion d'un horodatage (ms) en texte affichable
pub fn generate_excel_buffer<F>(results: &[AnalysisResult], format_date: F) -> Result<Vec<u8>, String>
where
    F: Fn(i64) -> String,
{
    let mut workbook = Workbook::new();

    let header_format = Format::new()
        .set_bold()
        .set_font_color(Color::RGB(0x555555))
        .set_background_color(Color::RGB(0xF5F5F5))
        .set_align(FormatAlign::Center)
        .set_border(FormatBorder::Hair)
        .set_border_color(Color::RGB(0xAAAAAA));

    let value_format = Format::new()
        .set_align(FormatAlign::Top)
        .set_text_wrap()
        .set_border(FormatBorder::Hair)
        .set_border_color(Color::RGB(0xCCCCCC));

    {
        let worksheet = workbook.add_worksheet();
        worksheet
            .set_name("Rapports")
            .map_err(|e| format!("Erreur de nom de feuille: {}", e))?;
        write_headers(worksheet, REPORT_HEADERS, &header_format)?;

        for (i, result) in results.iter().enumerate() {
            let row = i as u32 + 1;
            let compliance = if result.compliant { "Conforme (visuel)" } else { "Anomalies détectées" };
            let cells = [
                result.id.clone(),
                format_date(result.timestamp),
                compliance.to_string(),
                result.equipment_detected.join(", "),
            ];
            for (col, value) in cells.iter().enumerate() {
                worksheet
                    .write_string_with_format(row, col as u16, value, &value_format)
                    .map_err(|e| format!("Erreur d'écriture: {}", e))?;
            }
            worksheet
                .write_number_with_format(row, 4, result.anomalies.len() as f64, &value_format)
                .map_err(|e| format!("Erreur d'écriture: {}", e))?;
            worksheet
                .write_string_with_format(row, 5, &result.summary, &value_format)
                .map_err(|e| format!("Erreur d'écriture: {}", e))?;
            worksheet
                .write_string_with_format(row, 6, &result.technical_notes, &value_format)
                .map_err(|e| format!("Erreur d'écriture: {}", e))?;
        }
    }

    {
        let worksheet = workbook.add_worksheet();
        worksheet
            .set_name("Anomalies")
            .map_err(|e| format!("Erreur de nom de feuille: {}", e))?;
        write_headers(worksheet, ANOMALY_HEADERS, &header_format)?;

        let mut row: u32 = 1;
        for result in results {
            for anomaly in &result.anomalies {
                let format = value_format.clone().set_background_color(severity_fill(anomaly.severity));
                let cells = [
                    result.id.as_str(),
                    anomaly.code.as_deref().unwrap_or("N/A"),
                    anomaly.severity.as_str(),
                    anomaly.description.as_str(),
                    anomaly.recommendation.as_str(),
                ];
                for (col, value) in cells.iter().enumerate() {
                    worksheet
                        .write_string_with_format(row, col as u16, *value, &format)
                        .map_err(|e| format!("Erreur d'écriture: {}", e))?;
                }
                row += 1;
            }
        }
    }

    workbook
        .save_to_buffer()
        .map_err(|e| format!("Erreur d'enregistrement Excel: {}", e))
}
