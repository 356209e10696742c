//! Carte de rapport
//!
//! Projection pure d'un AnalysisResult vers ce qui est affiché ou imprimé :
//! badge de conformité, équipements, anomalies marquées par gravité,
//! résumé copiable. Deux rendus : texte (terminal) et document HTML
//! imprimable.

use crate::prompts::{REPORT_SUBTITLE, REPORT_TITLE};
use crate::types::{AnalysisResult, Severity};
use std::fmt::Write;

pub const BADGE_COMPLIANT: &str = "CONFORME (Visuel)";
pub const BADGE_NON_COMPLIANT: &str = "ANOMALIES DÉTECTÉES";
pub const MISSING_CODE: &str = "N/A";
pub const EMPTY_REPORTS_MESSAGE: &str = "Aucune analyse pour le moment.";

/// Ligne d'anomalie prête à afficher
#[derive(Debug, Clone, PartialEq)]
pub struct AnomalyEntry<'a> {
    pub code: &'a str,
    pub severity: Severity,
    pub marker: &'static str,
    pub description: &'a str,
    pub recommendation: &'a str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportCard<'a> {
    pub id: &'a str,
    pub badge: &'static str,
    pub compliant: bool,
    pub image_url: &'a str,
    pub captured_at: Option<&'a str>,
    pub equipment: &'a [String],
    /// Dans l'ordre renvoyé par le modèle
    pub anomalies: Vec<AnomalyEntry<'a>>,
    pub summary: &'a str,
    pub technical_notes: &'a str,
}

impl<'a> ReportCard<'a> {
    pub fn new(result: &'a AnalysisResult) -> Self {
        let anomalies = result
            .anomalies
            .iter()
            .map(|a| AnomalyEntry {
                code: a
                    .code
                    .as_deref()
                    .filter(|c| !c.trim().is_empty())
                    .unwrap_or(MISSING_CODE),
                severity: a.severity,
                marker: a.severity.marker(),
                description: &a.description,
                recommendation: &a.recommendation,
            })
            .collect();

        Self {
            id: &result.id,
            badge: if result.compliant { BADGE_COMPLIANT } else { BADGE_NON_COMPLIANT },
            compliant: result.compliant,
            image_url: &result.image_url,
            captured_at: result.captured_at.as_deref(),
            equipment: &result.equipment_detected,
            anomalies,
            summary: &result.summary,
            technical_notes: &result.technical_notes,
        }
    }

    /// Rendu texte pour le terminal
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "[{}] {}", self.badge, self.id);
        if let Some(date) = self.captured_at {
            let _ = writeln!(out, "Prise de vue : {}", date);
        }

        let _ = writeln!(out, "\nÉquipements détectés");
        if self.equipment.is_empty() {
            let _ = writeln!(out, "  -");
        } else {
            let tags: Vec<String> = self.equipment.iter().map(|e| format!("[{}]", e)).collect();
            let _ = writeln!(out, "  {}", tags.join(" "));
        }

        if !self.anomalies.is_empty() {
            let _ = writeln!(out, "\nAnomalies NF C 16-600");
            for anomaly in &self.anomalies {
                let _ = writeln!(
                    out,
                    "  {} {} — {}",
                    anomaly.marker, anomaly.severity, anomaly.code
                );
                let _ = writeln!(out, "     {}", anomaly.description);
                let _ = writeln!(out, "     💡 Reco: {}", anomaly.recommendation);
            }
        }

        let _ = writeln!(out, "\nRésumé pour Rapport (à copier)");
        let _ = writeln!(out, "----------------------------------------");
        let _ = writeln!(out, "{}", self.summary);
        let _ = writeln!(out, "----------------------------------------");

        if !self.technical_notes.trim().is_empty() {
            let _ = writeln!(out, "\nNotes techniques");
            let _ = writeln!(out, "  {}", self.technical_notes);
        }
        out
    }

    /// Fragment HTML d'une carte
    pub fn render_html(&self) -> String {
        let mut out = String::new();
        let badge_class = if self.compliant { "badge ok" } else { "badge ko" };

        let _ = writeln!(out, r#"<article class="card" id="report-{}">"#, escape_html(self.id));
        if !self.image_url.is_empty() {
            let _ = writeln!(
                out,
                r#"  <div class="photo"><img src="{}" alt="Installation électrique"><span class="{}">{}</span></div>"#,
                escape_html(self.image_url),
                badge_class,
                self.badge
            );
        } else {
            let _ = writeln!(out, r#"  <span class="{}">{}</span>"#, badge_class, self.badge);
        }
        if let Some(date) = self.captured_at {
            let _ = writeln!(out, r#"  <p class="meta">Prise de vue : {}</p>"#, escape_html(date));
        }

        let _ = writeln!(out, "  <h3>Équipements détectés</h3>");
        let _ = writeln!(out, r#"  <div class="tags">"#);
        for item in self.equipment {
            let _ = writeln!(out, r#"    <span class="tag">{}</span>"#, escape_html(item));
        }
        let _ = writeln!(out, "  </div>");

        if !self.anomalies.is_empty() {
            let _ = writeln!(out, "  <h3>Anomalies NF C 16-600</h3>");
            for anomaly in &self.anomalies {
                let _ = writeln!(out, r#"  <div class="anomaly {}">"#, anomaly.severity.css_class());
                let _ = writeln!(
                    out,
                    r#"    <div class="anomaly-head"><strong>{}</strong><span class="severity">{} {}</span></div>"#,
                    escape_html(anomaly.code),
                    anomaly.marker,
                    anomaly.severity
                );
                let _ = writeln!(out, "    <p>{}</p>", escape_html(anomaly.description));
                let _ = writeln!(
                    out,
                    r#"    <p class="reco">💡 Reco: {}</p>"#,
                    escape_html(anomaly.recommendation)
                );
                let _ = writeln!(out, "  </div>");
            }
        }

        let _ = writeln!(out, "  <h3>Résumé pour Rapport</h3>");
        let _ = writeln!(out, r#"  <div class="summary select-all">{}</div>"#, escape_html(self.summary));

        if !self.technical_notes.trim().is_empty() {
            let _ = writeln!(out, "  <h3>Notes techniques</h3>");
            let _ = writeln!(out, r#"  <p class="notes">{}</p>"#, escape_html(self.technical_notes));
        }
        let _ = writeln!(out, "</article>");
        out
    }
}

const PRINT_STYLE: &str = r#"body{font-family:sans-serif;max-width:48rem;margin:0 auto;padding:1rem;color:#1f2937}
.card{border:1px solid #e5e7eb;border-radius:.75rem;padding:1rem;margin-bottom:1.5rem;break-inside:avoid}
.photo{position:relative}.photo img{width:100%;max-height:16rem;object-fit:cover;border-radius:.5rem}
.badge{display:inline-block;padding:.2rem .7rem;border-radius:999px;font-size:.75rem;font-weight:bold}
.photo .badge{position:absolute;top:.5rem;right:.5rem}
.ok{background:#dcfce7;color:#166534}.ko{background:#fee2e2;color:#991b1b}
h3{font-size:.8rem;text-transform:uppercase;color:#6b7280;letter-spacing:.05em}
.tag{display:inline-block;background:#eff6ff;color:#1d4ed8;padding:.15rem .5rem;margin:.1rem;border-radius:.25rem;font-size:.75rem}
.anomaly{border-left:4px solid #9ca3af;background:#f9fafb;padding:.5rem .75rem;margin:.5rem 0;border-radius:.5rem}
.anomaly.danger{border-color:#ef4444;background:#fef2f2}.anomaly.warning{border-color:#fb923c;background:#fff7ed}
.anomaly-head{display:flex;justify-content:space-between}.reco{font-style:italic;font-size:.8rem;color:#4b5563}
.summary{background:#f9fafb;border:1px solid #e5e7eb;padding:.75rem;font-family:monospace;user-select:all}
.meta{font-size:.75rem;color:#6b7280}"#;

/// Document HTML autonome, prêt pour l'impression
pub fn render_html_document(results: &[AnalysisResult], generated_on: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "<!DOCTYPE html>");
    let _ = writeln!(out, r#"<html lang="fr">"#);
    let _ = writeln!(out, "<head>");
    let _ = writeln!(out, r#"<meta charset="utf-8">"#);
    let _ = writeln!(out, "<title>{}</title>", REPORT_TITLE);
    let _ = writeln!(out, "<style>{}</style>", PRINT_STYLE);
    let _ = writeln!(out, "</head>");
    let _ = writeln!(out, "<body>");
    let _ = writeln!(out, "<header>");
    let _ = writeln!(out, "<h1>{}</h1>", REPORT_TITLE);
    let _ = writeln!(out, "<p>{} — {}</p>", REPORT_SUBTITLE, escape_html(generated_on));
    let _ = writeln!(out, "</header>");

    if results.is_empty() {
        let _ = writeln!(out, "<p>{}</p>", EMPTY_REPORTS_MESSAGE);
    }
    for result in results {
        out.push_str(&ReportCard::new(result).render_html());
    }

    let _ = writeln!(out, "</body>");
    let _ = writeln!(out, "</html>");
    out
}

/// Échappement HTML minimal (texte et attributs)
pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
