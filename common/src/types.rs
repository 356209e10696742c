//! Types du domaine
//!
//! Types partagés entre la CLI et le Web (WASM) :
//! - AnalysisPayload : la partie produite par le modèle (forme JSON demandée)
//! - AnalysisResult : un rapport complet, détenu par la session
//! - ChatMessage : un tour de conversation
//! - ViewState : l'écran actif

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Gravité d'une anomalie NF C 16-600
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Danger,
    Avertissement,
    Info,
}

impl Severity {
    pub const ALL: [Severity; 3] = [Severity::Danger, Severity::Avertissement, Severity::Info];

    /// Valeur telle qu'échangée avec le modèle
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Danger => "DANGER",
            Severity::Avertissement => "AVERTISSEMENT",
            Severity::Info => "INFO",
        }
    }

    /// Marqueur textuel distinct par gravité
    pub fn marker(&self) -> &'static str {
        match self {
            Severity::Danger => "⛔",
            Severity::Avertissement => "⚠️",
            Severity::Info => "ℹ️",
        }
    }

    /// Classe CSS de la carte
    pub fn css_class(&self) -> &'static str {
        match self {
            Severity::Danger => "danger",
            Severity::Avertissement => "warning",
            Severity::Info => "info",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Anomalie détectée sur la photo
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Anomaly {
    /// Référence NF C 16-600 estimée (ex: "B.3.3.6 a2")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    pub description: String,
    pub severity: Severity,
    pub recommendation: String,
}

/// Sortie du modèle pour une image
///
/// Tous les champs sauf `Anomaly::code` sont obligatoires : un champ absent
/// rend la réponse invalide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisPayload {
    pub equipment_detected: Vec<String>,
    pub compliant: bool,
    pub anomalies: Vec<Anomaly>,
    pub summary: String,
    pub technical_notes: String,
}

/// Rapport d'analyse
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub id: String,

    /// Date de génération (ms depuis l'epoch)
    pub timestamp: i64,

    /// Data URL de la photo, conservée pour le réaffichage et l'impression
    pub image_url: String,

    /// Date de prise de vue (EXIF) quand elle est connue
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub captured_at: Option<String>,

    pub equipment_detected: Vec<String>,

    /// Jugement du modèle, conservé tel quel
    pub compliant: bool,

    pub anomalies: Vec<Anomaly>,

    /// Résumé prêt à copier dans un rapport
    pub summary: String,

    /// Sections, marques, calibres
    pub technical_notes: String,
}

impl AnalysisResult {
    pub fn from_payload(
        payload: AnalysisPayload,
        id: String,
        timestamp: i64,
        image_url: String,
        captured_at: Option<String>,
    ) -> Self {
        Self {
            id,
            timestamp,
            image_url,
            captured_at,
            equipment_detected: payload.equipment_detected,
            compliant: payload.compliant,
            anomalies: payload.anomalies,
            summary: payload.summary,
            technical_notes: payload.technical_notes,
        }
    }

    pub fn count_by_severity(&self, severity: Severity) -> usize {
        self.anomalies.iter().filter(|a| a.severity == severity).count()
    }
}

/// Rôle d'un tour de conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Model => "model",
        }
    }
}

/// Message du fil de discussion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub role: Role,
    pub text: String,
    pub timestamp: i64,
}

/// Tour d'historique rejoué vers le modèle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: Role,
    pub text: String,
}

impl From<&ChatMessage> for ChatTurn {
    fn from(message: &ChatMessage) -> Self {
        Self {
            role: message.role,
            text: message.text.clone(),
        }
    }
}

/// Écran actif
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ViewState {
    #[default]
    Scan,
    Report,
    Chat,
    /// Alias de `Report`
    AnalysisResult,
}

impl ViewState {
    /// Écrans proposés dans la barre de navigation
    pub const NAVIGABLE: [ViewState; 3] = [ViewState::Scan, ViewState::Report, ViewState::Chat];

    pub fn canonical(self) -> ViewState {
        match self {
            ViewState::AnalysisResult => ViewState::Report,
            other => other,
        }
    }

    pub fn shows_reports(self) -> bool {
        self.canonical() == ViewState::Report
    }

    pub fn label(self) -> &'static str {
        match self.canonical() {
            ViewState::Scan => "Scanner",
            ViewState::Chat => "Assistant",
            _ => "Rapport",
        }
    }

    pub fn icon(self) -> &'static str {
        match self.canonical() {
            ViewState::Scan => "📸",
            ViewState::Chat => "🤖",
            _ => "📋",
        }
    }
}

/// Image prête à être envoyée (base64 sans en-tête)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePayload {
    pub mime_type: String,
    pub data: String,
}

impl ImagePayload {
    pub const DEFAULT_MIME_TYPE: &'static str = "image/jpeg";

    pub fn new(mime_type: impl Into<String>, data: impl Into<String>) -> Result<Self> {
        let data = data.into();
        if data.trim().is_empty() {
            return Err(Error::EmptyImage);
        }
        Ok(Self {
            mime_type: mime_type.into(),
            data,
        })
    }

    /// Construit la charge utile depuis une data URL ("data:image/png;base64,...")
    /// ou depuis du base64 brut. L'en-tête est retiré.
    pub fn from_data_url(data_url: &str) -> Result<Self> {
        let mime_type = mime_type_from_data_url(data_url).unwrap_or(Self::DEFAULT_MIME_TYPE);
        Self::new(mime_type, strip_data_url_header(data_url))
    }

    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }
}

/// Retire l'en-tête "data:...;base64," s'il est présent
pub fn strip_data_url_header(data_url: &str) -> &str {
    if data_url.starts_with("data:") {
        if let Some((_, data)) = data_url.split_once(',') {
            return data;
        }
    }
    data_url
}

/// Type MIME d'une data URL, None pour du base64 brut
pub fn mime_type_from_data_url(data_url: &str) -> Option<&str> {
    let header = data_url.strip_prefix("data:")?;
    let header = header.split(',').next()?;
    let mime = header.split(';').next()?;
    if mime.is_empty() {
        None
    } else {
        Some(mime)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_serialization_is_uppercase() {
        let json = serde_json::to_string(&Severity::Avertissement).unwrap();
        assert_eq!(json, "\"AVERTISSEMENT\"");
        let parsed: Severity = serde_json::from_str("\"DANGER\"").unwrap();
        assert_eq!(parsed, Severity::Danger);
    }

    #[test]
    fn test_severity_rejects_unknown_value() {
        assert!(serde_json::from_str::<Severity>("\"CRITIQUE\"").is_err());
        assert!(serde_json::from_str::<Severity>("\"danger\"").is_err());
    }

    #[test]
    fn test_severity_markers_are_distinct() {
        let markers: std::collections::HashSet<_> =
            Severity::ALL.iter().map(|s| s.marker()).collect();
        assert_eq!(markers.len(), 3);
    }

    #[test]
    fn test_anomaly_code_is_optional() {
        let json = r#"{"description":"Prise sans terre","severity":"INFO","recommendation":"Remplacer"}"#;
        let anomaly: Anomaly = serde_json::from_str(json).unwrap();
        assert_eq!(anomaly.code, None);
        assert_eq!(anomaly.severity, Severity::Info);
    }

    #[test]
    fn test_payload_requires_every_field() {
        let json = r#"{"equipmentDetected":[],"compliant":true,"anomalies":[],"summary":"ok"}"#;
        assert!(serde_json::from_str::<AnalysisPayload>(json).is_err());
    }

    #[test]
    fn test_result_from_payload_keeps_compliant_verbatim() {
        // compliant=true avec une anomalie : les deux sont conservés
        let payload = AnalysisPayload {
            equipment_detected: vec!["Tableau".into()],
            compliant: true,
            anomalies: vec![Anomaly {
                code: None,
                description: "Étiquetage absent".into(),
                severity: Severity::Info,
                recommendation: "Étiqueter".into(),
            }],
            summary: "s".into(),
            technical_notes: "t".into(),
        };
        let result = AnalysisResult::from_payload(payload, "1".into(), 1, String::new(), None);
        assert!(result.compliant);
        assert_eq!(result.anomalies.len(), 1);
        assert_eq!(result.count_by_severity(Severity::Info), 1);
    }

    #[test]
    fn test_result_serializes_camel_case() {
        let result = AnalysisResult {
            id: "a".into(),
            timestamp: 0,
            image_url: String::new(),
            captured_at: None,
            equipment_detected: vec![],
            compliant: false,
            anomalies: vec![],
            summary: String::new(),
            technical_notes: String::new(),
        };
        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("\"imageUrl\""));
        assert!(json.contains("\"equipmentDetected\""));
        assert!(json.contains("\"technicalNotes\""));
        assert!(!json.contains("capturedAt"));
    }

    #[test]
    fn test_view_state_alias() {
        assert_eq!(ViewState::AnalysisResult.canonical(), ViewState::Report);
        assert!(ViewState::AnalysisResult.shows_reports());
        assert!(!ViewState::Chat.shows_reports());
        assert_eq!(ViewState::default(), ViewState::Scan);
    }

    #[test]
    fn test_strip_data_url_header() {
        assert_eq!(strip_data_url_header("data:image/jpeg;base64,/9j/4AAQ"), "/9j/4AAQ");
        assert_eq!(strip_data_url_header("iVBORw0KGgo="), "iVBORw0KGgo=");
    }

    #[test]
    fn test_mime_type_from_data_url() {
        assert_eq!(mime_type_from_data_url("data:image/png;base64,iVBO"), Some("image/png"));
        assert_eq!(mime_type_from_data_url("data:image/webp;base64,UklGR"), Some("image/webp"));
        assert_eq!(mime_type_from_data_url("invalid"), None);
    }

    #[test]
    fn test_image_payload_from_data_url() {
        let payload = ImagePayload::from_data_url("data:image/png;base64,iVBORw0KGgo=").unwrap();
        assert_eq!(payload.mime_type, "image/png");
        assert_eq!(payload.data, "iVBORw0KGgo=");
        assert_eq!(payload.to_data_url(), "data:image/png;base64,iVBORw0KGgo=");
    }

    #[test]
    fn test_image_payload_raw_base64_defaults_to_jpeg() {
        let payload = ImagePayload::from_data_url("/9j/4AAQ").unwrap();
        assert_eq!(payload.mime_type, "image/jpeg");
    }

    #[test]
    fn test_image_payload_rejects_empty() {
        assert!(matches!(ImagePayload::from_data_url(""), Err(Error::EmptyImage)));
        assert!(matches!(
            ImagePayload::from_data_url("data:image/jpeg;base64,"),
            Err(Error::EmptyImage)
        ));
    }
}
