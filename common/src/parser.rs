//! Lecture des réponses du modèle
//!
//! Extrait l'objet JSON du texte renvoyé puis le valide contre la forme
//! demandée (AnalysisPayload).

use crate::error::{Error, Result};
use crate::types::AnalysisPayload;

/// Extrait la partie JSON d'une réponse
///
/// Ordre d'extraction :
/// 1. bloc ```json ... ```
/// 2. objet brut {...}
/// 3. erreur
///
/// # Examples
/// ```
/// use diagelec_common::extract_json;
///
/// let response = "Voici le résultat : {\"compliant\": true}";
/// assert_eq!(extract_json(response).unwrap(), "{\"compliant\": true}");
/// ```
pub fn extract_json(response: &str) -> Result<&str> {
    if let Some(start_marker) = response.find("```json") {
        let start = start_marker + "```json".len();
        if let Some(end_offset) = response[start..].find("```") {
            let end = start + end_offset;
            return Ok(response[start..end].trim());
        }
    }

    if let Some(start) = response.find('{') {
        if let Some(end) = response.rfind('}') {
            if end >= start {
                return Ok(&response[start..=end]);
            }
        }
    }

    Err(Error::MalformedResponse("aucun objet JSON dans la réponse".into()))
}

/// Analyse la réponse de diagnostic d'une image
///
/// * texte vide → `Error::EmptyResponse`
/// * JSON invalide, champ obligatoire absent, gravité inconnue →
///   `Error::MalformedResponse`
pub fn parse_analysis_response(response: &str) -> Result<AnalysisPayload> {
    if response.trim().is_empty() {
        return Err(Error::EmptyResponse);
    }
    let json_str = extract_json(response)?;
    serde_json::from_str(json_str.trim())
        .map_err(|e| Error::MalformedResponse(format!("JSON d'analyse invalide: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Severity;

    const SAMPLE: &str = r#"{
        "equipmentDetected": ["Disjoncteur 16A"],
        "compliant": false,
        "anomalies": [
            {"description": "Conducteur nu apparent", "severity": "DANGER", "recommendation": "Isoler immédiatement"}
        ],
        "summary": "Tableau présentant un danger.",
        "technicalNotes": "Section 1.5mm² estimée"
    }"#;

    #[test]
    fn test_extract_json_with_block() {
        let response = "Voici l'analyse :\n```json\n{\"compliant\": true}\n```\nFin.";
        assert_eq!(extract_json(response).unwrap(), "{\"compliant\": true}");
    }

    #[test]
    fn test_extract_json_raw() {
        let response = r#"{"compliant": false}"#;
        assert_eq!(extract_json(response).unwrap(), response);
    }

    #[test]
    fn test_extract_json_nested_braces() {
        let response = r#"note {"anomalies": [{"code": "B.3"}], "x": {"y": 1}} fin"#;
        let json = extract_json(response).unwrap();
        assert!(json.starts_with("{\"anomalies\""));
        assert!(json.ends_with("}}"));
    }

    #[test]
    fn test_extract_json_error() {
        let result = extract_json("Pas de JSON ici.");
        assert!(matches!(result, Err(Error::MalformedResponse(_))));
    }

    #[test]
    fn test_parse_analysis_response() {
        let payload = parse_analysis_response(SAMPLE).unwrap();
        assert_eq!(payload.equipment_detected, vec!["Disjoncteur 16A"]);
        assert!(!payload.compliant);
        assert_eq!(payload.anomalies.len(), 1);
        assert_eq!(payload.anomalies[0].severity, Severity::Danger);
        assert_eq!(payload.anomalies[0].code, None);
        assert_eq!(payload.technical_notes, "Section 1.5mm² estimée");
    }

    #[test]
    fn test_parse_analysis_response_in_fence() {
        let response = format!("```json\n{}\n```", SAMPLE);
        let payload = parse_analysis_response(&response).unwrap();
        assert_eq!(payload.anomalies.len(), 1);
    }

    #[test]
    fn test_parse_preserves_every_severity() {
        let response = r#"{"equipmentDetected":[],"compliant":false,"anomalies":[
            {"code":"B.2","description":"a","severity":"INFO","recommendation":"r"},
            {"description":"b","severity":"AVERTISSEMENT","recommendation":"r"},
            {"description":"c","severity":"DANGER","recommendation":"r"}
        ],"summary":"","technicalNotes":""}"#;
        let payload = parse_analysis_response(response).unwrap();
        let severities: Vec<Severity> = payload.anomalies.iter().map(|a| a.severity).collect();
        assert_eq!(severities, vec![Severity::Info, Severity::Avertissement, Severity::Danger]);
        assert_eq!(payload.anomalies[0].code.as_deref(), Some("B.2"));
    }

    #[test]
    fn test_parse_empty_response() {
        assert!(matches!(parse_analysis_response(""), Err(Error::EmptyResponse)));
        assert!(matches!(parse_analysis_response("  \n"), Err(Error::EmptyResponse)));
    }

    #[test]
    fn test_parse_invalid_json() {
        let result = parse_analysis_response("{ equipmentDetected: [ }");
        assert!(matches!(result, Err(Error::MalformedResponse(_))));
    }

    #[test]
    fn test_parse_missing_required_field() {
        let response = r#"{"equipmentDetected":[],"compliant":true,"anomalies":[],"summary":"ok"}"#;
        assert!(matches!(
            parse_analysis_response(response),
            Err(Error::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_parse_unknown_severity() {
        let response = r#"{"equipmentDetected":[],"compliant":true,"anomalies":[
            {"description":"a","severity":"GRAVE","recommendation":"r"}
        ],"summary":"","technicalNotes":""}"#;
        assert!(matches!(
            parse_analysis_response(response),
            Err(Error::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_parse_compliant_and_anomalies_disagree() {
        let response = r#"{"equipmentDetected":[],"compliant":true,"anomalies":[
            {"description":"a","severity":"INFO","recommendation":"r"}
        ],"summary":"","technicalNotes":""}"#;
        let payload = parse_analysis_response(response).unwrap();
        assert!(payload.compliant);
        assert_eq!(payload.anomalies.len(), 1);
    }
}
