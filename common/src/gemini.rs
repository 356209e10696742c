//! Format d'échange Gemini (generateContent)
//!
//! Seul le transport diffère entre la CLI (reqwest) et le Web (fetch) ;
//! la construction des requêtes et la lecture des réponses sont ici.

use crate::prompts::{
    ANALYSIS_TEMPERATURE, ANALYSIS_USER_PROMPT, SYSTEM_INSTRUCTION_ASSISTANT,
    SYSTEM_INSTRUCTION_DIAG,
};
use crate::types::{ChatTurn, ImagePayload, Role};
use serde::{Deserialize, Serialize};
use serde_json::json;

pub const GEMINI_API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// URL de l'appel generateContent pour un modèle
pub fn generate_content_url(base_url: &str, model: &str) -> String {
    format!("{}/models/{}:generateContent", base_url.trim_end_matches('/'), model)
}

/// Requête generateContent
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
pub struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    pub parts: Vec<Part>,
}

impl Content {
    fn text(role: Option<Role>, text: &str) -> Self {
        Self {
            role: role.map(|r| r.as_str().to_string()),
            parts: vec![Part::Text { text: text.to_string() }],
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Part {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    pub mime_type: String,
    pub data: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_schema: Option<serde_json::Value>,
}

/// Schéma JSON imposé à la réponse d'analyse
pub fn analysis_response_schema() -> serde_json::Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "equipmentDetected": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "Liste des équipements identifiés (ex: Disjoncteur 16A, ID 30mA Type AC)"
            },
            "compliant": {
                "type": "BOOLEAN",
                "description": "L'installation visible semble-t-elle conforme à première vue ?"
            },
            "anomalies": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "code": { "type": "STRING", "description": "Code anomalie estimé ou référence NF C 16-600" },
                        "description": { "type": "STRING", "description": "Description technique de l'anomalie" },
                        "severity": { "type": "STRING", "enum": ["DANGER", "AVERTISSEMENT", "INFO"] },
                        "recommendation": { "type": "STRING", "description": "Action corrective recommandée" }
                    },
                    "required": ["description", "severity", "recommendation"]
                }
            },
            "summary": {
                "type": "STRING",
                "description": "Un résumé professionnel prêt à copier-coller dans un rapport."
            },
            "technicalNotes": {
                "type": "STRING",
                "description": "Détails techniques : sections estimées, marques, calibres."
            }
        },
        "required": ["equipmentDetected", "compliant", "anomalies", "summary", "technicalNotes"]
    })
}

/// Requête d'analyse d'une photo
pub fn build_analysis_request(image: &ImagePayload, temperature: f32) -> GenerateContentRequest {
    GenerateContentRequest {
        contents: vec![Content {
            role: Some(Role::User.as_str().to_string()),
            parts: vec![
                Part::InlineData {
                    inline_data: InlineData {
                        mime_type: image.mime_type.clone(),
                        data: image.data.clone(),
                    },
                },
                Part::Text { text: ANALYSIS_USER_PROMPT.to_string() },
            ],
        }],
        system_instruction: Some(Content::text(None, SYSTEM_INSTRUCTION_DIAG)),
        generation_config: Some(GenerationConfig {
            temperature: Some(temperature),
            response_mime_type: Some("application/json".to_string()),
            response_schema: Some(analysis_response_schema()),
        }),
    }
}

/// Requête d'analyse avec la température par défaut
pub fn build_default_analysis_request(image: &ImagePayload) -> GenerateContentRequest {
    build_analysis_request(image, ANALYSIS_TEMPERATURE)
}

/// Requête de conversation : historique rejoué puis nouveau message
pub fn build_chat_request(message: &str, history: &[ChatTurn]) -> GenerateContentRequest {
    let mut contents: Vec<Content> = history
        .iter()
        .map(|turn| Content::text(Some(turn.role), &turn.text))
        .collect();
    contents.push(Content::text(Some(Role::User), message));

    GenerateContentRequest {
        contents,
        system_instruction: Some(Content::text(None, SYSTEM_INSTRUCTION_ASSISTANT)),
        generation_config: None,
    }
}

/// Réponse generateContent
#[derive(Debug, Default, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<ResponseContent>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ResponseContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ResponsePart {
    #[serde(default)]
    pub text: Option<String>,
}

impl GenerateContentResponse {
    /// Texte du premier candidat (parties concaténées), None si vide
    pub fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }
}
