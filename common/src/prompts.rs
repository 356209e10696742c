//! Prompts et messages fixes
//!
//! Partagés entre la CLI et le Web (WASM) :
//! - SYSTEM_INSTRUCTION_DIAG : consigne du diagnostic photo
//! - SYSTEM_INSTRUCTION_ASSISTANT : consigne de l'assistant conversationnel
//! - messages affichés à l'utilisateur (accueil, repli, erreurs)

/// Consigne système pour l'analyse d'image
pub const SYSTEM_INSTRUCTION_DIAG: &str = r#"Tu es un expert diagnostiqueur électrique senior en France, spécialiste de la norme NF C 16-600.
Ton rôle est d'analyser des photos d'installations électriques résidentielles pour générer un pré-rapport de diagnostic.

Tes objectifs :
1. Identifier les composants visibles (AGCP, Tableau, Disjoncteurs, Fusibles, Différentiels, Prises, Liaisons équipotentielles).
2. Relever les marques et calibres visibles (ex: Schneider 16A, Legrand 30mA).
3. Détecter les anomalies strictement selon les 6 points de sécurité de la norme NF C 16-600 :
   - Point 1 : Appareil Général de Commande et de Protection (AGCP).
   - Point 2 : Prise de terre et installation de mise à la terre.
   - Point 3 : Tableau électrique (protection surintensités).
   - Point 4 : Liaison équipotentielle dans les pièces d'eau (Zones 0, 1, 2).
   - Point 5 : Matériels vétustes ou inadaptés.
   - Point 6 : Protection contre les contacts directs (conducteurs nus, boîtiers cassés).
4. Vérifier la cohérence section/calibre (ex: 1.5mm² sur 10A/16A, 2.5mm² sur 16A/20A, 6mm² sur 32A).

Règles impératives :
- Sois factuel et technique.
- Utilise le vocabulaire officiel du diagnostic (Anomalie, Mesure compensatoire, Domaine BT).
- Si une photo est floue ou insuffisante, précise-le.
- ALERTE ROUGE si danger de mort immédiat (pièces nues sous tension accessibles)."#;

/// Consigne système pour l'assistant
pub const SYSTEM_INSTRUCTION_ASSISTANT: &str = r#"Tu es un assistant expert en électricité pour un diagnostiqueur sur le terrain.
Réponds aux questions techniques concernant la norme NF C 16-600, les sections de câbles, et les règles de l'art.
Sois concis, direct et précis. Le diagnostiqueur est pressé.
Exemple: "Oui, pour un disjoncteur 63A, il faut du 16mm² minimum en cuivre.""#;

/// Texte utilisateur joint à chaque photo
pub const ANALYSIS_USER_PROMPT: &str =
    "Analyse cette installation électrique selon la norme NF C 16-600. Détecte les anomalies et les risques.";

/// Température de l'analyse (réponses factuelles)
pub const ANALYSIS_TEMPERATURE: f32 = 0.2;

/// Premier message du fil de discussion
pub const CHAT_WELCOME_MESSAGE: &str = "Bonjour ! Je suis votre assistant NF C 16-600. Une question sur une section de câble, un volume de salle de bain ou une anomalie ?";

/// Réponse de repli quand le modèle ne renvoie rien
pub const CHAT_FALLBACK_REPLY: &str = "Désolé, je n'ai pas compris.";

/// Tour ajouté au fil quand l'appel échoue
pub const CHAT_ERROR_MESSAGE: &str = "Erreur de connexion. Veuillez réessayer.";

/// Notice affichée quand l'analyse échoue
pub const ANALYSIS_ERROR_MESSAGE: &str =
    "Impossible d'analyser la photo. Vérifiez votre clé API ou la connexion.";

/// Notice affichée quand une seconde photo arrive pendant une analyse
pub const ANALYSIS_BUSY_MESSAGE: &str =
    "Une analyse est déjà en cours. Patientez avant d'envoyer une nouvelle photo.";

/// Titre du document imprimé
pub const REPORT_TITLE: &str = "Rapport de Diagnostic Électrique";

/// Sous-titre du document imprimé
pub const REPORT_SUBTITLE: &str = "Généré par DiagElec AI - NF C 16-600";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diag_instruction_covers_six_points() {
        for point in 1..=6 {
            assert!(
                SYSTEM_INSTRUCTION_DIAG.contains(&format!("Point {} :", point)),
                "point {} absent",
                point
            );
        }
        assert!(SYSTEM_INSTRUCTION_DIAG.contains("AGCP"));
    }

    #[test]
    fn test_assistant_instruction_mentions_standard() {
        assert!(SYSTEM_INSTRUCTION_ASSISTANT.contains("NF C 16-600"));
    }

    #[test]
    fn test_fallback_and_error_messages_are_not_empty() {
        assert!(!CHAT_FALLBACK_REPLY.trim().is_empty());
        assert!(!CHAT_ERROR_MESSAGE.trim().is_empty());
        assert_ne!(CHAT_FALLBACK_REPLY, CHAT_ERROR_MESSAGE);
    }
}
