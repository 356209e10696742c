//! Passerelle IA
//!
//! Deux opérations : analyse d'image (réponse JSON contrainte) et
//! continuation de conversation. Aucun état n'est conservé entre deux appels,
//! aucune nouvelle tentative n'est faite.

mod gemini;

pub use gemini::GeminiGateway;

use async_trait::async_trait;
use diagelec_common::{AnalysisPayload, ChatTurn, ImagePayload, Result};

#[async_trait]
pub trait AiGateway: Send + Sync {
    /// Analyse une photo d'installation
    ///
    /// Échoue avec `EmptyResponse`, `MalformedResponse` ou `Transport`.
    async fn analyze_image(&self, image: &ImagePayload) -> Result<AnalysisPayload>;

    /// Répond à `message` en rejouant `history`
    ///
    /// Une réponse vide devient le texte de repli ; seule `Transport` peut
    /// être renvoyée.
    async fn chat(&self, message: &str, history: &[ChatTurn]) -> Result<String>;
}
