//! Types d'erreur partagés

use thiserror::Error;

/// Erreur commune
///
/// Les trois premières variantes forment la taxonomie de la passerelle IA ;
/// les suivantes sont les refus déterministes de la session.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Réponse vide de l'IA")]
    EmptyResponse,

    #[error("Réponse IA invalide: {0}")]
    MalformedResponse(String),

    #[error("Erreur de transport: {0}")]
    Transport(String),

    #[error("Image vide")]
    EmptyImage,

    #[error("Message vide")]
    EmptyMessage,

    #[error("Une analyse est déjà en cours")]
    AnalysisInProgress,

    #[error("Une question est déjà en cours de traitement")]
    ChatInProgress,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),
}

impl Error {
    /// Vrai pour les erreurs produites par la passerelle IA.
    pub fn is_gateway_error(&self) -> bool {
        matches!(
            self,
            Error::EmptyResponse | Error::MalformedResponse(_) | Error::Transport(_)
        )
    }
}

/// Alias de Result
pub type Result<T> = std::result::Result<T, Error>;
