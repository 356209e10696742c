use thiserror::Error;

#[derive(Error, Debug)]
pub enum DiagError {
    #[error("Erreur de configuration: {0}")]
    Config(String),

    #[error("Fichier introuvable: {0}")]
    FileNotFound(String),

    #[error("Dossier introuvable: {0}")]
    FolderNotFound(String),

    #[error("Lecture d'image impossible: {0}")]
    ImageLoad(String),

    #[error("Aucune image trouvée: {0}")]
    NoImagesFound(String),

    #[error("Erreur d'export: {0}")]
    Export(String),

    #[error("Erreur JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Erreur IO: {0}")]
    Io(#[from] std::io::Error),

    #[error("Erreur de saisie: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error(transparent)]
    Common(#[from] diagelec_common::Error),
}

pub type Result<T> = std::result::Result<T, DiagError>;
