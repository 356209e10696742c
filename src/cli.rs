use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::export::ExportFormat;

#[derive(Parser)]
#[command(name = "diagelec")]
#[command(about = "Pré-diagnostic électrique NF C 16-600 assisté par IA", long_about = None)]
pub struct Cli {
    /// Sans sous-commande : session interactive
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Journal détaillé
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Modèle Gemini (remplace la configuration)
    #[arg(long, global = true)]
    pub model: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyse des photos et affiche les rapports
    Analyze {
        /// Photos ou dossiers de photos
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Enregistre les rapports en JSON
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Exporte les rapports (fichier ou dossier)
        #[arg(short, long)]
        export: Option<PathBuf>,

        /// Format d'export (html/excel/both)
        #[arg(short, long, default_value = "both")]
        format: ExportFormat,

        /// Titre des fichiers exportés
        #[arg(short, long, default_value = "diagnostic")]
        title: String,
    },

    /// Pose une question à l'assistant (sans message : mode conversation)
    Chat {
        #[arg(short, long)]
        message: Option<String>,
    },

    /// Session interactive (scan, rapports, assistant)
    Session,

    /// Affiche ou modifie la configuration
    Config {
        /// Enregistre la clé d'API
        #[arg(long)]
        set_api_key: Option<String>,

        #[arg(long)]
        show: bool,
    },
}
