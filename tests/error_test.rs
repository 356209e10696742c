//! Cas d'erreur
//!
//! Vérifie la gestion des erreurs de la CLI et leur conversion

use diagelec::error::DiagError;
use diagelec::scanner;
use std::path::Path;
use tempfile::tempdir;

/// Dossier inexistant
#[test]
fn test_scan_nonexistent_folder() {
    let result = scanner::scan_folder(Path::new("/nonexistent/path/12345"));
    assert!(result.is_err());

    let err = result.unwrap_err();
    assert!(matches!(err, DiagError::FolderNotFound(_)));
}

/// Dossier vide : pas une erreur
#[test]
fn test_scan_empty_folder() {
    let dir = tempdir().expect("Failed to create temp dir");
    let result = scanner::scan_folder(dir.path());

    assert!(result.is_ok());
    assert!(result.unwrap().is_empty());
}

/// Dossier sans image
#[test]
fn test_scan_folder_no_images() {
    let dir = tempdir().expect("Failed to create temp dir");

    std::fs::write(dir.path().join("notes.txt"), "bonjour").unwrap();
    std::fs::write(dir.path().join("data.json"), "{}").unwrap();

    let result = scanner::scan_folder(dir.path());
    assert!(result.is_ok());
    assert!(result.unwrap().is_empty());
}

/// Un fichier qui n'est pas une image est refusé au décodage
#[test]
fn test_load_image_rejects_non_image() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("faux.jpg");
    std::fs::write(&path, "pas une image").unwrap();

    let result = scanner::load_image(&path, 1568);
    assert!(matches!(result, Err(DiagError::ImageLoad(_))));
}

#[test]
fn test_error_display() {
    let errors = vec![
        DiagError::Config("réglage invalide".to_string()),
        DiagError::FileNotFound("tableau.jpg".to_string()),
        DiagError::FolderNotFound("/chemin/dossier".to_string()),
        DiagError::ImageLoad("format inconnu".to_string()),
        DiagError::NoImagesFound("dossier".to_string()),
        DiagError::Export("disque plein".to_string()),
    ];

    for err in errors {
        let display = format!("{}", err);
        assert!(!display.is_empty(), "message vide : {:?}", err);
    }
}

#[test]
fn test_error_debug() {
    let err = DiagError::Config("essai".to_string());
    let debug = format!("{:?}", err);

    assert!(debug.contains("Config"));
    assert!(debug.contains("essai"));
}

#[test]
fn test_io_error_conversion() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let err: DiagError = io_err.into();

    assert!(matches!(err, DiagError::Io(_)));
    assert!(format!("{}", err).contains("IO"));
}

#[test]
fn test_json_error_conversion() {
    let json_err = serde_json::from_str::<serde_json::Value>("{ invalid }").unwrap_err();
    let err: DiagError = json_err.into();

    assert!(matches!(err, DiagError::JsonParse(_)));
}

/// Les erreurs communes passent de façon transparente
#[test]
fn test_common_error_conversion() {
    let common_err = diagelec_common::Error::Transport("délai dépassé (60s)".to_string());
    let err: DiagError = common_err.into();

    assert!(matches!(err, DiagError::Common(_)));
    assert!(format!("{}", err).contains("délai dépassé"));
}
