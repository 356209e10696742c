//! DiagElec AI : pré-diagnostic électrique NF C 16-600 en ligne de commande

pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod gateway;
pub mod interactive;
pub mod logging;
pub mod scanner;
pub mod shell;
