//! DiagElec AI Common Library
//!
//! Types, prompts, format Gemini et logique de session partagés entre la
//! CLI et le Web (WASM).

pub mod types;
pub mod error;
pub mod prompts;
pub mod gemini;
pub mod parser;
pub mod chat;
pub mod session;
pub mod report;
pub mod export;

pub use types::{
    AnalysisPayload, AnalysisResult, Anomaly, ChatMessage, ChatTurn, ImagePayload, Role,
    Severity, ViewState,
};
pub use error::{Error, Result};
pub use parser::{extract_json, parse_analysis_response};
pub use chat::{PendingSend, Transcript};
pub use session::Session;
pub use report::{render_html_document, ReportCard};
