//! État de session (coquille de navigation)
//!
//! Machine à états partagée par la CLI et le Web :
//! - Scan --analyse réussie--> Report (rapport ajouté en tête)
//! - Scan --analyse échouée--> Scan (notice d'erreur, aucun rapport)
//! - tout écran --navigation--> écran demandé
//! - Report --suppression--> Report
//!
//! Une seule analyse à la fois : une seconde demande est refusée
//! (`Error::AnalysisInProgress`).

use crate::chat::Transcript;
use crate::error::{Error, Result};
use crate::prompts::{ANALYSIS_BUSY_MESSAGE, ANALYSIS_ERROR_MESSAGE};
use crate::types::{AnalysisPayload, AnalysisResult, ViewState};

#[derive(Debug, Clone)]
pub struct Session {
    view: ViewState,
    /// Plus récent en premier
    reports: Vec<AnalysisResult>,
    transcript: Transcript,
    error: Option<String>,
    analysis_in_flight: bool,
    next_seq: u64,
}

impl Session {
    pub fn new(now_ms: i64) -> Self {
        Self {
            view: ViewState::Scan,
            reports: Vec::new(),
            transcript: Transcript::new(now_ms),
            error: None,
            analysis_in_flight: false,
            next_seq: 0,
        }
    }

    pub fn view(&self) -> ViewState {
        self.view
    }

    /// Navigation explicite, sans condition
    pub fn navigate(&mut self, view: ViewState) {
        self.view = view;
    }

    pub fn reports(&self) -> &[AnalysisResult] {
        &self.reports
    }

    pub fn report(&self, id: &str) -> Option<&AnalysisResult> {
        self.reports.iter().find(|r| r.id == id)
    }

    pub fn report_count(&self) -> usize {
        self.reports.len()
    }

    /// Nombre total d'anomalies, tous rapports confondus
    pub fn total_anomalies(&self) -> usize {
        self.reports.iter().map(|r| r.anomalies.len()).sum()
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn transcript_mut(&mut self) -> &mut Transcript {
        &mut self.transcript
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    pub fn is_analyzing(&self) -> bool {
        self.analysis_in_flight
    }

    /// L'export n'est proposé que sur l'écran rapport, avec au moins un rapport
    pub fn can_export(&self) -> bool {
        self.view.shows_reports() && !self.reports.is_empty()
    }

    /// Réserve le créneau d'analyse
    pub fn begin_analysis(&mut self) -> Result<()> {
        if self.analysis_in_flight {
            self.error = Some(ANALYSIS_BUSY_MESSAGE.to_string());
            return Err(Error::AnalysisInProgress);
        }
        self.analysis_in_flight = true;
        self.error = None;
        Ok(())
    }

    /// Applique le résultat de la passerelle
    ///
    /// En cas de succès le rapport est ajouté en tête et l'écran passe sur
    /// Report. En cas d'échec l'erreur de la passerelle est renvoyée telle
    /// quelle et seule la notice est posée.
    pub fn complete_analysis(
        &mut self,
        outcome: Result<AnalysisPayload>,
        image_url: String,
        captured_at: Option<String>,
        now_ms: i64,
    ) -> Result<&AnalysisResult> {
        self.analysis_in_flight = false;

        let payload = match outcome {
            Ok(payload) => payload,
            Err(e) => {
                self.error = Some(ANALYSIS_ERROR_MESSAGE.to_string());
                return Err(e);
            }
        };

        self.next_seq += 1;
        let id = format!("{}-{}", now_ms, self.next_seq);
        let report = AnalysisResult::from_payload(payload, id, now_ms, image_url, captured_at);

        self.reports.insert(0, report);
        self.view = ViewState::Report;
        Ok(&self.reports[0])
    }

    /// L'utilisateur a quitté l'action en attente : rien n'est ajouté
    pub fn abandon_analysis(&mut self) {
        self.analysis_in_flight = false;
    }

    /// Supprime un rapport ; l'ordre des autres est conservé
    pub fn delete_report(&mut self, id: &str) -> bool {
        let before = self.reports.len();
        self.reports.retain(|r| r.id != id);
        self.reports.len() != before
    }
}
